use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storyreel::app::AppContext;
use storyreel::cli::{commands, Cli, Commands};
use storyreel::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config, cli.ledger, cli.source.as_deref())?;

    match cli.command {
        Commands::Home => {
            commands::home(&ctx).await?;
        }
        Commands::List { pages } => {
            commands::list_stories(&ctx, pages).await?;
        }
        Commands::View { id, like } => {
            commands::view_story(&ctx, &id, like).await?;
        }
        Commands::Like { id } => {
            commands::like_story(&ctx, &id).await?;
        }
        Commands::Ledger => match commands::show_ledger(&ctx) {
            Err(e) if e.is_corrupt_ledger() => {
                eprintln!("{}\nRun `storyreel clear` to start a fresh ledger.", e);
            }
            other => other?,
        },
        Commands::Clear => {
            commands::clear_ledger(&ctx)?;
        }
    }

    Ok(())
}
