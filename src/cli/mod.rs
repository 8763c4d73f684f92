pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "storyreel")]
#[command(about = "A story strip with a persistent viewed/liked ledger", long_about = None)]
pub struct Cli {
    /// Ledger file to use instead of the configured one
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Story source: "bundled", a JSON file path, or an http(s) URL
    #[arg(long, global = true)]
    pub source: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home screen: story strip and feed
    Home,
    /// List stories with their viewed/liked state
    List {
        /// Number of pages to load (default: all)
        #[arg(short, long)]
        pages: Option<usize>,
    },
    /// Open a story in the viewer and let it play out
    View {
        /// Story identifier
        id: String,
        /// Toggle the like while the story is open
        #[arg(long)]
        like: bool,
    },
    /// Toggle the like on a story
    Like {
        /// Story identifier
        id: String,
    },
    /// Print the viewed/liked ledger
    Ledger,
    /// Wipe the ledger
    Clear,
}
