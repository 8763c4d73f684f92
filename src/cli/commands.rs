use std::io::Write;

use crate::app::{AppContext, Result, StoryError};
use crate::domain::{FeedPost, Story};
use crate::feed::StoryFeed;
use crate::viewer::ViewerEvent;

const HOME_POSTS: usize = 5;
const PROGRESS_WIDTH: u32 = 30;

pub fn story_line(story: &Story) -> String {
    let ring = if story.is_viewed { " " } else { "●" };
    let heart = if story.is_liked { "♥" } else { " " };
    format!("{} {} {:>4}  {}", ring, heart, story.id, story.username)
}

fn progress_bar(step: u32, total: u32) -> String {
    let filled = if total == 0 {
        PROGRESS_WIDTH
    } else {
        let filled = u64::from(step.min(total)) * u64::from(PROGRESS_WIDTH) / u64::from(total);
        filled as u32
    };
    format!(
        "[{}{}]",
        "=".repeat(filled as usize),
        " ".repeat((PROGRESS_WIDTH - filled) as usize)
    )
}

/// Load pages until `id` shows up or the source runs dry.
async fn find_story(feed: &mut StoryFeed, id: &str) -> Result<Story> {
    loop {
        if let Some(story) = feed.story(id) {
            return Ok(story.clone());
        }
        if !feed.has_more_pages() {
            return Err(StoryError::StoryNotFound(id.to_string()));
        }
        feed.load_more().await?;
    }
}

pub async fn home(ctx: &AppContext) -> Result<()> {
    let mut feed = ctx.feed();
    feed.load_more().await?;

    let strip: Vec<String> = feed
        .stories()
        .iter()
        .map(|s| {
            let ring = if s.is_viewed { "( )" } else { "(●)" };
            format!("{} {}", ring, s.username)
        })
        .collect();
    println!("Stories: {}", strip.join("  "));
    if feed.has_more_pages() {
        println!("         … more with `storyreel list`");
    }
    println!();

    for post in FeedPost::placeholders(HOME_POSTS) {
        println!("[{}] {}\n    {}", post.color, post.title, post.description);
    }
    Ok(())
}

pub async fn list_stories(ctx: &AppContext, pages: Option<usize>) -> Result<()> {
    let mut feed = ctx.feed();
    match pages {
        Some(n) => {
            for _ in 0..n {
                if !feed.has_more_pages() {
                    break;
                }
                feed.load_more().await?;
            }
        }
        None => {
            feed.load_all().await?;
        }
    }

    if feed.stories().is_empty() {
        println!("No stories");
        return Ok(());
    }

    for story in feed.stories() {
        println!("{}", story_line(story));
    }
    Ok(())
}

pub async fn view_story(ctx: &AppContext, id: &str, like: bool) -> Result<()> {
    let mut feed = ctx.feed();
    let story = find_story(&mut feed, id).await?;

    let mut session = ctx.open_viewer(story)?;
    println!("Viewing {} ({})", session.story().username, session.story().image_url);

    if like {
        let liked = session.toggle_like()?;
        println!("{}", if liked { "♥ Liked" } else { "♡ Unliked" });
    }

    let mut stdout = std::io::stdout();
    while let Some(event) = session.next_event().await {
        match event {
            ViewerEvent::Progress { step, total } => {
                print!("\r{}", progress_bar(step, total));
                stdout.flush()?;
            }
            ViewerEvent::Finished => {
                println!();
                tokio::time::sleep(session.timing().dismiss_delay).await;
                break;
            }
        }
    }
    session.close();

    feed.viewer_dismissed();
    if let Some(story) = feed.story(id) {
        println!("{}", story_line(story));
    }
    Ok(())
}

pub async fn like_story(ctx: &AppContext, id: &str) -> Result<()> {
    let mut feed = ctx.feed();
    let story = find_story(&mut feed, id).await?;

    let liked = ctx.ledger.toggle_liked(&story)?;
    println!(
        "{} {}",
        if liked { "Liked" } else { "Unliked" },
        story.username
    );
    Ok(())
}

pub fn show_ledger(ctx: &AppContext) -> Result<()> {
    let records = ctx.ledger.load_all()?;

    if records.is_empty() {
        println!("No viewed stories");
        return Ok(());
    }

    for record in records {
        println!(
            "{} {:>4}  {:<12} viewed {}",
            if record.is_liked { "♥" } else { " " },
            record.id,
            record.username,
            record.viewed_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

pub fn clear_ledger(ctx: &AppContext) -> Result<()> {
    ctx.ledger.clear_all()?;
    println!("Cleared viewed stories");
    Ok(())
}
