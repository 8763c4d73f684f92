//! Full-screen story viewer session.

pub mod timer;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::app::Result;
use crate::domain::Story;
use crate::store::Ledger;

pub use timer::{AutoAdvance, CancelHandle, TimerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerTiming {
    pub total: Duration,
    pub step: Duration,
    /// Pause between the last step and the automatic dismissal.
    pub dismiss_delay: Duration,
}

impl Default for ViewerTiming {
    fn default() -> Self {
        Self {
            total: Duration::from_millis(3000),
            step: Duration::from_millis(100),
            dismiss_delay: Duration::from_millis(300),
        }
    }
}

impl ViewerTiming {
    pub fn total_steps(&self) -> u32 {
        let step = self.step.as_millis().max(1);
        u32::try_from(self.total.as_millis() / step).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    Progress { step: u32, total: u32 },
    /// The timer ran out; the viewer should dismiss itself.
    Finished,
}

pub struct ViewerSession {
    ledger: Arc<dyn Ledger + Send + Sync>,
    story: Story,
    progress: u32,
    timing: ViewerTiming,
    timer: Option<AutoAdvance>,
}

impl ViewerSession {
    /// Open the viewer on `story`.
    ///
    /// Picks up the persisted like state, records the view, and only then
    /// starts the auto-advance timer. Must be called inside a tokio
    /// runtime, since the timer runs as a spawned task.
    pub fn open(
        ledger: Arc<dyn Ledger + Send + Sync>,
        story: Story,
        timing: ViewerTiming,
    ) -> Result<Self> {
        let is_liked = ledger.is_liked(&story.id)?;
        let story = story.with_liked(is_liked);
        if ledger.mark_viewed(&story)? {
            info!("Marked story {} as viewed", story.id);
        }

        let timer = AutoAdvance::start(timing.total_steps(), timing.step);
        Ok(Self {
            ledger,
            story,
            progress: 0,
            timing,
            timer: Some(timer),
        })
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn is_liked(&self) -> bool {
        self.story.is_liked
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn total_steps(&self) -> u32 {
        self.timing.total_steps()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn timing(&self) -> ViewerTiming {
        self.timing
    }

    pub fn toggle_like(&mut self) -> Result<bool> {
        let liked = self.ledger.toggle_liked(&self.story)?;
        self.story = self.story.with_liked(liked);
        info!("Story {} liked: {}", self.story.id, liked);
        Ok(liked)
    }

    pub async fn next_event(&mut self) -> Option<ViewerEvent> {
        let event = self.timer.as_mut()?.next().await;
        match event {
            Some(TimerEvent::Step(step)) => {
                self.progress = step;
                Some(ViewerEvent::Progress {
                    step,
                    total: self.total_steps(),
                })
            }
            Some(TimerEvent::Completed) => {
                self.timer = None;
                Some(ViewerEvent::Finished)
            }
            None => {
                self.timer = None;
                None
            }
        }
    }

    /// Wait out the timer and the dismiss delay.
    ///
    /// Returns false when the timer was cancelled before finishing.
    pub async fn play_to_end(&mut self) -> bool {
        while let Some(event) = self.next_event().await {
            if event == ViewerEvent::Finished {
                tokio::time::sleep(self.timing.dismiss_delay).await;
                return true;
            }
        }
        false
    }

    /// Close the viewer, stopping the timer. Returns the final story state.
    pub fn close(mut self) -> Story {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        info!("Closed viewer for story {}", self.story.id);
        self.story
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JsonLedger;

    fn story(id: &str) -> Story {
        Story::parse(id, format!("User {}", id), &format!("https://i.pravatar.cc/300?u={}", id))
            .unwrap()
    }

    fn fast() -> ViewerTiming {
        ViewerTiming {
            total: Duration::from_millis(500),
            step: Duration::from_millis(100),
            dismiss_delay: Duration::from_millis(50),
        }
    }

    #[test]
    fn test_default_timing_has_thirty_steps() {
        assert_eq!(ViewerTiming::default().total_steps(), 30);
    }

    #[test]
    fn test_huge_timing_saturates_step_count() {
        let timing = ViewerTiming {
            total: Duration::from_secs(u64::MAX / 1000),
            step: Duration::from_millis(1),
            dismiss_delay: Duration::ZERO,
        };
        assert_eq!(timing.total_steps(), u32::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_marks_viewed_before_timer() {
        let ledger = Arc::new(JsonLedger::in_memory());
        let session = ViewerSession::open(ledger.clone(), story("1"), fast()).unwrap();

        assert!(ledger.is_viewed("1").unwrap());
        assert_eq!(session.progress(), 0);
        assert!(session.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_open_picks_up_persisted_like() {
        let ledger = Arc::new(JsonLedger::in_memory());
        ledger.toggle_liked(&story("2")).unwrap();

        let session = ViewerSession::open(ledger, story("2"), fast()).unwrap();
        assert!(session.is_liked());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_like_updates_story() {
        let ledger = Arc::new(JsonLedger::in_memory());
        let mut session = ViewerSession::open(ledger.clone(), story("3"), fast()).unwrap();

        assert!(session.toggle_like().unwrap());
        assert!(session.story().is_liked);
        assert!(ledger.is_liked("3").unwrap());

        assert!(!session.toggle_like().unwrap());
        assert!(!session.close().is_liked);
    }

    #[tokio::test(start_paused = true)]
    async fn test_plays_to_end() {
        let ledger = Arc::new(JsonLedger::in_memory());
        let mut session = ViewerSession::open(ledger, story("4"), fast()).unwrap();

        assert!(session.play_to_end().await);
        assert_eq!(session.progress(), 5);
        assert!(!session.is_running());
        assert_eq!(session.next_event().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_events_count_up() {
        let ledger = Arc::new(JsonLedger::in_memory());
        let mut session = ViewerSession::open(ledger, story("5"), fast()).unwrap();

        assert_eq!(
            session.next_event().await,
            Some(ViewerEvent::Progress { step: 1, total: 5 })
        );
        assert_eq!(
            session.next_event().await,
            Some(ViewerEvent::Progress { step: 2, total: 5 })
        );
        let story = session.close();
        assert_eq!(story.id, "5");
    }
}
