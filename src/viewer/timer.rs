use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Step `n` of the run has elapsed, counting from 1.
    Step(u32),
    Completed,
}

/// Stops an [`AutoAdvance`] from anywhere, including another task.
#[derive(Clone)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    abort: AbortHandle,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Fixed-step countdown driving the viewer's progress bar.
///
/// Emits `Step(1)..=Step(steps)` one step duration apart, then
/// `Completed`. Once cancelled, [`next`](Self::next) yields `None` for
/// good, even for events already queued.
pub struct AutoAdvance {
    steps: u32,
    rx: mpsc::Receiver<TimerEvent>,
    handle: CancelHandle,
}

impl AutoAdvance {
    /// Start the countdown. Must be called inside a tokio runtime.
    pub fn start(steps: u32, step: Duration) -> Self {
        let (tx, rx) = mpsc::channel(steps as usize + 1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let task = tokio::spawn(async move {
            for n in 1..=steps {
                tokio::time::sleep(step).await;
                if flag.load(Ordering::SeqCst) || tx.send(TimerEvent::Step(n)).await.is_err() {
                    return;
                }
            }
            if !flag.load(Ordering::SeqCst) {
                let _ = tx.send(TimerEvent::Completed).await;
            }
        });

        Self {
            steps,
            rx,
            handle: CancelHandle {
                cancelled,
                abort: task.abort_handle(),
            },
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_cancelled()
    }

    /// Wait for the next event; `None` after completion or cancellation.
    pub async fn next(&mut self) -> Option<TimerEvent> {
        if self.is_cancelled() {
            return None;
        }
        let event = self.rx.recv().await?;
        if self.is_cancelled() {
            return None;
        }
        Some(event)
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.handle.abort.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn test_runs_all_steps_then_completes() {
        let mut timer = AutoAdvance::start(3, STEP);
        let start = tokio::time::Instant::now();

        assert_eq!(timer.next().await, Some(TimerEvent::Step(1)));
        assert_eq!(timer.next().await, Some(TimerEvent::Step(2)));
        assert_eq!(timer.next().await, Some(TimerEvent::Step(3)));
        assert_eq!(timer.next().await, Some(TimerEvent::Completed));
        assert_eq!(timer.next().await, None);
        assert!(start.elapsed() >= STEP * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_second_step_silences_timer() {
        let mut timer = AutoAdvance::start(5, STEP);
        assert_eq!(timer.next().await, Some(TimerEvent::Step(1)));
        assert_eq!(timer.next().await, Some(TimerEvent::Step(2)));

        timer.cancel();
        tokio::time::sleep(STEP * 10).await;

        assert!(timer.is_cancelled());
        assert_eq!(timer.next().await, None);
        assert_eq!(timer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_from_other_task() {
        let mut timer = AutoAdvance::start(10, STEP);
        let handle = timer.cancel_handle();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            handle.cancel();
        });

        let mut events = Vec::new();
        while let Some(event) = timer.next().await {
            events.push(event);
        }
        assert_eq!(events, vec![TimerEvent::Step(1), TimerEvent::Step(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_steps_completes_immediately() {
        let mut timer = AutoAdvance::start(0, STEP);
        assert_eq!(timer.next().await, Some(TimerEvent::Completed));
        assert_eq!(timer.next().await, None);
    }
}
