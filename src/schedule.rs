//! Cancellable timer-driven state machines.
//!
//! A behavior that used to reschedule itself from inside its own timer callback
//! is expressed as a [`Ticker`]: one `tick` transition that returns what to show
//! and how long to wait before the next tick. [`drive`] runs a ticker against any
//! wait function, so the browser passes `setTimeout`/`requestAnimationFrame`
//! futures and tests pass Tokio's paused clock. [`TaskSet`] owns the abort
//! handles of every spawned loop and cancels them all when dropped.

use futures_util::future::{AbortHandle, Abortable};
use futures_util::FutureExt;
use std::future::Future;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick<F> {
    /// Show the frame, then wait before ticking again.
    Continue(F, Duration),
    /// Show the frame and stop.
    Finish(F),
}

pub trait Ticker {
    type Frame;

    fn tick(&mut self) -> Tick<Self::Frame>;
}

/// Runs `ticker` until it finishes or `render` breaks.
///
/// `render` breaking is how a loop notices its target element is gone.
pub async fn drive<T, W, Fut, R>(mut ticker: T, mut wait: W, mut render: R)
where
    T: Ticker,
    W: FnMut(Duration) -> Fut,
    Fut: Future<Output = ()>,
    R: FnMut(T::Frame) -> ControlFlow<()>,
{
    loop {
        match ticker.tick() {
            Tick::Continue(frame, delay) => {
                if render(frame).is_break() {
                    return;
                }
                wait(delay).await;
            }
            Tick::Finish(frame) => {
                let _ = render(frame);
                return;
            }
        }
    }
}

struct Tracked {
    handle: AbortHandle,
    done: Arc<AtomicBool>,
}

impl Tracked {
    fn is_live(&self) -> bool {
        !self.handle.is_aborted() && !self.done.load(Ordering::Acquire)
    }
}

/// Abort handles for every task a behavior has spawned. Handles of tasks that
/// finished or were aborted are pruned on the next `track`.
#[derive(Default)]
pub struct TaskSet {
    handles: Vec<Tracked>,
}

impl TaskSet {
    /// Wraps `task` so that [`TaskSet::abort_all`] (or dropping the set) stops it
    /// at its next suspension point. The caller spawns the returned future.
    pub fn track<F>(&mut self, task: F) -> impl Future<Output = ()>
    where
        F: Future<Output = ()>,
    {
        self.handles.retain(Tracked::is_live);
        let (handle, registration) = AbortHandle::new_pair();
        let done = Arc::new(AtomicBool::new(false));
        self.handles.push(Tracked {
            handle,
            done: done.clone(),
        });
        Abortable::new(task, registration).map(move |_| done.store(true, Ordering::Release))
    }

    pub fn abort_all(&mut self) {
        for tracked in self.handles.drain(..) {
            tracked.handle.abort();
        }
    }

    /// Tasks that are still running.
    pub fn len(&self) -> usize {
        self.handles.iter().filter(|tracked| tracked.is_live()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for TaskSet {
    fn drop(&mut self) {
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use tokio::time::{sleep, Instant};

    struct Countdown(u32);

    impl Ticker for Countdown {
        type Frame = u32;

        fn tick(&mut self) -> Tick<u32> {
            if self.0 == 0 {
                return Tick::Finish(0);
            }
            self.0 -= 1;
            Tick::Continue(self.0 + 1, Duration::from_millis(10))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn drive_waits_between_frames_and_stops_on_finish() {
        let started = Instant::now();
        let mut frames = Vec::new();

        drive(Countdown(3), sleep, |frame| {
            frames.push((frame, started.elapsed().as_millis()));
            ControlFlow::Continue(())
        })
        .await;

        assert_eq!(frames, vec![(3, 0), (2, 10), (1, 20), (0, 30)]);
    }

    #[tokio::test(start_paused = true)]
    async fn drive_stops_when_render_breaks() {
        let mut rendered = 0;

        drive(Countdown(10), sleep, |_| {
            rendered += 1;
            if rendered == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .await;

        assert_eq!(rendered, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn aborting_task_set_stops_pending_ticks() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let mut tasks = TaskSet::default();

        for _ in 0..2 {
            let ticks = ticks.clone();
            tokio::spawn(tasks.track(async move {
                loop {
                    sleep(Duration::from_millis(100)).await;
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            }));
        }
        assert_eq!(tasks.len(), 2);

        sleep(Duration::from_millis(250)).await;
        let before_abort = ticks.load(Ordering::SeqCst);
        assert_eq!(before_abort, 4);

        tasks.abort_all();
        assert!(tasks.is_empty());
        sleep(Duration::from_secs(1)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), before_abort);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_task_set_aborts() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let join = {
            let mut tasks = TaskSet::default();
            let ticks = ticks.clone();
            tokio::spawn(tasks.track(async move {
                sleep(Duration::from_millis(50)).await;
                ticks.fetch_add(1, Ordering::SeqCst);
            }))
        };

        join.await.expect("aborted task still joins cleanly");
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_tasks_release_their_handles() {
        let mut tasks = TaskSet::default();

        for _ in 0..1_000 {
            tokio::spawn(tasks.track(async {}))
                .await
                .expect("tracked task joins");
        }
        assert!(tasks.is_empty());

        let _pending = tasks.track(async {});
        assert_eq!(tasks.handles.len(), 1, "finished handles are pruned on the next track");
        assert_eq!(tasks.len(), 1);
    }
}
