//! Frame and timer scheduling.
//!
//! The game loop never blocks: it asks the host for the next frame once per
//! tick and registers one-shot deferred tasks. `FrameClock` is the host side,
//! driven by a millisecond clock that the caller advances, so the same code
//! runs against wall time in the terminal and against a virtual clock in tests.

use std::time::Duration;

/// Work the loop defers to a later frame boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Bring the ship back and reset score and difficulty. Only the task
    /// carrying the latest deactivation generation takes effect.
    ReactivateShip { generation: u64 },
}

pub trait FrameScheduler {
    fn schedule_next_frame(&mut self);
    fn schedule_delayed(&mut self, task: DeferredTask, delay: Duration);
}

#[derive(Debug, Default)]
pub struct FrameClock {
    now: Duration,
    frame_requested: bool,
    pending: Vec<(Duration, DeferredTask)>,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Consumes the pending frame request, if any.
    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    /// Removes and returns every task whose deadline has passed, oldest first.
    pub fn take_due(&mut self) -> Vec<DeferredTask> {
        let now = self.now;
        let mut due: Vec<(Duration, DeferredTask)> = Vec::new();
        self.pending.retain(|&(deadline, task)| {
            if deadline <= now {
                due.push((deadline, task));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|&(deadline, _)| deadline);
        due.into_iter().map(|(_, task)| task).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameClock {
    fn schedule_next_frame(&mut self) {
        self.frame_requested = true;
    }

    fn schedule_delayed(&mut self, task: DeferredTask, delay: Duration) {
        self.pending.push((self.now + delay, task));
    }
}
