//! Platform abstraction layer
//!
//! The render loop is a self-rescheduling frame callback. [`RenderLoop`]
//! makes it stoppable: every tick checks a shared [`LoopHandle`] before
//! running and before asking the host for another frame.

#[cfg(target_arch = "wasm32")]
pub mod web;

use std::cell::Cell;
use std::rc::Rc;

/// Cancel handle for a running render loop
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    stopped: Rc<Cell<bool>>,
}

impl LoopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop rescheduling; the current tick (if any) still completes
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    /// Allow ticking again. Returns true if the loop had been stopped, in
    /// which case the host must schedule a new frame.
    pub fn resume(&self) -> bool {
        self.stopped.replace(false)
    }

    pub fn is_running(&self) -> bool {
        !self.stopped.get()
    }
}

/// Frame loop that ticks until its handle is stopped
pub struct RenderLoop {
    handle: LoopHandle,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            handle: LoopHandle::new(),
            frames: 0,
        }
    }

    /// Handle that can stop this loop from any callback
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Frames ticked so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame. Returns whether the loop wants another one.
    pub fn tick<F: FnMut(u64)>(&mut self, frame: &mut F) -> bool {
        if !self.handle.is_running() {
            return false;
        }
        frame(self.frames);
        self.frames += 1;
        self.handle.is_running()
    }

    /// Drive at most `max_ticks` frames synchronously (headless runs and tests).
    /// Returns the number of frames executed.
    pub fn run_ticks<F: FnMut(u64)>(&mut self, max_ticks: u64, mut frame: F) -> u64 {
        let start = self.frames;
        for _ in 0..max_ticks {
            if !self.tick(&mut frame) {
                break;
            }
        }
        self.frames - start
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}
