use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// How host frames are turned into simulation ticks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickSource {
    /// Exactly one tick per host frame, whatever the frame duration.
    /// Per-tick speeds then scale with the display refresh rate.
    #[default]
    PerFrame,
    /// Fixed-rate ticks fed by an accumulator of frame time.
    Fixed { dt: f32 },
}

/// Fixed timestep accumulator.
/// Keeps the tick rate constant regardless of frame time.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    /// Cap on ticks per frame to avoid a spiral of death after a stall.
    pub const MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of ticks to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * Self::MAX_STEPS as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Lifecycle of one scene's frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Init,
    Running,
    Stopped,
}

/// Cloneable handle that stops a scene's frame loop from outside it
/// (page teardown, tests). Stopping is permanent.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Rc<Cell<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stopped.set(true);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }
}

/// Turns host frame callbacks into simulation ticks and tracks lifecycle.
pub struct FrameScheduler {
    source: TickSource,
    timestep: Option<FixedTimestep>,
    state: SceneState,
    stop: StopHandle,
    ticks: u64,
}

impl FrameScheduler {
    pub fn new(source: TickSource) -> Self {
        let timestep = match source {
            TickSource::PerFrame => None,
            TickSource::Fixed { dt } => Some(FixedTimestep::new(dt)),
        };
        Self {
            source,
            timestep,
            state: SceneState::Init,
            stop: StopHandle::default(),
            ticks: 0,
        }
    }

    /// Move from `Init` to `Running`. Has no effect once stopped.
    pub fn start(&mut self) {
        if self.state == SceneState::Init && !self.stop.is_stopped() {
            self.state = SceneState::Running;
        }
    }

    pub fn stop(&mut self) {
        self.stop.stop();
        self.state = SceneState::Stopped;
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current state, folding in any stop requested through a handle.
    pub fn state(&mut self) -> SceneState {
        if self.stop.is_stopped() {
            self.state = SceneState::Stopped;
        }
        self.state
    }

    pub fn is_running(&mut self) -> bool {
        self.state() == SceneState::Running
    }

    /// Number of ticks to run for a host frame of `frame_dt` seconds.
    /// Zero unless running.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let steps = match &mut self.timestep {
            None => 1,
            Some(ts) => ts.accumulate(frame_dt),
        };
        self.ticks += steps as u64;
        steps
    }

    pub fn source(&self) -> TickSource {
        self.source
    }

    /// Total ticks issued since start.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn caps_at_ten_steps() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0), 10);
    }

    #[test]
    fn per_frame_source_ticks_once_regardless_of_dt() {
        let mut s = FrameScheduler::new(TickSource::PerFrame);
        s.start();
        assert_eq!(s.frame(0.001), 1);
        assert_eq!(s.frame(0.5), 1);
        assert_eq!(s.ticks(), 2);
    }

    #[test]
    fn no_ticks_before_start() {
        let mut s = FrameScheduler::new(TickSource::PerFrame);
        assert_eq!(s.state(), SceneState::Init);
        assert_eq!(s.frame(0.016), 0);
    }

    #[test]
    fn stop_handle_halts_the_loop() {
        let mut s = FrameScheduler::new(TickSource::Fixed { dt: 0.25 });
        s.start();
        let handle = s.stop_handle();
        assert_eq!(s.frame(0.5), 2);
        handle.stop();
        assert_eq!(s.frame(0.5), 0);
        assert_eq!(s.state(), SceneState::Stopped);
        // Stopped is terminal.
        s.start();
        assert_eq!(s.state(), SceneState::Stopped);
    }
}
