//! Tick scheduling.
//!
//! The original sandbox advanced one simulation step per display-refresh
//! callback, so simulation speed followed the host's frame rate. That
//! behavior is kept as the default (`TickPacing::PerFrame`); hosts that
//! want refresh-rate independence opt into a fixed-timestep accumulator.
//! The browser-side callback plumbing (requestAnimationFrame, cancellation)
//! lives in the web bridge; this module owns everything that can run
//! headless: pacing, the stop flag, and the once-per-frame snapshot read.

use serde::Deserialize;

use crate::core::world::World;
use crate::input::snapshot::InputState;

/// How frame callbacks translate into simulation steps.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TickPacing {
    /// Exactly one step per frame callback, elapsed time ignored.
    PerFrame,
    /// Accumulate frame time and step in fixed `dt`-second increments.
    Fixed { dt: f32 },
}

/// Turns frame deltas into step counts according to the pacing mode.
#[derive(Debug)]
pub struct FramePacer {
    pacing: TickPacing,
    accumulator: f32,
}

impl FramePacer {
    pub fn new(pacing: TickPacing) -> Self {
        Self {
            pacing,
            accumulator: 0.0,
        }
    }

    /// Number of steps to run for a frame that took `frame_dt` seconds.
    pub fn steps(&mut self, frame_dt: f32) -> u32 {
        match self.pacing {
            TickPacing::PerFrame => 1,
            TickPacing::Fixed { dt } => {
                self.accumulator += frame_dt;
                // Cap to prevent spiral of death (max 10 steps per frame)
                self.accumulator = self.accumulator.min(dt * 10.0);
                let steps = (self.accumulator / dt) as u32;
                self.accumulator -= steps as f32 * dt;
                steps
            }
        }
    }
}

/// Drives the world from the host's per-frame callbacks.
///
/// Owns the world and the input state: one `frame` call reads the input
/// snapshot once and applies it to every step run this frame. A stopped
/// scheduler never advances the world: the owner of a torn-down view must
/// call `stop`, or ticking continues against orphaned state.
pub struct Scheduler {
    world: World,
    input: InputState,
    pacer: FramePacer,
    running: bool,
}

impl Scheduler {
    pub fn new(world: World) -> Self {
        let pacer = FramePacer::new(world.config().pacing);
        Self {
            world,
            input: InputState::new(),
            pacer,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking. Frame callbacks that still arrive are ignored.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// One frame callback. Returns the number of simulation steps run
    /// (always 0 when stopped). Any panic inside a step propagates to the
    /// caller; a failed tick must halt the loop, not be swallowed.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        if !self.running {
            return 0;
        }
        let steps = self.pacer.steps(frame_dt);
        let snapshot = self.input.snapshot();
        for _ in 0..steps {
            self.world.step(snapshot);
        }
        steps
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SimConfig;

    #[test]
    fn per_frame_runs_one_step_regardless_of_dt() {
        let mut pacer = FramePacer::new(TickPacing::PerFrame);
        assert_eq!(pacer.steps(0.004), 1);
        assert_eq!(pacer.steps(0.16), 1);
        assert_eq!(pacer.steps(0.0), 1);
    }

    #[test]
    fn fixed_accumulates_partial_frames() {
        let mut pacer = FramePacer::new(TickPacing::Fixed { dt: 1.0 / 60.0 });
        assert_eq!(pacer.steps(0.008), 0);
        assert_eq!(pacer.steps(0.010), 1);
    }

    #[test]
    fn fixed_caps_at_ten_steps() {
        let mut pacer = FramePacer::new(TickPacing::Fixed { dt: 1.0 / 60.0 });
        assert_eq!(pacer.steps(1.0), 10);
    }

    #[test]
    fn scheduler_ticks_only_while_running() {
        let mut scheduler = Scheduler::new(World::new(SimConfig::default()));

        // Not started yet: frames do nothing.
        assert_eq!(scheduler.frame(0.016), 0);
        assert_eq!(scheduler.world().player().body.pos.y, 0.0);

        scheduler.start();
        assert_eq!(scheduler.frame(0.016), 1);
        let y_after_one = scheduler.world().player().body.pos.y;
        assert!(y_after_one > 0.0);

        // Stopped: late-arriving frame callbacks are ignored and the world
        // does not advance.
        scheduler.stop();
        assert!(!scheduler.is_running());
        for _ in 0..10 {
            assert_eq!(scheduler.frame(0.016), 0);
        }
        assert_eq!(scheduler.world().player().body.pos.y, y_after_one);

        // Restartable.
        scheduler.start();
        assert_eq!(scheduler.frame(0.016), 1);
        assert!(scheduler.world().player().body.pos.y > y_after_one);
    }

    #[test]
    fn frame_reads_input_snapshot() {
        let mut scheduler = Scheduler::new(World::new(SimConfig::default()));
        scheduler.start();
        scheduler.input_mut().joystick(1.0);

        let x0 = scheduler.world().player().body.pos.x;
        scheduler.frame(0.016);
        let moved = scheduler.world().player().body.pos.x - x0;
        assert_eq!(moved, scheduler.world().config().move_speed);
    }

    #[test]
    fn per_frame_speed_is_frame_coupled() {
        // Document the preserved original behavior: two hosts with
        // different refresh rates run the same number of steps per frame.
        let mut fast = Scheduler::new(World::new(SimConfig::default()));
        let mut slow = Scheduler::new(World::new(SimConfig::default()));
        fast.start();
        slow.start();
        for _ in 0..10 {
            fast.frame(1.0 / 120.0);
            slow.frame(1.0 / 30.0);
        }
        assert_eq!(
            fast.world().player().body.pos.y,
            slow.world().player().body.pos.y
        );
    }
}
