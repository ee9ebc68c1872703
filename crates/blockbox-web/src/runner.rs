use blockbox_sim::{FrameBuffer, Scheduler, SimConfig, World};

/// Wires the scheduler to the flat frame buffer the renderer reads.
///
/// One `tick` per animation frame: advance the scheduler, and repack the
/// entity buffer whenever at least one simulation step ran.
pub struct SimRunner {
    scheduler: Scheduler,
    frame: FrameBuffer,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Self {
        let scheduler = Scheduler::new(World::new(config));
        let mut frame = FrameBuffer::new();
        // Pack the initial state so the page can draw before the loop starts.
        frame.rebuild(scheduler.world());
        Self { scheduler, frame }
    }

    /// One animation-frame callback with `dt` seconds since the previous one.
    pub fn tick(&mut self, dt: f32) {
        let steps = self.scheduler.frame(dt);
        if steps > 0 {
            self.frame.rebuild(self.scheduler.world());
        }
    }

    /// Repack immediately after an out-of-band world edit (spawn, reset)
    /// so a stopped view still reflects it.
    pub fn refresh_frame(&mut self) {
        self.frame.rebuild(self.scheduler.world());
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    // ---- Pointer accessors for direct WASM-memory reads ----

    pub fn entities_ptr(&self) -> *const f32 {
        self.frame.entities_ptr()
    }

    pub fn entity_count(&self) -> u32 {
        self.frame.entity_count()
    }

    pub fn world_width(&self) -> f32 {
        self.scheduler.world().config().world_width()
    }

    pub fn world_height(&self) -> f32 {
        self.scheduler.world().config().world_height()
    }

    pub fn tile_size(&self) -> f32 {
        self.scheduler.world().config().tile_size
    }
}
