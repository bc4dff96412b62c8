use pet_engine::{Host, InputEvent, InputQueue, PetConfig, Simulation};

/// Host-generic frame runner that wires input, simulation and host together.
///
/// The wasm exports keep one `PetRunner<DomHost>` in a `thread_local!`,
/// because wasm-bindgen cannot export generic structs directly. Events pushed
/// between frames are applied at the start of the next tick, so a frame is
/// never interleaved with input.
pub struct PetRunner<H: Host> {
    sim: Simulation,
    host: H,
    input: InputQueue,
}

impl<H: Host> PetRunner<H> {
    pub fn new(config: PetConfig, mut host: H, seed: u64) -> Self {
        let sim = Simulation::new(config, &mut host, seed);
        Self {
            sim,
            host,
            input: InputQueue::new(),
        }
    }

    /// Queue an input event for the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, then step the simulation.
    pub fn tick(&mut self, now_ms: f64) {
        self.sim.begin_frame();
        for event in self.input.drain() {
            self.sim.handle_input(&mut self.host, event);
        }
        self.sim.step(&mut self.host, now_ms);
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    // ---- Accessors for host-side diagnostics ----

    pub fn food_count(&self) -> u32 {
        self.sim.foods().len() as u32
    }

    pub fn trail_count(&self) -> u32 {
        self.sim.trails().len() as u32
    }

    pub fn pet_x(&self) -> f32 {
        self.sim.pet().pos.x
    }

    pub fn pet_y(&self) -> f32 {
        self.sim.pet().pos.y
    }

    /// Release every visual and hand the host back.
    pub fn shutdown(self) -> H {
        let mut host = self.host;
        self.sim.shutdown(&mut host);
        host
    }
}

/// Put `next` into `slot`, shutting down whatever runner was there first so its
/// visuals are released. Returns the old runner's host, if any.
pub fn replace_runner<H: Host>(slot: &mut Option<PetRunner<H>>, next: PetRunner<H>) -> Option<H> {
    let old = slot.take().map(PetRunner::shutdown);
    *slot = Some(next);
    old
}
