use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::config::PetConfig;
use crate::api::host::{Host, VisualHandle, VisualKind, VisualUpdate};
use crate::api::types::{FoodColor, SimEvent};
use crate::components::feeder::Feeder;
use crate::components::food::FoodParticle;
use crate::components::pet::Pet;
use crate::core::math::noise;
use crate::core::store::ParticleStore;
use crate::input::queue::InputEvent;
use crate::systems::trail::TrailManager;
use crate::systems::{behavior, feeding, physics, pet};

/// The whole simulation: pet, feeders, food and trails, plus the RNG that drives them.
///
/// The host is passed into every call rather than stored, so the caller that
/// owns both (the frame runner) decides how they are borrowed.
pub struct Simulation {
    config: PetConfig,
    pet: Pet,
    pet_visual: VisualHandle,
    feeders: Vec<Feeder>,
    foods: ParticleStore<FoodParticle>,
    trails: TrailManager,
    events: Vec<SimEvent>,
    rng: StdRng,
    frame: u64,
}

impl Simulation {
    /// Place the pet in the middle of the viewport and lay out one feeder per color.
    /// `seed` is used unless the config pins one.
    pub fn new<H: Host + ?Sized>(config: PetConfig, host: &mut H, seed: u64) -> Self {
        let seed = config.seed.unwrap_or(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let viewport = host.viewport();
        let pos = viewport / 2.0;
        let vel = Vec2::new(
            noise(&mut rng, config.pet_initial_speed),
            noise(&mut rng, config.pet_initial_speed),
        );
        let pet_visual = host.create_visual(VisualKind::Pet, None, pos);

        let feeders = FoodColor::ALL
            .iter()
            .map(|&color| Feeder::spawn(host, color, config.feeder_corner(color.index()), config.feeder_size))
            .collect();

        log::info!(
            "simulation: {}x{} viewport, seed {}, {} feeders",
            viewport.x,
            viewport.y,
            seed,
            FoodColor::ALL.len()
        );

        Self {
            config,
            pet: Pet::new(pos, vel),
            pet_visual,
            feeders,
            foods: ParticleStore::new(),
            trails: TrailManager::new(),
            events: Vec::new(),
            rng,
            frame: 0,
        }
    }

    // -- External triggers --

    /// Pointer activated at (x, y): the pet heads there, whatever it was doing.
    pub fn pointer_activate(&mut self, x: f32, y: f32) {
        self.pet.set_target(Vec2::new(x, y));
    }

    /// Release a batch of food from feeder `index`. Returns the number spawned.
    pub fn feed<H: Host + ?Sized>(&mut self, host: &mut H, index: usize) -> usize {
        let Some(feeder) = self.feeders.get(index) else {
            log::warn!("feed: no feeder at index {}", index);
            return 0;
        };
        let (center, color) = (feeder.center(), feeder.color);
        let count = feeding::spawn_batch(&mut self.foods, host, center, color, &self.config, &mut self.rng);
        log::debug!("feed: {:?} x{} ({} food live)", color, count, self.foods.len());
        self.events.push(SimEvent::Fed { color, count });
        count
    }

    /// Index of the feeder under `point`, if any.
    pub fn feeder_at(&self, point: Vec2) -> Option<usize> {
        self.feeders.iter().position(|f| f.contains(point))
    }

    /// Apply one queued input event. Pointer presses on a feeder feed instead of
    /// retargeting the pet.
    pub fn handle_input<H: Host + ?Sized>(&mut self, host: &mut H, event: InputEvent) {
        match event {
            InputEvent::PointerDown { x, y } => match self.feeder_at(Vec2::new(x, y)) {
                Some(index) => {
                    self.feed(host, index);
                }
                None => self.pointer_activate(x, y),
            },
            InputEvent::Feed { feeder } => {
                self.feed(host, feeder);
            }
        }
    }

    // -- Frame step --

    /// Drop last frame's events. Call before applying the frame's input.
    pub fn begin_frame(&mut self) {
        self.events.clear();
    }

    /// Run one full tick: pet, food, trails. `now_ms` is the host clock.
    pub fn step<H: Host + ?Sized>(&mut self, host: &mut H, now_ms: f64) {
        self.frame += 1;
        let viewport = host.viewport();

        pet::update_pet(&mut self.pet, viewport, &self.config, &mut self.rng);
        host.update_visual(&self.pet_visual, VisualUpdate::at(self.pet.pos));

        self.step_food(host, viewport, now_ms);
        self.sync_food(host);

        self.trails
            .tick(host, self.pet.pos, now_ms, &self.config, &mut self.rng, &mut self.events);
    }

    /// Behavior, physics, collisions, then consumption or aging for every food
    /// particle, walking the store from the back so removals are safe.
    fn step_food<H: Host + ?Sized>(&mut self, host: &mut H, viewport: Vec2, now_ms: f64) {
        let pet_pos = self.pet.pos;
        let config = &self.config;

        for i in (0..self.foods.len()).rev() {
            let dv = behavior::impulse(self.foods.as_slice(), i, pet_pos, config, &mut self.rng);

            let foods = self.foods.as_mut_slice();
            let food = &mut foods[i];
            food.vel += dv;
            physics::integrate(food, config);
            physics::collide_walls(food, viewport, config);
            physics::collide_with_earlier(foods, i, config);

            let food = &mut foods[i];
            if physics::within_reach(food, pet_pos, config) {
                if let Some(food) = self.foods.remove(i) {
                    log::debug!("pet ate {:?} at ({:.1}, {:.1})", food.color, food.pos.x, food.pos.y);
                    self.events.push(SimEvent::Consumed {
                        color: food.color,
                        pos: food.pos,
                    });
                    self.trails.spawn(host, food.color, pet_pos, now_ms, config);
                    food.release(host);
                }
                continue;
            }

            food.life -= 1.0;
            if food.life <= 0.0 {
                if let Some(food) = self.foods.remove(i) {
                    log::debug!("{:?} food expired", food.color);
                    self.events.push(SimEvent::Expired { color: food.color });
                    food.release(host);
                }
            }
        }
    }

    /// Push position and life-derived opacity of every surviving particle to the host.
    /// Runs after this tick's aging, so opacity reflects the life left after the decrement.
    fn sync_food<H: Host + ?Sized>(&self, host: &mut H) {
        for food in self.foods.iter() {
            host.update_visual(
                food.handle(),
                VisualUpdate::at(food.pos).with_opacity(food.opacity(self.config.fade_life)),
            );
        }
    }

    /// Release every visual the simulation owns. The simulation is gone afterwards.
    pub fn shutdown<H: Host + ?Sized>(mut self, host: &mut H) {
        for food in self.foods.drain() {
            food.release(host);
        }
        self.trails.clear(host);
        for feeder in self.feeders {
            feeder.release(host);
        }
        host.destroy_visual(self.pet_visual);
        log::info!("simulation: shut down after {} frames", self.frame);
    }

    // -- Accessors --

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn pet_mut(&mut self) -> &mut Pet {
        &mut self.pet
    }

    pub fn feeders(&self) -> &[Feeder] {
        &self.feeders
    }

    pub fn foods(&self) -> &ParticleStore<FoodParticle> {
        &self.foods
    }

    /// Direct access to the food store, for hosts that place food themselves.
    pub fn foods_mut(&mut self) -> &mut ParticleStore<FoodParticle> {
        &mut self.foods
    }

    pub fn trails(&self) -> &TrailManager {
        &self.trails
    }

    /// Events recorded since the last [`Simulation::begin_frame`].
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Number of completed steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::host::recording::RecordingHost;

    fn setup() -> (Simulation, RecordingHost) {
        let mut host = RecordingHost::new(800.0, 600.0);
        let sim = Simulation::new(PetConfig::default(), &mut host, 42);
        (sim, host)
    }

    /// Park the pet in the bottom-right corner, away from feeders.
    fn park_pet(sim: &mut Simulation) {
        let pet = sim.pet_mut();
        pet.pos = Vec2::new(780.0, 580.0);
        pet.vel = Vec2::ZERO;
        pet.target = None;
    }

    fn place_food<H: Host>(sim: &mut Simulation, host: &mut H, pos: Vec2, vel: Vec2, color: FoodColor, life: f32) {
        let food = FoodParticle::spawn(host, pos, vel, color, life);
        sim.foods_mut().push(food);
    }

    #[test]
    fn new_creates_pet_and_feeders() {
        let (sim, host) = setup();
        assert_eq!(sim.pet().pos, Vec2::new(400.0, 300.0));
        assert!(sim.pet().vel.x.abs() <= 2.0 && sim.pet().vel.y.abs() <= 2.0);
        assert_eq!(host.live_of_kind(VisualKind::Pet), 1);
        assert_eq!(host.live_of_kind(VisualKind::Feeder), 4);
        assert_eq!(sim.feeders()[2].color, FoodColor::Floater);
        assert_eq!(sim.feeders()[1].center(), Vec2::new(72.0, 32.0));
    }

    #[test]
    fn feed_spawns_batch_of_feeder_color() {
        let (mut sim, mut host) = setup();
        let n = sim.feed(&mut host, 3);
        assert_eq!(n, 10);
        assert_eq!(sim.foods().len(), 10);
        assert!(sim.foods().iter().all(|f| f.color == FoodColor::Flocking));
        assert_eq!(sim.events(), &[SimEvent::Fed { color: FoodColor::Flocking, count: 10 }]);
    }

    #[test]
    fn feed_out_of_range_is_ignored() {
        let (mut sim, mut host) = setup();
        assert_eq!(sim.feed(&mut host, 9), 0);
        assert!(sim.foods().is_empty());
    }

    #[test]
    fn pointer_on_feeder_feeds_instead_of_targeting() {
        let (mut sim, mut host) = setup();
        sim.handle_input(&mut host, InputEvent::PointerDown { x: 30.0, y: 30.0 });
        assert_eq!(sim.foods().len(), 10);
        assert_eq!(sim.pet().target, None);

        sim.handle_input(&mut host, InputEvent::PointerDown { x: 500.0, y: 400.0 });
        assert_eq!(sim.pet().target, Some(Vec2::new(500.0, 400.0)));
    }

    #[test]
    fn consuming_food_leaves_exactly_one_trail() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        place_food(&mut sim, &mut host, Vec2::new(775.0, 575.0), Vec2::ZERO, FoodColor::Jitter, 500.0);
        place_food(&mut sim, &mut host, Vec2::new(100.0, 300.0), Vec2::ZERO, FoodColor::Floater, 500.0);
        let eaten_id = sim.foods().get(0).unwrap().handle().id();

        sim.step(&mut host, 16.0);

        assert_eq!(sim.foods().len(), 1);
        assert_eq!(sim.trails().len(), 1);
        assert_eq!(sim.trails().iter().next().unwrap().color, FoodColor::Jitter);
        assert_eq!(host.released[&eaten_id], 1);
        assert!(sim
            .events()
            .iter()
            .any(|e| matches!(e, SimEvent::Consumed { color: FoodColor::Jitter, .. })));
    }

    #[test]
    fn consumption_beats_expiry() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        place_food(&mut sim, &mut host, Vec2::new(778.0, 578.0), Vec2::ZERO, FoodColor::Floater, 1.0);
        sim.step(&mut host, 16.0);
        assert!(sim.foods().is_empty());
        assert_eq!(sim.trails().len(), 1);
        assert!(!sim.events().iter().any(|e| matches!(e, SimEvent::Expired { .. })));
    }

    #[test]
    fn last_life_tick_releases_handle() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        place_food(&mut sim, &mut host, Vec2::new(300.0, 300.0), Vec2::ZERO, FoodColor::Floater, 1.0);
        let id = sim.foods().get(0).unwrap().handle().id();

        sim.step(&mut host, 16.0);

        assert!(sim.foods().is_empty());
        assert!(sim.trails().is_empty());
        assert_eq!(host.released[&id], 1);
        assert_eq!(sim.events(), &[SimEvent::Expired { color: FoodColor::Floater }]);
    }

    #[test]
    fn every_food_handle_released_exactly_once() {
        let (mut sim, mut host) = setup();
        for i in 0..4 {
            sim.feed(&mut host, i);
        }
        let mut now = 0.0;
        for tick in 0..1500 {
            if tick % 50 == 0 {
                let pos = sim.foods().get(0).map(|f| f.pos);
                if let Some(pos) = pos {
                    sim.pointer_activate(pos.x, pos.y);
                }
            }
            now += 16.0;
            sim.step(&mut host, now);
        }
        // Every spawned batch has either been eaten or has expired by now.
        assert!(sim.foods().is_empty());
        assert_eq!(host.live_of_kind(VisualKind::Food), 0);
        assert!(host.released.values().all(|&n| n == 1), "a handle was released twice");
    }

    #[test]
    fn surviving_food_is_synced_with_fading_opacity() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        place_food(&mut sim, &mut host, Vec2::new(300.0, 100.0), Vec2::ZERO, FoodColor::Floater, 501.0);
        sim.step(&mut host, 16.0);

        let food = sim.foods().get(0).unwrap();
        let update = host.visual(food.handle()).unwrap().update;
        assert_eq!(update.position, Some(food.pos));
        assert!((update.opacity.unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn food_velocity_change_is_bounded_per_tick() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        let colors = FoodColor::ALL;
        for (i, &color) in colors.iter().enumerate() {
            let pos = Vec2::new(200.0 + i as f32 * 100.0, 300.0);
            place_food(&mut sim, &mut host, pos, Vec2::new(0.3, -0.2), color, 800.0);
        }
        let before: Vec<Vec2> = sim.foods().iter().map(|f| f.vel).collect();
        sim.step(&mut host, 16.0);
        // Largest per-axis behavior impulse plus gravity.
        let bound = 0.1 + 0.02 + 1e-6;
        for (f, v0) in sim.foods().iter().zip(before) {
            let dv = f.vel - v0;
            assert!(dv.x.abs() <= bound && dv.y.abs() <= bound, "{:?} changed by {:?}", f.color, dv);
        }
    }

    #[test]
    fn coincident_food_swaps_and_separates_in_a_step() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        let p = Vec2::new(400.0, 200.0);
        place_food(&mut sim, &mut host, p, Vec2::new(1.0, 0.0), FoodColor::Floater, 800.0);
        place_food(&mut sim, &mut host, p, Vec2::new(-1.0, 0.0), FoodColor::Floater, 800.0);
        sim.step(&mut host, 16.0);
        let a = sim.foods().get(0).unwrap();
        let b = sim.foods().get(1).unwrap();
        assert!(a.pos.distance(b.pos) > 0.0);
        // Velocities traded places (plus a little floater drift).
        assert!(a.vel.x < -0.9 && b.vel.x > 0.9, "a {:?} b {:?}", a.vel, b.vel);
    }

    #[test]
    fn homing_cluster_closes_in_on_pet() {
        let mut host = RecordingHost::new(1200.0, 900.0);
        let mut sim = Simulation::new(PetConfig::default(), &mut host, 42);
        sim.feed(&mut host, 0);
        {
            let pet = sim.pet_mut();
            pet.pos = Vec2::new(900.0, 700.0);
            pet.vel = Vec2::ZERO;
        }

        let mean_distance = |sim: &Simulation| {
            let pet = sim.pet().pos;
            let n = sim.foods().len() as f32;
            sim.foods().iter().map(|f| f.pos.distance(pet)).sum::<f32>() / n
        };

        let start = mean_distance(&sim);
        let mut last = start;
        let mut now = 0.0;
        // Only compare while the cluster is still on its way in.
        while last > 200.0 {
            for _ in 0..20 {
                // Hold the pet still so only the food moves.
                let pet = sim.pet_mut();
                pet.pos = Vec2::new(900.0, 700.0);
                pet.vel = Vec2::ZERO;
                pet.target = Some(Vec2::new(900.0, 700.0));
                now += 16.0;
                sim.step(&mut host, now);
            }
            if sim.foods().is_empty() {
                break;
            }
            let d = mean_distance(&sim);
            assert!(d < last, "cluster drifted away: {} -> {}", last, d);
            last = d;
            assert!(now < 16.0 * 2000.0, "cluster never arrived");
        }
        assert!(last < start);
    }

    #[test]
    fn trails_fade_out_after_duration() {
        let (mut sim, mut host) = setup();
        park_pet(&mut sim);
        place_food(&mut sim, &mut host, Vec2::new(778.0, 578.0), Vec2::ZERO, FoodColor::Homing, 500.0);
        sim.step(&mut host, 0.0);
        assert_eq!(sim.trails().len(), 1);
        sim.step(&mut host, 1999.0);
        assert_eq!(sim.trails().len(), 1);
        sim.step(&mut host, 2001.0);
        assert!(sim.trails().is_empty());
        assert_eq!(host.live_of_kind(VisualKind::Trail), 0);
    }

    #[test]
    fn begin_frame_clears_events() {
        let (mut sim, mut host) = setup();
        sim.feed(&mut host, 0);
        sim.step(&mut host, 16.0);
        assert!(sim.events().iter().any(|e| matches!(e, SimEvent::Fed { .. })));
        sim.begin_frame();
        assert!(sim.events().is_empty());
    }

    #[test]
    fn shutdown_releases_everything() {
        let (mut sim, mut host) = setup();
        sim.feed(&mut host, 1);
        sim.step(&mut host, 16.0);
        sim.shutdown(&mut host);
        assert!(host.live.is_empty());
        assert!(host.released.values().all(|&n| n == 1));
    }
}
