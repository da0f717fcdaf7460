//! Session state and the per-tick pipeline.
//!
//! [`Simulation`] owns everything authoritative: ship, entity pools, cargo
//! economy, wave number, camera shake, and the random source.  It is advanced
//! by [`Simulation::tick`] with an explicit `dt` and an explicit millisecond
//! clock, so a test can replay any sequence of frames exactly.
//!
//! ## Tick order
//!
//! | # | Stage | Module |
//! |---|-------|--------|
//! | 1 | Turn / roll / thrust / brake / drift / fire | [`crate::ship::control`] |
//! | 2 | Age bullets and particles, drift asteroids | [`crate::entities`] |
//! | 3 | Camera shake decay | here |
//! | 4 | Bullet and hull collisions | [`crate::collision`] |
//! | 5 | Drops, power-ups, dock, multiplier expiry | [`crate::economy`] |
//! | 6 | Compact pools | [`crate::entities`] |
//! | 7 | Wave-cleared check | [`crate::wave`] |

use crate::advisory::AdvisoryRequest;
use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::GameConfig;
use crate::economy::{collect_pickups, collect_powerups, expire_multiplier, update_dock, Cargo, Economy};
use crate::entities::{PowerUpKind, Pools};
use crate::hud::{Hud, RenderSnapshot};
use crate::input::ControlIntent;
use crate::pilots::ROSTER;
use crate::rng::{from_entropy, seeded, RandomSource};
use crate::ship::{steer_ship, ShipState};
use crate::wave::{spawn_wave, wave_cleared};
use bevy::log::info;
use bevy::prelude::Resource;

/// Everything a tick reads and writes, apart from config and randomness.
#[derive(Debug, Clone)]
pub struct SimState {
    pub ship: ShipState,
    pub pools: Pools,
    pub economy: Economy,
    /// Current wave; 0 until the first wave is spawned.
    pub wave: u32,
    pub camera_shake: f32,
}

impl SimState {
    /// Empty field with a fresh ship.  No wave is spawned.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ship: ShipState::new(config),
            pools: Pools::default(),
            economy: Economy::default(),
            wave: 0,
            camera_shake: 0.0,
        }
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub shot_fired: bool,
    pub collisions: CollisionReport,
    pub pickups_collected: u32,
    pub powerups_collected: Vec<PowerUpKind>,
    /// Cargo moved into the bank when the dock completed a transaction.
    pub banked: Option<Cargo>,
    pub multiplier_expired: bool,
    /// Wave number started at the end of this tick.
    pub wave_started: Option<u32>,
}

/// One play session.
#[derive(Resource)]
pub struct Simulation {
    config: GameConfig,
    rng: Box<dyn RandomSource>,
    state: SimState,
    pilot: String,
    outbox: Vec<AdvisoryRequest>,
}

impl Simulation {
    /// Start a session: fresh ship, wave 1 spawned, first briefing queued.
    pub fn new(config: GameConfig, rng: impl RandomSource + 'static) -> Self {
        let state = SimState::new(&config);
        let mut sim = Self {
            config,
            rng: Box::new(rng),
            state,
            pilot: ROSTER[0].name.to_string(),
            outbox: Vec::new(),
        };
        sim.begin_wave(1);
        sim
    }

    /// Session driven by a seeded [`rand::rngs::StdRng`]; identical seeds and
    /// inputs replay identically.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::new(config, seeded(seed))
    }

    pub fn with_entropy(config: GameConfig) -> Self {
        Self::new(config, from_entropy())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// Direct state access for scripted scenarios and debugging.
    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    pub fn pilot(&self) -> &str {
        &self.pilot
    }

    /// Name sent with future advisory requests.
    pub fn set_pilot(&mut self, name: impl Into<String>) {
        self.pilot = name.into();
    }

    /// Drain queued advisory requests.
    pub fn take_advisory_requests(&mut self) -> Vec<AdvisoryRequest> {
        std::mem::take(&mut self.outbox)
    }

    pub fn hud(&self, now_ms: u64) -> Hud {
        Hud::capture(&self.state, &self.config, now_ms)
    }

    pub fn snapshot(&self, now_ms: u64) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state, &self.config, now_ms)
    }

    /// Advance the session by `dt` seconds, ending at `now_ms`.
    ///
    /// `dt` is clamped to `[0, max_tick_dt]`; non-finite values count as 0.
    pub fn tick(&mut self, intent: &ControlIntent, dt: f32, now_ms: u64) -> TickReport {
        let dt = clamp_dt(dt, self.config.max_tick_dt);
        let Self {
            config, rng, state, ..
        } = self;
        let rng = rng.as_mut();
        let mut report = TickReport::default();

        if let Some(bullet) = steer_ship(
            &mut state.ship,
            intent,
            dt,
            now_ms,
            config,
            rng,
            &mut state.pools.particles,
        ) {
            state.pools.bullets.spawn(bullet);
            report.shot_fired = true;
        }

        state.pools.age(dt, config.asteroid_bounds);
        state.camera_shake *= config.shake_decay;

        report.collisions = resolve_collisions(state, config, rng, now_ms);

        report.pickups_collected = collect_pickups(state, config, dt, now_ms);
        report.powerups_collected = collect_powerups(state, config, rng, dt, now_ms);
        report.banked = update_dock(state, config, intent.dock, dt);
        report.multiplier_expired = expire_multiplier(&mut state.economy, now_ms);

        state.pools.compact_all();

        if wave_cleared(&self.state) {
            let next = self.state.wave + 1;
            self.begin_wave(next);
            report.wave_started = Some(next);
        }
        report
    }

    /// Restart after destruction.
    ///
    /// Banked cargo survives; carried cargo, the multiplier, power-ups and the
    /// asteroid field do not.  Wave numbering restarts at 1.
    pub fn reset(&mut self, now_ms: u64) {
        let state = &mut self.state;
        state.ship.respawn(&self.config, now_ms);
        state.economy.carried = Cargo::default();
        state.economy.multiplier = Default::default();
        state.economy.dock_hold = 0.0;
        state.pools.powerups.clear();
        state.camera_shake = 0.0;
        info!("Session reset; banked cargo kept ({} total)", state.economy.banked.total());
        self.begin_wave(1);
    }

    fn begin_wave(&mut self, wave: u32) {
        let request = spawn_wave(&mut self.state, wave, &self.config, self.rng.as_mut(), &self.pilot);
        self.outbox.push(request);
    }
}

fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, max)
    } else {
        0.0
    }
}
