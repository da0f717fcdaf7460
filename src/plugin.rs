//! Bevy app shell around the simulation core.
//!
//! ## System Responsibilities
//!
//! | System                        | Schedule | Purpose                                  |
//! |-------------------------------|----------|------------------------------------------|
//! | `load_game_config`            | Startup  | Overlay `assets/game.toml` on defaults   |
//! | `start_session_system`        | Startup  | Create `Simulation` + `Controls`         |
//! | `keyboard_controls_system`    | Update   | Keys → keyboard slot, turn taps          |
//! | `gamepad_controls_system`     | Update   | First gamepad → gamepad slot, turn taps  |
//! | `session_keys_system`         | Update   | Reset while wrecked, cycle pilot         |
//! | `simulation_tick_system`      | Update   | One core tick per frame                  |
//! | `dispatch_advisory_system`    | Update   | Queue briefings on the IO task pool      |
//! | `poll_advisory_system`        | Update   | Collect finished / timed-out briefings   |
//! | `publish_hud_system`          | Update   | Refresh the `HudState` resource          |
//!
//! The Update systems run chained in the order above, so a tick always sees
//! the inputs of its own frame.

use crate::advisory::{resolve_briefing, timed_out_briefing, AdvisoryProvider, AdvisoryRequest, FieldManual, LINK_PENDING};
use crate::config::{load_game_config, GameConfig};
use crate::constants::GAMEPAD_TURN_DEADZONE;
use crate::hud::Hud;
use crate::input::{ControlSource, HeldControls, InputAggregator, TapKey, TurnSide};
use crate::pilots::SelectedPilot;
use crate::simulation::Simulation;
use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task};
use std::sync::Arc;

pub struct ArcadePlugin;

impl Plugin for ArcadePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<SelectedPilot>()
            .init_resource::<HudState>()
            .init_resource::<BriefingLog>()
            .init_resource::<BriefingLink>()
            .add_systems(
                Startup,
                (load_game_config, start_session_system.after(load_game_config)),
            )
            .add_systems(
                Update,
                (
                    keyboard_controls_system,
                    gamepad_controls_system,
                    session_keys_system,
                    simulation_tick_system,
                    dispatch_advisory_system,
                    poll_advisory_system,
                    publish_hud_system,
                )
                    .chain()
                    .run_if(resource_exists::<Simulation>),
            );
    }
}

// ── Resources ─────────────────────────────────────────────────────────────────

/// Input aggregation across keyboard and gamepad.
#[derive(Resource, Debug, Clone, Default)]
pub struct Controls(pub InputAggregator);

/// Latest HUD record, rebuilt every frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct HudState(pub Hud);

/// Display-only briefing text.  Last write wins.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct BriefingLog {
    pub text: String,
    /// Wave the current text was written for; `None` before the first one.
    pub wave: Option<u32>,
}

impl Default for BriefingLog {
    fn default() -> Self {
        Self {
            text: LINK_PENDING.to_string(),
            wave: None,
        }
    }
}

struct PendingBriefing {
    request: AdvisoryRequest,
    /// `Time::elapsed_secs` at dispatch.
    issued_at: f32,
    task: Task<String>,
}

/// Advisory provider plus the requests still in flight.
#[derive(Resource)]
pub struct BriefingLink {
    provider: Arc<dyn AdvisoryProvider>,
    pending: Vec<PendingBriefing>,
}

impl BriefingLink {
    pub fn new(provider: impl AdvisoryProvider + 'static) -> Self {
        Self {
            provider: Arc::new(provider),
            pending: Vec::new(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

impl Default for BriefingLink {
    fn default() -> Self {
        Self::new(FieldManual)
    }
}

fn elapsed_ms(time: &Time) -> u64 {
    time.elapsed().as_millis() as u64
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Fixed seed for the session RNG.  Without it the session seeds from entropy.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSeed(pub u64);

/// Start the session with the loaded config.
pub fn start_session_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    seed: Option<Res<SessionSeed>>,
    pilot: Res<SelectedPilot>,
) {
    let config = GameConfig::clone(&config);
    commands.insert_resource(Controls(InputAggregator::new(config.double_tap_window_ms)));

    let mut sim = match seed {
        Some(seed) => {
            info!("Session seeded with {}", seed.0);
            Simulation::with_seed(config, seed.0)
        }
        None => Simulation::with_entropy(config),
    };
    sim.set_pilot(pilot.pilot().name);
    commands.insert_resource(sim);
    info!("Session started as {}", pilot.pilot().name);
}

// ── Input ─────────────────────────────────────────────────────────────────────

pub fn keyboard_controls_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut controls: ResMut<Controls>,
) {
    let now = elapsed_ms(&time);
    let left = [KeyCode::KeyA, KeyCode::ArrowLeft];
    let right = [KeyCode::KeyD, KeyCode::ArrowRight];

    controls.0.set_held(
        ControlSource::Keyboard,
        HeldControls {
            turn_left: keys.any_pressed(left),
            turn_right: keys.any_pressed(right),
            thrust: keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]),
            brake: keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]),
            fire: keys.pressed(KeyCode::Space),
            dock: keys.pressed(KeyCode::KeyE),
        },
    );

    for (side, codes) in [(TurnSide::Left, left), (TurnSide::Right, right)] {
        for code in codes {
            if keys.just_pressed(code) {
                controls.0.press_turn(TapKey::Key(code), side, now);
            }
        }
    }
}

/// Drive the gamepad slot from the first connected gamepad.
///
/// Left stick X turns (negative is left), South thrusts, East brakes, right
/// trigger fires, West docks.  Shoulder buttons are the roll taps.
pub fn gamepad_controls_system(
    gamepads: Query<&Gamepad>,
    time: Res<Time>,
    mut controls: ResMut<Controls>,
) {
    let Some(gamepad) = gamepads.iter().next() else {
        controls.0.set_held(ControlSource::Gamepad, HeldControls::default());
        return;
    };
    let now = elapsed_ms(&time);
    let stick_x = gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0);

    controls.0.set_held(
        ControlSource::Gamepad,
        HeldControls {
            turn_left: stick_x < -GAMEPAD_TURN_DEADZONE,
            turn_right: stick_x > GAMEPAD_TURN_DEADZONE,
            thrust: gamepad.pressed(GamepadButton::South),
            brake: gamepad.pressed(GamepadButton::East),
            fire: gamepad.pressed(GamepadButton::RightTrigger2),
            dock: gamepad.pressed(GamepadButton::West),
        },
    );

    for (side, button) in [
        (TurnSide::Left, GamepadButton::LeftTrigger),
        (TurnSide::Right, GamepadButton::RightTrigger),
    ] {
        if gamepad.just_pressed(button) {
            controls.0.press_turn(TapKey::Button(button), side, now);
        }
    }
}

/// `R` (or gamepad Start) restarts a wrecked ship; `Tab` cycles the pilot.
pub fn session_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    time: Res<Time>,
    mut sim: ResMut<Simulation>,
    mut selected: ResMut<SelectedPilot>,
    mut controls: ResMut<Controls>,
) {
    let pad_start = gamepads.iter().any(|g| g.pressed(GamepadButton::Start));
    if (keys.pressed(KeyCode::KeyR) || pad_start) && !sim.state().ship.alive {
        sim.reset(elapsed_ms(&time));
        controls.0.clear();
    }

    if keys.just_pressed(KeyCode::Tab) {
        let pilot = selected.cycle();
        sim.set_pilot(pilot.name);
        info!("Pilot selected: {} ({})", pilot.name, pilot.tagline);
    }
}

// ── Simulation ────────────────────────────────────────────────────────────────

pub fn simulation_tick_system(time: Res<Time>, mut controls: ResMut<Controls>, mut sim: ResMut<Simulation>) {
    let intent = controls.0.take_intent();
    sim.tick(&intent, time.delta_secs(), elapsed_ms(&time));
}

// ── Advisory ──────────────────────────────────────────────────────────────────

/// Hand every queued request to the provider on the IO task pool.
pub fn dispatch_advisory_system(time: Res<Time>, mut sim: ResMut<Simulation>, mut link: ResMut<BriefingLink>) {
    let requests = sim.take_advisory_requests();
    if requests.is_empty() {
        return;
    }
    let pool = IoTaskPool::get();
    for request in requests {
        let provider = Arc::clone(&link.provider);
        let job = request.clone();
        let task = pool.spawn(async move { resolve_briefing(provider.as_ref(), &job) });
        link.pending.push(PendingBriefing {
            request,
            issued_at: time.elapsed_secs(),
            task,
        });
    }
}

/// Collect finished briefings without blocking; drop the ones that waited
/// longer than `advisory_timeout_secs`.
pub fn poll_advisory_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut link: ResMut<BriefingLink>,
    mut log: ResMut<BriefingLog>,
) {
    let now = time.elapsed_secs();
    let timeout = config.advisory_timeout_secs;

    link.pending.retain_mut(|pending| {
        if let Some(text) = block_on(future::poll_once(&mut pending.task)) {
            log.text = text;
            log.wave = Some(pending.request.wave);
            return false;
        }
        if now - pending.issued_at > timeout {
            log.text = timed_out_briefing(&pending.request, timeout);
            log.wave = Some(pending.request.wave);
            return false;
        }
        true
    });
}

pub fn publish_hud_system(time: Res<Time>, sim: Res<Simulation>, mut hud: ResMut<HudState>) {
    hud.0 = sim.hud(elapsed_ms(&time));
}
