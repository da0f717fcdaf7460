//! Runtime gameplay configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Usage
//!
//! The simulation core receives a `&GameConfig` explicitly; Bevy systems add
//! `config: Res<GameConfig>` to their parameter list.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{SimError, SimResult};
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset in `assets/game.toml`.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Tick ─────────────────────────────────────────────────────────────────
    pub max_tick_dt: f32,

    // ── World Bounds ─────────────────────────────────────────────────────────
    pub ship_bounds: f32,
    pub asteroid_bounds: f32,

    // ── Ship: Movement ───────────────────────────────────────────────────────
    pub angular_accel: f32,
    pub angular_drag: f32,
    pub thrust_accel: f32,
    pub brake_factor: f32,
    pub linear_drag: f32,
    pub tilt_per_angvel: f32,
    pub tilt_max: f32,
    pub tilt_lerp: f32,

    // ── Ship: Roll ───────────────────────────────────────────────────────────
    pub double_tap_window_ms: u64,
    pub roll_duration_ms: u64,
    pub roll_side_impulse: f32,
    pub roll_forward_impulse: f32,
    pub roll_invuln_ms: u64,

    // ── Ship: Combat ─────────────────────────────────────────────────────────
    pub fire_cooldown_ms: u64,
    pub bullet_speed: f32,
    pub bullet_life: f32,
    pub bullet_damage: f32,

    // ── Ship: Health ─────────────────────────────────────────────────────────
    pub ship_max_hp: f32,
    pub ship_max_shield: f32,
    pub ship_start_shield: f32,
    pub ship_radius: f32,
    pub asteroid_contact_damage: f32,
    pub hit_invuln_ms: u64,
    pub hit_knockback: f32,
    pub respawn_invuln_ms: u64,

    // ── Asteroids / Waves ────────────────────────────────────────────────────
    pub wave_base_count: u32,
    pub wave_count_per_wave: u32,
    pub asteroid_min_radius: f32,
    pub asteroid_max_radius: f32,
    pub asteroid_hp_per_radius: f32,
    pub asteroid_speed_range: f32,
    pub spawn_ring_min: f32,
    pub spawn_ring_max: f32,
    pub asteroid_spin_range: f32,

    // ── Drops ────────────────────────────────────────────────────────────────
    pub drop_roll_coin: f32,
    pub drop_roll_gorboy: f32,
    pub pickup_lifetime_ms: u64,
    pub pickup_drift: f32,
    pub pickup_collect_radius: f32,
    pub powerup_min_source_radius: f32,
    pub powerup_drop_chance: f32,
    pub powerup_jitter: f32,
    pub powerup_drift: f32,
    pub powerup_lifetime_ms: u64,
    pub powerup_collect_radius: f32,

    // ── Power-up Effects ─────────────────────────────────────────────────────
    pub x2_duration_ms: u64,
    pub x4_duration_ms: u64,
    pub shield_pickup_amount: f32,
    pub shield_pickup_invuln_ms: u64,

    // ── Dock ─────────────────────────────────────────────────────────────────
    pub dock_x: f32,
    pub dock_y: f32,
    pub dock_radius: f32,
    pub dock_charge_rate: f32,
    pub dock_drain_rate: f32,

    // ── Effects ──────────────────────────────────────────────────────────────
    pub shake_bullet_hit: f32,
    pub shake_ship_hit: f32,
    pub shake_decay: f32,
    pub exhaust_chance: f32,
    pub roll_trail_chance: f32,

    // ── Advisory ─────────────────────────────────────────────────────────────
    pub advisory_timeout_secs: f32,

    // ── Rendering ────────────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub render_scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Tick
            max_tick_dt: MAX_TICK_DT,
            // World Bounds
            ship_bounds: SHIP_BOUNDS,
            asteroid_bounds: ASTEROID_BOUNDS,
            // Ship: Movement
            angular_accel: ANGULAR_ACCEL,
            angular_drag: ANGULAR_DRAG,
            thrust_accel: THRUST_ACCEL,
            brake_factor: BRAKE_FACTOR,
            linear_drag: LINEAR_DRAG,
            tilt_per_angvel: TILT_PER_ANGVEL,
            tilt_max: TILT_MAX,
            tilt_lerp: TILT_LERP,
            // Ship: Roll
            double_tap_window_ms: DOUBLE_TAP_WINDOW_MS,
            roll_duration_ms: ROLL_DURATION_MS,
            roll_side_impulse: ROLL_SIDE_IMPULSE,
            roll_forward_impulse: ROLL_FORWARD_IMPULSE,
            roll_invuln_ms: ROLL_INVULN_MS,
            // Ship: Combat
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
            bullet_speed: BULLET_SPEED,
            bullet_life: BULLET_LIFE,
            bullet_damage: BULLET_DAMAGE,
            // Ship: Health
            ship_max_hp: SHIP_MAX_HP,
            ship_max_shield: SHIP_MAX_SHIELD,
            ship_start_shield: SHIP_START_SHIELD,
            ship_radius: SHIP_RADIUS,
            asteroid_contact_damage: ASTEROID_CONTACT_DAMAGE,
            hit_invuln_ms: HIT_INVULN_MS,
            hit_knockback: HIT_KNOCKBACK,
            respawn_invuln_ms: RESPAWN_INVULN_MS,
            // Asteroids / Waves
            wave_base_count: WAVE_BASE_COUNT,
            wave_count_per_wave: WAVE_COUNT_PER_WAVE,
            asteroid_min_radius: ASTEROID_MIN_RADIUS,
            asteroid_max_radius: ASTEROID_MAX_RADIUS,
            asteroid_hp_per_radius: ASTEROID_HP_PER_RADIUS,
            asteroid_speed_range: ASTEROID_SPEED_RANGE,
            spawn_ring_min: SPAWN_RING_MIN,
            spawn_ring_max: SPAWN_RING_MAX,
            asteroid_spin_range: ASTEROID_SPIN_RANGE,
            // Drops
            drop_roll_coin: DROP_ROLL_COIN,
            drop_roll_gorboy: DROP_ROLL_GORBOY,
            pickup_lifetime_ms: PICKUP_LIFETIME_MS,
            pickup_drift: PICKUP_DRIFT,
            pickup_collect_radius: PICKUP_COLLECT_RADIUS,
            powerup_min_source_radius: POWERUP_MIN_SOURCE_RADIUS,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            powerup_jitter: POWERUP_JITTER,
            powerup_drift: POWERUP_DRIFT,
            powerup_lifetime_ms: POWERUP_LIFETIME_MS,
            powerup_collect_radius: POWERUP_COLLECT_RADIUS,
            // Power-up Effects
            x2_duration_ms: X2_DURATION_MS,
            x4_duration_ms: X4_DURATION_MS,
            shield_pickup_amount: SHIELD_PICKUP_AMOUNT,
            shield_pickup_invuln_ms: SHIELD_PICKUP_INVULN_MS,
            // Dock
            dock_x: DOCK_X,
            dock_y: DOCK_Y,
            dock_radius: DOCK_RADIUS,
            dock_charge_rate: DOCK_CHARGE_RATE,
            dock_drain_rate: DOCK_DRAIN_RATE,
            // Effects
            shake_bullet_hit: SHAKE_BULLET_HIT,
            shake_ship_hit: SHAKE_SHIP_HIT,
            shake_decay: SHAKE_DECAY,
            exhaust_chance: EXHAUST_CHANCE,
            roll_trail_chance: ROLL_TRAIL_CHANCE,
            // Advisory
            advisory_timeout_secs: ADVISORY_TIMEOUT_SECS,
            // Rendering
            hud_font_size: HUD_FONT_SIZE,
            render_scale: RENDER_SCALE,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document.  Keys absent from `contents` keep their defaults.
    pub fn from_toml_str(contents: &str) -> SimResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|e| SimError::ConfigParse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the simulation meaningless or unstable.
    pub fn validate(&self) -> SimResult<()> {
        positive("max_tick_dt", self.max_tick_dt)?;
        positive("ship_bounds", self.ship_bounds)?;
        positive("asteroid_bounds", self.asteroid_bounds)?;
        positive("ship_max_hp", self.ship_max_hp)?;
        positive("dock_radius", self.dock_radius)?;
        positive("asteroid_min_radius", self.asteroid_min_radius)?;
        if self.asteroid_max_radius < self.asteroid_min_radius {
            return Err(SimError::UnsafeConstant {
                name: "asteroid_max_radius",
                value: self.asteroid_max_radius,
                safe_range: "[asteroid_min_radius, ∞)",
            });
        }
        if self.spawn_ring_max < self.spawn_ring_min {
            return Err(SimError::UnsafeConstant {
                name: "spawn_ring_max",
                value: self.spawn_ring_max,
                safe_range: "[spawn_ring_min, ∞)",
            });
        }
        if !(self.drop_roll_coin <= self.drop_roll_gorboy && self.drop_roll_gorboy <= 1.0) {
            return Err(SimError::UnsafeConstant {
                name: "drop_roll_gorboy",
                value: self.drop_roll_gorboy,
                safe_range: "[drop_roll_coin, 1.0]",
            });
        }
        unit_interval("brake_factor", self.brake_factor)?;
        unit_interval("linear_drag", self.linear_drag)?;
        unit_interval("shake_decay", self.shake_decay)?;
        unit_interval("powerup_drop_chance", self.powerup_drop_chance)?;
        Ok(())
    }

    /// Fixed dock position in world space.
    #[inline]
    pub fn dock_position(&self) -> Vec2 {
        Vec2::new(self.dock_x, self.dock_y)
    }

    /// Number of asteroids in `wave`.
    #[inline]
    pub fn wave_size(&self, wave: u32) -> u32 {
        self.wave_base_count + self.wave_count_per_wave * wave
    }
}

fn positive(name: &'static str, value: f32) -> SimResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "(0.0, ∞)",
        })
    }
}

fn unit_interval(name: &'static str, value: f32) -> SimResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::UnsafeConstant {
            name,
            value,
            safe_range: "[0.0, 1.0]",
        })
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors
/// are logged but do not abort the game.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/game.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match GameConfig::from_toml_str(&contents) {
            Ok(loaded) => {
                *config = loaded;
                info!("Loaded game config from {path}");
            }
            Err(e) => {
                warn!("Failed to load {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let config = GameConfig::from_toml_str("bullet_damage = 80.0\ndock_radius = 20.0\n")
            .expect("partial config should parse");
        assert_eq!(config.bullet_damage, 80.0);
        assert_eq!(config.dock_radius, 20.0);
        assert_eq!(config.thrust_accel, THRUST_ACCEL, "untouched keys keep defaults");
    }

    #[test]
    fn empty_toml_is_identical_to_defaults() {
        let config = GameConfig::from_toml_str("").expect("empty config should parse");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn malformed_toml_reports_parse_error() {
        let err = GameConfig::from_toml_str("bullet_damage = \"lots\"").unwrap_err();
        assert!(matches!(err, SimError::ConfigParse { .. }), "got {err:?}");
    }

    #[test]
    fn non_positive_tick_clamp_is_rejected() {
        let err = GameConfig::from_toml_str("max_tick_dt = 0.0").unwrap_err();
        assert!(
            matches!(err, SimError::UnsafeConstant { name: "max_tick_dt", .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn inverted_radius_range_is_rejected() {
        let err = GameConfig::from_toml_str("asteroid_min_radius = 9.0").unwrap_err();
        assert!(matches!(err, SimError::UnsafeConstant { name: "asteroid_max_radius", .. }));
    }

    #[test]
    fn wave_size_follows_linear_formula() {
        let config = GameConfig::default();
        assert_eq!(config.wave_size(1), 10);
        assert_eq!(config.wave_size(2), 14);
        assert_eq!(config.wave_size(5), 26);
    }
}
