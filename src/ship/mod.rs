//! Ship module: kinematics, roll maneuver, firing, and hull damage.
//!
//! ## Sub-module layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`state`] | `ShipState`, `RollState`, invulnerability bookkeeping |
//! | [`control`] | Intent → turn / roll / thrust / brake / drift / fire |
//! | [`combat`] | Asteroid contact: shield-then-hull damage, knockback, destruction |
//!
//! ## States
//!
//! `Alive` (with a `Rolling` sub-state while `roll.active`) and `Destroyed`.
//! `Destroyed` is terminal until [`ShipState::respawn`].

pub mod combat;
pub mod control;
pub mod state;

pub use combat::{absorb_damage, resolve_asteroid_contact, ContactOutcome};
pub use control::{steer_ship, try_start_roll};
pub use state::{RollState, ShipState};
