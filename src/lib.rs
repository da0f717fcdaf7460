//! Gorboy Void: arcade asteroid-mining combat.
//!
//! The simulation core (ship, pools, collisions, economy, waves) is plain Rust
//! advanced by an explicit [`simulation::Simulation::tick`].  [`plugin`] wraps
//! it in a Bevy app shell; [`rendering`] is a debug renderer for the binary.

pub mod advisory;
pub mod collision;
pub mod config;
pub mod constants;
pub mod economy;
pub mod entities;
pub mod error;
pub mod hud;
pub mod input;
pub mod math;
pub mod pilots;
pub mod plugin;
pub mod rendering;
pub mod rng;
pub mod ship;
pub mod simulation;
pub mod wave;
