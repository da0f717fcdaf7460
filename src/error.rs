//! Game error types.
//!
//! Nothing on the simulation path is fatal: configuration problems fall back
//! to compiled defaults and advisory failures fall back to a canned line.
//! These types carry the reason far enough to be logged.

use std::fmt;

/// Top-level error enum for the game.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// `assets/game.toml` exists but could not be deserialised.
    ConfigParse {
        /// Parser message, including the offending line where available.
        reason: String,
    },

    /// A configuration value is outside its safe operating range.
    UnsafeConstant {
        /// Name of the config key (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },

    /// The advisory provider could not produce a briefing.
    AdvisoryFailed {
        /// Provider-supplied description of the failure.
        reason: String,
    },

    /// A briefing request was still outstanding after the configured timeout.
    AdvisoryTimedOut {
        /// Seconds the request was allowed to run.
        after_secs: f32,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::ConfigParse { reason } => {
                write!(f, "config parse failed: {}", reason)
            }
            SimError::UnsafeConstant {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "constant '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
            SimError::AdvisoryFailed { reason } => {
                write!(f, "advisory provider failed: {}", reason)
            }
            SimError::AdvisoryTimedOut { after_secs } => {
                write!(f, "advisory request timed out after {:.1}s", after_secs)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsafe_constant_message_names_key_and_range() {
        let err = SimError::UnsafeConstant {
            name: "dock_radius",
            value: -1.0,
            safe_range: "(0.0, ∞)",
        };
        let msg = err.to_string();
        assert!(msg.contains("dock_radius"), "{msg}");
        assert!(msg.contains("(0.0, ∞)"), "{msg}");
    }

    #[test]
    fn timeout_message_rounds_seconds() {
        let err = SimError::AdvisoryTimedOut { after_secs: 8.0 };
        assert_eq!(err.to_string(), "advisory request timed out after 8.0s");
    }
}
