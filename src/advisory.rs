//! Tactical advisory: one short line of flavour text per wave.
//!
//! The core never waits on this.  It only queues an [`AdvisoryRequest`] when a
//! wave begins; the app shell hands the request to an [`AdvisoryProvider`] off
//! the main thread and shows whatever comes back.  Every failure mode
//! collapses into a fixed fallback line via [`resolve_briefing`].

use crate::error::{SimError, SimResult};
use bevy::log::warn;

/// Shown until the first briefing arrives.
pub const LINK_PENDING: &str = "Establishing tactical link...";

/// Used when a provider answers with nothing.
pub const EMPTY_FALLBACK: &str = "Stay frosty, pilot. Sector clear... for now.";

/// Used when a provider fails or times out.
pub const FAILURE_FALLBACK: &str = "Void interference detected. Neural link unstable. Eyes up.";

/// Inputs to one briefing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRequest {
    pub wave: u32,
    /// Hull as a whole percentage, `0..=100`.
    pub hull_percent: u32,
    pub pilot: String,
}

/// Anything that can turn a request into a line of text.
///
/// Implementations may block; they are always driven from a background task.
pub trait AdvisoryProvider: Send + Sync {
    fn brief(&self, request: &AdvisoryRequest) -> SimResult<String>;
}

/// Ask `provider` and fold every outcome into displayable text.
pub fn resolve_briefing(provider: &dyn AdvisoryProvider, request: &AdvisoryRequest) -> String {
    match provider.brief(request) {
        Ok(text) if text.trim().is_empty() => EMPTY_FALLBACK.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("Advisory for wave {} failed: {}", request.wave, e);
            FAILURE_FALLBACK.to_string()
        }
    }
}

/// Text for a request abandoned after the link timeout.
pub fn timed_out_briefing(request: &AdvisoryRequest, after_secs: f32) -> String {
    let err = SimError::AdvisoryTimedOut { after_secs };
    warn!("Advisory for wave {} dropped: {}", request.wave, err);
    FAILURE_FALLBACK.to_string()
}

// ── Offline provider ──────────────────────────────────────────────────────────

/// Built-in provider that composes briefings locally from canned pilot slang.
///
/// Deterministic: the same request always yields the same line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldManual;

const OPENERS: [&str; 4] = [
    "Void-drift is thick out here",
    "Scanners show fresh scrap-metal",
    "Rock field inbound",
    "Long-range sweep is lit up",
];

const ORDERS: [&str; 4] = [
    "crack the big ones first and sweep the drops",
    "keep the nose moving and bank-orbit when the hold gets heavy",
    "roll through the gaps, don't trade paint with the rocks",
    "strip the field and get that cargo home",
];

impl AdvisoryProvider for FieldManual {
    fn brief(&self, request: &AdvisoryRequest) -> SimResult<String> {
        let pilot = request.pilot.trim();
        let pilot = if pilot.is_empty() { "pilot" } else { pilot };

        let line = match request.hull_percent {
            0 => format!("{pilot}, you're scrap-metal. Reboot and get back out there."),
            1..=30 => format!(
                "Hull-breach warning, {pilot}. Wave {} is no place to play hero: bank-orbit and patch up.",
                request.wave
            ),
            _ => {
                let i = request.wave as usize;
                format!(
                    "Wave {}. {}, {pilot}: {}.",
                    request.wave,
                    OPENERS[i % OPENERS.len()],
                    ORDERS[(i / OPENERS.len() + i) % ORDERS.len()]
                )
            }
        };
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(SimResult<String>);

    impl AdvisoryProvider for Canned {
        fn brief(&self, _: &AdvisoryRequest) -> SimResult<String> {
            self.0.clone()
        }
    }

    fn request(wave: u32, hull_percent: u32) -> AdvisoryRequest {
        AdvisoryRequest {
            wave,
            hull_percent,
            pilot: "Null Pilot".into(),
        }
    }

    #[test]
    fn empty_answer_uses_quiet_fallback() {
        let text = resolve_briefing(&Canned(Ok("   ".into())), &request(1, 100));
        assert_eq!(text, EMPTY_FALLBACK);
    }

    #[test]
    fn provider_error_uses_interference_fallback() {
        let failing = Canned(Err(SimError::AdvisoryFailed {
            reason: "offline".into(),
        }));
        assert_eq!(resolve_briefing(&failing, &request(2, 80)), FAILURE_FALLBACK);
    }

    #[test]
    fn answer_is_trimmed() {
        let text = resolve_briefing(&Canned(Ok("  Eyes up.\n".into())), &request(3, 50));
        assert_eq!(text, "Eyes up.");
    }

    #[test]
    fn timeout_maps_to_failure_text() {
        assert_eq!(timed_out_briefing(&request(1, 100), 8.0), FAILURE_FALLBACK);
    }

    #[test]
    fn field_manual_is_deterministic_and_mentions_wave() {
        let a = FieldManual.brief(&request(5, 90)).unwrap();
        let b = FieldManual.brief(&request(5, 90)).unwrap();
        assert_eq!(a, b);
        assert!(a.contains("Wave 5"));
        assert!(a.contains("Null Pilot"));
    }

    #[test]
    fn field_manual_warns_on_low_hull() {
        let text = FieldManual.brief(&request(4, 20)).unwrap();
        assert!(text.contains("Hull-breach"));
    }

    #[test]
    fn field_manual_fills_in_missing_pilot() {
        let mut req = request(1, 100);
        req.pilot = String::new();
        let text = FieldManual.brief(&req).unwrap();
        assert!(text.contains("pilot"));
    }
}
