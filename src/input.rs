//! Control intent: the only thing the simulation knows about input devices.
//!
//! Device systems (keyboard, gamepad, on-screen touch buttons) write held
//! buttons into their own [`ControlSource`] slot of an [`InputAggregator`]
//! and report discrete turn *presses*.  Once per tick the aggregator folds
//! every source into one [`ControlIntent`] (logical OR per field) and hands
//! over any pending roll gesture.
//!
//! ## Double-tap roll
//!
//! Striking the same turn key twice within `double_tap_window_ms` queues a
//! roll toward that side.  `A` followed by `ArrowLeft` is two different keys
//! and does not pair.  Every press becomes the new reference tap, so a
//! third quick press would queue another roll; the ship ignores requests while
//! a roll is already running.

use bevy::input::gamepad::GamepadButton;
use bevy::input::keyboard::KeyCode;
use serde::Serialize;

/// Which way a turn control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnSide {
    Left,
    Right,
}

impl TurnSide {
    /// Sign used by the kinematics: left turns increase the heading.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TurnSide::Left => 1.0,
            TurnSide::Right => -1.0,
        }
    }
}

/// Normalised per-tick control request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlIntent {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub brake: bool,
    pub fire: bool,
    pub dock: bool,
    /// Double-tap gesture detected since the previous tick.
    pub roll: Option<TurnSide>,
}

impl ControlIntent {
    /// Net turn input: +1 left, −1 right, 0 when neither or both are held.
    pub fn turn_axis(&self) -> f32 {
        let mut axis = 0.0;
        if self.turn_left {
            axis += 1.0;
        }
        if self.turn_right {
            axis -= 1.0;
        }
        axis
    }
}

/// Physical origin of a control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSource {
    Keyboard,
    /// Slot for an on-screen button layer.  The desktop shell never feeds it.
    Touch,
    Gamepad,
}

impl ControlSource {
    const COUNT: usize = 3;

    #[inline]
    fn slot(self) -> usize {
        match self {
            ControlSource::Keyboard => 0,
            ControlSource::Touch => 1,
            ControlSource::Gamepad => 2,
        }
    }
}

/// Held buttons reported by a single source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldControls {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub brake: bool,
    pub fire: bool,
    pub dock: bool,
}

/// The physical control behind a turn press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKey {
    Key(KeyCode),
    Button(GamepadButton),
    /// On-screen turn button for one side.
    Touch(TurnSide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    key: TapKey,
    side: TurnSide,
    at_ms: u64,
}

/// Merges every input source into one [`ControlIntent`].
#[derive(Debug, Clone)]
pub struct InputAggregator {
    held: [HeldControls; ControlSource::COUNT],
    last_tap: Option<Tap>,
    pending_roll: Option<TurnSide>,
    double_tap_window_ms: u64,
}

impl InputAggregator {
    pub fn new(double_tap_window_ms: u64) -> Self {
        Self {
            held: [HeldControls::default(); ControlSource::COUNT],
            last_tap: None,
            pending_roll: None,
            double_tap_window_ms,
        }
    }

    /// Replace the held-button state of `source`.
    pub fn set_held(&mut self, source: ControlSource, held: HeldControls) {
        self.held[source.slot()] = held;
    }

    /// Report a fresh press (not a hold) of the turn control `key` at `now_ms`.
    ///
    /// Returns the roll side when this press completes a double-tap.  Taps
    /// only pair when the same physical key or button is struck twice.
    pub fn press_turn(&mut self, key: TapKey, side: TurnSide, now_ms: u64) -> Option<TurnSide> {
        let rolled = match self.last_tap {
            Some(prev)
                if prev.key == key
                    && prev.side == side
                    && now_ms.saturating_sub(prev.at_ms) < self.double_tap_window_ms =>
            {
                self.pending_roll = Some(side);
                Some(side)
            }
            _ => None,
        };
        self.last_tap = Some(Tap {
            key,
            side,
            at_ms: now_ms,
        });
        rolled
    }

    /// Fold all sources into this tick's intent and consume any pending roll.
    pub fn take_intent(&mut self) -> ControlIntent {
        let mut intent = ControlIntent {
            roll: self.pending_roll.take(),
            ..Default::default()
        };
        for held in &self.held {
            intent.turn_left |= held.turn_left;
            intent.turn_right |= held.turn_right;
            intent.thrust |= held.thrust;
            intent.brake |= held.brake;
            intent.fire |= held.fire;
            intent.dock |= held.dock;
        }
        intent
    }

    /// Release everything (e.g. on window focus loss).
    pub fn clear(&mut self) {
        self.held = [HeldControls::default(); ControlSource::COUNT];
        self.pending_roll = None;
        self.last_tap = None;
    }
}

impl Default for InputAggregator {
    fn default() -> Self {
        Self::new(crate::constants::DOUBLE_TAP_WINDOW_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_merge_with_logical_or() {
        let mut agg = InputAggregator::default();
        agg.set_held(
            ControlSource::Keyboard,
            HeldControls {
                thrust: true,
                ..Default::default()
            },
        );
        agg.set_held(
            ControlSource::Touch,
            HeldControls {
                fire: true,
                turn_left: true,
                ..Default::default()
            },
        );
        let intent = agg.take_intent();
        assert!(intent.thrust && intent.fire && intent.turn_left);
        assert!(!intent.dock && !intent.brake && !intent.turn_right);
    }

    #[test]
    fn releasing_one_source_keeps_the_other() {
        let mut agg = InputAggregator::default();
        let dock = HeldControls {
            dock: true,
            ..Default::default()
        };
        agg.set_held(ControlSource::Keyboard, dock);
        agg.set_held(ControlSource::Touch, dock);
        agg.set_held(ControlSource::Keyboard, HeldControls::default());
        assert!(agg.take_intent().dock);
    }

    const KEY_A: TapKey = TapKey::Key(KeyCode::KeyA);
    const KEY_D: TapKey = TapKey::Key(KeyCode::KeyD);

    #[test]
    fn double_tap_within_window_queues_roll() {
        let mut agg = InputAggregator::new(300);
        assert_eq!(agg.press_turn(KEY_A, TurnSide::Left, 1000), None);
        assert_eq!(
            agg.press_turn(KEY_A, TurnSide::Left, 1250),
            Some(TurnSide::Left)
        );
        assert_eq!(agg.take_intent().roll, Some(TurnSide::Left));
        assert_eq!(agg.take_intent().roll, None, "roll is consumed once");
    }

    #[test]
    fn slow_double_tap_does_not_roll() {
        let mut agg = InputAggregator::new(300);
        agg.press_turn(KEY_D, TurnSide::Right, 1000);
        assert_eq!(agg.press_turn(KEY_D, TurnSide::Right, 1300), None);
    }

    #[test]
    fn alternating_sides_do_not_roll() {
        let mut agg = InputAggregator::new(300);
        agg.press_turn(KEY_A, TurnSide::Left, 1000);
        assert_eq!(agg.press_turn(KEY_D, TurnSide::Right, 1100), None);
        assert_eq!(agg.press_turn(KEY_A, TurnSide::Left, 1200), None);
    }

    #[test]
    fn taps_from_different_sources_do_not_pair() {
        let mut agg = InputAggregator::new(300);
        agg.press_turn(KEY_A, TurnSide::Left, 1000);
        let shoulder = TapKey::Button(GamepadButton::LeftTrigger);
        assert_eq!(agg.press_turn(shoulder, TurnSide::Left, 1050), None);
    }

    #[test]
    fn two_keys_for_one_side_do_not_pair() {
        let mut agg = InputAggregator::new(300);
        agg.press_turn(KEY_A, TurnSide::Left, 1000);
        let arrow = TapKey::Key(KeyCode::ArrowLeft);
        assert_eq!(agg.press_turn(arrow, TurnSide::Left, 1100), None);
        assert_eq!(agg.press_turn(arrow, TurnSide::Left, 1200), Some(TurnSide::Left));
    }

    #[test]
    fn turn_axis_cancels_when_both_held() {
        let intent = ControlIntent {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        assert_eq!(intent.turn_axis(), 0.0);
    }
}
