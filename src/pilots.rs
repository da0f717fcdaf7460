//! Pilot roster.
//!
//! Pilots are cosmetic: the name travels with each advisory request and the
//! accent colour tints the hull.  They do not change any tuning.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pilot {
    pub name: &'static str,
    pub tagline: &'static str,
    /// 8-bit hue byte for the hull tint.
    pub accent: u8,
}

impl Pilot {
    /// Hull tint derived from the accent byte.
    pub fn color(&self) -> Color {
        Color::hsl(self.accent as f32 / 255.0 * 360.0, 0.7, 0.6)
    }
}

pub const ROSTER: [Pilot; 3] = [
    Pilot {
        name: "Null Pilot",
        tagline: "silent hull",
        accent: 0xA1,
    },
    Pilot {
        name: "Gorboy Raider",
        tagline: "coin hungry",
        accent: 0xB7,
    },
    Pilot {
        name: "Dock Whisperer",
        tagline: "fast banking",
        accent: 0xC3,
    },
];

/// Index into [`ROSTER`] of the pilot currently flying.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectedPilot(pub usize);

impl SelectedPilot {
    pub fn pilot(&self) -> &'static Pilot {
        &ROSTER[self.0 % ROSTER.len()]
    }

    /// Step to the next pilot, wrapping at the end of the roster.
    pub fn cycle(&mut self) -> &'static Pilot {
        self.0 = (self.0 + 1) % ROSTER.len();
        self.pilot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_around_roster() {
        let mut selected = SelectedPilot::default();
        assert_eq!(selected.pilot().name, "Null Pilot");
        selected.cycle();
        selected.cycle();
        assert_eq!(selected.pilot().name, "Dock Whisperer");
        assert_eq!(selected.cycle().name, "Null Pilot");
    }

    #[test]
    fn out_of_range_index_still_resolves() {
        assert_eq!(SelectedPilot(4).pilot().name, "Gorboy Raider");
    }
}
