//! Tournament settings and seeding options.

use serde::{Deserialize, Serialize};

/// What fills bracket positions beyond the number of teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenSlotPolicy {
    /// Auto-win placeholder.
    #[default]
    Bye,
    /// Left for the organizer to fill in by hand.
    Open,
}

/// Where the seeding order comes from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingMode {
    /// No seeding: teams are shuffled.
    #[default]
    Off,
    Random,
    /// Seeds typed in by the organizer.
    Manual,
    /// Seeds imported from a file by the surrounding application.
    Upload,
}

impl SeedingMode {
    /// Whether placement follows team seeds rather than a shuffle.
    pub fn is_seeded(self) -> bool {
        matches!(self, SeedingMode::Manual | SeedingMode::Upload)
    }
}

/// Placement algorithm used for seeded modes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedingType {
    /// 1 vs N, 2 vs N-1, top two seeds in opposite halves.
    #[default]
    Standard,
    /// Seed pairs split across halves, alternating which half gets the better seed.
    Snake,
    /// Currently placed exactly like `Standard`.
    Bye,
}

/// Per-tournament configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_game_minutes")]
    pub game_minutes: u32,
    #[serde(default = "default_warmup_minutes")]
    pub warmup_minutes: u32,
    #[serde(default = "default_flex_minutes")]
    pub flex_minutes: u32,
    #[serde(default = "default_courts")]
    pub courts: u32,
    #[serde(default)]
    pub open_slot_policy: OpenSlotPolicy,
    /// Double elimination when set.
    #[serde(default)]
    pub include_losers_bracket: bool,
}

fn default_game_minutes() -> u32 {
    20
}

fn default_warmup_minutes() -> u32 {
    5
}

fn default_flex_minutes() -> u32 {
    5
}

fn default_courts() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_minutes: default_game_minutes(),
            warmup_minutes: default_warmup_minutes(),
            flex_minutes: default_flex_minutes(),
            courts: default_courts(),
            open_slot_policy: OpenSlotPolicy::default(),
            include_losers_bracket: false,
        }
    }
}

impl Settings {
    /// Double-elimination settings with everything else at defaults.
    pub fn double_elimination() -> Self {
        Self {
            include_losers_bracket: true,
            ..Self::default()
        }
    }
}
