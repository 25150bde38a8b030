//! Team data structure and roster lookups.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in slots and results).
pub type TeamId = Uuid;

/// Display name frozen into results for a team that is no longer on the roster.
pub const UNKNOWN_TEAM_NAME: &str = "Unknown team";

/// A team in the tournament. Brackets only ever hold the id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Lower is stronger; unseeded teams sort after every seeded one.
    pub seed: Option<u32>,
}

impl Team {
    /// Create a new unseeded team with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            seed: None,
        }
    }

    /// Create a team with a seed.
    pub fn seeded(name: impl Into<String>, seed: u32) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new(name)
        }
    }
}

/// Name of `id` on `teams`, or [`UNKNOWN_TEAM_NAME`] once it has been removed.
pub fn team_name(teams: &[Team], id: TeamId) -> String {
    teams
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| UNKNOWN_TEAM_NAME.to_string())
}
