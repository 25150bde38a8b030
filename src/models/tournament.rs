//! Tournament and TournamentState.

use crate::models::bracket::Bracket;
use crate::models::game::{GameAction, GameId, GameStatus};
use crate::models::settings::{SeedingMode, SeedingType, Settings};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Not enough teams to build a bracket.
    NotEnoughTeams { required: usize },
    /// Team names must be non-empty.
    InvalidTeamName,
    /// A team with this name already exists (names are unique, case-insensitive).
    DuplicateTeamName,
    TeamNotFound(TeamId),
    GameNotFound(GameId),
    /// Game does not have two real teams; bye games finish on their own.
    GameNotPlayable(GameId),
    GameAlreadyFinished(GameId),
    /// The given winner is not one of the game's two teams.
    WinnerNotInGame(GameId),
    /// Slots can only be edited on queued, unfinished games.
    SlotNotEditable(GameId),
    /// The game's clock cannot take this action from its current status.
    InvalidTransition { from: GameStatus, action: GameAction },
    /// A row of an uploaded seed file could not be read.
    InvalidUpload { line: usize, reason: String },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::NotEnoughTeams { required } => {
                write!(f, "Need at least {} teams to start", required)
            }
            TournamentError::InvalidTeamName => write!(f, "Team name must not be empty"),
            TournamentError::DuplicateTeamName => write!(f, "A team with this name already exists"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::GameNotFound(_) => write!(f, "Game not found"),
            TournamentError::GameNotPlayable(_) => write!(f, "Game does not have two teams yet"),
            TournamentError::GameAlreadyFinished(_) => write!(f, "Game is already finished"),
            TournamentError::WinnerNotInGame(_) => write!(f, "Winner is not playing in this game"),
            TournamentError::SlotNotEditable(_) => {
                write!(f, "Slots can only be changed before a game starts")
            }
            TournamentError::InvalidTransition { from, action } => {
                write!(f, "Cannot {:?} a game that is {:?}", action, from)
            }
            TournamentError::InvalidUpload { line, reason } => {
                write!(f, "Seed file line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Adding teams, choosing settings and seeding; no bracket yet.
    #[default]
    Setup,
    /// Bracket built; results are being entered.
    InProgress,
    /// Champion decided.
    Completed,
}

/// Full tournament state: roster, settings, and the bracket once started.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub teams: Vec<Team>,
    pub settings: Settings,
    pub seeding_mode: SeedingMode,
    pub seeding_type: SeedingType,
    pub bracket: Option<Bracket>,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a new tournament in Setup state with no teams.
    pub fn new(name: impl Into<String>, settings: Settings) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams: Vec::new(),
            settings,
            seeding_mode: SeedingMode::default(),
            seeding_type: SeedingType::default(),
            bracket: None,
            state: TournamentState::Setup,
        }
    }

    /// Create a tournament with an initial roster. Still in Setup until started.
    pub fn with_teams(name: impl Into<String>, teams: Vec<Team>, settings: Settings) -> Self {
        Self {
            teams,
            ..Self::new(name, settings)
        }
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Add a team (Setup only). Names must be unique (case-insensitive).
    pub fn add_team(&mut self, name: impl Into<String>, seed: Option<u32>) -> Result<TeamId, TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidTeamName);
        }
        let is_duplicate = self
            .teams
            .iter()
            .any(|t| t.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateTeamName);
        }
        let mut team = Team::new(name_trimmed);
        team.seed = seed;
        let id = team.id;
        self.teams.push(team);
        Ok(id)
    }

    /// Remove a team by id. Allowed at any time: finished results keep the frozen name.
    pub fn remove_team(&mut self, team_id: TeamId) -> Result<(), TournamentError> {
        let idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        self.teams.remove(idx);
        Ok(())
    }

    /// Set or clear a team's seed (Setup only).
    pub fn set_team_seed(&mut self, team_id: TeamId, seed: Option<u32>) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or(TournamentError::TeamNotFound(team_id))?;
        team.seed = seed;
        Ok(())
    }

    /// Replace the settings (Setup only).
    pub fn set_settings(&mut self, settings: Settings) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.settings = settings;
        Ok(())
    }

    /// Choose seeding mode and type (Setup only).
    pub fn set_seeding(&mut self, mode: SeedingMode, seeding_type: SeedingType) -> Result<(), TournamentError> {
        if self.state != TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.seeding_mode = mode;
        self.seeding_type = seeding_type;
        Ok(())
    }

    /// Restart: back to Setup with the same roster and settings. Drops the bracket.
    pub fn restart_tournament(&mut self) -> Result<(), TournamentError> {
        if self.state == TournamentState::Setup {
            return Err(TournamentError::InvalidState);
        }
        self.bracket = None;
        self.state = TournamentState::Setup;
        Ok(())
    }
}
