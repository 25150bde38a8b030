//! Seed import from an uploaded CSV roster.
//!
//! Expected columns: `name` and an optional `seed` (blank means unseeded). Extra columns
//! are ignored. Rows naming an existing team (case-insensitive) update its seed; other
//! rows add a team.

use crate::models::{SeedingMode, Tournament, TournamentError, TournamentState};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SeedRow {
    name: String,
    #[serde(default)]
    seed: Option<u32>,
}

/// Import seeds from CSV text and switch the tournament to upload seeding. Setup only.
///
/// The whole file is validated before anything changes; a bad row leaves the roster as it was.
/// Returns the number of rows applied.
pub fn import_seeds_csv(tournament: &mut Tournament, data: &str) -> Result<usize, TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let rows = parse_rows(data)?;

    for row in &rows {
        let existing = tournament
            .teams
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(&row.name));
        match existing {
            Some(team) => team.seed = row.seed,
            None => {
                tournament.add_team(row.name.as_str(), row.seed)?;
            }
        }
    }
    tournament.seeding_mode = SeedingMode::Upload;
    log::info!("Imported {} seed row(s) into tournament {}", rows.len(), tournament.id);
    Ok(rows.len())
}

fn parse_rows(data: &str) -> Result<Vec<SeedRow>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data.as_bytes());

    let mut rows: Vec<SeedRow> = Vec::new();
    for (line, record) in reader.deserialize::<SeedRow>().enumerate() {
        // header is line 1
        let row = record.map_err(|e| TournamentError::InvalidUpload {
            line: line + 2,
            reason: e.to_string(),
        })?;
        if row.name.is_empty() {
            return Err(TournamentError::InvalidUpload {
                line: line + 2,
                reason: "missing team name".to_string(),
            });
        }
        if rows.iter().any(|r| r.name.eq_ignore_ascii_case(&row.name)) {
            return Err(TournamentError::DuplicateTeamName);
        }
        rows.push(row);
    }
    Ok(rows)
}
