//! Read-only bracket projection: matches grouped by round.

use crate::models::{GameMatch, TournamentError, TournamentId, TournamentKind};
use crate::store::{require_tournament, TournamentStore};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct BracketRound {
    pub round: u32,
    /// Display name, e.g. "Final" or "Round 1".
    pub label: String,
    pub matches: Vec<GameMatch>,
}

/// Display name of a round. Knockout rounds are named from the end of the bracket.
pub fn round_label(kind: TournamentKind, round: u32, total_rounds: u32) -> String {
    if kind == TournamentKind::Group {
        return "Group stage".to_string();
    }
    match total_rounds.saturating_sub(round) {
        0 => "Final".to_string(),
        1 => "Semi-final".to_string(),
        2 => "Quarter-final".to_string(),
        _ => format!("Round {}", round),
    }
}

/// Group matches by round ascending, slots ascending within each round.
pub fn group_by_round(kind: TournamentKind, mut matches: Vec<GameMatch>) -> Vec<BracketRound> {
    matches.sort_by_key(|m| (m.round, m.slot));
    let total_rounds = matches.last().map(|m| m.round).unwrap_or(0);

    let mut rounds: Vec<BracketRound> = Vec::new();
    for m in matches {
        match rounds.last_mut() {
            Some(r) if r.round == m.round => r.matches.push(m),
            _ => rounds.push(BracketRound {
                round: m.round,
                label: round_label(kind, m.round, total_rounds),
                matches: vec![m],
            }),
        }
    }
    rounds
}

pub fn bracket_view<S: TournamentStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<BracketRound>, TournamentError> {
    let tournament = require_tournament(store, tournament_id)?;
    let matches = store.matches(tournament_id)?;
    Ok(group_by_round(tournament.kind, matches))
}
