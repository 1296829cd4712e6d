//! Round-robin standings table.

use crate::models::{
    GameMatch, Participant, ParticipantId, TournamentError, TournamentId, TournamentKind,
};
use crate::store::{require_tournament, TournamentStore};
use serde::Serialize;
use std::collections::HashMap;

/// Points for a win. There are no draws.
pub const POINTS_PER_WIN: u32 = 3;

/// One participant's line in the table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StandingRow {
    pub participant_id: ParticipantId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub points: u32,
}

impl StandingRow {
    fn new(p: &Participant) -> Self {
        Self {
            participant_id: p.id,
            name: p.name.clone(),
            played: 0,
            won: 0,
            lost: 0,
            points: 0,
        }
    }

    fn add_win(&mut self) {
        self.played += 1;
        self.won += 1;
        self.points += POINTS_PER_WIN;
    }

    fn add_loss(&mut self) {
        self.played += 1;
        self.lost += 1;
    }
}

/// Tally every decided match and rank by points, highest first.
///
/// Undecided matches count for nothing. Ties keep the order of `participants`.
pub fn compute_standings(participants: &[Participant], matches: &[GameMatch]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = participants.iter().map(StandingRow::new).collect();
    let index: HashMap<ParticipantId, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    for m in matches {
        let (Some(winner), Some(loser)) = (m.winner, m.loser()) else {
            continue;
        };
        if let Some(&i) = index.get(&winner) {
            rows[i].add_win();
        }
        if let Some(&i) = index.get(&loser) {
            rows[i].add_loss();
        }
    }

    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

/// Standings for a group tournament; knockout tournaments have none.
pub fn standings<S: TournamentStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<StandingRow>, TournamentError> {
    let tournament = require_tournament(store, tournament_id)?;
    if tournament.kind != TournamentKind::Group {
        return Err(TournamentError::NotGroupTournament);
    }
    let participants = store.participants(tournament_id)?;
    let matches = store.matches(tournament_id)?;
    Ok(compute_standings(&participants, &matches))
}
