//! Draw: build the full match schedule from a participant list.

use crate::models::{
    GameMatch, Participant, ParticipantId, TournamentError, TournamentId, TournamentKind,
    ValidationError,
};
use crate::store::{require_tournament, TournamentStore};
use rand::seq::SliceRandom;
use rand::Rng;

/// Check the field size for `kind`.
///
/// The even check runs before the power-of-two check so an odd knockout field reports
/// `OddKnockoutField`.
pub fn validate_field(count: usize, kind: TournamentKind) -> Result<(), ValidationError> {
    if count < 2 {
        return Err(ValidationError::TooFewParticipants { count });
    }
    if kind == TournamentKind::Knockout {
        if count % 2 != 0 {
            return Err(ValidationError::OddKnockoutField { count });
        }
        if !count.is_power_of_two() {
            return Err(ValidationError::KnockoutFieldNotPowerOfTwo { count });
        }
    }
    Ok(())
}

/// Generate every match for a tournament from participants in draw order.
///
/// Pure: no shuffling, no storage. The caller shuffles beforehand and persists afterwards.
///
/// - Knockout: round 1 pairs neighbours (`[0, 1]`, `[2, 3]`, ...); each later round has half as
///   many matches, all with empty participant slots.
/// - Group: one round-1 match per pair `(i, j)` with `i < j`, outer index ascending then inner.
pub fn generate_matches(
    tournament_id: TournamentId,
    participants: &[Participant],
    kind: TournamentKind,
) -> Result<Vec<GameMatch>, TournamentError> {
    validate_field(participants.len(), kind)?;
    let ids: Vec<ParticipantId> = participants.iter().map(|p| p.id).collect();
    Ok(match kind {
        TournamentKind::Knockout => knockout_matches(tournament_id, &ids),
        TournamentKind::Group => round_robin_matches(tournament_id, &ids),
    })
}

fn knockout_matches(tournament_id: TournamentId, ids: &[ParticipantId]) -> Vec<GameMatch> {
    let mut matches: Vec<GameMatch> = ids
        .chunks_exact(2)
        .zip(1u32..)
        .map(|(pair, slot)| GameMatch::new(tournament_id, 1, slot, Some(pair[0]), Some(pair[1])))
        .collect();

    let mut round = 1;
    let mut slots = matches.len() as u32;
    while slots > 1 {
        round += 1;
        slots /= 2;
        matches.extend((1..=slots).map(|slot| GameMatch::new(tournament_id, round, slot, None, None)));
    }
    matches
}

fn round_robin_matches(tournament_id: TournamentId, ids: &[ParticipantId]) -> Vec<GameMatch> {
    let mut matches = Vec::with_capacity(ids.len() * (ids.len() - 1) / 2);
    let mut slot = 0;
    for (i, &a) in ids.iter().enumerate() {
        for &b in &ids[i + 1..] {
            slot += 1;
            matches.push(GameMatch::new(tournament_id, 1, slot, Some(a), Some(b)));
        }
    }
    matches
}

/// Shuffle the registered participants, generate the schedule, and store it.
///
/// On success the tournament's previous match set (and predictions on it) is replaced and the
/// tournament becomes Active. On a validation failure nothing is written.
pub fn draw<S, R>(
    store: &mut S,
    tournament_id: TournamentId,
    rng: &mut R,
) -> Result<Vec<GameMatch>, TournamentError>
where
    S: TournamentStore + ?Sized,
    R: Rng + ?Sized,
{
    let mut tournament = require_tournament(store, tournament_id)?;
    let mut participants = store.participants(tournament_id)?;
    participants.shuffle(rng);

    let matches = generate_matches(tournament_id, &participants, tournament.kind)?;

    tournament.activate();
    store.replace_matches(tournament, matches.clone())?;

    log::info!(
        "Drew tournament {}: {} participants, {} matches",
        tournament_id,
        participants.len(),
        matches.len()
    );
    Ok(matches)
}
