//! Recording results and advancing knockout winners into the next round.

use crate::models::{GameMatch, MatchId, ParticipantId, Side, TournamentError, TournamentKind};
use crate::store::{require_tournament, TournamentStore};
use serde::Serialize;

/// What recording a result did beyond updating the match itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Advancement {
    /// Group play: no other match is affected.
    Recorded,
    /// Knockout match with no later round (the final).
    Final,
    /// The winner was written into a participant slot of the next-round match.
    Propagated {
        match_id: MatchId,
        round: u32,
        slot: u32,
        side: Side,
    },
}

/// Round, slot and side the winner of `(round, slot)` moves to.
pub fn next_position(round: u32, slot: u32) -> (u32, u32, Side) {
    (round + 1, slot.div_ceil(2), Side::feeding_from(slot))
}

/// A result is only accepted for a match with both participants and a winner among them.
pub fn validate_result(game: &GameMatch, winner: ParticipantId) -> Result<(), TournamentError> {
    if !game.is_ready() {
        return Err(TournamentError::MatchNotReady(game.id));
    }
    if !game.has_participant(winner) {
        return Err(TournamentError::InvalidResult {
            match_id: game.id,
            winner,
        });
    }
    Ok(())
}

/// Record `winner` and `score` for a match; in a knockout, also fill the next-round slot.
///
/// Both writes overwrite: re-recording a match replaces its result and the downstream slot.
/// Propagation goes exactly one round forward; results already recorded further down the
/// bracket are left as they are.
pub fn record_result<S: TournamentStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    winner: ParticipantId,
    score: impl Into<String>,
) -> Result<Advancement, TournamentError> {
    let mut game = store
        .get_match(match_id)?
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if let Err(e) = validate_result(&game, winner) {
        log::warn!("Rejected result for match {}: {}", match_id, e);
        return Err(e);
    }
    let tournament = require_tournament(store, game.tournament_id)?;

    let (round, slot) = (game.round, game.slot);
    let (next_round, next_slot, side) = next_position(round, slot);
    let next = match tournament.kind {
        TournamentKind::Knockout => store.find_match(tournament.id, next_round, next_slot)?,
        TournamentKind::Group => None,
    };

    game.set_result(winner, score);
    let (advancement, writes) = match (tournament.kind, next) {
        (TournamentKind::Group, _) => (Advancement::Recorded, vec![game]),
        (TournamentKind::Knockout, None) => {
            log::debug!("Match {} is the final; nothing to propagate", match_id);
            (Advancement::Final, vec![game])
        }
        (TournamentKind::Knockout, Some(mut next)) => {
            next.set_participant(side, winner);
            log::debug!(
                "Advancing {} to round {}, slot {} ({:?})",
                winner,
                next.round,
                next.slot,
                side
            );
            let advancement = Advancement::Propagated {
                match_id: next.id,
                round: next.round,
                slot: next.slot,
                side,
            };
            (advancement, vec![game, next])
        }
    };

    // Result and propagated slot are committed together.
    store.put_matches(writes)?;
    log::info!(
        "Recorded result for match {} (round {}, slot {}): winner {}",
        match_id,
        round,
        slot,
        winner
    );
    Ok(advancement)
}
