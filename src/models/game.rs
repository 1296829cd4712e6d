//! Match (game) and Side for head-to-head pairings.

use crate::models::participant::ParticipantId;
use crate::models::tournament::TournamentId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which participant slot of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    One,
    Two,
}

impl Side {
    /// Slot a winner of `slot` takes in the next round: odd slots feed side one, even slots side two.
    pub fn feeding_from(slot: u32) -> Self {
        if slot % 2 == 1 {
            Side::One
        } else {
            Side::Two
        }
    }
}

/// A single match between two participants.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-indexed; round 1 is the earliest.
    pub round: u32,
    /// 1-indexed position within the round.
    pub slot: u32,
    /// None while waiting for an earlier round's winner.
    pub participant_1: Option<ParticipantId>,
    pub participant_2: Option<ParticipantId>,
    /// None if not yet played.
    pub winner: Option<ParticipantId>,
    pub score: Option<String>,
}

impl GameMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        slot: u32,
        participant_1: Option<ParticipantId>,
        participant_2: Option<ParticipantId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round,
            slot,
            participant_1,
            participant_2,
            winner: None,
            score: None,
        }
    }

    /// Both participant slots are filled.
    pub fn is_ready(&self) -> bool {
        self.participant_1.is_some() && self.participant_2.is_some()
    }

    pub fn has_participant(&self, id: ParticipantId) -> bool {
        self.participant_1 == Some(id) || self.participant_2 == Some(id)
    }

    /// The other participant when `winner` is one of the two.
    pub fn loser(&self) -> Option<ParticipantId> {
        let winner = self.winner?;
        if self.participant_1 == Some(winner) {
            self.participant_2
        } else if self.participant_2 == Some(winner) {
            self.participant_1
        } else {
            None
        }
    }

    pub fn set_participant(&mut self, side: Side, id: ParticipantId) {
        match side {
            Side::One => self.participant_1 = Some(id),
            Side::Two => self.participant_2 = Some(id),
        }
    }

    /// Overwrite the result (recording twice keeps the latest).
    pub fn set_result(&mut self, winner: ParticipantId, score: impl Into<String>) {
        self.winner = Some(winner);
        self.score = Some(score.into());
    }
}
