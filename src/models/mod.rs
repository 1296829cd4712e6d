//! Data structures for tournaments: participants, matches, predictions, tournament status.

mod game;
mod participant;
mod prediction;
mod tournament;

pub use game::{GameMatch, MatchId, Side};
pub use participant::{Participant, ParticipantId, ParticipantKind};
pub use prediction::Prediction;
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentKind, TournamentStatus, ValidationError,
};
