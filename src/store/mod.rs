//! Keyed record storage for tournaments, participants, matches and predictions.
//!
//! Every engine operation takes a store explicitly; nothing is held between calls.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    GameMatch, MatchId, Participant, ParticipantId, Prediction, Tournament, TournamentError,
    TournamentId,
};

/// Get/put/delete contract the engine runs against.
///
/// Listing methods return records in a stable order: participants in registration order,
/// matches by `(round, slot)`.
pub trait TournamentStore {
    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError>;
    fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError>;
    fn put_tournament(&mut self, tournament: Tournament) -> Result<(), TournamentError>;
    /// Remove a tournament together with its participants, matches and their predictions.
    fn delete_tournament(&mut self, id: TournamentId) -> Result<bool, TournamentError>;

    fn get_participant(&self, id: ParticipantId) -> Result<Option<Participant>, TournamentError>;
    fn participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, TournamentError>;
    /// Insert or update in place (updates keep the registration position).
    fn put_participant(&mut self, participant: Participant) -> Result<(), TournamentError>;
    fn delete_participant(&mut self, id: ParticipantId) -> Result<bool, TournamentError>;

    fn get_match(&self, id: MatchId) -> Result<Option<GameMatch>, TournamentError>;
    fn matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, TournamentError>;
    fn find_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        slot: u32,
    ) -> Result<Option<GameMatch>, TournamentError>;
    /// Write every match or none of them.
    fn put_matches(&mut self, matches: Vec<GameMatch>) -> Result<(), TournamentError>;
    /// Store `tournament` and swap its match set (and predictions on the old set) for `matches`,
    /// all in one write.
    fn replace_matches(
        &mut self,
        tournament: Tournament,
        matches: Vec<GameMatch>,
    ) -> Result<(), TournamentError>;

    fn put_prediction(&mut self, prediction: Prediction) -> Result<(), TournamentError>;
    /// Predictions on any match of the tournament.
    fn predictions(&self, tournament_id: TournamentId) -> Result<Vec<Prediction>, TournamentError>;
}

/// Load a tournament or fail with `TournamentNotFound`.
pub fn require_tournament<S: TournamentStore + ?Sized>(
    store: &S,
    id: TournamentId,
) -> Result<Tournament, TournamentError> {
    store
        .get_tournament(id)?
        .ok_or(TournamentError::TournamentNotFound(id))
}
