//! Store wrapper whose writes can be switched off, for storage-failure tests.

use tournament_engine::{
    GameMatch, MatchId, MemoryStore, Participant, ParticipantId, Prediction, Tournament,
    TournamentError, TournamentId, TournamentStore,
};

/// Reads go to `inner`; while `fail_writes` is set every write fails and changes nothing.
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_writes: bool,
}

impl FailingStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_writes: false,
        }
    }

    fn check(&self) -> Result<(), TournamentError> {
        if self.fail_writes {
            Err(TournamentError::Storage("disk full".into()))
        } else {
            Ok(())
        }
    }
}

impl TournamentStore for FailingStore {
    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        self.inner.get_tournament(id)
    }

    fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        self.inner.list_tournaments()
    }

    fn put_tournament(&mut self, tournament: Tournament) -> Result<(), TournamentError> {
        self.check()?;
        self.inner.put_tournament(tournament)
    }

    fn delete_tournament(&mut self, id: TournamentId) -> Result<bool, TournamentError> {
        self.check()?;
        self.inner.delete_tournament(id)
    }

    fn get_participant(&self, id: ParticipantId) -> Result<Option<Participant>, TournamentError> {
        self.inner.get_participant(id)
    }

    fn participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, TournamentError> {
        self.inner.participants(tournament_id)
    }

    fn put_participant(&mut self, participant: Participant) -> Result<(), TournamentError> {
        self.check()?;
        self.inner.put_participant(participant)
    }

    fn delete_participant(&mut self, id: ParticipantId) -> Result<bool, TournamentError> {
        self.check()?;
        self.inner.delete_participant(id)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<GameMatch>, TournamentError> {
        self.inner.get_match(id)
    }

    fn matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, TournamentError> {
        self.inner.matches(tournament_id)
    }

    fn find_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        slot: u32,
    ) -> Result<Option<GameMatch>, TournamentError> {
        self.inner.find_match(tournament_id, round, slot)
    }

    fn put_matches(&mut self, matches: Vec<GameMatch>) -> Result<(), TournamentError> {
        self.check()?;
        self.inner.put_matches(matches)
    }

    fn replace_matches(
        &mut self,
        tournament: Tournament,
        matches: Vec<GameMatch>,
    ) -> Result<(), TournamentError> {
        self.check()?;
        self.inner.replace_matches(tournament, matches)
    }

    fn put_prediction(&mut self, prediction: Prediction) -> Result<(), TournamentError> {
        self.check()?;
        self.inner.put_prediction(prediction)
    }

    fn predictions(&self, tournament_id: TournamentId) -> Result<Vec<Prediction>, TournamentError> {
        self.inner.predictions(tournament_id)
    }
}
