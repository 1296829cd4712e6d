//! In-memory store: HashMaps keyed by id, lost on restart.

use crate::models::{
    GameMatch, MatchId, Participant, ParticipantId, Prediction, Tournament, TournamentError,
    TournamentId,
};
use crate::store::TournamentStore;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tournaments: HashMap<TournamentId, Tournament>,
    /// Per tournament, in registration order.
    participants: HashMap<TournamentId, Vec<Participant>>,
    matches: HashMap<MatchId, GameMatch>,
    predictions: Vec<Prediction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn match_ids_of(&self, tournament_id: TournamentId) -> Vec<MatchId> {
        self.matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .map(|m| m.id)
            .collect()
    }

    fn drop_matches_of(&mut self, tournament_id: TournamentId) {
        let ids = self.match_ids_of(tournament_id);
        self.predictions.retain(|p| !ids.contains(&p.match_id));
        self.matches.retain(|_, m| m.tournament_id != tournament_id);
    }
}

impl TournamentStore for MemoryStore {
    fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, TournamentError> {
        Ok(self.tournaments.get(&id).cloned())
    }

    fn list_tournaments(&self) -> Result<Vec<Tournament>, TournamentError> {
        let mut all: Vec<Tournament> = self.tournaments.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    fn put_tournament(&mut self, tournament: Tournament) -> Result<(), TournamentError> {
        self.tournaments.insert(tournament.id, tournament);
        Ok(())
    }

    fn delete_tournament(&mut self, id: TournamentId) -> Result<bool, TournamentError> {
        self.drop_matches_of(id);
        self.participants.remove(&id);
        Ok(self.tournaments.remove(&id).is_some())
    }

    fn get_participant(&self, id: ParticipantId) -> Result<Option<Participant>, TournamentError> {
        Ok(self
            .participants
            .values()
            .flatten()
            .find(|p| p.id == id)
            .cloned())
    }

    fn participants(&self, tournament_id: TournamentId) -> Result<Vec<Participant>, TournamentError> {
        Ok(self
            .participants
            .get(&tournament_id)
            .cloned()
            .unwrap_or_default())
    }

    fn put_participant(&mut self, participant: Participant) -> Result<(), TournamentError> {
        let list = self.participants.entry(participant.tournament_id).or_default();
        match list.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => list.push(participant),
        }
        Ok(())
    }

    fn delete_participant(&mut self, id: ParticipantId) -> Result<bool, TournamentError> {
        for list in self.participants.values_mut() {
            if let Some(idx) = list.iter().position(|p| p.id == id) {
                list.remove(idx);
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn get_match(&self, id: MatchId) -> Result<Option<GameMatch>, TournamentError> {
        Ok(self.matches.get(&id).cloned())
    }

    fn matches(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, TournamentError> {
        let mut list: Vec<GameMatch> = self
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        list.sort_by_key(|m| (m.round, m.slot));
        Ok(list)
    }

    fn find_match(
        &self,
        tournament_id: TournamentId,
        round: u32,
        slot: u32,
    ) -> Result<Option<GameMatch>, TournamentError> {
        Ok(self
            .matches
            .values()
            .find(|m| m.tournament_id == tournament_id && m.round == round && m.slot == slot)
            .cloned())
    }

    fn put_matches(&mut self, matches: Vec<GameMatch>) -> Result<(), TournamentError> {
        self.matches.extend(matches.into_iter().map(|m| (m.id, m)));
        Ok(())
    }

    fn replace_matches(
        &mut self,
        tournament: Tournament,
        matches: Vec<GameMatch>,
    ) -> Result<(), TournamentError> {
        self.drop_matches_of(tournament.id);
        self.tournaments.insert(tournament.id, tournament);
        self.matches.extend(matches.into_iter().map(|m| (m.id, m)));
        Ok(())
    }

    fn put_prediction(&mut self, prediction: Prediction) -> Result<(), TournamentError> {
        self.predictions.push(prediction);
        Ok(())
    }

    fn predictions(&self, tournament_id: TournamentId) -> Result<Vec<Prediction>, TournamentError> {
        let ids = self.match_ids_of(tournament_id);
        Ok(self
            .predictions
            .iter()
            .filter(|p| ids.contains(&p.match_id))
            .cloned()
            .collect())
    }
}
