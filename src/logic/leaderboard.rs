//! Predictions on match winners and the predictors' leaderboard.

use crate::logic::registry::normalize_name;
use crate::models::{GameMatch, MatchId, ParticipantId, Prediction, TournamentError, TournamentId};
use crate::store::{require_tournament, TournamentStore};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub predictor: String,
    /// Predictions on decided matches only.
    pub total_predictions: u32,
    pub correct_predictions: u32,
}

/// Store a prediction. The predicted winner must be playing in the match.
pub fn add_prediction<S: TournamentStore + ?Sized>(
    store: &mut S,
    match_id: MatchId,
    predictor: &str,
    predicted_winner: ParticipantId,
) -> Result<Prediction, TournamentError> {
    let predictor = normalize_name(predictor)?;
    let game = store
        .get_match(match_id)?
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !game.has_participant(predicted_winner) {
        return Err(TournamentError::InvalidPrediction {
            match_id,
            predicted_winner,
        });
    }
    let prediction = Prediction::new(match_id, predictor, predicted_winner);
    store.put_prediction(prediction.clone())?;
    Ok(prediction)
}

/// Score predictions against recorded winners; most correct first, then most predictions.
pub fn compute_leaderboard(predictions: &[Prediction], matches: &[GameMatch]) -> Vec<LeaderboardRow> {
    let winners: HashMap<MatchId, ParticipantId> = matches
        .iter()
        .filter_map(|m| m.winner.map(|w| (m.id, w)))
        .collect();

    let mut rows: Vec<LeaderboardRow> = Vec::new();
    for p in predictions {
        let Some(&winner) = winners.get(&p.match_id) else {
            continue;
        };
        let idx = match rows.iter().position(|r| r.predictor == p.predictor) {
            Some(i) => i,
            None => {
                rows.push(LeaderboardRow {
                    predictor: p.predictor.clone(),
                    total_predictions: 0,
                    correct_predictions: 0,
                });
                rows.len() - 1
            }
        };
        rows[idx].total_predictions += 1;
        if p.predicted_winner == winner {
            rows[idx].correct_predictions += 1;
        }
    }

    rows.sort_by(|a, b| {
        b.correct_predictions
            .cmp(&a.correct_predictions)
            .then(b.total_predictions.cmp(&a.total_predictions))
    });
    rows
}

pub fn leaderboard<S: TournamentStore + ?Sized>(
    store: &S,
    tournament_id: TournamentId,
) -> Result<Vec<LeaderboardRow>, TournamentError> {
    require_tournament(store, tournament_id)?;
    let predictions = store.predictions(tournament_id)?;
    let matches = store.matches(tournament_id)?;
    Ok(compute_leaderboard(&predictions, &matches))
}
