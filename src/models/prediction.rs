//! Prediction: a spectator's guess at a match winner.

use crate::models::game::MatchId;
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PredictionId = Uuid;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: PredictionId,
    pub match_id: MatchId,
    /// Free-form name of whoever made the guess.
    pub predictor: String,
    pub predicted_winner: ParticipantId,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(match_id: MatchId, predictor: impl Into<String>, predicted_winner: ParticipantId) -> Self {
        Self {
            id: Uuid::new_v4(),
            match_id,
            predictor: predictor.into(),
            predicted_winner,
            created_at: Utc::now(),
        }
    }
}
