//! Tournament, TournamentKind, TournamentStatus and the errors shared by every operation.

use crate::models::game::MatchId;
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A draw or registration request that does not meet its preconditions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationError {
    /// Every draw needs at least two participants.
    TooFewParticipants { count: usize },
    /// Knockout pairs participants off, so the field must be even.
    OddKnockoutField { count: usize },
    /// Knockout rounds halve until one match remains.
    KnockoutFieldNotPowerOfTwo { count: usize },
    /// Tournament, participant and predictor names must not be blank.
    EmptyName,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewParticipants { count } => {
                write!(f, "At least 2 participants are required (have {})", count)
            }
            ValidationError::OddKnockoutField { count } => {
                write!(f, "Knockout tournaments need an even number of participants (have {})", count)
            }
            ValidationError::KnockoutFieldNotPowerOfTwo { count } => write!(
                f,
                "Knockout tournaments need a power-of-two number of participants (have {})",
                count
            ),
            ValidationError::EmptyName => write!(f, "Name must not be empty"),
        }
    }
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    Validation(ValidationError),
    /// A result was submitted before both participant slots were filled.
    MatchNotReady(MatchId),
    /// The submitted winner is not playing in the match.
    InvalidResult { match_id: MatchId, winner: ParticipantId },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    TournamentNotFound(TournamentId),
    ParticipantNotFound(ParticipantId),
    MatchNotFound(MatchId),
    /// A participant with this name already exists (names are unique per tournament, case-insensitive).
    DuplicateParticipantName,
    /// Standings only exist for group tournaments.
    NotGroupTournament,
    /// The predicted winner is not playing in the match.
    InvalidPrediction { match_id: MatchId, predicted_winner: ParticipantId },
    /// Opaque failure from the backing store.
    Storage(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Validation(e) => write!(f, "{}", e),
            TournamentError::MatchNotReady(_) => {
                write!(f, "Match is still waiting for its participants")
            }
            TournamentError::InvalidResult { .. } => {
                write!(f, "Winner must be one of the match participants")
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::DuplicateParticipantName => {
                write!(f, "A participant with this name already exists")
            }
            TournamentError::NotGroupTournament => {
                write!(f, "Standings are only available for group tournaments")
            }
            TournamentError::InvalidPrediction { .. } => {
                write!(f, "Predicted winner must be one of the match participants")
            }
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

impl From<ValidationError> for TournamentError {
    fn from(e: ValidationError) -> Self {
        TournamentError::Validation(e)
    }
}

impl TournamentError {
    /// The requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TournamentError::TournamentNotFound(_)
                | TournamentError::ParticipantNotFound(_)
                | TournamentError::MatchNotFound(_)
        )
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Bracket format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentKind {
    /// Single elimination: winners advance round by round.
    Knockout,
    /// Round robin: everyone plays everyone once.
    Group,
}

/// Lifecycle of a tournament. The draw moves it from Draft to Active; there is no way back.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Registering participants; no matches yet.
    #[default]
    Draft,
    /// Drawn; results are being recorded.
    Active,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TournamentKind,
    pub status: TournamentStatus,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament in Draft status.
    pub fn new(name: impl Into<String>, kind: TournamentKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            status: TournamentStatus::Draft,
            created_at: Utc::now(),
        }
    }

    pub fn is_draft(&self) -> bool {
        self.status == TournamentStatus::Draft
    }

    /// Participants may only be added or removed before the draw.
    pub fn ensure_draft(&self) -> Result<(), TournamentError> {
        if !self.is_draft() {
            return Err(TournamentError::InvalidState);
        }
        Ok(())
    }

    pub fn activate(&mut self) {
        self.status = TournamentStatus::Active;
    }
}
