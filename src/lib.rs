//! Tournament engine: draw, knockout advancement and round-robin standings, plus a REST API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    add_participant, add_prediction, bracket_view, compute_leaderboard, compute_standings,
    create_tournament, delete_tournament, draw, generate_matches, leaderboard, record_result,
    remove_participant, rename_participant, standings, tournament_details, Advancement,
    BracketRound, LeaderboardRow, StandingRow, TournamentDetails,
};
pub use models::{
    GameMatch, MatchId, Participant, ParticipantId, ParticipantKind, Prediction, Side, Tournament,
    TournamentError, TournamentId, TournamentKind, TournamentStatus, ValidationError,
};
pub use store::{MemoryStore, TournamentStore};
