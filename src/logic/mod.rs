//! Tournament business logic: registry, draw, result advancement, standings, views.

mod advancement;
mod bracket;
mod draw;
mod leaderboard;
mod registry;
mod standings;

pub use advancement::{next_position, record_result, validate_result, Advancement};
pub use bracket::{bracket_view, group_by_round, round_label, BracketRound};
pub use draw::{draw, generate_matches, validate_field};
pub use leaderboard::{add_prediction, compute_leaderboard, leaderboard, LeaderboardRow};
pub use registry::{
    add_participant, create_tournament, delete_tournament, normalize_name, remove_participant,
    rename_participant, tournament_details, TournamentDetails,
};
pub use standings::{compute_standings, standings, StandingRow, POINTS_PER_WIN};
