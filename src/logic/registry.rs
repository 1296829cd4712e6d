//! Participant registry: tournaments and their participants before (and after) the draw.

use crate::models::{
    GameMatch, Participant, ParticipantId, ParticipantKind, Tournament, TournamentError,
    TournamentId, TournamentKind, ValidationError,
};
use crate::store::{require_tournament, TournamentStore};
use serde::Serialize;

/// A tournament with its participants (registration order) and matches (by round, then slot).
#[derive(Clone, Debug, Serialize)]
pub struct TournamentDetails {
    #[serde(flatten)]
    pub tournament: Tournament,
    pub participants: Vec<Participant>,
    pub matches: Vec<GameMatch>,
}

/// Trim a name and reject it if nothing is left.
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

pub fn create_tournament<S: TournamentStore + ?Sized>(
    store: &mut S,
    name: &str,
    kind: TournamentKind,
) -> Result<Tournament, TournamentError> {
    let tournament = Tournament::new(normalize_name(name)?, kind);
    store.put_tournament(tournament.clone())?;
    log::info!("Created {:?} tournament {} ({})", kind, tournament.name, tournament.id);
    Ok(tournament)
}

pub fn tournament_details<S: TournamentStore + ?Sized>(
    store: &S,
    id: TournamentId,
) -> Result<TournamentDetails, TournamentError> {
    let tournament = require_tournament(store, id)?;
    Ok(TournamentDetails {
        participants: store.participants(id)?,
        matches: store.matches(id)?,
        tournament,
    })
}

/// Delete a tournament along with its participants, matches and predictions.
pub fn delete_tournament<S: TournamentStore + ?Sized>(
    store: &mut S,
    id: TournamentId,
) -> Result<(), TournamentError> {
    if !store.delete_tournament(id)? {
        return Err(TournamentError::TournamentNotFound(id));
    }
    log::info!("Deleted tournament {}", id);
    Ok(())
}

fn ensure_unique_name(
    others: &[Participant],
    name: &str,
    except: Option<ParticipantId>,
) -> Result<(), TournamentError> {
    let is_duplicate = others
        .iter()
        .filter(|p| Some(p.id) != except)
        .any(|p| p.name.eq_ignore_ascii_case(name));
    if is_duplicate {
        return Err(TournamentError::DuplicateParticipantName);
    }
    Ok(())
}

/// Register a participant (tournament must be in Draft). Names are unique per tournament.
pub fn add_participant<S: TournamentStore + ?Sized>(
    store: &mut S,
    tournament_id: TournamentId,
    name: &str,
    kind: ParticipantKind,
) -> Result<Participant, TournamentError> {
    require_tournament(store, tournament_id)?.ensure_draft()?;
    let name = normalize_name(name)?;
    ensure_unique_name(&store.participants(tournament_id)?, &name, None)?;

    let participant = Participant::new(tournament_id, name, kind);
    store.put_participant(participant.clone())?;
    Ok(participant)
}

/// Rename a participant. Allowed in any status; the draw references ids, not names.
pub fn rename_participant<S: TournamentStore + ?Sized>(
    store: &mut S,
    participant_id: ParticipantId,
    name: &str,
) -> Result<Participant, TournamentError> {
    let mut participant = store
        .get_participant(participant_id)?
        .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
    let name = normalize_name(name)?;
    ensure_unique_name(
        &store.participants(participant.tournament_id)?,
        &name,
        Some(participant_id),
    )?;

    participant.rename(name);
    store.put_participant(participant.clone())?;
    Ok(participant)
}

/// Remove a participant (tournament must be in Draft).
pub fn remove_participant<S: TournamentStore + ?Sized>(
    store: &mut S,
    participant_id: ParticipantId,
) -> Result<(), TournamentError> {
    let participant = store
        .get_participant(participant_id)?
        .ok_or(TournamentError::ParticipantNotFound(participant_id))?;
    require_tournament(store, participant.tournament_id)?.ensure_draft()?;
    store.delete_participant(participant_id)?;
    Ok(())
}
