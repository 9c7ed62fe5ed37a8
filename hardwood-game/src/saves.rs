//! Save-file export/import.
//!
//! The whole career serializes as one JSON blob under a single storage
//! key; it is always written and replaced whole. Import validates only
//! that identity and career fields are present, then loads the blob as
//! a full replacement, never a merge. Anything malformed is rejected
//! and the caller keeps its current state.

use log::warn;
use thiserror::Error;

use crate::state::GameState;

/// Fixed key the whole state blob lives under.
pub const STORAGE_KEY: &str = "hardwood.career";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("save data is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("save data rejected: {0}")]
    Invalid(&'static str),
}

/// Serialize the full state for download/transfer.
pub fn export_json(state: &GameState) -> Result<String, SaveError> {
    serde_json::to_string(state).map_err(SaveError::Serialize)
}

/// Parse an exported blob back into a playable state.
///
/// Validation is deliberately shallow: a named player and a career
/// record must exist. Everything else is defaulted or clamped by
/// `sanitize` once loaded, so saves from older versions keep working.
pub fn import_json(raw: &str) -> Result<GameState, SaveError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(SaveError::Malformed)?;
    let player = value
        .get("player")
        .ok_or(SaveError::Invalid("missing player record"))?;
    let name_ok = player
        .get("name")
        .and_then(serde_json::Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !name_ok {
        return Err(SaveError::Invalid("missing player name"));
    }
    if player.get("career").is_none() {
        return Err(SaveError::Invalid("missing career record"));
    }

    let state: GameState = serde_json::from_value(value).map_err(|err| {
        warn!("import parse failure: {err}");
        SaveError::Malformed(err)
    })?;
    let mut state = state.rehydrate();
    state.sanitize();
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::Archetype;

    #[test]
    fn export_import_round_trips() {
        let state = GameState::new_career("Round Tripper", Archetype::Slasher, 404);
        let blob = export_json(&state).unwrap();
        let loaded = import_json(&blob).unwrap();
        assert_eq!(loaded.player.name, state.player.name);
        assert_eq!(loaded.player.ratings, state.player.ratings);
        assert_eq!(loaded.season, state.season);
        assert_eq!(loaded.league.teams.len(), state.league.teams.len());
        assert!(loaded.rng.is_some());
    }

    #[test]
    fn float_fields_survive_a_round_trip_exactly() {
        let mut state = GameState::new_career("Ulp Keeper", Archetype::Playmaker, 406);
        // Values whose shortest decimal form the default parser misses
        // by one ulp; the float_roundtrip feature restores exactness.
        state.player.career.totals.usage_history = vec![0.188_149_626_129_356_48, 0.3];
        state.player.career.totals.per_history = vec![19.714_285_714_285_715];
        let blob = export_json(&state).unwrap();
        let loaded = import_json(&blob).unwrap();
        assert_eq!(
            loaded.player.career.totals.usage_history,
            state.player.career.totals.usage_history
        );
        assert_eq!(
            loaded.player.career.totals.per_history,
            state.player.career.totals.per_history
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            import_json("not json at all"),
            Err(SaveError::Malformed(_))
        ));
    }

    #[test]
    fn missing_identity_is_rejected() {
        assert!(matches!(
            import_json("{\"season\": 3}"),
            Err(SaveError::Invalid(_))
        ));
        assert!(matches!(
            import_json("{\"player\": {\"name\": \"\"}}"),
            Err(SaveError::Invalid(_))
        ));
        assert!(matches!(
            import_json("{\"player\": {\"name\": \"No Career\"}}"),
            Err(SaveError::Invalid(_))
        ));
    }

    #[test]
    fn import_sanitizes_corrupt_values() {
        let state = GameState::new_career("Fixer", Archetype::Anchor, 405);
        let mut blob: serde_json::Value =
            serde_json::from_str(&export_json(&state).unwrap()).unwrap();
        blob["player"]["cash"] = serde_json::json!(-5_000);
        blob["player"]["ratings"]["shooting"] = serde_json::json!(140);
        let loaded = import_json(&blob.to_string()).unwrap();
        assert_eq!(loaded.player.cash.dollars(), 0);
        assert_eq!(loaded.player.ratings.shooting, 99);
    }
}
