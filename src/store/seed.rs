//! Seed dataset for the community collection
//!
//! The store is initialized from this fixed list and `reset_all` restores
//! it verbatim. The storage key carries a version suffix; bump it when the
//! seed list changes shape so stale blobs are reseeded instead of migrated.

use crate::error::{DuelError, Result};
use crate::types::Community;
use std::collections::HashSet;
use std::path::Path;

/// Versioned storage key for the persisted collection
pub const COMMUNITIES_KEY: &str = "community_duel_communities_v2";

/// Built-in default dataset: the local communities of Gračanica,
/// every entry at the baseline rating with zeroed counters.
pub fn default_communities() -> Vec<Community> {
    [
        ("centar", "Centar"),
        ("babici", "Babići"),
        ("doborovci", "Doborovci"),
        ("donja-orahovica", "Donja Orahovica"),
        ("gornja-orahovica", "Gornja Orahovica"),
        ("lukavica", "Lukavica"),
        ("malesici", "Malešići"),
        ("miricina", "Miričina"),
        ("pribava", "Pribava"),
        ("skahovica", "Škahovica"),
        ("soko", "Soko"),
        ("stjepan-polje", "Stjepan Polje"),
    ]
    .into_iter()
    .map(|(id, name)| Community::new(id, name, format!("/images/communities/{id}.jpg")))
    .collect()
}

/// Load a replacement seed dataset from a JSON file.
///
/// The file holds a plain array of communities in the persisted blob
/// format. Duplicate ids are rejected; stats are taken as-is so a curated
/// seed may start entries above the baseline.
pub fn load_seed_file(path: &Path) -> Result<Vec<Community>> {
    let raw = std::fs::read_to_string(path).map_err(|e| DuelError::ConfigurationError {
        message: format!("Failed to read seed file {}: {e}", path.display()),
    })?;

    let communities: Vec<Community> =
        serde_json::from_str(&raw).map_err(|e| DuelError::ConfigurationError {
            message: format!("Invalid seed file {}: {e}", path.display()),
        })?;

    validate_seed(&communities)?;
    Ok(communities)
}

/// Check the seed invariants: at least one entry, unique ids
pub fn validate_seed(communities: &[Community]) -> Result<()> {
    if communities.is_empty() {
        return Err(DuelError::ConfigurationError {
            message: "Seed dataset is empty".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for community in communities {
        if !seen.insert(community.id.as_str()) {
            return Err(DuelError::ConfigurationError {
                message: format!("Duplicate community id in seed dataset: {}", community.id),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::INITIAL_ELO;
    use std::io::Write;

    #[test]
    fn default_dataset_is_valid() {
        let seed = default_communities();
        assert!(seed.len() >= 2);
        validate_seed(&seed).unwrap();

        for community in &seed {
            assert_eq!(community.elo, INITIAL_ELO);
            assert_eq!(community.wins, 0);
            assert_eq!(community.losses, 0);
            assert_eq!(community.games_played, 0);
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut seed = default_communities();
        seed.push(seed[0].clone());
        assert!(validate_seed(&seed).is_err());
    }

    #[test]
    fn seed_file_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let seed = default_communities();
        write!(file, "{}", serde_json::to_string(&seed).unwrap()).unwrap();

        let loaded = load_seed_file(file.path()).unwrap();
        assert_eq!(loaded, seed);
    }

    #[test]
    fn malformed_seed_file_is_a_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(load_seed_file(file.path()).is_err());
    }
}
