//! Encounter loader.
//!
//! An encounter file carries the board shape, the starting setup, the
//! environment and the maneuvers known up front.

use std::path::Path;

use board_core::Encounter;

use crate::loaders::{LoadResult, read_file};

/// Loader for encounters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    /// Load an encounter from a RON file.
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::from_str(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse an encounter from RON text.
    ///
    /// Maneuvers that start or end on placements the shape cannot hold are
    /// rejected; setup entries off the shape are left for the board builder
    /// to skip.
    pub fn from_str(content: &str) -> LoadResult<Encounter> {
        let encounter: Encounter = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))?;
        Self::validate_maneuvers(&encounter)?;

        tracing::debug!(
            encounter = %encounter.name,
            pieces = encounter.board.setup.len(),
            maneuvers = encounter.movement_options.len(),
            "encounter parsed"
        );
        Ok(encounter)
    }

    /// Checks every maneuver origin and destination against the board shape.
    pub fn validate_maneuvers(encounter: &Encounter) -> LoadResult<()> {
        let shape = &encounter.board.shape;
        for (origin, maneuvers) in &encounter.movement_options {
            if !shape.is_occupiable(*origin) {
                anyhow::bail!(
                    "Encounter '{}' lists maneuvers for {} which is not on the board",
                    encounter.name,
                    origin
                );
            }
            let off_board = maneuvers.iter().find_map(|maneuver| {
                maneuver
                    .options
                    .iter()
                    .find(|option| !shape.is_occupiable(option.placement))
                    .map(|option| (maneuver, option.placement))
            });
            if let Some((maneuver, target)) = off_board {
                anyhow::bail!(
                    "Encounter '{}' maneuver '{}' from {} targets {} which is not on the board",
                    encounter.name,
                    maneuver.name,
                    origin,
                    target
                );
            }
        }
        Ok(())
    }
}
