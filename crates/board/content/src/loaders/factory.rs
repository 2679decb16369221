//! Content factory for loading board content from a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use board_core::{Encounter, Maneuver, Placement, ViewportConfig};

use crate::loaders::{ConfigLoader, EncounterLoader, LoadResult, ManeuverLoader};

/// Content factory that loads encounters and viewport settings.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── viewport.toml
/// ├── encounters/
/// │   └── courtyard.ron
/// └── maneuvers/
///     └── courtyard.json
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load viewport settings from `viewport.toml`, or defaults when the
    /// file does not exist.
    pub fn load_viewport_config(&self) -> LoadResult<ViewportConfig> {
        let path = self.data_dir.join("viewport.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            tracing::debug!(path = %path.display(), "no viewport config, using defaults");
            Ok(ViewportConfig::default())
        }
    }

    /// Load an encounter from `encounters/{name}.ron`.
    ///
    /// Movement options from `maneuvers/{name}.json`, when present, are
    /// merged per placement: a placement listed in the JSON takes the JSON's
    /// maneuvers in place of the encounter file's, other placements keep
    /// theirs. The merged set is validated against the board shape.
    pub fn load_encounter(&self, name: &str) -> LoadResult<Encounter> {
        let path = self.data_dir.join("encounters").join(format!("{}.ron", name));
        let mut encounter = EncounterLoader::load(&path)?;

        if let Some(options) = self.load_maneuvers(name)? {
            encounter.movement_options.extend(options);
            EncounterLoader::validate_maneuvers(&encounter)
                .map_err(|e| anyhow::anyhow!("{} (maneuvers/{}.json)", e, name))?;
        }
        Ok(encounter)
    }

    /// Load movement options from `maneuvers/{name}.json` if the file exists.
    pub fn load_maneuvers(
        &self,
        name: &str,
    ) -> LoadResult<Option<BTreeMap<Placement, Vec<Maneuver>>>> {
        let path = self.data_dir.join("maneuvers").join(format!("{}.json", name));
        if !path.exists() {
            return Ok(None);
        }
        ManeuverLoader::load(&path).map(Some)
    }

    /// Names of the encounters under `encounters/`, sorted.
    pub fn encounter_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("encounters");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to read directory {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron")
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
