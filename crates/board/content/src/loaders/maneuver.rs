//! Movement option payloads from the game service.
//!
//! The service answers with a map from placement to the maneuvers of the
//! piece standing there. Each entry is either a list of maneuvers or an
//! object keyed by maneuver name:
//!
//! ```json
//! {
//!   "d3": {
//!     "regular": {
//!       "name": "regular",
//!       "options": [{ "placement": "d4", "type": "unoccupied" }]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use board_core::{Maneuver, Placement};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ManeuverSet {
    List(Vec<Maneuver>),
    Keyed(BTreeMap<String, Maneuver>),
}

impl ManeuverSet {
    fn into_vec(self) -> Vec<Maneuver> {
        match self {
            Self::List(maneuvers) => maneuvers,
            Self::Keyed(maneuvers) => maneuvers.into_values().collect(),
        }
    }
}

/// Loader for movement options in the game service JSON format.
pub struct ManeuverLoader;

impl ManeuverLoader {
    /// Load movement options from a JSON file.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<Placement, Vec<Maneuver>>> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse movement options from JSON text.
    pub fn from_str(content: &str) -> LoadResult<BTreeMap<Placement, Vec<Maneuver>>> {
        let payload: BTreeMap<Placement, ManeuverSet> = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse movement options JSON: {}", e))?;

        Ok(payload
            .into_iter()
            .map(|(placement, set)| (placement, set.into_vec()))
            .collect())
    }
}
