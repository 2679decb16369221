//! Data-driven board content and loaders.
//!
//! This crate feeds `board-core` from data files:
//! - Encounters: board shape, starting setup, environment, maneuvers (RON)
//! - Viewport tuning: camera and reveal animation settings (TOML)
//! - Game service payloads: movement options per placement (JSON)
//! - A primitive asset catalog standing in for a model store
//!
//! All loaders deserialize `board-core` types directly through their serde
//! derives.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{PrimitiveCatalog, RoleShape};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EncounterLoader, LoadResult, ManeuverLoader};
