//! Persisted card-set format.
//!
//! The on-disk/catalog record consumed by the deck. Reading files and
//! fetching remote catalogs belong to external collaborators; the core only
//! parses the record and registers the result.

use serde::{Deserialize, Serialize};

/// One black card as persisted: the text encodes each gap with a reusable
/// `%s` token, repeated once per gap (zero times for append-style cards).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlackCardFile {
    pub text: String,
    pub gaps: usize,
}

/// One card set as persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSetFile {
    pub name: String,
    /// Whether the set is activated automatically on deck reset.
    #[serde(default, rename = "default")]
    pub default_active: bool,
    pub black: Vec<BlackCardFile>,
    pub white: Vec<String>,
}

impl CardSetFile {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}
