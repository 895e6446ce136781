//! Static identifier table for catalogues and the game system

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier injected into every file as the owning game system
pub const DEFAULT_GAME_SYSTEM_ID: &str = "bdc5-ff70-4406-b73b";

/// Built-in catalogue identifiers, keyed by sanitized catalogue name
///
/// Keys use periods in place of spaces (see [`sanitize_name`]).
pub const DEFAULT_CATALOGUE_IDS: &[(&str, &str)] = &[
    ("Skaven", "e894-7281-45d2-b1a1"),
    ("Empire", "96cb-3d5a-47fa-a4bc"),
    ("Dark.Elves", "b540-df10-421b-b6f2"),
    ("Dogs.of.War", "68ab-a0b9-4900-9461"),
    ("RH.Chaos.Dwarfs", "ca7e-9816-4fcd-8c88"),
    ("Wood.Elf", "1e8c-ea3b-4381-96cf"),
    ("Dwarfs", "6e97-2b17-4dfb-a3e5"),
    ("Vampire.Counts", "df44-6056-4b5f-aeec"),
    ("Lizardmen", "4d7f-03e0-46b2-b9dc"),
    ("High.Elf", "2153-aab3-4931-b1c6"),
    ("Ogre.Kingdoms", "af72-49d2-4281-9dc2"),
    ("Orcs.and.Goblins", "1be6-1eb4-44f4-8963"),
    ("Chaos", "af03-2436-4cf3-bdce"),
    ("Tomb.Kings", "cfb7-8b59-4763-88c1"),
    ("Bretonnia", "c2f0-5d99-4a97-a7be"),
    ("RH.Orcs.and.Goblins", "d7e1-f0ac-4879-bd60"),
];

/// Mapping from catalogue name to identifier, plus the game-system identifier
///
/// Never mutated once built; the pipeline only reads from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierTable {
    /// Identifier shared by all processed files
    #[serde(default = "default_game_system_id")]
    pub game_system_id: String,
    /// Catalogue name -> identifier
    #[serde(default = "default_catalogues")]
    pub catalogues: BTreeMap<String, String>,
}

impl IdentifierTable {
    /// Build a table from explicit entries
    pub fn new<I, K, V>(game_system_id: impl Into<String>, catalogues: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            game_system_id: game_system_id.into(),
            catalogues: catalogues
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a catalogue identifier by its sanitized name (exact, case-sensitive)
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.catalogues.get(name).map(String::as_str)
    }

    /// The game-system identifier
    pub fn game_system_id(&self) -> &str {
        &self.game_system_id
    }

    /// Iterate over all catalogue entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.catalogues
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of catalogue entries
    pub fn len(&self) -> usize {
        self.catalogues.len()
    }

    /// Whether the table has no catalogue entries
    pub fn is_empty(&self) -> bool {
        self.catalogues.is_empty()
    }
}

impl Default for IdentifierTable {
    fn default() -> Self {
        Self::new(DEFAULT_GAME_SYSTEM_ID, DEFAULT_CATALOGUE_IDS.iter().copied())
    }
}

fn default_game_system_id() -> String {
    DEFAULT_GAME_SYSTEM_ID.to_string()
}

fn default_catalogues() -> BTreeMap<String, String> {
    IdentifierTable::default().catalogues
}

/// Turn a file base name into a table key by replacing spaces with periods
///
/// Examples:
/// - "Dark Elves" -> "Dark.Elves"
/// - "Skaven" -> "Skaven"
pub fn sanitize_name(base_name: &str) -> String {
    base_name.replace(' ', ".")
}
