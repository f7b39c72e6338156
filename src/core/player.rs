use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a single player in a tournament.
///
/// Ids are UUID v7 so that they sort roughly by creation time and
/// stay unique across tournaments without any coordination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    pub fn new() -> Self {
        PlayerId(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        PlayerId::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A registered tournament player.
///
/// Players are immutable once registered; all per-tournament numbers
/// live in the derived `PlayerStats`, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity used by matches and standings output.
    pub id: PlayerId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// Optional static rating carried in from outside (seeding, Elo, ...).
    /// The standings computation never reads it.
    pub rating: Option<u32>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player {
            id: PlayerId::new(),
            name: name.into(),
            rating: None,
        }
    }

    pub fn with_rating(name: impl Into<String>, rating: u32) -> Self {
        Player {
            id: PlayerId::new(),
            name: name.into(),
            rating: Some(rating),
        }
    }
}
