use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::player::PlayerId;

/// Identifier for a single match, used to name the offending match in
/// validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(Uuid);

impl MatchId {
    pub fn new() -> Self {
        MatchId(Uuid::now_v7())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        MatchId::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One recorded match between two players.
///
/// A match with no declared winner is treated as unplayed or undecided
/// and contributes nothing to the standings. Scores are optional at the
/// type level; the validator enforces that a declared non-forfeit winner
/// comes with both scores recorded and the winner's score strictly ahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// First side. "home"/"away" carries no semantic weight beyond
    /// keeping the two score fields apart.
    pub home: PlayerId,
    pub away: PlayerId,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    /// The declared winner, if the match has been decided.
    pub winner: Option<PlayerId>,
    /// A forfeited match is awarded without play. It counts toward
    /// win/loss/forfeit tallies but never toward point totals.
    pub forfeit: bool,
    pub forfeit_reason: Option<String>,
    /// Completion time as seconds since the epoch. Absent while the
    /// match is pending. The core treats this as opaque.
    pub completed_at: Option<u64>,
}

impl Match {
    /// A match that has been scheduled but not played.
    pub fn pending(home: PlayerId, away: PlayerId) -> Self {
        Match {
            id: MatchId::new(),
            home,
            away,
            home_score: None,
            away_score: None,
            winner: None,
            forfeit: false,
            forfeit_reason: None,
            completed_at: None,
        }
    }

    /// A played-out match with recorded scores and a declared winner.
    pub fn completed(
        home: PlayerId,
        away: PlayerId,
        home_score: u32,
        away_score: u32,
        winner: PlayerId,
        completed_at: u64,
    ) -> Self {
        Match {
            id: MatchId::new(),
            home,
            away,
            home_score: Some(home_score),
            away_score: Some(away_score),
            winner: Some(winner),
            forfeit: false,
            forfeit_reason: None,
            completed_at: Some(completed_at),
        }
    }

    /// A match awarded to `winner` without play.
    pub fn forfeited(
        home: PlayerId,
        away: PlayerId,
        winner: PlayerId,
        reason: impl Into<String>,
        completed_at: u64,
    ) -> Self {
        Match {
            id: MatchId::new(),
            home,
            away,
            home_score: None,
            away_score: None,
            winner: Some(winner),
            forfeit: true,
            forfeit_reason: Some(reason.into()),
            completed_at: Some(completed_at),
        }
    }

    /// True when a winner has been declared.
    pub fn is_decided(&self) -> bool {
        self.winner.is_some()
    }

    /// The side that did not win, if a winner has been declared and the
    /// declared winner is actually one of the two sides.
    pub fn loser(&self) -> Option<PlayerId> {
        match self.winner {
            Some(w) if w == self.home => Some(self.away),
            Some(w) if w == self.away => Some(self.home),
            _ => None,
        }
    }

    /// The recorded score for one of the two sides.
    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        if player == self.home {
            self.home_score
        } else if player == self.away {
            self.away_score
        } else {
            None
        }
    }
}
