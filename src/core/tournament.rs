use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::errors::ConfigurationError;
use super::match_record::Match;
use super::player::{Player, PlayerId};

/// Supported tournament formats. The format only influences validation;
/// the standings math itself is format agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TournamentFormat {
    SingleElimination,
    DoubleElimination,
    RoundRobin,
    Swiss,
    Ladder,
}

/// One rule in the tie-break cascade. Rules are applied in the order the
/// tournament configures them until one produces a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreakRule {
    /// Direct results between the two tied players.
    HeadToHead,
    /// Points scored minus points allowed, higher first.
    PointDifferential,
    /// Total points scored, higher first.
    PointsScored,
    /// Aggregate win percentage of opponents faced, higher first.
    OpponentStrength,
    /// A seeded random decision. Needs an explicitly supplied seed, see
    /// `StandingsEngine::with_seed`.
    Random,
}

/// Fractional prize shares keyed by 1-indexed finishing place.
///
/// Shares are expected to sum to at most 1.0; the validator rejects a
/// tournament whose table exceeds that.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrizeTable {
    shares: BTreeMap<u32, f64>,
}

impl PrizeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a share for a finishing place. Places are 1-indexed.
    pub fn with_share(mut self, place: u32, share: f64) -> Self {
        self.shares.insert(place, share);
        self
    }

    /// Build a table from ordinal labels the way payout schedules are
    /// usually written: `[("1st", 0.5), ("2nd", 0.3), ("3rd", 0.2)]`.
    pub fn from_labels<'a>(
        labels: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Result<Self, ConfigurationError> {
        let mut table = PrizeTable::new();
        for (label, share) in labels {
            let place = parse_place(label)?;
            table.shares.insert(place, share);
        }
        Ok(table)
    }

    pub fn share_for(&self, place: u32) -> Option<f64> {
        self.shares.get(&place).copied()
    }

    /// The highest place that still pays out.
    pub fn last_paid_place(&self) -> Option<u32> {
        self.shares.keys().next_back().copied()
    }

    pub fn total_share(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }
}

/// Parse an ordinal place label ("1st", "22nd", plain "3") into its
/// 1-indexed place number. The suffix must be the correct ordinal for
/// the number, so typos like "1th" or "3st" are rejected.
fn parse_place(label: &str) -> Result<u32, ConfigurationError> {
    let trimmed = label.trim();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(digits_end);
    let place: u32 = digits
        .parse()
        .map_err(|_| ConfigurationError::UnparsablePlace(label.to_string()))?;
    if place == 0 {
        return Err(ConfigurationError::UnparsablePlace(label.to_string()));
    }
    // 11th through 13th, then st/nd/rd by the last digit.
    let expected = match place % 100 {
        11..=13 => "th",
        _ => match place % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    let suffix = suffix.to_ascii_lowercase();
    if suffix.is_empty() || suffix == expected {
        Ok(place)
    } else {
        Err(ConfigurationError::UnparsablePlace(label.to_string()))
    }
}

/// Where the prize money comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrizePool {
    /// A fixed pool amount supplied by the organizer.
    Fixed(f64),
    /// Per-player entry fee; the pool is fee times roster size.
    EntryFee(f64),
}

impl PrizePool {
    pub fn total(&self, num_players: usize) -> f64 {
        match self {
            PrizePool::Fixed(amount) => *amount,
            PrizePool::EntryFee(fee) => fee * num_players as f64,
        }
    }
}

/// A full immutable snapshot of one tournament: configuration, roster
/// and every match recorded so far. This is the only input the standings
/// computation reads; it is never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub format: TournamentFormat,
    /// Tie-break rules in the order they should be applied.
    pub tie_breaks: Vec<TieBreakRule>,
    /// Roster in registration order. Fully tied players keep this order.
    pub players: Vec<Player>,
    pub matches: Vec<Match>,
    /// Whether byes are permitted. Relaxes the power-of-two roster rule
    /// for single elimination.
    pub allow_byes: bool,
    /// Prizes are distributed only when both the table and the pool are
    /// set; setting exactly one of them is a configuration error.
    pub prize_table: Option<PrizeTable>,
    pub prize_pool: Option<PrizePool>,
}

impl Tournament {
    pub fn builder(format: TournamentFormat) -> TournamentBuilder {
        TournamentBuilder::new(format)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Roster position of a player, if registered.
    pub fn roster_index(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }
}

/// Fluent builder for a `Tournament`. Building performs no semantic
/// validation; that is the validator's job so that a half-finished
/// tournament can still be constructed and inspected.
#[derive(Debug, Clone)]
pub struct TournamentBuilder {
    format: TournamentFormat,
    tie_breaks: Vec<TieBreakRule>,
    players: Vec<Player>,
    matches: Vec<Match>,
    allow_byes: bool,
    prize_table: Option<PrizeTable>,
    prize_pool: Option<PrizePool>,
}

impl TournamentBuilder {
    pub fn new(format: TournamentFormat) -> Self {
        TournamentBuilder {
            format,
            tie_breaks: Vec::new(),
            players: Vec::new(),
            matches: Vec::new(),
            allow_byes: false,
            prize_table: None,
            prize_pool: None,
        }
    }

    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    pub fn players(mut self, players: impl IntoIterator<Item = Player>) -> Self {
        self.players.extend(players);
        self
    }

    pub fn add_match(mut self, m: Match) -> Self {
        self.matches.push(m);
        self
    }

    pub fn matches(mut self, matches: impl IntoIterator<Item = Match>) -> Self {
        self.matches.extend(matches);
        self
    }

    pub fn tie_breaks(mut self, rules: impl IntoIterator<Item = TieBreakRule>) -> Self {
        self.tie_breaks.extend(rules);
        self
    }

    pub fn allow_byes(mut self, allow: bool) -> Self {
        self.allow_byes = allow;
        self
    }

    pub fn prize_table(mut self, table: PrizeTable) -> Self {
        self.prize_table = Some(table);
        self
    }

    pub fn prize_pool(mut self, pool: PrizePool) -> Self {
        self.prize_pool = Some(pool);
        self
    }

    pub fn build(self) -> Tournament {
        Tournament {
            format: self.format,
            tie_breaks: self.tie_breaks,
            players: self.players,
            matches: self.matches,
            allow_byes: self.allow_byes,
            prize_table: self.prize_table,
            prize_pool: self.prize_pool,
        }
    }
}
