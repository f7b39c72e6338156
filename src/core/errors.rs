use thiserror::Error;

use super::match_record::MatchId;
use super::player::PlayerId;

/// Malformed tournament input. Always recoverable by the caller fixing
/// the input; never retried internally. Each variant names the rule that
/// failed and the offending entity.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("A tournament needs at least 2 players, got {0}")]
    TooFewPlayers(usize),

    #[error("Single elimination without byes needs a power of two roster, got {0} players")]
    RosterNotPowerOfTwo(usize),

    #[error("A round robin needs at least one completed match before standings")]
    NoCompletedMatches,

    #[error("Match {match_id} references player {player_id} who is not in the roster")]
    UnknownPlayer {
        match_id: MatchId,
        player_id: PlayerId,
    },

    #[error("Match {match_id} pairs a player against themselves")]
    SamePlayerTwice { match_id: MatchId },

    #[error("Match {match_id} declares winner {player_id} who is not one of its two players")]
    WinnerNotInMatch {
        match_id: MatchId,
        player_id: PlayerId,
    },

    #[error("Match {match_id} has a declared winner but no recorded scores")]
    MissingScores { match_id: MatchId },

    #[error("Match {match_id} declares a winner whose score does not exceed the loser's")]
    ScoreWinnerMismatch { match_id: MatchId },

    #[error("Prize shares sum to {total} which exceeds the whole pool")]
    InvalidPrizeShares { total: f64 },
}

/// An unsupported or unusable piece of configuration, as opposed to bad
/// match data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The random tie break is explicitly nondeterministic. Rather than
    /// silently using ambient entropy we require a caller supplied seed
    /// so results stay reproducible under test.
    #[error("The random tie break rule needs a seed, build the engine with one")]
    RandomRuleNeedsSeed,

    #[error("Can't parse prize place label {0:?}, expected \"1st\", \"2nd\", \"3rd\", ...")]
    UnparsablePlace(String),

    /// A prize table without a pool (or the other way around) can't pay
    /// anyone; refusing it beats silently awarding nothing.
    #[error("Prize distribution needs both a prize table and a prize pool, got only one")]
    IncompletePrizeConfig,
}

/// Top level error for a standings computation. Either the input is
/// malformed or the configuration can't be honored; there is no partial
/// success.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StandingsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Result type for standings operations.
pub type Result<T> = std::result::Result<T, StandingsError>;
