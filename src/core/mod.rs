//! Core data model for tournaments: players, matches, configuration and
//! the error taxonomy. Everything here is plain immutable input data;
//! the computation over it lives in [`crate::standings`].

/// Module with the player identity types.
mod player;
/// Export `Player` and `PlayerId`.
pub use self::player::{Player, PlayerId};

/// Module with the recorded match type.
mod match_record;
/// Export `Match` and `MatchId`.
pub use self::match_record::{Match, MatchId};

/// Module with tournament configuration and the input snapshot.
mod tournament;
/// Export the tournament types.
pub use self::tournament::{
    PrizePool, PrizeTable, TieBreakRule, Tournament, TournamentBuilder, TournamentFormat,
};

/// Module with the error types.
mod errors;
/// Export the error taxonomy.
pub use self::errors::{ConfigurationError, Result, StandingsError, ValidationError};
