//! The standings computation pipeline.
//!
//! One call runs four stages in sequence over an immutable
//! [`Tournament`](crate::core::Tournament) snapshot: validation,
//! statistics aggregation, ranking with the configured tie-break
//! cascade, and prize distribution. Everything is synchronous and pure;
//! the only nondeterminism available is the explicitly seeded random
//! tie break.
//!
//! # Example
//!
//! ```
//! use rs_tourney::core::{Match, Player, TieBreakRule, Tournament, TournamentFormat};
//! use rs_tourney::standings::compute_standings;
//!
//! let alice = Player::new("Alice");
//! let bob = Player::new("Bob");
//! let (alice_id, bob_id) = (alice.id, bob.id);
//!
//! let tournament = Tournament::builder(TournamentFormat::RoundRobin)
//!     .player(alice)
//!     .player(bob)
//!     .add_match(Match::completed(alice_id, bob_id, 21, 15, alice_id, 1_700_000_000))
//!     .tie_breaks([TieBreakRule::HeadToHead])
//!     .build();
//!
//! let standings = compute_standings(&tournament).unwrap();
//! assert_eq!(standings.ranked[0], alice_id);
//! ```

/// Module with the tournament validator and per-format rules.
mod validator;
/// Export `Validator` and the `FormatRule` trait.
pub use self::validator::{FormatRule, RoundRobinRule, SingleEliminationRule, Validator};

/// Module that folds match results into per-player statistics.
mod stats;
/// Export the statistics types.
pub use self::stats::{HeadToHeadTable, OpponentRecord, PlayerStats, StatsAggregator, StatsTable};

/// Module with the tie-break strategy trait and the rule implementations.
mod tie_break;
/// Export the tie-break strategies.
pub use self::tie_break::{
    HeadToHeadBreak, OpponentStrengthBreak, PointDifferentialBreak, PointsScoredBreak,
    RandomBreak, RankContext, TieBreak,
};

/// Module with the ranker.
mod rank;
/// Export `Ranker`.
pub use self::rank::Ranker;

/// Module that maps finishing places to prize amounts.
mod prize;
/// Export `distribute_prizes`.
pub use self::prize::distribute_prizes;

/// Module with the orchestrating engine.
mod engine;
/// Export the engine and the standings snapshot type.
pub use self::engine::{StandingsEngine, TournamentStandings, compute_standings};
