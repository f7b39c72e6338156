//! rs_tourney is a library for turning a set of recorded match results
//! into tournament standings: per-player statistics, a ranking driven by
//! win percentage plus a configurable cascade of tie-break rules, and a
//! prize distribution over the final places.
//!
//! The crate is split in two:
//!
//! - [`core`] holds the immutable input model (players, matches,
//!   tournament configuration) and the error taxonomy.
//! - [`standings`] holds the computation pipeline and its entry point,
//!   [`standings::StandingsEngine`].
//!
//! The computation is a pure batch: it reads one tournament snapshot,
//! returns one [`standings::TournamentStandings`], and keeps no state
//! between calls.

/// The core data model and errors.
pub mod core;

/// The standings computation.
pub mod standings;
