use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prize::distribute_prizes;
use super::rank::Ranker;
use super::stats::{PlayerStats, StatsAggregator};
use super::validator::Validator;
use crate::core::{ConfigurationError, PlayerId, Result, Tournament};

/// The standings snapshot for one evaluation of a tournament's match
/// data: the full ranking plus per-player stats and prizes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentStandings {
    /// Players from rank 1 down.
    pub ranked: Vec<PlayerId>,
    /// Aggregated statistics for every roster player.
    pub stats: HashMap<PlayerId, PlayerStats>,
    /// Awarded prize amounts. A player with no entry won nothing.
    pub prizes: HashMap<PlayerId, f64>,
}

/// Orchestrates validate, aggregate, rank and distribute into one
/// standings computation.
///
/// The engine is a pure batch computation over an immutable tournament
/// snapshot: no shared state between calls, and identical input yields
/// identical output. The one exception is the random tie break, which
/// needs an explicit seed via [`StandingsEngine::with_seed`]; without a
/// seed a random-configured tournament is refused rather than silently
/// made nondeterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandingsEngine {
    seed: Option<u64>,
}

impl StandingsEngine {
    pub fn new() -> Self {
        StandingsEngine::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        StandingsEngine { seed: Some(seed) }
    }

    /// Compute the standings snapshot. Fails fast with the validator's
    /// error on malformed input; no partial standings are returned.
    pub fn compute(&self, tournament: &Tournament) -> Result<TournamentStandings> {
        Validator::new(tournament.format).validate(tournament)?;
        debug!(
            players = tournament.num_players(),
            matches = tournament.matches.len(),
            "tournament validated"
        );

        let table = StatsAggregator::aggregate(tournament);

        let mut ranker = match self.seed {
            Some(seed) => Ranker::with_seed(&tournament.tie_breaks, seed)?,
            None => Ranker::new(&tournament.tie_breaks)?,
        };
        let order = ranker.rank(&table);
        let ranked: Vec<PlayerId> = order.iter().map(|&i| tournament.players[i].id).collect();
        debug!(ranked = ranked.len(), "ranking complete");

        let prizes = match (&tournament.prize_table, &tournament.prize_pool) {
            (Some(prize_table), Some(pool)) => distribute_prizes(
                &ranked,
                prize_table,
                pool.total(tournament.num_players()),
            ),
            (None, None) => HashMap::new(),
            _ => return Err(ConfigurationError::IncompletePrizeConfig.into()),
        };

        Ok(TournamentStandings {
            ranked,
            stats: table.into_map(),
            prizes,
        })
    }
}

/// Compute standings with the default engine (no random seed).
pub fn compute_standings(tournament: &Tournament) -> Result<TournamentStandings> {
    StandingsEngine::new().compute(tournament)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{
        Match, Player, PrizePool, PrizeTable, StandingsError, TieBreakRule, TournamentFormat,
        ValidationError,
    };

    /// A finished 4 player round robin where "Carol" sweeps, with a
    /// payout table over an entry-fee pool.
    fn round_robin() -> Tournament {
        let players: Vec<Player> = ["Alice", "Bob", "Carol", "Dave"]
            .iter()
            .map(|n| Player::new(*n))
            .collect();
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        // Carol (index 2) beats everyone; Alice beats Bob and Dave; Bob
        // beats Dave.
        let matches = vec![
            Match::completed(ids[2], ids[0], 11, 7, ids[2], 1),
            Match::completed(ids[2], ids[1], 11, 5, ids[2], 2),
            Match::completed(ids[2], ids[3], 11, 9, ids[2], 3),
            Match::completed(ids[0], ids[1], 11, 8, ids[0], 4),
            Match::completed(ids[0], ids[3], 11, 6, ids[0], 5),
            Match::completed(ids[1], ids[3], 11, 10, ids[1], 6),
        ];
        Tournament::builder(TournamentFormat::RoundRobin)
            .players(players)
            .matches(matches)
            .tie_breaks([TieBreakRule::HeadToHead, TieBreakRule::PointDifferential])
            .prize_table(
                PrizeTable::new()
                    .with_share(1, 0.5)
                    .with_share(2, 0.3)
                    .with_share(3, 0.2),
            )
            .prize_pool(PrizePool::EntryFee(25.0))
            .build()
    }

    #[test_log::test]
    fn test_full_pipeline_ranks_and_pays() {
        let t = round_robin();
        let standings = compute_standings(&t).unwrap();

        assert_eq!(
            standings.ranked.len(),
            t.num_players(),
            "Every roster player must appear in the ranking"
        );

        let name_of = |id: &PlayerId| {
            t.players
                .iter()
                .find(|p| p.id == *id)
                .map(|p| p.name.as_str())
                .unwrap()
        };
        let order: Vec<&str> = standings.ranked.iter().map(name_of).collect();
        assert_eq!(order, ["Carol", "Alice", "Bob", "Dave"]);

        // Pool is 4 * 25 = 100.
        assert_relative_eq!(standings.prizes[&standings.ranked[0]], 50.0);
        assert_relative_eq!(standings.prizes[&standings.ranked[1]], 30.0);
        assert_relative_eq!(standings.prizes[&standings.ranked[2]], 20.0);
        assert!(!standings.prizes.contains_key(&standings.ranked[3]));
    }

    #[test]
    fn test_stats_cover_every_player() {
        let t = round_robin();
        let standings = compute_standings(&t).unwrap();
        for p in &t.players {
            let s = standings.stats.get(&p.id).unwrap();
            assert_eq!(s.games_played, 3);
            assert!(
                (0.0..=1.0).contains(&s.win_percentage),
                "Win percentage out of range for {}",
                p.name
            );
        }
    }

    #[test_log::test]
    fn test_idempotent_without_random_rule() {
        let t = round_robin();
        let first = compute_standings(&t).unwrap();
        let second = compute_standings(&t).unwrap();
        assert_eq!(first, second, "Same input must give identical standings");
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let players: Vec<Player> = (0..4).map(|i| Player::new(format!("P{i}"))).collect();
        let t = Tournament::builder(TournamentFormat::Swiss)
            .players(players)
            .tie_breaks([TieBreakRule::Random])
            .build();

        let a = StandingsEngine::with_seed(7).compute(&t).unwrap();
        let b = StandingsEngine::with_seed(7).compute(&t).unwrap();
        assert_eq!(a.ranked, b.ranked);
    }

    #[test]
    fn test_random_rule_without_seed_is_configuration_error() {
        let players: Vec<Player> = (0..2).map(|i| Player::new(format!("P{i}"))).collect();
        let t = Tournament::builder(TournamentFormat::Swiss)
            .players(players)
            .tie_breaks([TieBreakRule::Random])
            .build();

        let err = compute_standings(&t).unwrap_err();
        assert!(matches!(err, StandingsError::Configuration(_)));
    }

    #[test]
    fn test_validation_failure_yields_no_standings() {
        let t = Tournament::builder(TournamentFormat::RoundRobin)
            .players((0..3).map(|i| Player::new(format!("P{i}"))))
            .build();
        let err = compute_standings(&t).unwrap_err();
        assert_eq!(
            err,
            StandingsError::Validation(ValidationError::NoCompletedMatches)
        );
    }

    #[test]
    fn test_half_configured_prizes_are_refused() {
        let make = |table: Option<PrizeTable>, pool: Option<PrizePool>| {
            let players: Vec<Player> = (0..2).map(|i| Player::new(format!("P{i}"))).collect();
            let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
            let mut builder = Tournament::builder(TournamentFormat::Ladder)
                .players(players)
                .add_match(Match::completed(ids[0], ids[1], 10, 5, ids[0], 0));
            if let Some(table) = table {
                builder = builder.prize_table(table);
            }
            if let Some(pool) = pool {
                builder = builder.prize_pool(pool);
            }
            builder.build()
        };

        let table_only = make(Some(PrizeTable::new().with_share(1, 1.0)), None);
        let err = compute_standings(&table_only).unwrap_err();
        assert_eq!(
            err,
            StandingsError::Configuration(ConfigurationError::IncompletePrizeConfig)
        );

        let pool_only = make(None, Some(PrizePool::Fixed(100.0)));
        let err = compute_standings(&pool_only).unwrap_err();
        assert_eq!(
            err,
            StandingsError::Configuration(ConfigurationError::IncompletePrizeConfig)
        );
    }

    #[test]
    fn test_no_prize_config_means_no_prizes() {
        let players: Vec<Player> = (0..2).map(|i| Player::new(format!("P{i}"))).collect();
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        let t = Tournament::builder(TournamentFormat::Ladder)
            .players(players)
            .add_match(Match::completed(ids[0], ids[1], 10, 5, ids[0], 0))
            .build();

        let standings = compute_standings(&t).unwrap();
        assert!(standings.prizes.is_empty());
    }

    #[test]
    fn test_standings_serialization_round_trip() {
        let t = round_robin();
        let standings = compute_standings(&t).unwrap();
        let json = serde_json::to_string(&standings).unwrap();
        let back: TournamentStandings = serde_json::from_str(&json).unwrap();
        assert_eq!(standings, back);
    }
}
