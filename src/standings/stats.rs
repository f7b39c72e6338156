use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Match, PlayerId, Tournament};

/// Wins and losses against one specific opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentRecord {
    pub wins: usize,
    pub losses: usize,
}

/// Derived per-player statistics for one standings computation.
///
/// Counters come straight from folding the match list; the three derived
/// fields are computed in a second pass once every counter is final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub player_id: PlayerId,
    /// Number of decided matches this player was part of.
    pub games_played: usize,
    pub wins: usize,
    pub losses: usize,
    /// Matches this player lost by forfeiting.
    pub forfeits: usize,
    /// Matches this player won because the opponent forfeited.
    pub forfeit_wins: usize,
    /// Points scored across non-forfeit matches.
    pub points_scored: u64,
    /// Points conceded across non-forfeit matches.
    pub points_allowed: u64,
    /// wins / games_played, 0.0 for a player with no games.
    pub win_percentage: f64,
    /// points_scored - points_allowed.
    pub point_differential: i64,
    /// Games-weighted average win percentage of opponents faced, 0.0 for
    /// a player with no games.
    pub opponent_strength: f64,
    /// Per-opponent win/loss counts for every opponent actually faced.
    pub record_vs: HashMap<PlayerId, OpponentRecord>,
}

impl PlayerStats {
    fn zeroed(player_id: PlayerId) -> Self {
        PlayerStats {
            player_id,
            games_played: 0,
            wins: 0,
            losses: 0,
            forfeits: 0,
            forfeit_wins: 0,
            points_scored: 0,
            points_allowed: 0,
            win_percentage: 0.0,
            point_differential: 0,
            opponent_strength: 0.0,
            record_vs: HashMap::new(),
        }
    }
}

/// Head-to-head results as a flattened `n x n` count matrix over roster
/// indices. Row = winner, column = loser. Keeping this as one arena of
/// counts avoids a nested map keyed by player pairs and makes the
/// head-to-head tie break an O(1) lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHeadTable {
    num_players: usize,
    wins: Vec<u32>,
}

impl HeadToHeadTable {
    pub fn new(num_players: usize) -> Self {
        HeadToHeadTable {
            num_players,
            wins: vec![0; num_players * num_players],
        }
    }

    pub fn record_win(&mut self, winner: usize, loser: usize) {
        self.wins[winner * self.num_players + loser] += 1;
    }

    /// How many times roster index `a` beat roster index `b` directly.
    pub fn wins_over(&self, a: usize, b: usize) -> u32 {
        self.wins[a * self.num_players + b]
    }

    /// Total decided matches between the two players.
    pub fn games_between(&self, a: usize, b: usize) -> u32 {
        self.wins_over(a, b) + self.wins_over(b, a)
    }
}

/// The full output of aggregation: one `PlayerStats` per roster player
/// in roster order, plus the head-to-head matrix the ranker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    stats: Vec<PlayerStats>,
    index: HashMap<PlayerId, usize>,
    head_to_head: HeadToHeadTable,
}

impl StatsTable {
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Stats in roster order.
    pub fn stats(&self) -> &[PlayerStats] {
        &self.stats
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerStats> {
        self.index.get(&id).map(|&i| &self.stats[i])
    }

    pub fn head_to_head(&self) -> &HeadToHeadTable {
        &self.head_to_head
    }

    /// Consume the table into a map keyed by player id.
    pub fn into_map(self) -> HashMap<PlayerId, PlayerStats> {
        self.stats.into_iter().map(|s| (s.player_id, s)).collect()
    }
}

/// Folds a tournament's match list into per-player statistics.
///
/// Counters are accumulated one decided match at a time, then `build`
/// computes the derived fields in a second pass so that opponent
/// strength can read every opponent's already-final win percentage.
pub struct StatsAggregator {
    stats: Vec<PlayerStats>,
    index: HashMap<PlayerId, usize>,
    head_to_head: HeadToHeadTable,
}

impl StatsAggregator {
    /// One zeroed record per roster player, so players with no games are
    /// still present in the output.
    pub fn new(roster: &[PlayerId]) -> Self {
        let stats = roster.iter().map(|&id| PlayerStats::zeroed(id)).collect();
        let index = roster.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        StatsAggregator {
            stats,
            index,
            head_to_head: HeadToHeadTable::new(roster.len()),
        }
    }

    /// Fold one match into the counters. Matches without a declared
    /// winner, or referencing players outside the roster, are skipped;
    /// the validator has already rejected the latter on the main path.
    pub fn fold_match(&mut self, m: &Match) {
        let Some(winner) = m.winner else {
            trace!(match_id = %m.id, "skipping undecided match");
            return;
        };
        let Some(loser) = m.loser() else {
            trace!(match_id = %m.id, "skipping match with foreign winner");
            return;
        };
        let (Some(&wi), Some(&li)) = (self.index.get(&winner), self.index.get(&loser)) else {
            trace!(match_id = %m.id, "skipping match with unknown players");
            return;
        };

        self.stats[wi].games_played += 1;
        self.stats[li].games_played += 1;
        self.stats[wi].wins += 1;
        self.stats[li].losses += 1;

        if m.forfeit {
            self.stats[wi].forfeit_wins += 1;
            self.stats[li].forfeits += 1;
        } else if let (Some(ws), Some(ls)) = (m.score_of(winner), m.score_of(loser)) {
            self.stats[wi].points_scored += u64::from(ws);
            self.stats[wi].points_allowed += u64::from(ls);
            self.stats[li].points_scored += u64::from(ls);
            self.stats[li].points_allowed += u64::from(ws);
        }

        self.head_to_head.record_win(wi, li);
    }

    /// Second pass: win percentage first, then point differential and
    /// the games-weighted opponent strength, then the per-opponent
    /// records lifted out of the head-to-head matrix.
    pub fn build(mut self) -> StatsTable {
        let n = self.stats.len();

        for s in self.stats.iter_mut() {
            s.win_percentage = if s.games_played > 0 {
                s.wins as f64 / s.games_played as f64
            } else {
                0.0
            };
            s.point_differential = s.points_scored as i64 - s.points_allowed as i64;
        }

        let win_percentages: Vec<f64> = self.stats.iter().map(|s| s.win_percentage).collect();
        for i in 0..n {
            let mut weighted = 0.0;
            let mut games = 0u32;
            for j in 0..n {
                if i == j {
                    continue;
                }
                let between = self.head_to_head.games_between(i, j);
                if between > 0 {
                    weighted += win_percentages[j] * f64::from(between);
                    games += between;
                }
            }
            self.stats[i].opponent_strength = if games > 0 {
                weighted / f64::from(games)
            } else {
                0.0
            };
        }

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let wins = self.head_to_head.wins_over(i, j) as usize;
                let losses = self.head_to_head.wins_over(j, i) as usize;
                if wins + losses > 0 {
                    let opponent = self.stats[j].player_id;
                    self.stats[i]
                        .record_vs
                        .insert(opponent, OpponentRecord { wins, losses });
                }
            }
        }

        StatsTable {
            stats: self.stats,
            index: self.index,
            head_to_head: self.head_to_head,
        }
    }

    /// Fold every match of a tournament and build the table.
    pub fn aggregate(tournament: &Tournament) -> StatsTable {
        let roster: Vec<PlayerId> = tournament.players.iter().map(|p| p.id).collect();
        let mut aggregator = StatsAggregator::new(&roster);
        for m in &tournament.matches {
            aggregator.fold_match(m);
        }
        aggregator.build()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::core::{Player, TournamentFormat};

    fn roster(n: usize) -> Vec<PlayerId> {
        (0..n).map(|_| PlayerId::new()).collect()
    }

    #[test]
    fn test_zero_match_player_included_with_zero_percentage() {
        let ids = roster(3);
        let aggregator = StatsAggregator::new(&ids);
        let table = aggregator.build();

        assert_eq!(table.len(), 3);
        for s in table.stats() {
            assert_eq!(s.games_played, 0);
            assert_eq!(s.win_percentage, 0.0, "No games must mean 0.0, not NaN");
            assert_eq!(s.opponent_strength, 0.0);
            assert!(s.record_vs.is_empty());
        }
    }

    #[test]
    fn test_undecided_match_is_skipped() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::pending(ids[0], ids[1]));
        let table = aggregator.build();

        assert_eq!(table.stats()[0].games_played, 0);
        assert_eq!(table.stats()[1].games_played, 0);
    }

    #[test]
    fn test_completed_match_counts_both_directions() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 21, 15, ids[0], 0));
        let table = aggregator.build();

        let winner = &table.stats()[0];
        assert_eq!(winner.wins, 1);
        assert_eq!(winner.losses, 0);
        assert_eq!(winner.points_scored, 21);
        assert_eq!(winner.points_allowed, 15);
        assert_eq!(winner.point_differential, 6);
        assert_eq!(winner.win_percentage, 1.0);

        let loser = &table.stats()[1];
        assert_eq!(loser.wins, 0);
        assert_eq!(loser.losses, 1);
        assert_eq!(loser.points_scored, 15);
        assert_eq!(loser.points_allowed, 21);
        assert_eq!(loser.point_differential, -6);
        assert_eq!(loser.win_percentage, 0.0);
    }

    #[test]
    fn test_forfeit_counts_never_touch_points() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::forfeited(ids[0], ids[1], ids[1], "no-show", 0));
        let table = aggregator.build();

        let forfeiter = &table.stats()[0];
        assert_eq!(forfeiter.losses, 1);
        assert_eq!(forfeiter.forfeits, 1);
        assert_eq!(forfeiter.points_scored, 0);
        assert_eq!(forfeiter.points_allowed, 0);

        let awarded = &table.stats()[1];
        assert_eq!(awarded.wins, 1);
        assert_eq!(awarded.forfeit_wins, 1);
        assert_eq!(awarded.points_scored, 0);
        assert_eq!(awarded.points_allowed, 0);
    }

    #[test]
    fn test_forfeit_still_recorded_head_to_head() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::forfeited(ids[0], ids[1], ids[1], "no-show", 0));
        let table = aggregator.build();

        assert_eq!(table.head_to_head().wins_over(1, 0), 1);
        assert_eq!(table.head_to_head().wins_over(0, 1), 0);
        let record = table.stats()[1].record_vs.get(&ids[0]).unwrap();
        assert_eq!(*record, OpponentRecord { wins: 1, losses: 0 });
    }

    #[test]
    fn test_round_robin_wins_and_losses_sum_to_decisive_matches() {
        let ids = roster(4);
        let mut aggregator = StatsAggregator::new(&ids);
        let mut decisive = 0;
        // Full round robin, the lower index always wins.
        for i in 0..4 {
            for j in (i + 1)..4 {
                aggregator.fold_match(&Match::completed(ids[i], ids[j], 10, 5, ids[i], 0));
                decisive += 1;
            }
        }
        // One unplayed rematch must change nothing.
        aggregator.fold_match(&Match::pending(ids[0], ids[1]));
        let table = aggregator.build();

        let total_wins: usize = table.stats().iter().map(|s| s.wins).sum();
        let total_losses: usize = table.stats().iter().map(|s| s.losses).sum();
        assert_eq!(total_wins, decisive);
        assert_eq!(total_losses, decisive);
    }

    #[test]
    fn test_opponent_strength_weighted_by_games() {
        let ids = roster(3);
        let mut aggregator = StatsAggregator::new(&ids);
        // Player 0 plays player 1 twice and player 2 once.
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 10, 5, ids[0], 0));
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 10, 5, ids[0], 0));
        aggregator.fold_match(&Match::completed(ids[0], ids[2], 10, 5, ids[0], 0));
        // Player 1 also beats player 2 so win percentages differ.
        aggregator.fold_match(&Match::completed(ids[1], ids[2], 10, 5, ids[1], 0));
        let table = aggregator.build();

        // Player 1: 1 win / 3 games. Player 2: 0 wins / 2 games.
        let p1 = table.stats()[1].win_percentage;
        let p2 = table.stats()[2].win_percentage;
        assert_relative_eq!(p1, 1.0 / 3.0);
        assert_relative_eq!(p2, 0.0);

        // Player 0 faced player 1 twice and player 2 once.
        let expected = (p1 * 2.0 + p2 * 1.0) / 3.0;
        assert_relative_eq!(table.stats()[0].opponent_strength, expected);
    }

    #[test]
    fn test_record_vs_tracks_both_sides() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 10, 5, ids[0], 0));
        aggregator.fold_match(&Match::completed(ids[1], ids[0], 7, 3, ids[1], 0));
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 9, 2, ids[0], 0));
        let table = aggregator.build();

        let zero_vs_one = table.stats()[0].record_vs.get(&ids[1]).unwrap();
        assert_eq!(*zero_vs_one, OpponentRecord { wins: 2, losses: 1 });
        let one_vs_zero = table.stats()[1].record_vs.get(&ids[0]).unwrap();
        assert_eq!(*one_vs_zero, OpponentRecord { wins: 1, losses: 2 });
    }

    #[test]
    fn test_aggregate_from_tournament() {
        let alice = Player::new("Alice");
        let bob = Player::new("Bob");
        let (alice_id, bob_id) = (alice.id, bob.id);
        let tournament = crate::core::Tournament::builder(TournamentFormat::Ladder)
            .player(alice)
            .player(bob)
            .add_match(Match::completed(alice_id, bob_id, 11, 9, alice_id, 0))
            .build();

        let table = StatsAggregator::aggregate(&tournament);
        assert_eq!(table.get(alice_id).unwrap().wins, 1);
        assert_eq!(table.get(bob_id).unwrap().losses, 1);
    }

    #[test]
    fn test_player_stats_serialization() {
        let ids = roster(2);
        let mut aggregator = StatsAggregator::new(&ids);
        aggregator.fold_match(&Match::completed(ids[0], ids[1], 21, 15, ids[0], 0));
        let table = aggregator.build();

        let json = serde_json::to_string(&table.stats()[0]).unwrap();
        let back: PlayerStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table.stats()[0]);
    }
}
