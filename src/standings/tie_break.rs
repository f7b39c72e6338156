use std::cmp::Ordering;

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::stats::{HeadToHeadTable, PlayerStats};
use crate::core::{ConfigurationError, TieBreakRule};

/// Everything a tie-break rule may look at when comparing two players.
/// `stats` is in roster order; the indices handed to the rules are
/// roster indices.
pub struct RankContext<'a> {
    pub stats: &'a [PlayerStats],
    pub head_to_head: &'a HeadToHeadTable,
}

/// One rule in the tie-break cascade.
///
/// `Ordering::Less` means the first player ranks ahead of the second;
/// `Ordering::Equal` means the rule has no opinion and the cascade moves
/// on to the next rule. Rules take `&mut self` so a rule may carry its
/// own state, which the seeded random rule does.
pub trait TieBreak {
    fn name(&self) -> &'static str;

    /// Called once at the start of every ranking pass with the roster
    /// size. Rules that precompute per-pass state hook in here; the
    /// default does nothing.
    fn prepare(&mut self, _num_players: usize) {}

    fn compare(&mut self, a: usize, b: usize, ctx: &RankContext<'_>) -> Ordering;
}

/// Compare direct results between the two players only. No decision if
/// they never played or split their meetings evenly.
pub struct HeadToHeadBreak;

impl TieBreak for HeadToHeadBreak {
    fn name(&self) -> &'static str {
        "head-to-head"
    }

    fn compare(&mut self, a: usize, b: usize, ctx: &RankContext<'_>) -> Ordering {
        let a_wins = ctx.head_to_head.wins_over(a, b);
        let b_wins = ctx.head_to_head.wins_over(b, a);
        b_wins.cmp(&a_wins)
    }
}

/// Higher point differential ranks first.
pub struct PointDifferentialBreak;

impl TieBreak for PointDifferentialBreak {
    fn name(&self) -> &'static str {
        "point-differential"
    }

    fn compare(&mut self, a: usize, b: usize, ctx: &RankContext<'_>) -> Ordering {
        ctx.stats[b]
            .point_differential
            .cmp(&ctx.stats[a].point_differential)
    }
}

/// Higher total points scored ranks first.
pub struct PointsScoredBreak;

impl TieBreak for PointsScoredBreak {
    fn name(&self) -> &'static str {
        "points-scored"
    }

    fn compare(&mut self, a: usize, b: usize, ctx: &RankContext<'_>) -> Ordering {
        ctx.stats[b].points_scored.cmp(&ctx.stats[a].points_scored)
    }
}

/// Higher opponent strength ranks first.
pub struct OpponentStrengthBreak;

impl TieBreak for OpponentStrengthBreak {
    fn name(&self) -> &'static str {
        "opponent-strength"
    }

    fn compare(&mut self, a: usize, b: usize, ctx: &RankContext<'_>) -> Ordering {
        ctx.stats[b]
            .opponent_strength
            .total_cmp(&ctx.stats[a].opponent_strength)
    }
}

/// Random tie break from a caller-seeded rng, so a given seed always
/// reproduces the same standings.
///
/// At the start of every ranking pass each roster index draws one
/// random priority; comparisons then read those fixed priorities.
/// Drawing per pass instead of per comparison keeps the comparator a
/// consistent total order, which the sort requires.
pub struct RandomBreak {
    rng: StdRng,
    priorities: Vec<u64>,
}

impl RandomBreak {
    pub fn seeded(seed: u64) -> Self {
        RandomBreak {
            rng: StdRng::seed_from_u64(seed),
            priorities: Vec::new(),
        }
    }
}

impl TieBreak for RandomBreak {
    fn name(&self) -> &'static str {
        "random"
    }

    fn prepare(&mut self, num_players: usize) {
        self.priorities = (0..num_players).map(|_| self.rng.random()).collect();
    }

    fn compare(&mut self, a: usize, b: usize, _ctx: &RankContext<'_>) -> Ordering {
        match (self.priorities.get(a), self.priorities.get(b)) {
            (Some(pa), Some(pb)) => pb.cmp(pa),
            // Not prepared for this roster size; stay silent rather
            // than decide from nothing.
            _ => Ordering::Equal,
        }
    }
}

/// Turn the configured rule list into strategy objects, in order.
///
/// The random rule is refused without a seed: its outcome is
/// nondeterministic by definition, and we require the caller to opt into
/// that explicitly rather than silently using ambient entropy.
pub fn build_rules(
    rules: &[TieBreakRule],
    seed: Option<u64>,
) -> Result<Vec<Box<dyn TieBreak>>, ConfigurationError> {
    rules
        .iter()
        .map(|rule| -> Result<Box<dyn TieBreak>, ConfigurationError> {
            match rule {
                TieBreakRule::HeadToHead => Ok(Box::new(HeadToHeadBreak)),
                TieBreakRule::PointDifferential => Ok(Box::new(PointDifferentialBreak)),
                TieBreakRule::PointsScored => Ok(Box::new(PointsScoredBreak)),
                TieBreakRule::OpponentStrength => Ok(Box::new(OpponentStrengthBreak)),
                TieBreakRule::Random => match seed {
                    Some(seed) => Ok(Box::new(RandomBreak::seeded(seed))),
                    None => Err(ConfigurationError::RandomRuleNeedsSeed),
                },
            }
        })
        .collect()
}
