use std::cmp::Ordering;

use tracing::trace;

use super::stats::StatsTable;
use super::tie_break::{RankContext, TieBreak, build_rules};
use crate::core::{ConfigurationError, TieBreakRule};

/// Orders players by win percentage with a configurable tie-break
/// cascade behind it.
///
/// The sort is stable, so two players no configured rule can separate
/// keep their roster order. Ranking is recomputed in full on every call;
/// there is no incremental path.
pub struct Ranker {
    rules: Vec<Box<dyn TieBreak>>,
}

impl Ranker {
    /// Build a ranker without a random seed. Fails if the configured
    /// rules include [`TieBreakRule::Random`].
    pub fn new(rules: &[TieBreakRule]) -> Result<Self, ConfigurationError> {
        Ok(Ranker {
            rules: build_rules(rules, None)?,
        })
    }

    /// Build a ranker with a seed for the random tie break.
    pub fn with_seed(rules: &[TieBreakRule], seed: u64) -> Result<Self, ConfigurationError> {
        Ok(Ranker {
            rules: build_rules(rules, Some(seed))?,
        })
    }

    /// Rank every player in the table, best first. Returns roster
    /// indices; the caller maps them back to players.
    pub fn rank(&mut self, table: &StatsTable) -> Vec<usize> {
        let ctx = RankContext {
            stats: table.stats(),
            head_to_head: table.head_to_head(),
        };
        let rules = &mut self.rules;
        for rule in rules.iter_mut() {
            rule.prepare(table.len());
        }

        let mut order: Vec<usize> = (0..table.len()).collect();
        order.sort_by(|&a, &b| {
            let primary = ctx.stats[b]
                .win_percentage
                .total_cmp(&ctx.stats[a].win_percentage);
            if primary != Ordering::Equal {
                return primary;
            }
            for rule in rules.iter_mut() {
                let decision = rule.compare(a, b, &ctx);
                if decision != Ordering::Equal {
                    trace!(rule = rule.name(), a, b, "tie break decided");
                    return decision;
                }
            }
            // Fully tied. Equal keeps roster order because the sort is
            // stable.
            Ordering::Equal
        });
        order
    }
}
