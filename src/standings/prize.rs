use std::collections::HashMap;

use crate::core::{PlayerId, PrizeTable};

/// Map finishing places to prize amounts.
///
/// The i-th ranked player (1-indexed) gets `pool * share` for the share
/// configured at place i; a place with no configured share gets nothing.
/// Distribution simply stops once the ranked list or the table runs out,
/// it is never an error to have more players than paid places or the
/// other way around.
pub fn distribute_prizes(
    ranked: &[PlayerId],
    table: &PrizeTable,
    pool: f64,
) -> HashMap<PlayerId, f64> {
    let mut awards = HashMap::new();
    let Some(last_paid) = table.last_paid_place() else {
        return awards;
    };

    for (i, &player) in ranked.iter().enumerate() {
        let place = (i + 1) as u32;
        if place > last_paid {
            break;
        }
        if let Some(share) = table.share_for(place) {
            awards.insert(player, pool * share);
        }
    }
    awards
}
