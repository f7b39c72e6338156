use std::collections::HashSet;

use tracing::trace;

use crate::core::{PlayerId, Tournament, TournamentFormat, ValidationError};

/// A format-specific validation rule. One small object per format keeps
/// the validator's loop free of per-format branching and lets a new
/// format plug in without touching the loop.
pub trait FormatRule {
    fn name(&self) -> &'static str;

    fn check(&self, tournament: &Tournament) -> Result<(), ValidationError>;
}

/// Single elimination without byes needs a bracket that fills exactly,
/// so the roster must be a power of two. With byes allowed any size
/// goes.
pub struct SingleEliminationRule;

impl FormatRule for SingleEliminationRule {
    fn name(&self) -> &'static str {
        "single-elimination-roster"
    }

    fn check(&self, tournament: &Tournament) -> Result<(), ValidationError> {
        let n = tournament.num_players();
        if !tournament.allow_byes && !n.is_power_of_two() {
            return Err(ValidationError::RosterNotPowerOfTwo(n));
        }
        Ok(())
    }
}

/// A round robin with zero completed matches has no standings to speak
/// of; an in-progress one is fine.
pub struct RoundRobinRule;

impl FormatRule for RoundRobinRule {
    fn name(&self) -> &'static str {
        "round-robin-progress"
    }

    fn check(&self, tournament: &Tournament) -> Result<(), ValidationError> {
        if tournament.matches.iter().any(|m| m.is_decided()) {
            Ok(())
        } else {
            Err(ValidationError::NoCompletedMatches)
        }
    }
}

/// Pure integrity check over a tournament snapshot. Checks run in a
/// fixed order and the first failure wins; nothing is mutated.
pub struct Validator {
    format_rules: Vec<Box<dyn FormatRule>>,
}

impl Validator {
    /// Compose the rule list for one tournament format.
    pub fn new(format: TournamentFormat) -> Self {
        let format_rules: Vec<Box<dyn FormatRule>> = match format {
            TournamentFormat::SingleElimination => vec![Box::new(SingleEliminationRule)],
            TournamentFormat::RoundRobin => vec![Box::new(RoundRobinRule)],
            TournamentFormat::DoubleElimination
            | TournamentFormat::Swiss
            | TournamentFormat::Ladder => Vec::new(),
        };
        Validator { format_rules }
    }

    pub fn validate(&self, tournament: &Tournament) -> Result<(), ValidationError> {
        let n = tournament.num_players();
        if n < 2 {
            return Err(ValidationError::TooFewPlayers(n));
        }

        for rule in &self.format_rules {
            trace!(rule = rule.name(), "checking format rule");
            rule.check(tournament)?;
        }

        let roster: HashSet<PlayerId> = tournament.players.iter().map(|p| p.id).collect();
        for m in &tournament.matches {
            for side in [m.home, m.away] {
                if !roster.contains(&side) {
                    return Err(ValidationError::UnknownPlayer {
                        match_id: m.id,
                        player_id: side,
                    });
                }
            }
            if m.home == m.away {
                return Err(ValidationError::SamePlayerTwice { match_id: m.id });
            }
            if let Some(winner) = m.winner {
                if winner != m.home && winner != m.away {
                    return Err(ValidationError::WinnerNotInMatch {
                        match_id: m.id,
                        player_id: winner,
                    });
                }
                // Forfeits are awarded without play and skip all score
                // checks.
                if !m.forfeit {
                    let loser = if winner == m.home { m.away } else { m.home };
                    let (Some(winner_score), Some(loser_score)) =
                        (m.score_of(winner), m.score_of(loser))
                    else {
                        return Err(ValidationError::MissingScores { match_id: m.id });
                    };
                    if winner_score <= loser_score {
                        return Err(ValidationError::ScoreWinnerMismatch { match_id: m.id });
                    }
                }
            }
        }

        if let Some(table) = &tournament.prize_table {
            let total = table.total_share();
            if total > 1.0 + f64::EPSILON {
                return Err(ValidationError::InvalidPrizeShares { total });
            }
        }

        Ok(())
    }
}
