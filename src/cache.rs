use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;
use tracing::trace;

use crate::action::{ActionError, Move};
use crate::error::PlanError;
use crate::model::condition::HardSoftScore;
use crate::model::entity::GuestId;
use crate::score;
use crate::solution::{Assignment, Occupancy, SeatingPlan, SeatingPlanSolution};
use crate::table::SeatIndex;

/// The assignment as it would look after a move.
struct Overlay<'a> {
    base: &'a Assignment,
    changes: [(SeatIndex, Option<GuestId>); 2],
}

impl Occupancy for Overlay<'_> {
    fn occupant(&self, seat: SeatIndex) -> Option<GuestId> {
        self.changes
            .iter()
            .find(|(changed, _)| *changed == seat)
            .map_or_else(|| self.base.get(seat), |&(_, guest)| guest)
    }
}

struct Delta {
    score: HardSoftScore,
    tables: Vec<(usize, i64)>,
    counts: Vec<(GuestId, usize)>,
}

/// Seat-count penalty for one guest: unseated and each extra seat cost one.
fn hard_for(count: usize) -> i64 {
    -(count as i64 - 1).abs()
}

/// Keeps a running score for an assignment so that a move only rescores
/// the tables it touches. The running total always equals
/// [`score::evaluate`] of the current assignment.
pub struct ScoreCache {
    plan: Arc<SeatingPlan>,
    assignment: Assignment,
    seat_counts: HashMap<GuestId, usize>,
    table_scores: Vec<i64>,
    score: HardSoftScore,
}

impl ScoreCache {
    pub fn create(plan: Arc<SeatingPlan>, assignment: Assignment) -> Result<ScoreCache, PlanError> {
        assignment.check_fits(&plan.topology)?;
        let seat_counts = assignment
            .occupied()
            .map(|(_, id)| id)
            .filter(|&id| plan.registry.contains(id))
            .counts();
        let table_scores = (0..plan.topology.number_of_tables())
            .map(|table| score::table_soft(&plan, table, &assignment))
            .collect::<Vec<_>>();
        let hard: i64 = plan
            .registry
            .ids()
            .map(|id| hard_for(seat_counts.get(&id).copied().unwrap_or(0)))
            .sum();
        let score = HardSoftScore::new(hard, table_scores.iter().sum());
        Ok(ScoreCache { plan, assignment, seat_counts, table_scores, score })
    }

    pub fn from_solution(solution: &SeatingPlanSolution) -> Result<ScoreCache, PlanError> {
        Self::create(solution.plan.clone(), solution.assignment.clone())
    }

    pub fn score(&self) -> HardSoftScore {
        self.score
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn plan(&self) -> &SeatingPlan {
        &self.plan
    }

    /// Score difference the move would make, without making it.
    pub fn simulate(&self, action: &Move) -> Result<HardSoftScore, ActionError> {
        Ok(self.delta(action)?.score)
    }

    /// Applies the move and returns the score difference it made.
    pub fn act(&mut self, action: Move) -> Result<HardSoftScore, ActionError> {
        let delta = self.delta(&action)?;
        action.apply(&self.plan, &mut self.assignment)?;
        for (table, soft) in delta.tables {
            self.table_scores[table] = soft;
        }
        for (id, count) in delta.counts {
            if count == 0 {
                self.seat_counts.remove(&id);
            } else {
                self.seat_counts.insert(id, count);
            }
        }
        self.score += delta.score;
        trace!(?action, score = %self.score, "applied move");
        Ok(delta.score)
    }

    pub fn into_solution(self) -> SeatingPlanSolution {
        SeatingPlanSolution::scored(self.plan, self.assignment, self.score)
    }

    fn delta(&self, action: &Move) -> Result<Delta, ActionError> {
        action.validate(&self.plan, &self.assignment)?;
        let overlay = Overlay { base: &self.assignment, changes: action.outcome(&self.assignment) };
        let seats = action.seats().into_iter().unique().collect::<Vec<_>>();

        let mut changed_counts: HashMap<GuestId, usize> = HashMap::new();
        for &seat in &seats {
            let before = self.assignment.get(seat).filter(|&id| self.plan.registry.contains(id));
            let after = overlay.occupant(seat).filter(|&id| self.plan.registry.contains(id));
            if before == after {
                continue;
            }
            if let Some(id) = before {
                let count = changed_counts.entry(id).or_insert_with(|| self.count(id));
                *count -= 1;
            }
            if let Some(id) = after {
                *changed_counts.entry(id).or_insert_with(|| self.count(id)) += 1;
            }
        }
        let hard: i64 = changed_counts
            .iter()
            .map(|(&id, &count)| hard_for(count) - hard_for(self.count(id)))
            .sum();

        let tables = seats
            .iter()
            .map(|&seat| self.plan.topology.table_of(seat))
            .unique()
            .map(|table| (table, score::table_soft(&self.plan, table, &overlay)))
            .collect::<Vec<_>>();
        let soft: i64 = tables
            .iter()
            .map(|&(table, soft)| soft - self.table_scores[table])
            .sum();

        Ok(Delta {
            score: HardSoftScore::new(hard, soft),
            tables,
            counts: changed_counts.into_iter().collect(),
        })
    }

    fn count(&self, id: GuestId) -> usize {
        self.seat_counts.get(&id).copied().unwrap_or(0)
    }
}
