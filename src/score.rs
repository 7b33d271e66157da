//! The objective an optimizer climbs.
//!
//! Hard terms count structural violations: guests without a seat and
//! guests holding more than one. Soft terms reward preferences met and
//! gender alternating around each table. Scoring only reads the plan and
//! the occupancy it is handed.

use std::collections::HashSet;
use std::ops::AddAssign;

use itertools::Itertools;

use crate::model::condition::HardSoftScore;
use crate::model::entity::{Gender, GuestId, GuestRegistry};
use crate::solution::{Assignment, Occupancy, SeatingPlan, SeatingPlanSolution};
use crate::table::SeatIndex;

/// Soft signals, each a non-negative count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftTerms {
    pub same_gender_neighbours: u64,
    pub desired_neighbours: u64,
    pub undesired_neighbours: u64,
    pub desired_tablemates: u64,
    pub undesired_tablemates: u64,
}

impl SoftTerms {
    pub fn soft(&self) -> i64 {
        self.desired_neighbours as i64 + self.desired_tablemates as i64
            - self.same_gender_neighbours as i64
            - self.undesired_neighbours as i64
            - self.undesired_tablemates as i64
    }
}

impl AddAssign for SoftTerms {
    fn add_assign(&mut self, rhs: Self) {
        self.same_gender_neighbours += rhs.same_gender_neighbours;
        self.desired_neighbours += rhs.desired_neighbours;
        self.undesired_neighbours += rhs.undesired_neighbours;
        self.desired_tablemates += rhs.desired_tablemates;
        self.undesired_tablemates += rhs.undesired_tablemates;
    }
}

/// Every term of a score, kept apart for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Registered guests that hold no seat.
    pub unseated: u64,
    /// Seats held beyond the first, summed over guests.
    pub redundant: u64,
    pub soft: SoftTerms,
}

impl ScoreBreakdown {
    pub fn score(&self) -> HardSoftScore {
        HardSoftScore {
            hard: -(self.unseated as i64) - self.redundant as i64,
            soft: self.soft.soft(),
        }
    }
}

pub fn evaluate(plan: &SeatingPlan, assignment: &Assignment) -> HardSoftScore {
    breakdown(plan, assignment).score()
}

pub fn evaluate_solution(solution: &SeatingPlanSolution) -> HardSoftScore {
    evaluate(&solution.plan, &solution.assignment)
}

/// Scores many independent solutions at once.
#[cfg(feature = "parallel")]
pub fn evaluate_all(solutions: &[SeatingPlanSolution]) -> Vec<HardSoftScore> {
    use rayon::prelude::*;

    solutions.par_iter().map(evaluate_solution).collect()
}

pub fn breakdown<O: Occupancy + ?Sized>(plan: &SeatingPlan, occupancy: &O) -> ScoreBreakdown {
    let registry = &plan.registry;
    let seat_counts = (0..plan.topology.len())
        .filter_map(|seat| occupancy.occupant(seat))
        .filter(|&id| registry.contains(id))
        .counts();
    let unseated = (registry.len() - seat_counts.len()) as u64;
    let redundant = seat_counts.values().map(|&count| count as u64 - 1).sum();

    let mut soft = SoftTerms::default();
    for seat in 0..plan.topology.len() {
        soft += seat_terms(plan, seat, occupancy);
    }
    ScoreBreakdown { unseated, redundant, soft }
}

/// Soft terms contributed by the occupant of one seat. Empty seats and
/// unregistered occupants contribute nothing.
pub fn seat_terms<O: Occupancy + ?Sized>(
    plan: &SeatingPlan,
    seat: SeatIndex,
    occupancy: &O,
) -> SoftTerms {
    let Some(guest) = occupancy.occupant(seat).and_then(|id| plan.registry.get(id)) else {
        return SoftTerms::default();
    };
    let neighbours = plan.topology.neighbours(seat, occupancy);
    let tablemates = plan.topology.tablemates(seat, occupancy);
    SoftTerms {
        same_gender_neighbours: count_gender(&plan.registry, &neighbours, guest.gender),
        desired_neighbours: overlap(&guest.seat_beside, &neighbours),
        undesired_neighbours: overlap(&guest.do_not_seat_beside, &neighbours),
        desired_tablemates: overlap(&guest.seat_at_same_table, &tablemates),
        undesired_tablemates: overlap(&guest.do_not_seat_at_same_table, &tablemates),
    }
}

/// Soft score of one zero-based table.
pub fn table_soft<O: Occupancy + ?Sized>(plan: &SeatingPlan, table: usize, occupancy: &O) -> i64 {
    plan.topology
        .table_seats(table)
        .map(|seat| seat_terms(plan, seat, occupancy).soft())
        .sum()
}

fn overlap(wanted: &HashSet<GuestId>, present: &HashSet<GuestId>) -> u64 {
    wanted.intersection(present).count() as u64
}

fn count_gender(registry: &GuestRegistry, guests: &HashSet<GuestId>, gender: Gender) -> u64 {
    guests
        .iter()
        .filter_map(|&id| registry.get(id))
        .filter(|other| other.gender == gender)
        .count() as u64
}
