use std::fmt;

use itertools::Itertools;

use crate::model::entity::Gender;
use crate::score;
use crate::solution::SeatingPlanSolution;

/// Head counts for a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanSummary {
    pub total_guests: usize,
    pub total_seats: usize,
    pub seated_guests: usize,
    pub empty_seats: usize,
    pub male_guests: usize,
    pub female_guests: usize,
}

impl PlanSummary {
    pub fn of(solution: &SeatingPlanSolution) -> PlanSummary {
        let registry = &solution.plan.registry;
        let assignment = &solution.assignment;
        PlanSummary {
            total_guests: registry.len(),
            total_seats: solution.plan.topology.len(),
            seated_guests: assignment
                .occupied()
                .map(|(_, id)| id)
                .filter(|&id| registry.contains(id))
                .unique()
                .count(),
            empty_seats: assignment.len() - assignment.occupied().count(),
            male_guests: registry.count_gender(Gender::Male),
            female_guests: registry.count_gender(Gender::Female),
        }
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} guests ({} male, {} female), {} of them seated; {} seats, {} empty",
            self.total_guests,
            self.male_guests,
            self.female_guests,
            self.seated_guests,
            self.total_seats,
            self.empty_seats
        )
    }
}

/// Text listing of a solution, one line per seat ordered by table then seat.
/// A seat holding an id the registry does not know is listed as occupied.
pub struct SolutionReport<'a> {
    solution: &'a SeatingPlanSolution,
}

impl<'a> SolutionReport<'a> {
    pub fn new(solution: &'a SeatingPlanSolution) -> SolutionReport<'a> {
        SolutionReport { solution }
    }
}

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = &self.solution.plan;
        let score = self
            .solution
            .score()
            .unwrap_or_else(|| score::evaluate_solution(self.solution));
        writeln!(f, "Score: {score}")?;
        writeln!(f, "Details:")?;
        let seats = plan
            .topology
            .seats()
            .iter()
            .enumerate()
            .sorted_by_key(|(_, seat)| (seat.table_number, seat.seat_number));
        for (index, seat) in seats {
            write!(f, "Table {}, Seat {}: ", seat.table_number, seat.seat_number)?;
            match self.solution.assignment.get(index) {
                Some(id) => match plan.registry.get(id) {
                    Some(guest) => writeln!(f, "{} ({})", guest.full_name(), guest.gender)?,
                    None => writeln!(f, "[unknown guest {id}]")?,
                },
                None => writeln!(f, "[empty seat]")?,
            }
        }
        Ok(())
    }
}
