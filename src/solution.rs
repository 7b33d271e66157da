use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::PlanConfig;
use crate::error::PlanError;
use crate::model::condition::HardSoftScore;
use crate::model::entity::{Guest, GuestId, GuestRegistry};
use crate::score;
use crate::table::{SeatIndex, Topology};

/// Read access to who sits where.
pub trait Occupancy {
    fn occupant(&self, seat: SeatIndex) -> Option<GuestId>;
}

/// The static problem: who is invited and which seats exist.
#[derive(Debug, Clone)]
pub struct SeatingPlan {
    pub registry: GuestRegistry,
    pub topology: Topology,
}

impl SeatingPlan {
    /// Registers the guests and builds enough tables to seat all of them.
    pub fn new(guests: Vec<Guest>, config: &PlanConfig) -> Result<SeatingPlan, PlanError> {
        let registry = GuestRegistry::new(guests)?;
        Self::from_registry(registry, config)
    }

    pub fn from_registry(
        registry: GuestRegistry,
        config: &PlanConfig,
    ) -> Result<SeatingPlan, PlanError> {
        let topology = Topology::build(registry.len(), config.table_size)?;
        Ok(SeatingPlan { registry, topology })
    }
}

/// Seat to guest mapping, one slot per seat in topology order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    slots: Vec<Option<GuestId>>,
}

impl Assignment {
    pub fn empty(topology: &Topology) -> Assignment {
        Assignment { slots: vec![None; topology.len()] }
    }

    /// Fills seats in table-then-seat order with guests in registry order.
    pub fn sequential(plan: &SeatingPlan) -> Assignment {
        let mut assignment = Assignment::empty(&plan.topology);
        for (slot, id) in assignment.slots.iter_mut().zip(plan.registry.ids()) {
            *slot = Some(id);
        }
        assignment
    }

    /// Seats every guest exactly once at a random seat.
    pub fn shuffled<R: Rng + ?Sized>(plan: &SeatingPlan, rng: &mut R) -> Assignment {
        let mut seats = (0..plan.topology.len()).collect::<Vec<SeatIndex>>();
        seats.shuffle(rng);
        let mut assignment = Assignment::empty(&plan.topology);
        for (seat, id) in seats.into_iter().zip(plan.registry.ids()) {
            assignment.slots[seat] = Some(id);
        }
        assignment
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Fails unless there is exactly one slot per seat of `topology`.
    pub fn check_fits(&self, topology: &Topology) -> Result<(), PlanError> {
        if self.slots.len() != topology.len() {
            return Err(PlanError::AssignmentSize {
                expected: topology.len(),
                actual: self.slots.len(),
            });
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, seat: SeatIndex) -> Option<GuestId> {
        self.slots.get(seat).copied().flatten()
    }

    /// Puts `guest` (or nobody) at `seat` and returns the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `seat` is outside the topology this assignment was built for.
    pub fn set(&mut self, seat: SeatIndex, guest: Option<GuestId>) -> Option<GuestId> {
        std::mem::replace(&mut self.slots[seat], guest)
    }

    pub fn swap(&mut self, a: SeatIndex, b: SeatIndex) {
        self.slots.swap(a, b);
    }

    /// Occupied seats with their guest.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, GuestId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(seat, guest)| guest.map(|id| (seat, id)))
    }

    pub fn seats_of(&self, guest: GuestId) -> impl Iterator<Item = SeatIndex> + '_ {
        self.occupied().filter(move |&(_, id)| id == guest).map(|(seat, _)| seat)
    }
}

impl Occupancy for Assignment {
    fn occupant(&self, seat: SeatIndex) -> Option<GuestId> {
        self.get(seat)
    }
}

/// One candidate point of the search space. Cloning shares the plan and
/// copies only the assignment.
#[derive(Debug, Clone)]
pub struct SeatingPlanSolution {
    pub plan: Arc<SeatingPlan>,
    pub assignment: Assignment,
    score: Option<HardSoftScore>,
}

impl SeatingPlanSolution {
    pub fn new(plan: Arc<SeatingPlan>) -> SeatingPlanSolution {
        let assignment = Assignment::empty(&plan.topology);
        SeatingPlanSolution { plan, assignment, score: None }
    }

    /// Pairs a plan with an assignment built for the same topology.
    pub fn with_assignment(
        plan: Arc<SeatingPlan>,
        assignment: Assignment,
    ) -> Result<SeatingPlanSolution, PlanError> {
        assignment.check_fits(&plan.topology)?;
        Ok(SeatingPlanSolution { plan, assignment, score: None })
    }

    pub(crate) fn scored(
        plan: Arc<SeatingPlan>,
        assignment: Assignment,
        score: HardSoftScore,
    ) -> SeatingPlanSolution {
        SeatingPlanSolution { plan, assignment, score: Some(score) }
    }

    /// Last score stored by [`Self::calculate_score`], if any.
    pub fn score(&self) -> Option<HardSoftScore> {
        self.score
    }

    pub fn calculate_score(&mut self) -> HardSoftScore {
        let score = score::evaluate(&self.plan, &self.assignment);
        self.score = Some(score);
        score
    }

    pub fn set_score(&mut self, score: HardSoftScore) {
        self.score = Some(score);
    }

    /// Drops the stored score; call after mutating the assignment directly.
    pub fn invalidate_score(&mut self) {
        self.score = None;
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::entity::Gender;

    fn plan(n: u32) -> SeatingPlan {
        let guests = (1..=n)
            .map(|id| Guest::new(id, "Guest", &id.to_string(), Gender::Male))
            .collect();
        SeatingPlan::new(guests, &PlanConfig::default().with_table_size(4)).unwrap()
    }

    #[test]
    fn sequential_fills_from_the_first_table() {
        let plan = plan(6);
        let assignment = Assignment::sequential(&plan);
        assert_eq!(assignment.len(), 8);
        assert_eq!(assignment.occupied().count(), 6);
        assert_eq!(assignment.get(6), None);
        assert_eq!(assignment.get(7), None);
    }

    #[test]
    fn shuffled_seats_everyone_once() {
        let plan = plan(7);
        let mut rng = SmallRng::seed_from_u64(7);
        let assignment = Assignment::shuffled(&plan, &mut rng);
        for id in plan.registry.ids() {
            assert_eq!(assignment.seats_of(id).count(), 1);
        }
        assert_eq!(score::evaluate(&plan, &assignment).hard, 0);
    }

    #[test]
    fn set_returns_previous_occupant() {
        let plan = plan(2);
        let mut assignment = Assignment::empty(&plan.topology);
        assert_eq!(assignment.set(1, Some(2)), None);
        assert_eq!(assignment.set(1, None), Some(2));
        assert_eq!(assignment.get(99), None);
    }

    #[test]
    fn assignment_must_match_the_plan() {
        let small = Arc::new(plan(3));
        let large = plan(7);
        let oversized = Assignment::sequential(&large);
        let err = SeatingPlanSolution::with_assignment(small, oversized).unwrap_err();
        assert!(matches!(err, PlanError::AssignmentSize { expected: 4, actual: 8 }));
    }

    #[test]
    fn solution_stores_calculated_score() {
        let plan = Arc::new(plan(3));
        let mut solution = SeatingPlanSolution::new(plan);
        assert_eq!(solution.score(), None);
        assert_eq!(solution.calculate_score(), HardSoftScore::of_hard(-3));
        solution.invalidate_score();
        assert_eq!(solution.score(), None);
    }
}
