use std::collections::HashSet;
use std::sync::Arc;

use seating_plan::report::{PlanSummary, SolutionReport};
use seating_plan::score::{self, breakdown, seat_terms};
use seating_plan::{
    Assignment, Gender, Guest, Move, PlanConfig, ScoreCache, SeatingPlan, SeatingPlanSolution,
};

fn shared_plan(n: u32, table_size: usize) -> Arc<SeatingPlan> {
    let config = PlanConfig::default().with_table_size(table_size);
    Arc::new(SeatingPlan::new(guests(n), &config).unwrap())
}

fn guests(n: u32) -> Vec<Guest> {
    (1..=n)
        .map(|id| {
            let gender = if id % 2 == 0 { Gender::Female } else { Gender::Male };
            Guest::new(id, "Guest", &id.to_string(), gender)
        })
        .collect()
}

#[test]
fn four_top_with_preferences() {
    let mut guests = guests(4);
    guests[0].seat_beside.insert(2);
    guests[0].do_not_seat_beside.insert(3);
    let plan = SeatingPlan::new(guests, &PlanConfig::default().with_table_size(4)).unwrap();
    let assignment = Assignment::sequential(&plan);

    assert_eq!(plan.topology.neighbours(0, &assignment), HashSet::from([2, 4]));
    let terms = seat_terms(&plan, 0, &assignment);
    assert_eq!(terms.same_gender_neighbours, 0);
    assert_eq!(terms.desired_neighbours, 1);
    assert_eq!(terms.undesired_neighbours, 0);
    assert_eq!(terms.soft(), 1);
    // Tablemate preferences are unset, so A's seat is the only contributor.
    assert_eq!(score::evaluate(&plan, &assignment).soft, 1);
}

#[test]
fn nine_guests_two_tables_six_seated() {
    let plan = SeatingPlan::new(guests(9), &PlanConfig::default()).unwrap();
    assert_eq!(plan.topology.number_of_tables(), 2);
    assert_eq!(plan.topology.len(), 16);

    let full = Assignment::sequential(&plan);
    assert_eq!(full.len() - full.occupied().count(), 7);

    let mut partial = Assignment::empty(&plan.topology);
    for (seat, id) in [(0, 1), (1, 2), (2, 3), (8, 4), (9, 5), (15, 6)] {
        partial.set(seat, Some(id));
    }
    let terms = breakdown(&plan, &partial);
    assert_eq!(terms.unseated, 3);
    assert_eq!(terms.redundant, 0);
    assert_eq!(terms.score().hard, -3);
}

#[test]
fn guest_in_two_seats() {
    let plan = Arc::new(SeatingPlan::new(guests(5), &PlanConfig::default()).unwrap());
    let mut assignment = Assignment::sequential(&plan);
    assignment.set(6, Some(3));
    let terms = breakdown(&plan, &assignment);
    assert_eq!((terms.unseated, terms.redundant), (0, 1));
    assert_eq!(terms.score().hard, -1);

    let mut cache = ScoreCache::create(plan.clone(), Assignment::sequential(&plan)).unwrap();
    cache.act(Move::Assign { seat: 6, guest: 3 }).unwrap();
    assert_eq!(cache.score(), terms.score());
}

#[test]
fn hard_zero_only_when_everyone_sits_once() {
    let plan = SeatingPlan::new(guests(10), &PlanConfig::default().with_table_size(3)).unwrap();
    let mut assignment = Assignment::sequential(&plan);
    assert_eq!(score::evaluate(&plan, &assignment).hard, 0);

    // Moving a guest into a spare seat keeps the plan valid.
    assignment.swap(0, 11);
    assert_eq!(score::evaluate(&plan, &assignment).hard, 0);

    assignment.set(11, None);
    assert_eq!(score::evaluate(&plan, &assignment).hard, -1);
}

#[test]
fn summary_and_report_for_a_finished_plan() {
    let plan = shared_plan(3, 4);
    let assignment = Assignment::sequential(&plan);
    let mut solution = SeatingPlanSolution::with_assignment(plan.clone(), assignment).unwrap();
    let score = solution.calculate_score();

    let summary = PlanSummary::of(&solution);
    assert_eq!(summary.total_seats, 4);
    assert_eq!(summary.empty_seats, 1);
    assert_eq!(summary.seated_guests, 3);
    assert_eq!((summary.male_guests, summary.female_guests), (2, 1));

    let text = SolutionReport::new(&solution).to_string();
    assert!(text.starts_with(&format!("Score: {score}\n")));
    assert!(text.ends_with("Table 1, Seat 4: [empty seat]\n"));
}

#[test]
fn solutions_score_independently_across_threads() {
    let plan = shared_plan(12, 5);
    let assignment = Assignment::sequential(&plan);
    let base = SeatingPlanSolution::with_assignment(plan.clone(), assignment).unwrap();
    let expected = score::evaluate_solution(&base);
    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                let solution = base.clone();
                scope.spawn(move || score::evaluate_solution(&solution))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[cfg(feature = "parallel")]
#[test]
fn evaluate_all_matches_sequential() {
    let plan = shared_plan(12, 5);
    let solutions = (0..8)
        .map(|shift| {
            let mut assignment = Assignment::sequential(&plan);
            assignment.swap(0, shift);
            SeatingPlanSolution::with_assignment(plan.clone(), assignment).unwrap()
        })
        .collect::<Vec<_>>();
    let expected = solutions.iter().map(score::evaluate_solution).collect::<Vec<_>>();
    assert_eq!(score::evaluate_all(&solutions), expected);
}
