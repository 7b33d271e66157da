//! Seat guests at round tables and score how well a candidate seating
//! honours their preferences.
//!
//! The crate models the problem (guests, tables as closed rings of
//! seats, an assignment of guests to seats) and the hard/soft objective
//! an external optimizer climbs. It does not search.
//!
//! ```
//! use std::sync::Arc;
//! use seating_plan::config::PlanConfig;
//! use seating_plan::model::entity::{Gender, Guest};
//! use seating_plan::solution::{Assignment, SeatingPlan, SeatingPlanSolution};
//!
//! let guests = vec![
//!     Guest::new(1, "Ann", "Lee", Gender::Female),
//!     Guest::new(2, "Bob", "Kim", Gender::Male),
//! ];
//! let plan = Arc::new(SeatingPlan::new(guests, &PlanConfig::default()).unwrap());
//! let assignment = Assignment::sequential(&plan);
//! let mut solution = SeatingPlanSolution::with_assignment(plan, assignment).unwrap();
//! assert_eq!(solution.calculate_score().hard, 0);
//! ```

pub mod action;
pub mod cache;
pub mod config;
pub mod error;
pub mod model;
pub mod records;
pub mod report;
pub mod score;
pub mod solution;
pub mod table;

pub use action::{ActionError, Move};
pub use cache::ScoreCache;
pub use config::PlanConfig;
pub use error::PlanError;
pub use model::condition::HardSoftScore;
pub use model::entity::{Gender, Guest, GuestId, GuestRegistry};
pub use solution::{Assignment, SeatingPlan, SeatingPlanSolution};
pub use table::Topology;
