//! Guest data as it arrives from a configuration file.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::PlanConfig;
use crate::error::PlanError;
use crate::model::entity::{Gender, Guest, GuestId, GuestRegistry};
use crate::solution::SeatingPlan;

/// One guest entry. Missing preference lists mean "no preference".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub id: GuestId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    #[serde(default)]
    pub seat_beside: Option<Vec<GuestId>>,
    #[serde(default)]
    pub do_not_seat_beside: Option<Vec<GuestId>>,
    #[serde(default)]
    pub seat_at_same_table: Option<Vec<GuestId>>,
    #[serde(default)]
    pub do_not_seat_at_same_table: Option<Vec<GuestId>>,
}

fn id_set(ids: Option<Vec<GuestId>>) -> HashSet<GuestId> {
    ids.into_iter().flatten().collect()
}

impl From<GuestRecord> for Guest {
    fn from(record: GuestRecord) -> Self {
        Guest {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            gender: record.gender,
            seat_beside: id_set(record.seat_beside),
            do_not_seat_beside: id_set(record.do_not_seat_beside),
            seat_at_same_table: id_set(record.seat_at_same_table),
            do_not_seat_at_same_table: id_set(record.do_not_seat_at_same_table),
        }
    }
}

impl GuestRegistry {
    pub fn from_records(records: Vec<GuestRecord>) -> Result<GuestRegistry, PlanError> {
        GuestRegistry::new(records.into_iter().map(Guest::from).collect())
    }
}

/// Parses a JSON array of guest records and builds the plan around it.
pub fn plan_from_json(json: &str, config: &PlanConfig) -> Result<SeatingPlan, PlanError> {
    let records: Vec<GuestRecord> = serde_json::from_str(json)?;
    let registry = GuestRegistry::from_records(records)?;
    let plan = SeatingPlan::from_registry(registry, config)?;
    info!(
        guests = plan.registry.len(),
        tables = plan.topology.number_of_tables(),
        "loaded seating plan"
    );
    Ok(plan)
}

/// Builds a plan from records that were parsed elsewhere.
pub fn plan_from_records(
    records: Vec<GuestRecord>,
    config: &PlanConfig,
) -> Result<SeatingPlan, PlanError> {
    SeatingPlan::from_registry(GuestRegistry::from_records(records)?, config)
}
