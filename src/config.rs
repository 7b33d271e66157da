/// Parameters for building a seating plan.
///
/// ```
/// use seating_plan::config::PlanConfig;
///
/// let config = PlanConfig::default().with_table_size(10);
/// assert_eq!(config.table_size, 10);
/// assert_eq!(PlanConfig::default().table_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanConfig {
    /// Seats per table.
    pub table_size: usize,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self { table_size: 8 }
    }
}

impl PlanConfig {
    pub fn with_table_size(mut self, table_size: usize) -> Self {
        self.table_size = table_size;
        self
    }
}
