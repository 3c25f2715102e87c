//! A bounded record of recent simulation runs, used to compare scenarios.
use crate::simulation::SimulationResult;
use crate::simulation::risk::RiskLevel;
use crate::units::{Dimensionless, Litres, Money, Tonnes};
use log::debug;
use serde::Serialize;
use std::collections::VecDeque;

/// The number of runs which are kept in the history
pub const HISTORY_CAPACITY: usize = 5;

/// A summary of a single run for comparison with others
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRecord {
    /// A name for the run
    pub label: String,
    /// Expected yield
    #[serde(rename = "yield")]
    pub expected_yield: Tonnes,
    /// Profit (negative for a loss)
    pub profit: Money,
    /// Total cost
    pub cost: Money,
    /// Risk classification
    pub risk_level: RiskLevel,
    /// Water consumed
    pub water_usage: Litres,
    /// Environmental impact index
    pub environmental_impact: Dimensionless,
}

impl ComparisonRecord {
    /// Summarise the result of a run
    pub fn new(label: String, result: &SimulationResult) -> Self {
        Self {
            label,
            expected_yield: result.expected_yield,
            profit: result.profit,
            cost: result.total_cost,
            risk_level: result.risk_level,
            water_usage: result.water_usage,
            environmental_impact: result.environmental_impact,
        }
    }
}

/// The most recent runs, oldest first.
///
/// Once [`HISTORY_CAPACITY`] records are held, adding another evicts the oldest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonHistory(VecDeque<ComparisonRecord>);

impl ComparisonHistory {
    /// Create a new, empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, evicting the oldest if the history is full
    pub fn push(&mut self, record: ComparisonRecord) {
        while self.0.len() >= HISTORY_CAPACITY {
            let Some(evicted) = self.0.pop_front() else {
                break;
            };
            debug!("Removing {} from comparison history", evicted.label);
        }

        self.0.push_back(record);
    }

    /// The number of records held
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most recently added record
    pub fn latest(&self) -> Option<&ComparisonRecord> {
        self.0.back()
    }

    /// Iterate over records, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ComparisonRecord> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ComparisonHistory {
    type Item = &'a ComparisonRecord;
    type IntoIter = std::collections::vec_deque::Iter<'a, ComparisonRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
