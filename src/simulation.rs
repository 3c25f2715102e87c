//! Functionality for running scenario simulations.
use crate::finance::{profit, profit_margin, revenue};
use crate::history::{ComparisonHistory, ComparisonRecord};
use crate::parameters::{SimulationParams, ValidationError};
use crate::units::{Dimensionless, Hours, Litres, Money, Tonnes};
use log::{debug, warn};
use serde::Serialize;

pub mod costs;
use costs::CostBreakdown;
pub mod risk;
use risk::{ResourceUse, RiskLevel, environmental_impact, risk_level};
pub mod suggestions;
use suggestions::{Suggestion, suggest};
pub mod yield_model;
use yield_model::expected_yield;

/// Everything calculated for a single scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    /// Expected yield over the whole area of land
    pub expected_yield: Tonnes,
    /// Sum of all the costs in `cost_breakdown`
    pub total_cost: Money,
    /// Income from selling the harvest
    pub revenue: Money,
    /// Revenue minus total cost
    pub profit: Money,
    /// Profit as a percentage of revenue
    pub profit_margin: Dimensionless,
    /// Risk classification
    pub risk_level: RiskLevel,
    /// Water consumed
    pub water_usage: Litres,
    /// Cost of the water consumed
    pub water_cost: Money,
    /// Hours of labour required
    pub labour_hours: Hours,
    /// Total labour cost
    pub labour_cost_total: Money,
    /// Environmental impact index, between 0 and 100
    pub environmental_impact: Dimensionless,
    /// Advice for improving the scenario, in rule order
    pub suggestions: Vec<Suggestion>,
    /// Cost of each input
    pub cost_breakdown: CostBreakdown,
}

/// Run a simulation for a single scenario.
///
/// This has no side effects: the same parameters always give the same result.
///
/// # Returns
///
/// The result of the simulation or an error if any of the parameters are invalid. No calculation
/// is performed for invalid parameters.
pub fn run_simulation(params: &SimulationParams) -> Result<SimulationResult, ValidationError> {
    params.validate()?;
    Ok(compute(params))
}

/// Calculate the result for parameters which have already been validated
fn compute(params: &SimulationParams) -> SimulationResult {
    let expected_yield = expected_yield(
        params.crop_type,
        f64::from(params.irrigation_frequency),
        params.fertiliser_amount,
        params.land_size,
    );
    let cost_breakdown = CostBreakdown::from_params(params);
    let total_cost = cost_breakdown.total();
    let revenue = revenue(expected_yield, params.crop_type.price());
    let profit = profit(revenue, total_cost);
    let resources = ResourceUse::from_params(params);

    SimulationResult {
        expected_yield,
        total_cost,
        revenue,
        profit,
        profit_margin: profit_margin(profit, revenue),
        risk_level: risk_level(params),
        water_usage: resources.water_usage,
        water_cost: resources.water_cost,
        labour_hours: resources.labour_hours,
        labour_cost_total: cost_breakdown.labour,
        environmental_impact: environmental_impact(params),
        suggestions: suggest(params),
        cost_breakdown,
    }
}

/// The stage a [`Simulator`] has reached with its current scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    /// No simulation has been run since creation or the last reset
    Idle,
    /// Parameters are being checked
    Validating,
    /// Parameters were valid and the results are being calculated
    Computing,
    /// The last run completed
    Computed,
    /// The last run was rejected because of invalid parameters
    Error,
}

/// Runs scenarios and keeps track of the comparison history.
///
/// Runs take `&mut self`, so each one, including the update to the history, finishes before the
/// next can begin.
#[derive(Debug, Clone)]
pub struct Simulator {
    params: SimulationParams,
    result: Option<SimulationResult>,
    history: ComparisonHistory,
    state: ScenarioState,
    run_count: u32,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a new simulator with default parameters and an empty history
    pub fn new() -> Self {
        Self::with_history(ComparisonHistory::new())
    }

    /// Create a new simulator which will add to an existing history
    pub fn with_history(history: ComparisonHistory) -> Self {
        Self {
            params: SimulationParams::default(),
            result: None,
            history,
            state: ScenarioState::Idle,
            run_count: 0,
        }
    }

    /// Run a simulation, labelling it `Scenario N` in the history
    pub fn run_simulation(
        &mut self,
        params: SimulationParams,
    ) -> Result<&SimulationResult, ValidationError> {
        let label = format!("Scenario {}", self.run_count + 1);
        self.run_labelled(label, params)
    }

    /// Run a simulation and add a summary of it to the history.
    ///
    /// If the parameters are invalid, the error is returned and the previous result, parameters
    /// and history are left untouched.
    pub fn run_labelled(
        &mut self,
        label: String,
        params: SimulationParams,
    ) -> Result<&SimulationResult, ValidationError> {
        self.state = ScenarioState::Validating;
        if let Err(err) = params.validate() {
            warn!("Rejected parameters for {label}: {err}");
            self.state = ScenarioState::Error;
            return Err(err);
        }

        self.state = ScenarioState::Computing;
        debug!(
            "Simulating {label}: {} ({}) on {} hectares",
            params.crop_type, params.season, params.land_size
        );
        let result = compute(&params);
        debug!(
            "{label}: yield {}, profit {}, risk {}",
            result.expected_yield, result.profit, result.risk_level
        );

        self.history.push(ComparisonRecord::new(label, &result));
        self.run_count += 1;
        self.params = params;
        self.state = ScenarioState::Computed;

        Ok(&*self.result.insert(result))
    }

    /// The comparison history, oldest run first
    pub fn history(&self) -> &ComparisonHistory {
        &self.history
    }

    /// The parameters of the last successful run, or the defaults
    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The result of the last successful run
    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    /// The stage reached with the current scenario
    pub fn state(&self) -> ScenarioState {
        self.state
    }

    /// A balanced preset based on the current parameters
    pub fn optimize_parameters(&self) -> SimulationParams {
        self.params.balanced()
    }

    /// The default parameters for a new scenario
    pub fn reset_parameters() -> SimulationParams {
        SimulationParams::default()
    }

    /// Discard the current result and restore default parameters.
    ///
    /// The history is kept.
    pub fn reset(&mut self) {
        self.params = Self::reset_parameters();
        self.result = None;
        self.state = ScenarioState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::CropType;
    use crate::fixture::{default_params, stressed_params};
    use crate::history::HISTORY_CAPACITY;
    use crate::units::{Hectares, KilogramsPerHectare, MoneyPerHectare};
    use float_cmp::assert_approx_eq;
    use itertools::Itertools;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    /// Check the relationships which should hold for every result
    fn assert_invariants(result: &SimulationResult) {
        let sum: Money = result.cost_breakdown.iter().map(|(_, cost)| cost).sum();
        assert_eq!(result.total_cost, sum);
        assert_eq!(result.profit, result.revenue - result.total_cost);
        assert!(result.expected_yield >= Tonnes(0.0));
        assert!(result.environmental_impact >= Dimensionless(0.0));
        assert!(result.environmental_impact <= Dimensionless(100.0));
        assert_eq!(result.labour_cost_total, result.cost_breakdown.labour);
        assert!(!result.suggestions.is_empty());
    }

    #[rstest]
    fn test_run_simulation_defaults(default_params: SimulationParams) {
        let result = run_simulation(&default_params).unwrap();
        assert_invariants(&result);
        assert_eq!(result.expected_yield, Tonnes(7.0));
        assert_eq!(result.cost_breakdown.irrigation, Money(3000.0));
        assert_eq!(result.cost_breakdown.fertiliser, Money(2500.0));
        assert_eq!(result.total_cost, Money(75000.0));
        assert_eq!(result.revenue, Money(175000.0));
        assert_eq!(result.profit, Money(100000.0));
        assert_approx_eq!(
            Dimensionless,
            result.profit_margin,
            Dimensionless(100.0 * 100000.0 / 175000.0),
            epsilon = 1e-9
        );
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(result.water_usage, Litres(6000.0));
        assert_eq!(result.labour_hours, Hours(400.0));
        assert_eq!(result.labour_cost_total, Money(30000.0));
        assert_eq!(result.suggestions, [Suggestion::Balanced]);
    }

    #[rstest]
    fn test_run_simulation_stressed(stressed_params: SimulationParams) {
        let result = run_simulation(&stressed_params).unwrap();
        assert_invariants(&result);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert_eq!(
            result.suggestions,
            [
                Suggestion::ReduceIrrigation,
                Suggestion::ReduceFertiliser,
                Suggestion::ReducePesticides
            ]
        );
    }

    #[test]
    fn test_run_simulation_loss() {
        let params = SimulationParams {
            crop_type: CropType::Sugarcane,
            irrigation_frequency: 1,
            fertiliser_amount: KilogramsPerHectare(0.0),
            labour_cost: MoneyPerHectare(500_000.0),
            ..SimulationParams::default()
        };
        let result = run_simulation(&params).unwrap();
        assert_invariants(&result);
        assert!(result.profit < Money(0.0));
        assert!(result.profit_margin < Dimensionless(0.0));
    }

    #[test]
    fn test_run_simulation_invalid() {
        let params = SimulationParams {
            land_size: Hectares(0.0),
            ..SimulationParams::default()
        };
        assert_eq!(run_simulation(&params).unwrap_err().field, "land_size");
    }

    #[rstest]
    fn test_run_simulation_idempotent(stressed_params: SimulationParams) {
        assert_eq!(
            run_simulation(&stressed_params).unwrap(),
            run_simulation(&stressed_params).unwrap()
        );
    }

    #[test]
    fn test_invariants_at_boundaries() {
        let irrigation = [1, 7];
        let fertiliser = [0.0, 100.0];
        let pesticides = [0.0, 60.0];
        let land = [1e-3, 10.0];
        for (crop, irrigation, fertiliser, pesticides, land) in itertools::iproduct!(
            CropType::iter(),
            irrigation,
            fertiliser,
            pesticides,
            land
        ) {
            let params = SimulationParams {
                crop_type: crop,
                irrigation_frequency: irrigation,
                fertiliser_amount: KilogramsPerHectare(fertiliser),
                pesticides: KilogramsPerHectare(pesticides),
                land_size: Hectares(land),
                ..SimulationParams::default()
            };
            assert_invariants(&run_simulation(&params).unwrap());
        }
    }

    #[rstest]
    fn test_simulator_run(default_params: SimulationParams) {
        let mut simulator = Simulator::new();
        assert_eq!(simulator.state(), ScenarioState::Idle);

        let result = simulator.run_simulation(default_params).unwrap().clone();
        assert_eq!(simulator.state(), ScenarioState::Computed);
        assert_eq!(simulator.result(), Some(&result));

        let record = simulator.history().latest().unwrap();
        assert_eq!(record.label, "Scenario 1");
        assert_eq!(record.expected_yield, result.expected_yield);
        assert_eq!(record.profit, result.profit);
        assert_eq!(record.cost, result.total_cost);
    }

    #[rstest]
    fn test_simulator_matches_run_simulation(stressed_params: SimulationParams) {
        let mut simulator = Simulator::new();
        assert_eq!(
            simulator.run_simulation(stressed_params).unwrap(),
            &run_simulation(&stressed_params).unwrap()
        );
    }

    #[rstest]
    fn test_simulator_error_keeps_previous_result(
        default_params: SimulationParams,
        stressed_params: SimulationParams,
    ) {
        let mut simulator = Simulator::new();
        let previous = simulator.run_simulation(stressed_params).unwrap().clone();

        let invalid = SimulationParams {
            irrigation_frequency: 9,
            ..default_params
        };
        let err = simulator.run_simulation(invalid).unwrap_err();
        assert_eq!(err.field, "irrigation_frequency");
        assert_eq!(simulator.state(), ScenarioState::Error);
        assert_eq!(simulator.result(), Some(&previous));
        assert_eq!(simulator.params(), &stressed_params);
        assert_eq!(simulator.history().len(), 1);
    }

    #[rstest]
    fn test_simulator_history_capacity(default_params: SimulationParams) {
        let mut simulator = Simulator::new();
        for i in 1..=7 {
            let params = SimulationParams {
                land_size: Hectares(f64::from(i)),
                ..default_params
            };
            simulator.run_simulation(params).unwrap();
        }

        let history = simulator.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(
            history.iter().map(|r| r.label.as_str()).collect_vec(),
            [
                "Scenario 3",
                "Scenario 4",
                "Scenario 5",
                "Scenario 6",
                "Scenario 7"
            ]
        );
    }

    #[rstest]
    fn test_simulator_reset_keeps_history(stressed_params: SimulationParams) {
        let mut simulator = Simulator::new();
        simulator
            .run_labelled("Stressed".into(), stressed_params)
            .unwrap();

        simulator.reset();
        assert_eq!(simulator.state(), ScenarioState::Idle);
        assert!(simulator.result().is_none());
        assert_eq!(simulator.params(), &SimulationParams::default());
        assert_eq!(simulator.history().latest().unwrap().label, "Stressed");
    }

    #[rstest]
    fn test_simulator_with_history(default_params: SimulationParams) {
        let mut first = Simulator::new();
        first.run_simulation(default_params).unwrap();

        let mut second = Simulator::with_history(first.history().clone());
        second.run_labelled("Next".into(), default_params).unwrap();
        assert_eq!(second.history().len(), 2);
        assert_eq!(first.history().len(), 1);
    }

    #[rstest]
    fn test_optimize_parameters(stressed_params: SimulationParams) {
        let mut simulator = Simulator::new();
        simulator.run_simulation(stressed_params).unwrap();

        let optimized = simulator.optimize_parameters();
        assert_eq!(optimized, stressed_params.balanced());
        assert_eq!(
            run_simulation(&optimized).unwrap().suggestions,
            [Suggestion::Balanced]
        );
        assert_eq!(Simulator::reset_parameters(), SimulationParams::default());
    }
}
