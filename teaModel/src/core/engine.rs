use crate::analysis::results::Results;
use crate::config::economic::EconomicParameters;
use crate::config::scenario::Scenario;
use crate::config::stage_specs::{CaptureSpec, ConversionSpec, DistributionSpec, SynthesisSpec};
use crate::core::aggregator::evaluate_scenario;
use crate::core::breakeven::{breakeven, BreakevenAnalysis};
use crate::core::sweep::{sweep, SweepParameter, SweepRow};
use crate::error::{TeaError, TeaResult};

/// Stateful front end for callers that fill in parameter groups one at a time.
///
/// Each setter validates its group on the way in and discards any previous results, so
/// `results()` never describes parameters that are no longer current. The calculation
/// itself always runs on an immutable [`Scenario`] assembled from the stored groups.
#[derive(Debug, Clone, Default)]
pub struct TeaModel {
    economics: Option<EconomicParameters>,
    capture: Option<CaptureSpec>,
    conversion: Option<ConversionSpec>,
    synthesis: Option<SynthesisSpec>,
    distribution: Option<DistributionSpec>,
    results: Option<Results>,
}

impl TeaModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// A model with every parameter group taken from `scenario`.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self {
            economics: Some(*scenario.economics()),
            capture: Some(scenario.capture().clone()),
            conversion: Some(scenario.conversion().clone()),
            synthesis: Some(scenario.synthesis().clone()),
            distribution: Some(scenario.distribution().clone()),
            results: None,
        }
    }

    pub fn set_economic_parameters(
        &mut self,
        discount_rate: f64,
        project_lifetime: u32,
        capacity_factor: f64,
        plant_capacity_tpy: f64,
    ) -> TeaResult<()> {
        let economics = EconomicParameters::new(discount_rate, project_lifetime, capacity_factor, plant_capacity_tpy)?;
        tracing::debug!(crf = economics.crf(), "economic parameters set");
        self.economics = Some(economics);
        self.results = None;
        Ok(())
    }

    pub fn set_capture_costs(&mut self, spec: CaptureSpec) -> TeaResult<()> {
        spec.validate()?;
        self.capture = Some(spec);
        self.results = None;
        Ok(())
    }

    pub fn set_conversion_costs(&mut self, spec: ConversionSpec) -> TeaResult<()> {
        spec.validate()?;
        self.conversion = Some(spec);
        self.results = None;
        Ok(())
    }

    pub fn set_synthesis_costs(&mut self, spec: SynthesisSpec) -> TeaResult<()> {
        spec.validate()?;
        self.synthesis = Some(spec);
        self.results = None;
        Ok(())
    }

    pub fn set_distribution_costs(&mut self, spec: DistributionSpec) -> TeaResult<()> {
        spec.validate()?;
        self.distribution = Some(spec);
        self.results = None;
        Ok(())
    }

    /// Assemble the current groups into a scenario, naming every group still missing.
    pub fn scenario(&self) -> TeaResult<Scenario> {
        let missing: Vec<&str> = [
            ("economics", self.economics.is_none()),
            ("capture", self.capture.is_none()),
            ("conversion", self.conversion.is_none()),
            ("synthesis", self.synthesis.is_none()),
            ("distribution", self.distribution.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        match (&self.economics, &self.capture, &self.conversion, &self.synthesis, &self.distribution) {
            (Some(economics), Some(capture), Some(conversion), Some(synthesis), Some(distribution)) => {
                Scenario::new(
                    *economics,
                    capture.clone(),
                    conversion.clone(),
                    synthesis.clone(),
                    distribution.clone(),
                )
            }
            _ => Err(TeaError::missing(&missing)),
        }
    }

    pub fn evaluate(&mut self, silent: bool) -> TeaResult<&Results> {
        let scenario = self.scenario()?;
        let results = evaluate_scenario(&scenario, silent)?;
        Ok(self.results.insert(results))
    }

    /// Results of the last successful evaluation, if they are still current.
    pub fn results(&self) -> Option<&Results> {
        self.results.as_ref()
    }

    /// Sweep one parameter over `values`. The stored groups are never touched; afterwards the
    /// base scenario is evaluated once more so `results()` describes the unperturbed inputs.
    pub fn sweep_parameter(&mut self, parameter: SweepParameter, values: &[f64]) -> TeaResult<Vec<SweepRow>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }
        let scenario = self.scenario()?;
        let rows = sweep(&scenario, parameter, values);
        self.results = Some(evaluate_scenario(&scenario, true)?);
        rows
    }

    /// Compare against a reference fuel price, evaluating silently first if nothing is current.
    pub fn breakeven(&mut self, reference_price: f64) -> TeaResult<BreakevenAnalysis> {
        let levelized_cost = match &self.results {
            Some(results) => results.levelized_cost,
            None => self.evaluate(true)?.levelized_cost,
        };
        breakeven(levelized_cost, reference_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TeaModel {
        TeaModel::from_scenario(&Scenario::default())
    }

    #[test]
    fn missing_groups_are_listed_in_the_error() {
        let mut model = TeaModel::new();
        model.set_economic_parameters(0.08, 20, 0.9, 100_000.0).unwrap();
        model.set_capture_costs(CaptureSpec::default()).unwrap();

        let err = model.evaluate(true).unwrap_err();
        assert!(err.is_configuration());
        let message = err.to_string();
        for group in ["conversion", "synthesis", "distribution"] {
            assert!(message.contains(group), "{message}");
        }
        assert!(!message.contains("capture"));
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let mut model = configured();
        let first = model.evaluate(true).unwrap().clone();
        let second = model.evaluate(false).unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn sweep_leaves_parameters_and_results_as_before() {
        let mut model = configured();
        let before = model.evaluate(true).unwrap().clone();
        let scenario_before = model.scenario().unwrap();

        let rows = model
            .sweep_parameter(SweepParameter::ElectricityPrice, &[0.02, 0.2])
            .unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(model.scenario().unwrap(), scenario_before);
        assert_eq!(model.results(), Some(&before));
        assert_eq!(model.evaluate(true).unwrap(), &before);
    }

    #[test]
    fn failed_sweep_still_leaves_base_intact() {
        let mut model = configured();
        let before = model.evaluate(true).unwrap().clone();
        let err = model
            .sweep_parameter(SweepParameter::CapacityFactor, &[0.8, 0.0])
            .unwrap_err();
        assert!(err.is_domain());
        assert_eq!(model.results(), Some(&before));
    }

    #[test]
    fn empty_sweep_does_not_evaluate() {
        let mut model = configured();
        let rows = model.sweep_parameter(SweepParameter::PlantCapacity, &[]).unwrap();
        assert!(rows.is_empty());
        assert!(model.results().is_none());
    }

    #[test]
    fn breakeven_evaluates_on_demand() {
        let mut model = configured();
        let analysis = model.breakeven(1.0).unwrap();
        assert!(model.results().is_some());
        assert!((analysis.cost_per_volume - 7.4314639405149165).abs() < 1e-9);
    }

    #[test]
    fn setters_discard_stale_results() {
        let mut model = configured();
        model.evaluate(true).unwrap();
        model
            .set_distribution_costs(DistributionSpec { transport_distance_km: 100.0, ..DistributionSpec::default() })
            .unwrap();
        assert!(model.results().is_none());
    }

    #[test]
    fn invalid_group_is_rejected_and_previous_kept() {
        let mut model = configured();
        let err = model
            .set_synthesis_costs(SynthesisSpec { catalyst_lifetime_years: 0.0, ..SynthesisSpec::default() })
            .unwrap_err();
        assert!(err.is_domain());
        assert_eq!(model.scenario().unwrap(), Scenario::default());
    }
}
