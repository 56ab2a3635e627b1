use serde::{Deserialize, Serialize};

use crate::config::const_funcs::{annuity_factor, calc_capital_recovery_factor, require_positive};
use crate::config::constants::*;
use crate::error::{RangeWarning, TeaError, TeaResult};

/// Serialized shape of the economic parameters; the CRF is never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EconomicInputs {
    pub discount_rate: f64,
    pub project_lifetime: u32,
    pub capacity_factor: f64,
    pub plant_capacity_tpy: f64,
}

/// Discount rate, lifetime, utilisation and nameplate size of one plant, plus the derived CRF.
///
/// Fields are private so the CRF can never drift from the rate and lifetime it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EconomicInputs", into = "EconomicInputs")]
pub struct EconomicParameters {
    discount_rate: f64,
    project_lifetime: u32,
    capacity_factor: f64,
    plant_capacity_tpy: f64,
    crf: f64,
}

impl EconomicParameters {
    pub fn new(
        discount_rate: f64,
        project_lifetime: u32,
        capacity_factor: f64,
        plant_capacity_tpy: f64,
    ) -> TeaResult<Self> {
        if !(0.0..1.0).contains(&discount_rate) {
            return Err(TeaError::domain(
                "discount_rate",
                discount_rate,
                "must lie in [0, 1)",
            ));
        }
        require_positive("capacity_factor", capacity_factor)?;
        require_positive("plant_capacity_tpy", plant_capacity_tpy)?;
        let crf = calc_capital_recovery_factor(discount_rate, project_lifetime)?;

        Ok(Self {
            discount_rate,
            project_lifetime,
            capacity_factor,
            plant_capacity_tpy,
            crf,
        })
    }

    pub fn discount_rate(&self) -> f64 {
        self.discount_rate
    }

    pub fn project_lifetime(&self) -> u32 {
        self.project_lifetime
    }

    pub fn capacity_factor(&self) -> f64 {
        self.capacity_factor
    }

    pub fn plant_capacity_tpy(&self) -> f64 {
        self.plant_capacity_tpy
    }

    pub fn crf(&self) -> f64 {
        self.crf
    }

    pub fn with_discount_rate(&self, discount_rate: f64) -> TeaResult<Self> {
        Self::new(discount_rate, self.project_lifetime, self.capacity_factor, self.plant_capacity_tpy)
    }

    pub fn with_project_lifetime(&self, project_lifetime: u32) -> TeaResult<Self> {
        Self::new(self.discount_rate, project_lifetime, self.capacity_factor, self.plant_capacity_tpy)
    }

    pub fn with_capacity_factor(&self, capacity_factor: f64) -> TeaResult<Self> {
        Self::new(self.discount_rate, self.project_lifetime, capacity_factor, self.plant_capacity_tpy)
    }

    pub fn with_plant_capacity(&self, plant_capacity_tpy: f64) -> TeaResult<Self> {
        Self::new(self.discount_rate, self.project_lifetime, self.capacity_factor, plant_capacity_tpy)
    }

    pub fn range_warnings(&self) -> Vec<RangeWarning> {
        [
            RangeWarning::check("discount_rate", self.discount_rate, DISCOUNT_RATE_RANGE),
            RangeWarning::check("project_lifetime", self.project_lifetime as f64, PROJECT_LIFETIME_RANGE),
            RangeWarning::check("capacity_factor", self.capacity_factor, CAPACITY_FACTOR_RANGE),
            RangeWarning::check("plant_capacity_tpy", self.plant_capacity_tpy, PLANT_CAPACITY_RANGE),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Default for EconomicParameters {
    fn default() -> Self {
        Self {
            discount_rate: DEFAULT_DISCOUNT_RATE,
            project_lifetime: DEFAULT_PROJECT_LIFETIME,
            capacity_factor: DEFAULT_CAPACITY_FACTOR,
            plant_capacity_tpy: DEFAULT_PLANT_CAPACITY_TPY,
            crf: annuity_factor(DEFAULT_DISCOUNT_RATE, DEFAULT_PROJECT_LIFETIME),
        }
    }
}

impl TryFrom<EconomicInputs> for EconomicParameters {
    type Error = TeaError;

    fn try_from(inputs: EconomicInputs) -> Result<Self, Self::Error> {
        Self::new(
            inputs.discount_rate,
            inputs.project_lifetime,
            inputs.capacity_factor,
            inputs.plant_capacity_tpy,
        )
    }
}

impl From<EconomicParameters> for EconomicInputs {
    fn from(params: EconomicParameters) -> Self {
        Self {
            discount_rate: params.discount_rate,
            project_lifetime: params.project_lifetime,
            capacity_factor: params.capacity_factor,
            plant_capacity_tpy: params.plant_capacity_tpy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_matches_validated_constructor() {
        let built = EconomicParameters::new(0.08, 20, 0.9, 100_000.0).unwrap();
        assert_eq!(built, EconomicParameters::default());
    }

    #[test]
    fn default_crf_is_bit_identical_to_recomputed_crf() {
        let default = EconomicParameters::default();
        let recomputed = calc_capital_recovery_factor(default.discount_rate(), default.project_lifetime()).unwrap();
        assert_eq!(default.crf().to_bits(), recomputed.to_bits());
    }

    #[test]
    fn tiny_discount_rate_keeps_levelized_cost_finite() {
        let economics = EconomicParameters::new(1e-17, 20, 0.9, 100_000.0).unwrap();
        assert!((economics.crf() - 0.05).abs() < 1e-12);

        let scenario = crate::config::scenario::Scenario::default().with_economics(economics);
        let results = crate::core::aggregator::evaluate(&scenario).unwrap();
        assert!(results.levelized_cost.is_finite() && results.levelized_cost > 0.0);
    }

    #[test]
    fn crf_follows_rate_and_lifetime_changes() {
        let base = EconomicParameters::default();
        let zero_rate = base.with_discount_rate(0.0).unwrap();
        assert_eq!(zero_rate.crf(), 0.05);

        let longer = zero_rate.with_project_lifetime(40).unwrap();
        assert_eq!(longer.crf(), 0.025);
        // the original value is untouched
        assert!((base.crf() - 0.10185).abs() < 1e-4);
    }

    #[rstest]
    #[case(-0.01, 20, 0.9, 1e5)]
    #[case(1.0, 20, 0.9, 1e5)]
    #[case(0.08, 20, 0.0, 1e5)]
    #[case(0.08, 20, 0.9, 0.0)]
    #[case(0.08, 20, f64::NAN, 1e5)]
    fn rejects_values_outside_domain(
        #[case] rate: f64,
        #[case] lifetime: u32,
        #[case] cf: f64,
        #[case] capacity: f64,
    ) {
        let err = EconomicParameters::new(rate, lifetime, cf, capacity).unwrap_err();
        assert!(err.is_domain(), "unexpected error: {}", err);
    }

    #[test]
    fn zero_lifetime_is_a_configuration_error() {
        let err = EconomicParameters::new(0.08, 0, 0.9, 1e5).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn capacity_factor_above_one_only_warns() {
        let params = EconomicParameters::new(0.08, 20, 1.1, 1e5).unwrap();
        let warnings = params.range_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].parameter, "capacity_factor");
        assert!(EconomicParameters::default().range_warnings().is_empty());
    }

    #[test]
    fn deserialization_recomputes_crf() {
        let json = r#"{"discount_rate":0.0,"project_lifetime":10,"capacity_factor":0.9,"plant_capacity_tpy":5000.0}"#;
        let params: EconomicParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.crf(), 0.1);

        let bad = r#"{"discount_rate":0.08,"project_lifetime":0,"capacity_factor":0.9,"plant_capacity_tpy":5000.0}"#;
        assert!(serde_json::from_str::<EconomicParameters>(bad).is_err());
    }
}
