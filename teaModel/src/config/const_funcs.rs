use crate::config::constants::*;
use crate::error::{TeaError, TeaResult};

/// Capital recovery factor: the annuity that repays one unit of capital over `lifetime` years.
///
/// A zero discount rate degenerates to straight-line amortisation, `1 / lifetime`.
pub fn calc_capital_recovery_factor(discount_rate: f64, lifetime: u32) -> TeaResult<f64> {
    if lifetime == 0 {
        return Err(TeaError::Configuration(
            "project lifetime must be at least one year".to_string(),
        ));
    }
    if !discount_rate.is_finite() || discount_rate < 0.0 {
        return Err(TeaError::domain(
            "discount_rate",
            discount_rate,
            "must be a finite, non-negative rate",
        ));
    }
    let crf = annuity_factor(discount_rate, lifetime);
    if !(crf.is_finite() && crf > 0.0) {
        return Err(TeaError::domain(
            "discount_rate",
            discount_rate,
            "gives no finite capital recovery factor for this lifetime",
        ));
    }
    Ok(crf)
}

/// Unchecked CRF for a non-negative rate and non-zero lifetime.
///
/// Written as `r / (1 - (1 + r)^-n)` through `ln_1p`/`exp_m1` so that tiny rates
/// and very long lifetimes neither cancel to 0/0 nor overflow.
pub(crate) fn annuity_factor(discount_rate: f64, lifetime: u32) -> f64 {
    if discount_rate == 0.0 {
        return 1.0 / lifetime as f64;
    }
    let discounted = -(-(lifetime as f64) * discount_rate.ln_1p()).exp_m1();
    discount_rate / discounted
}

/// Cost of `energy_mj` bought at a per-kWh price.
pub fn calc_energy_cost(energy_mj: f64, price_per_kwh: f64) -> f64 {
    energy_mj / MJ_PER_KWH * price_per_kwh
}

/// Continuous power (kW) needed to deliver `annual_mj` when running at `capacity_factor`.
pub fn calc_power_demand_kw(annual_mj: f64, capacity_factor: f64) -> f64 {
    annual_mj / MJ_PER_KWH / HOURS_PER_YEAR / capacity_factor
}

pub fn calc_percentage_of(amount: f64, percent: f64) -> f64 {
    amount * percent / PERCENT
}

/// Share of `part` in `whole` in percent; zero when the whole is zero.
pub fn calc_share_percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * PERCENT
    } else {
        0.0
    }
}

pub fn require_finite_non_negative(parameter: &str, value: f64) -> TeaResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TeaError::domain(parameter, value, "must be finite and non-negative"))
    }
}

pub fn require_positive(parameter: &str, value: f64) -> TeaResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TeaError::domain(parameter, value, "must be finite and strictly positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn crf_matches_published_value() {
        let crf = calc_capital_recovery_factor(0.08, 20).unwrap();
        assert!((crf - 0.10185).abs() < 1e-4);
    }

    #[test]
    fn crf_zero_rate_is_straight_line() {
        assert_eq!(calc_capital_recovery_factor(0.0, 20).unwrap(), 0.05);
        assert_eq!(calc_capital_recovery_factor(0.0, 1).unwrap(), 1.0);
    }

    #[test]
    fn crf_single_year_repays_principal_plus_interest() {
        let crf = calc_capital_recovery_factor(0.1, 1).unwrap();
        assert!((crf - 1.1).abs() < 1e-12);
    }

    #[rstest]
    #[case(1e-17, 20, 0.05)]
    #[case(1e-12, 10, 0.1)]
    #[case(0.08, 10_000, 0.08)]
    #[case(0.08, u32::MAX, 0.08)]
    fn crf_stays_finite_at_extreme_rates_and_lifetimes(
        #[case] rate: f64,
        #[case] lifetime: u32,
        #[case] expected: f64,
    ) {
        let crf = calc_capital_recovery_factor(rate, lifetime).unwrap();
        assert!(crf.is_finite());
        assert!((crf / expected - 1.0).abs() < 1e-9, "crf({rate}, {lifetime}) = {crf}");
    }

    #[test]
    fn crf_rejects_zero_lifetime() {
        let err = calc_capital_recovery_factor(0.08, 0).unwrap_err();
        assert!(err.is_configuration());
    }

    #[rstest]
    #[case(-0.01)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn crf_rejects_invalid_rates(#[case] rate: f64) {
        assert!(calc_capital_recovery_factor(rate, 20).unwrap_err().is_domain());
    }

    #[test]
    fn energy_cost_converts_mj_to_kwh() {
        // 36 MJ = 10 kWh
        assert!((calc_energy_cost(36.0, 0.05) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn power_demand_accounts_for_capacity_factor() {
        let annual_mj = MJ_PER_KWH * HOURS_PER_YEAR * 1000.0; // 1 MW all year
        assert!((calc_power_demand_kw(annual_mj, 1.0) - 1000.0).abs() < 1e-9);
        assert!((calc_power_demand_kw(annual_mj, 0.5) - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn share_of_zero_whole_is_zero() {
        assert_eq!(calc_share_percent(5.0, 0.0), 0.0);
        assert_eq!(calc_share_percent(5.0, 20.0), 25.0);
    }
}
