//! Heat-pump efficiency math and the heating cost comparison.

use serde::{Deserialize, Serialize};

/// Coefficient of performance: heat output over electrical input.
///
/// Returns exactly `0.0` for a non-positive electrical input.
#[must_use]
pub fn cop(heat_output_kwh: f64, electrical_input_kwh: f64) -> f64 {
    if electrical_input_kwh > 0.0 {
        heat_output_kwh / electrical_input_kwh
    } else {
        0.0
    }
}

/// Energy efficiency ratio: cooling output (BTU/h) over electrical input
/// (Wh).
///
/// Returns exactly `0.0` for a non-positive electrical input.
#[must_use]
pub fn eer(cooling_output_btu: f64, electrical_input_wh: f64) -> f64 {
    if electrical_input_wh > 0.0 {
        cooling_output_btu / electrical_input_wh
    } else {
        0.0
    }
}

/// Which heating system the comparison recommends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatingRecommendation {
    HeatPump,
    Gas,
}

/// Cost comparison between heat-pump and gas heating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatingComparison {
    pub electricity_cost: f64,
    pub gas_cost: f64,
    pub cop: f64,
    pub heat_pump_cost_per_kwh: f64,
    pub gas_cost_per_kwh: f64,
    pub savings_percentage: f64,
    pub recommended: HeatingRecommendation,
}

impl HeatingComparison {
    /// Compare heat-pump heating (electricity divided by COP) against gas,
    /// which is assumed to already be priced per kWh of heat.
    #[must_use]
    pub fn calculate(electricity_cost: f64, gas_cost: f64, cop: f64) -> Self {
        let heat_pump_cost_per_kwh = if cop > 0.0 { electricity_cost / cop } else { 0.0 };
        let gas_cost_per_kwh = gas_cost;

        let savings_percentage = if gas_cost_per_kwh > 0.0 {
            (gas_cost_per_kwh - heat_pump_cost_per_kwh) / gas_cost_per_kwh * 100.0
        } else {
            0.0
        };

        let recommended = if heat_pump_cost_per_kwh < gas_cost_per_kwh {
            HeatingRecommendation::HeatPump
        } else {
            HeatingRecommendation::Gas
        };

        Self {
            electricity_cost,
            gas_cost,
            cop,
            heat_pump_cost_per_kwh,
            gas_cost_per_kwh,
            savings_percentage,
            recommended,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_zero_cop_for_zero_input() {
        assert_eq!(cop(10.0, 0.0), 0.0);
    }

    #[test]
    fn should_return_zero_cop_for_negative_input() {
        assert_eq!(cop(10.0, -1.0), 0.0);
    }

    #[test]
    fn should_divide_exactly_for_positive_cop_input() {
        assert_eq!(cop(10.5, 3.0), 3.5);
    }

    #[test]
    fn should_return_zero_eer_for_non_positive_input() {
        assert_eq!(eer(12000.0, 0.0), 0.0);
        assert_eq!(eer(12000.0, -5.0), 0.0);
    }

    #[test]
    fn should_divide_exactly_for_positive_eer_input() {
        assert_eq!(eer(12000.0, 1000.0), 12.0);
    }

    #[test]
    fn should_recommend_heat_pump_when_strictly_cheaper() {
        let comparison = HeatingComparison::calculate(0.30, 0.12, 3.5);
        assert!(comparison.heat_pump_cost_per_kwh < comparison.gas_cost_per_kwh);
        assert_eq!(comparison.recommended, HeatingRecommendation::HeatPump);
        assert!(comparison.savings_percentage > 0.0);
    }

    #[test]
    fn should_recommend_gas_when_heat_pump_not_cheaper() {
        let comparison = HeatingComparison::calculate(0.70, 0.10, 3.5);
        assert_eq!(comparison.recommended, HeatingRecommendation::Gas);
    }

    #[test]
    fn should_handle_zero_cop_without_dividing() {
        let comparison = HeatingComparison::calculate(0.30, 0.10, 0.0);
        assert_eq!(comparison.heat_pump_cost_per_kwh, 0.0);
        // Zero heat-pump cost beats any positive gas cost.
        assert_eq!(comparison.recommended, HeatingRecommendation::HeatPump);
    }

    #[test]
    fn should_report_zero_savings_for_zero_gas_cost() {
        let comparison = HeatingComparison::calculate(0.30, 0.0, 3.5);
        assert_eq!(comparison.savings_percentage, 0.0);
    }
}
