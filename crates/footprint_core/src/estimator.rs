//! crates/footprint_core/src/estimator.rs
//!
//! The emissions estimator: a pure weighted sum over the household activity
//! inputs, plus the advice derived from its result.

use crate::domain::{ActivityInput, Category, EmissionBreakdown};

//=========================================================================================
// Fixed Assumptions and Emission Factors
//=========================================================================================

/// Currency units per kWh, used to turn a bill into consumption.
pub const ELECTRICITY_PRICE_PER_UNIT: f64 = 7.5;
/// Kilograms of LPG in one cylinder.
pub const LPG_CYLINDER_WEIGHT_KG: f64 = 14.2;
pub const DOMESTIC_FLIGHT_DISTANCE: f64 = 1100.0;
pub const INTERNATIONAL_FLIGHT_DISTANCE: f64 = 6000.0;

/// kg CO2e per kWh.
pub const ELECTRICITY_FACTOR: f64 = 0.71;
/// kg CO2e per kg of LPG.
pub const LPG_FACTOR: f64 = 2.983;
/// kg CO2e per distance unit driven.
pub const CAR_FACTOR: f64 = 0.17;
/// kg CO2e per distance unit flown, short haul.
pub const DOMESTIC_FLIGHT_FACTOR: f64 = 0.133;
/// kg CO2e per distance unit flown, long haul.
pub const INTERNATIONAL_FLIGHT_FACTOR: f64 = 0.102;

/// National per-capita average in tonnes CO2e per year.
pub const NATIONAL_AVERAGE_TONNES: f64 = 1.9;

const MONTHS_PER_YEAR: f64 = 12.0;
const KG_PER_TONNE: f64 = 1000.0;

//=========================================================================================
// Estimation
//=========================================================================================

/// Estimates the annual footprint, in tonnes CO2e, for the given activity.
///
/// Electricity and car readings are monthly and get annualised; flight counts are
/// already period totals and are used as-is.
pub fn estimate(input: &ActivityInput) -> EmissionBreakdown {
    let electricity_kwh = input.electricity_bill / ELECTRICITY_PRICE_PER_UNIT;

    let electricity = electricity_kwh * ELECTRICITY_FACTOR * MONTHS_PER_YEAR / KG_PER_TONNE;
    let lpg = f64::from(input.lpg_cylinders) * LPG_CYLINDER_WEIGHT_KG * LPG_FACTOR / KG_PER_TONNE;
    let car = input.car_distance * CAR_FACTOR * MONTHS_PER_YEAR / KG_PER_TONNE;
    let domestic_flights = f64::from(input.domestic_flights)
        * DOMESTIC_FLIGHT_DISTANCE
        * DOMESTIC_FLIGHT_FACTOR
        / KG_PER_TONNE;
    let international_flights = f64::from(input.international_flights)
        * INTERNATIONAL_FLIGHT_DISTANCE
        * INTERNATIONAL_FLIGHT_FACTOR
        / KG_PER_TONNE;

    EmissionBreakdown {
        electricity,
        lpg,
        car,
        domestic_flights,
        international_flights,
        total_footprint: electricity + lpg + car + domestic_flights + international_flights,
    }
}

//=========================================================================================
// Tips
//=========================================================================================

/// Advice that applies regardless of the breakdown.
pub const GENERAL_TIP: &str =
    "Adopting a more plant-based diet and reducing food waste can significantly cut your carbon footprint.";

/// Personalised advice for one breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tips {
    pub top_category: Category,
    pub headline: String,
    pub general: &'static str,
}

fn category_tip(category: Category) -> &'static str {
    match category {
        Category::Electricity => {
            "Switch to energy-efficient (5-star rated) appliances and use LED bulbs to save electricity."
        }
        Category::Lpg => {
            "Use a pressure cooker to cook faster and save gas. Explore options like induction stoves."
        }
        Category::Car => {
            "Consider using public transport or carpooling. Service your vehicle regularly for better mileage."
        }
        Category::DomesticFlights => {
            "For shorter inter-city trips, trains are a much greener and more economical alternative to flights in India."
        }
        Category::InternationalFlights => {
            "Choose direct flights to reduce emissions from takeoff and landing, and always pack light."
        }
    }
}

/// Returns the category with the strictly largest value; on a tie the category
/// that comes first in [`Category::ALL`] wins.
pub fn top_category(breakdown: &EmissionBreakdown) -> Category {
    breakdown
        .iter()
        .fold(None, |best: Option<(Category, f64)>, (category, value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((category, value)),
        })
        .map(|(category, _)| category)
        .unwrap_or(Category::Electricity)
}

/// Picks the advice for the biggest contributor in `breakdown`.
pub fn select_tips(breakdown: &EmissionBreakdown) -> Tips {
    let top = top_category(breakdown);
    Tips {
        top_category: top,
        headline: format!(
            "Your highest impact is from {}. {}",
            top.label(),
            category_tip(top)
        ),
        general: GENERAL_TIP,
    }
}

//=========================================================================================
// National Average Comparison
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    BelowAverage,
    AboveAverage,
}

impl Comparison {
    pub fn message(self) -> &'static str {
        match self {
            Comparison::BelowAverage => "You're below the national average. Great job!",
            Comparison::AboveAverage => {
                "You're above the national average. Let's see how we can improve."
            }
        }
    }
}

/// Compares an annual total against [`NATIONAL_AVERAGE_TONNES`]. Equal counts as above.
pub fn compare_to_national_average(total_footprint: f64) -> Comparison {
    if total_footprint < NATIONAL_AVERAGE_TONNES {
        Comparison::BelowAverage
    } else {
        Comparison::AboveAverage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn sample_input() -> ActivityInput {
        ActivityInput {
            electricity_bill: 1500.0,
            lpg_cylinders: 2,
            car_distance: 500.0,
            domestic_flights: 1,
            international_flights: 0,
        }
    }

    fn breakdown_with(values: [f64; 5]) -> EmissionBreakdown {
        EmissionBreakdown {
            electricity: values[0],
            lpg: values[1],
            car: values[2],
            domestic_flights: values[3],
            international_flights: values[4],
            total_footprint: values.iter().sum(),
        }
    }

    #[test]
    fn worked_example_matches_reference_figures() {
        let breakdown = estimate(&sample_input());

        assert!((breakdown.get(Category::Electricity) - 1.704).abs() < EPSILON);
        assert!((breakdown.get(Category::Lpg) - 0.0847172).abs() < EPSILON);
        assert!((breakdown.get(Category::Car) - 1.02).abs() < EPSILON);
        assert!((breakdown.get(Category::DomesticFlights) - 0.1463).abs() < EPSILON);
        assert_eq!(breakdown.get(Category::InternationalFlights), 0.0);
        assert!((breakdown.total_footprint() - 2.9550172).abs() < EPSILON);
    }

    #[test]
    fn total_is_exact_sum_of_categories() {
        let inputs = [
            sample_input(),
            ActivityInput {
                electricity_bill: 333.33,
                lpg_cylinders: 7,
                car_distance: 1234.5,
                domestic_flights: 3,
                international_flights: 2,
            },
            ActivityInput {
                electricity_bill: 0.1,
                international_flights: 11,
                ..ActivityInput::default()
            },
        ];

        for input in inputs {
            let breakdown = estimate(&input);
            let sum: f64 = breakdown.iter().map(|(_, value)| value).sum();
            assert_eq!(breakdown.total_footprint(), sum);
        }
    }

    #[test]
    fn zero_input_yields_zero_total() {
        let breakdown = estimate(&ActivityInput::default());
        assert_eq!(breakdown.total_footprint(), 0.0);
        assert!(breakdown.iter().all(|(_, value)| value == 0.0));
    }

    #[test]
    fn estimate_is_deterministic() {
        let input = sample_input();
        assert_eq!(estimate(&input), estimate(&input));
    }

    #[test]
    fn huge_coerced_inputs_stay_finite() {
        let input = ActivityInput::from_raw(
            Some("1.7e308"),
            Some("99999999999"),
            Some("1.7e308"),
            Some("99999999999"),
            Some("99999999999"),
        );
        let breakdown = estimate(&input);

        assert!(breakdown.total_footprint().is_finite());
        assert!(breakdown.to_new_footprint(input).validate().is_ok());
    }

    #[test]
    fn international_flight_uses_long_haul_distance() {
        let breakdown = estimate(&ActivityInput {
            international_flights: 1,
            ..ActivityInput::default()
        });
        assert!((breakdown.get(Category::InternationalFlights) - 0.612).abs() < EPSILON);
    }

    #[test]
    fn to_new_footprint_keeps_raw_inputs() {
        let input = sample_input();
        let breakdown = estimate(&input);
        let footprint = breakdown.to_new_footprint(input);
        assert_eq!(footprint.input, input);
        assert_eq!(footprint.total_footprint, breakdown.total_footprint());
    }

    #[test]
    fn tips_target_largest_category() {
        let tips = select_tips(&estimate(&sample_input()));
        assert_eq!(tips.top_category, Category::Electricity);
        assert!(tips.headline.starts_with("Your highest impact is from Electricity."));
        assert!(tips.headline.contains("LED bulbs"));
        assert_eq!(tips.general, GENERAL_TIP);

        let tips = select_tips(&breakdown_with([0.1, 0.2, 0.3, 0.4, 2.0]));
        assert_eq!(tips.top_category, Category::InternationalFlights);
        assert!(tips.headline.contains("pack light"));
    }

    #[test]
    fn tie_goes_to_first_category_in_order() {
        let breakdown = breakdown_with([0.5, 1.0, 1.0, 0.2, 1.0]);
        assert_eq!(top_category(&breakdown), Category::Lpg);

        let breakdown = breakdown_with([0.0, 0.0, 0.0, 0.7, 0.7]);
        assert_eq!(top_category(&breakdown), Category::DomesticFlights);
    }

    #[test]
    fn all_zero_breakdown_reports_electricity() {
        assert_eq!(
            top_category(&estimate(&ActivityInput::default())),
            Category::Electricity
        );
    }

    #[test]
    fn national_average_comparison() {
        assert_eq!(compare_to_national_average(1.2), Comparison::BelowAverage);
        assert_eq!(compare_to_national_average(1.9), Comparison::AboveAverage);
        assert_eq!(compare_to_national_average(2.955), Comparison::AboveAverage);
        assert!(Comparison::BelowAverage.message().contains("Great job"));
    }
}
