//! crates/footprint_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use crate::ports::PortError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

//=========================================================================================
// Activity Inputs
//=========================================================================================

/// The household activity figures collected by the calculator form.
///
/// Decimal fields are monthly readings (currency units, distance units);
/// flight counts are totals for the period.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivityInput {
    pub electricity_bill: f64,
    pub lpg_cylinders: u32,
    pub car_distance: f64,
    pub domestic_flights: u32,
    pub international_flights: u32,
}

impl ActivityInput {
    /// Builds an input from raw text fields, the way the browser form delivers them.
    ///
    /// Never fails: a missing, non-numeric or negative value becomes zero, and decimals
    /// are capped at [`MAX_DECIMAL_INPUT`]. Decimal fields read the numeric prefix
    /// (`"12.5kWh"` is `12.5`), count fields read the leading integer part (`"2.7"` is `2`).
    pub fn from_raw(
        electricity_bill: Option<&str>,
        lpg_cylinders: Option<&str>,
        car_distance: Option<&str>,
        domestic_flights: Option<&str>,
        international_flights: Option<&str>,
    ) -> Self {
        Self {
            electricity_bill: coerce_decimal(electricity_bill),
            lpg_cylinders: coerce_count(lpg_cylinders),
            car_distance: coerce_decimal(car_distance),
            domestic_flights: coerce_count(domestic_flights),
            international_flights: coerce_count(international_flights),
        }
    }
}

/// Largest accepted monthly bill or distance. Keeps every estimate finite.
pub const MAX_DECIMAL_INPUT: f64 = 1e12;

/// Reads the numeric prefix of `raw` as a non-negative number, capped at
/// [`MAX_DECIMAL_INPUT`]. Anything without a leading number is zero.
pub fn coerce_decimal(raw: Option<&str>) -> f64 {
    let Some(text) = raw.map(str::trim_start) else {
        return 0.0;
    };

    match text[..numeric_prefix_len(text)].parse::<f64>() {
        Ok(value) if value > 0.0 => value.min(MAX_DECIMAL_INPUT),
        _ => 0.0,
    }
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` run of `text`, in one pass.
/// Zero when no digit appears before the exponent.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        start
            + bytes[start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut digit_count = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        digit_count += frac_end - (end + 1);
        if digit_count > 0 {
            end = frac_end;
        }
    }
    if digit_count == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = digits_from(end + 1 + sign);
        if exp_end > end + 1 + sign {
            end = exp_end;
        }
    }
    end
}

/// Reads the leading integer of `raw`; negative or unparseable values become zero.
pub fn coerce_count(raw: Option<&str>) -> u32 {
    let Some(text) = raw.map(str::trim_start) else {
        return 0;
    };

    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let digits: String = unsigned.chars().take_while(char::is_ascii_digit).collect();

    if negative || digits.is_empty() {
        return 0;
    }
    // Anything too large for a u32 is clamped rather than discarded.
    digits.parse::<u32>().unwrap_or(u32::MAX)
}

//=========================================================================================
// Emission Categories and Breakdown
//=========================================================================================

/// The emission categories, declared in their fixed reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Electricity,
    Lpg,
    Car,
    DomesticFlights,
    InternationalFlights,
}

impl Category {
    /// Every category in enumeration order. Tie-breaking relies on this order.
    pub const ALL: [Category; 5] = [
        Category::Electricity,
        Category::Lpg,
        Category::Car,
        Category::DomesticFlights,
        Category::InternationalFlights,
    ];

    /// The stable machine key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Category::Electricity => "electricity",
            Category::Lpg => "lpg",
            Category::Car => "car",
            Category::DomesticFlights => "domesticFlights",
            Category::InternationalFlights => "internationalFlights",
        }
    }

    /// The human-readable label shown next to chart segments and tips.
    pub fn label(self) -> &'static str {
        match self {
            Category::Electricity => "Electricity",
            Category::Lpg => "LPG",
            Category::Car => "Car",
            Category::DomesticFlights => "Domestic Flights",
            Category::InternationalFlights => "International Flights",
        }
    }
}

/// Annual emissions per category in tonnes of CO2e.
///
/// Only the estimator constructs this, so `total_footprint` is always the exact,
/// unrounded sum of the five category values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionBreakdown {
    pub(crate) electricity: f64,
    pub(crate) lpg: f64,
    pub(crate) car: f64,
    pub(crate) domestic_flights: f64,
    pub(crate) international_flights: f64,
    pub(crate) total_footprint: f64,
}

impl EmissionBreakdown {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Electricity => self.electricity,
            Category::Lpg => self.lpg,
            Category::Car => self.car,
            Category::DomesticFlights => self.domestic_flights,
            Category::InternationalFlights => self.international_flights,
        }
    }

    pub fn total_footprint(&self) -> f64 {
        self.total_footprint
    }

    /// Iterates over `(category, tonnes)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Pairs the breakdown's total with the raw inputs, ready to be saved.
    pub fn to_new_footprint(&self, input: ActivityInput) -> NewFootprint {
        NewFootprint {
            input,
            total_footprint: self.total_footprint,
        }
    }
}

//=========================================================================================
// Ledger Records
//=========================================================================================

/// A calculation submitted for persistence: raw inputs plus the computed total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewFootprint {
    pub input: ActivityInput,
    pub total_footprint: f64,
}

impl NewFootprint {
    /// Schema check applied by every ledger before a write.
    pub fn validate(&self) -> Result<(), PortError> {
        let inputs = [
            ("electricityBill", self.input.electricity_bill),
            ("carDistance", self.input.car_distance),
        ];
        for (name, value) in inputs {
            if !(0.0..=MAX_DECIMAL_INPUT).contains(&value) {
                return Err(PortError::Invalid(format!(
                    "{} must be between 0 and {}, got {}",
                    name, MAX_DECIMAL_INPUT, value
                )));
            }
        }
        if !self.total_footprint.is_finite() || self.total_footprint < 0.0 {
            return Err(PortError::Invalid(format!(
                "totalFootprint must be a non-negative number, got {}",
                self.total_footprint
            )));
        }
        Ok(())
    }
}

/// A persisted footprint calculation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintRecord {
    pub id: Uuid,
    pub input: ActivityInput,
    pub total_footprint: f64,
    pub created_at: DateTime<Utc>,
}
