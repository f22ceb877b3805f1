//! crates/footprint_core/src/form.rs
//!
//! The multi-step calculator form as an explicit state object. A front end owns one
//! `CalculatorForm`, feeds it raw field text, and asks it to move between steps.

use crate::domain::ActivityInput;
use std::collections::HashMap;

/// A required field was left blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Required fields are missing: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// The input fields of the form, keyed by their wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ElectricityBill,
    LpgCylinders,
    CarDistance,
    DomesticFlights,
    InternationalFlights,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::ElectricityBill => "electricityBill",
            Field::LpgCylinders => "lpgCylinders",
            Field::CarDistance => "carDistance",
            Field::DomesticFlights => "domesticFlights",
            Field::InternationalFlights => "internationalFlights",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Electricity,
    Cooking,
    Transport,
    Flights,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Electricity, Step::Cooking, Step::Transport, Step::Flights];

    /// The required fields shown on this step.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::Electricity => &[Field::ElectricityBill],
            Step::Cooking => &[Field::LpgCylinders],
            Step::Transport => &[Field::CarDistance],
            Step::Flights => &[Field::DomesticFlights, Field::InternationalFlights],
        }
    }
}

/// Form state: the raw text of each field and the step currently shown.
#[derive(Debug, Clone, Default)]
pub struct CalculatorForm {
    values: HashMap<Field, String>,
    current: usize,
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Step {
        Step::ALL[self.current]
    }

    pub fn step_index(&self) -> usize {
        self.current
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn field(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Checks that every required field on the current step holds non-blank text.
    pub fn validate_step(&self) -> Result<(), ValidationError> {
        self.check_fields(self.current_step().fields().iter().copied())
    }

    /// Checks every required field of every step, in step order.
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        self.check_fields(Step::ALL.iter().flat_map(|step| step.fields().iter().copied()))
    }

    fn check_fields(&self, fields: impl Iterator<Item = Field>) -> Result<(), ValidationError> {
        let missing: Vec<&'static str> = fields
            .filter(|field| self.field(*field).map_or(true, |v| v.trim().is_empty()))
            .map(Field::name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// Moves to the next step if the current one validates. Stays put on the last step.
    pub fn next_step(&mut self) -> Result<Step, ValidationError> {
        self.validate_step()?;
        if self.current + 1 < Step::ALL.len() {
            self.current += 1;
        }
        Ok(self.current_step())
    }

    /// Moves back one step without validating. Stays put on the first step.
    pub fn prev_step(&mut self) -> Step {
        self.current = self.current.saturating_sub(1);
        self.current_step()
    }

    /// Width of the progress bar, in percent.
    pub fn progress_percent(&self) -> f64 {
        (self.current + 1) as f64 / Step::ALL.len() as f64 * 100.0
    }

    /// Revalidates every step, since an earlier field may have been blanked after its
    /// step passed, then coerces every field into an input.
    pub fn submit(&self) -> Result<ActivityInput, ValidationError> {
        self.validate_all()?;
        Ok(ActivityInput::from_raw(
            self.field(Field::ElectricityBill),
            self.field(Field::LpgCylinders),
            self.field(Field::CarDistance),
            self.field(Field::DomesticFlights),
            self.field(Field::InternationalFlights),
        ))
    }

    /// Clears every field and returns to the first step.
    pub fn reset(&mut self) {
        self.values.clear();
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> CalculatorForm {
        let mut form = CalculatorForm::new();
        form.set_field(Field::ElectricityBill, "1500");
        form.set_field(Field::LpgCylinders, "2");
        form.set_field(Field::CarDistance, "500");
        form.set_field(Field::DomesticFlights, "1");
        form.set_field(Field::InternationalFlights, "0");
        form
    }

    #[test]
    fn blank_field_blocks_next() {
        let mut form = CalculatorForm::new();
        form.set_field(Field::ElectricityBill, "   ");

        let err = form.next_step().unwrap_err();
        assert_eq!(err.missing, vec!["electricityBill"]);
        assert_eq!(form.current_step(), Step::Electricity);
    }

    #[test]
    fn walks_forward_and_back() {
        let mut form = filled_form();
        assert_eq!(form.progress_percent(), 25.0);

        assert_eq!(form.next_step().unwrap(), Step::Cooking);
        assert_eq!(form.next_step().unwrap(), Step::Transport);
        assert_eq!(form.next_step().unwrap(), Step::Flights);
        assert_eq!(form.next_step().unwrap(), Step::Flights);
        assert_eq!(form.progress_percent(), 100.0);

        assert_eq!(form.prev_step(), Step::Transport);
        form.prev_step();
        form.prev_step();
        assert_eq!(form.prev_step(), Step::Electricity);
        assert_eq!(form.step_index(), 0);
    }

    #[test]
    fn submit_reports_every_missing_flight_field() {
        let mut form = filled_form();
        for _ in 0..3 {
            form.next_step().unwrap();
        }
        form.set_field(Field::DomesticFlights, "");
        form.set_field(Field::InternationalFlights, "");

        let err = form.submit().unwrap_err();
        assert_eq!(err.missing, vec!["domesticFlights", "internationalFlights"]);
        assert!(err.to_string().contains("domesticFlights, internationalFlights"));
    }

    #[test]
    fn submit_from_first_step_requires_every_field() {
        let mut form = CalculatorForm::new();
        form.set_field(Field::ElectricityBill, "1500");

        let err = form.submit().unwrap_err();
        assert_eq!(
            err.missing,
            vec!["lpgCylinders", "carDistance", "domesticFlights", "internationalFlights"]
        );
    }

    #[test]
    fn submit_catches_field_blanked_after_its_step() {
        let mut form = filled_form();
        for _ in 0..3 {
            form.next_step().unwrap();
        }
        form.set_field(Field::ElectricityBill, "");

        assert_eq!(form.current_step(), Step::Flights);
        assert!(form.validate_step().is_ok());
        let err = form.submit().unwrap_err();
        assert_eq!(err.missing, vec!["electricityBill"]);
    }

    #[test]
    fn submit_coerces_values() {
        let mut form = filled_form();
        form.set_field(Field::CarDistance, "lots");
        for _ in 0..3 {
            form.next_step().unwrap();
        }

        let input = form.submit().unwrap();
        assert_eq!(input.electricity_bill, 1500.0);
        assert_eq!(input.lpg_cylinders, 2);
        assert_eq!(input.car_distance, 0.0);
        assert_eq!(input.domestic_flights, 1);
    }

    #[test]
    fn reset_clears_state() {
        let mut form = filled_form();
        form.next_step().unwrap();
        form.reset();

        assert_eq!(form.current_step(), Step::Electricity);
        assert_eq!(form.field(Field::ElectricityBill), None);
        assert!(form.validate_step().is_err());
    }
}
