pub mod domain;
pub mod estimator;
pub mod form;
pub mod history;
pub mod ports;

pub use domain::{ActivityInput, Category, EmissionBreakdown, FootprintRecord, NewFootprint};
pub use estimator::{compare_to_national_average, estimate, select_tips, Comparison, Tips};
pub use form::{CalculatorForm, Field, Step, ValidationError};
pub use history::{trend, TrendPoint};
pub use ports::{LedgerService, PortError, PortResult};
