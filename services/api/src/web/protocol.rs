//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the browser client and the API server.
//! Field names are camelCase on the wire; records keep the `_id` key older clients
//! already read.

use chrono::{DateTime, Utc};
use footprint_core::domain::{ActivityInput, Category, EmissionBreakdown, FootprintRecord, NewFootprint};
use footprint_core::estimator::{Comparison, Tips, NATIONAL_AVERAGE_TONNES};
use footprint_core::history::TrendPoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Ledger Bodies
//=========================================================================================

/// A computed footprint submitted for saving. Every field must be a non-negative number.
#[derive(Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveFootprintRequest {
    pub electricity_bill: f64,
    pub lpg_cylinders: u32,
    pub car_distance: f64,
    pub domestic_flights: u32,
    pub international_flights: u32,
    pub total_footprint: f64,
}

impl From<SaveFootprintRequest> for NewFootprint {
    fn from(req: SaveFootprintRequest) -> Self {
        NewFootprint {
            input: ActivityInput {
                electricity_bill: req.electricity_bill,
                lpg_cylinders: req.lpg_cylinders,
                car_distance: req.car_distance,
                domestic_flights: req.domestic_flights,
                international_flights: req.international_flights,
            },
            total_footprint: req.total_footprint,
        }
    }
}

/// A saved footprint calculation.
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FootprintRecordBody {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub electricity_bill: f64,
    pub lpg_cylinders: u32,
    pub car_distance: f64,
    pub domestic_flights: u32,
    pub international_flights: u32,
    pub total_footprint: f64,
    pub created_at: DateTime<Utc>,
}

impl From<FootprintRecord> for FootprintRecordBody {
    fn from(record: FootprintRecord) -> Self {
        Self {
            id: record.id,
            electricity_bill: record.input.electricity_bill,
            lpg_cylinders: record.input.lpg_cylinders,
            car_distance: record.input.car_distance,
            domestic_flights: record.input.domestic_flights,
            international_flights: record.input.international_flights,
            total_footprint: record.total_footprint,
            created_at: record.created_at,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct SaveFootprintResponse {
    pub message: String,
    pub data: FootprintRecordBody,
}

/// Body of every failed request. The message never carries internal detail.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPointBody {
    pub label: String,
    pub total_footprint: f64,
}

impl From<TrendPoint> for TrendPointBody {
    fn from(point: TrendPoint) -> Self {
        Self {
            label: point.label,
            total_footprint: point.total_footprint,
        }
    }
}

//=========================================================================================
// Estimation Bodies
//=========================================================================================

/// Raw activity figures. Values may be numbers or numeric text; anything missing or
/// unreadable counts as zero.
#[derive(Deserialize, Debug, Default, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimateRequest {
    #[schema(value_type = Option<f64>)]
    pub electricity_bill: Option<Value>,
    #[schema(value_type = Option<u32>)]
    pub lpg_cylinders: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub car_distance: Option<Value>,
    #[schema(value_type = Option<u32>)]
    pub domestic_flights: Option<Value>,
    #[schema(value_type = Option<u32>)]
    pub international_flights: Option<Value>,
    /// Also record the result in the ledger, without waiting for the write.
    pub save: bool,
}

impl EstimateRequest {
    pub fn to_input(&self) -> ActivityInput {
        let electricity_bill = raw_text(&self.electricity_bill);
        let lpg_cylinders = raw_text(&self.lpg_cylinders);
        let car_distance = raw_text(&self.car_distance);
        let domestic_flights = raw_text(&self.domestic_flights);
        let international_flights = raw_text(&self.international_flights);

        ActivityInput::from_raw(
            electricity_bill.as_deref(),
            lpg_cylinders.as_deref(),
            car_distance.as_deref(),
            domestic_flights.as_deref(),
            international_flights.as_deref(),
        )
    }
}

fn raw_text(value: &Option<Value>) -> Option<String> {
    match value {
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFootprint {
    /// Stable key, e.g. `domesticFlights`.
    pub category: String,
    pub label: String,
    /// Tonnes CO2e per year.
    pub tonnes: f64,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TipsBody {
    pub top_category: String,
    pub headline: String,
    pub general: String,
}

impl From<Tips> for TipsBody {
    fn from(tips: Tips) -> Self {
        Self {
            top_category: tips.top_category.key().to_string(),
            headline: tips.headline,
            general: tips.general.to_string(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonBody {
    /// `below` or `above`.
    pub status: String,
    pub message: String,
    pub national_average: f64,
}

impl From<Comparison> for ComparisonBody {
    fn from(comparison: Comparison) -> Self {
        let status = match comparison {
            Comparison::BelowAverage => "below",
            Comparison::AboveAverage => "above",
        };
        Self {
            status: status.to_string(),
            message: comparison.message().to_string(),
            national_average: NATIONAL_AVERAGE_TONNES,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub breakdown: Vec<CategoryFootprint>,
    pub total_footprint: f64,
    pub tips: TipsBody,
    pub comparison: ComparisonBody,
}

impl EstimateResponse {
    pub fn new(breakdown: &EmissionBreakdown, tips: Tips, comparison: Comparison) -> Self {
        Self {
            breakdown: breakdown
                .iter()
                .map(|(category, tonnes): (Category, f64)| CategoryFootprint {
                    category: category.key().to_string(),
                    label: category.label().to_string(),
                    tonnes,
                })
                .collect(),
            total_footprint: breakdown.total_footprint(),
            tips: tips.into(),
            comparison: comparison.into(),
        }
    }
}
