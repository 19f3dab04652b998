use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::vehicles::models::Vehicle;

/// Request DTO for registering a vehicle on entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleDto {
    /// License plate; stored trimmed and uppercased
    #[validate(length(min = 1, message = "Plate is required"))]
    pub plate: String,
}

/// Response DTO for an active parking session
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponseDto {
    pub id: i64,
    pub plate: String,
    pub entry_timestamp: NaiveDateTime,
}

impl From<Vehicle> for VehicleResponseDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            plate: v.plate,
            entry_timestamp: v.entered_at,
        }
    }
}

/// How the exit time on checkout is derived from the `hours`/`minutes`
/// query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExitMode {
    /// `hours`/`minutes` are an offset added to the entry timestamp
    #[default]
    Duration,
    /// `hours`/`minutes` are a wall-clock time of day on the entry date
    /// (rolled to the next day when earlier than the entry)
    Absolute,
}

/// Query params for checking a vehicle out
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RemoveVehicleQuery {
    /// Hours component of the exit spec (default 0)
    #[serde(default)]
    pub hours: i64,

    /// Minutes component of the exit spec (default 0)
    #[serde(default)]
    pub minutes: i64,

    /// Exit time interpretation (default: duration)
    #[serde(default)]
    pub mode: ExitMode,
}

/// Receipt returned when a vehicle checks out
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptDto {
    pub plate: String,
    pub entry_timestamp: NaiveDateTime,
    pub exit_timestamp: NaiveDateTime,
    pub elapsed_minutes: i64,
    /// Amount owed, rounded to two decimal places
    #[schema(value_type = String, example = "3.00")]
    pub amount: Decimal,
}
