use std::sync::Arc;

use chrono::{Local, NaiveDateTime, TimeDelta, Timelike};
use sqlx::sqlite::SqlitePool;

use crate::core::error::{AppError, Result};
use crate::features::pricing::services::fee::compute_fee;
use crate::features::pricing::PricingService;
use crate::features::vehicles::dtos::{
    CreateVehicleDto, ExitMode, ReceiptDto, RemoveVehicleQuery, VehicleResponseDto,
};
use crate::features::vehicles::models::Vehicle;
use crate::shared::validation::normalize_plate;

/// Service for vehicle entry, listing and checkout
pub struct VehicleService {
    pool: SqlitePool,
    pricing: Arc<PricingService>,
}

impl VehicleService {
    pub fn new(pool: SqlitePool, pricing: Arc<PricingService>) -> Self {
        Self { pool, pricing }
    }

    /// Registers a vehicle entering the lot.
    pub async fn register(&self, dto: CreateVehicleDto) -> Result<VehicleResponseDto> {
        let plate = normalize_plate(&dto.plate);
        if plate.is_empty() {
            return Err(AppError::Validation("Plate is required".to_string()));
        }

        let exists: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM vehicles WHERE plate = ?1")
            .bind(&plate)
            .fetch_one(&self.pool)
            .await?;

        if exists > 0 {
            return Err(AppError::Conflict(format!(
                "Plate '{}' is already registered",
                plate
            )));
        }

        let entered_at = now_to_the_second();

        // A concurrent insert can slip past the pre-check; the UNIQUE
        // constraint on plate is authoritative.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO vehicles (plate, entered_at) VALUES (?1, ?2) RETURNING id",
        )
        .bind(&plate)
        .bind(entered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Plate '{}' is already registered", plate))
            }
            _ => {
                tracing::error!("Failed to register vehicle: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Vehicle registered: plate={}, entered_at={}", plate, entered_at);

        Ok(VehicleResponseDto {
            id,
            plate,
            entry_timestamp: entered_at,
        })
    }

    /// Lists all vehicles currently in the lot.
    pub async fn list(&self) -> Result<Vec<VehicleResponseDto>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id, plate, entered_at FROM vehicles ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list vehicles: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(vehicles.into_iter().map(|v| v.into()).collect())
    }

    /// Checks a vehicle out: computes the exit time from the query, resolves
    /// the applicable price rule from the entry time, computes the fee,
    /// deletes the session and returns the receipt.
    pub async fn remove(&self, plate: &str, query: RemoveVehicleQuery) -> Result<ReceiptDto> {
        let plate = normalize_plate(plate);
        if plate.is_empty() {
            return Err(AppError::Validation("Plate is required".to_string()));
        }

        let vehicle = sqlx::query_as::<_, Vehicle>(
            "SELECT id, plate, entered_at FROM vehicles WHERE plate = ?1",
        )
        .bind(&plate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle with plate '{}' not found", plate)))?;

        let exited_at = compute_exit(vehicle.entered_at, query.hours, query.minutes, query.mode)?;

        let rule = self.pricing.resolve_for_entry(vehicle.entered_at).await?;
        let fee = compute_fee(vehicle.entered_at, exited_at, &rule);

        sqlx::query("DELETE FROM vehicles WHERE id = ?1")
            .bind(vehicle.id)
            .execute(&self.pool)
            .await?;

        tracing::info!(
            "Vehicle checked out: plate={}, elapsed_minutes={}, amount={}",
            plate,
            fee.elapsed_minutes,
            fee.amount
        );

        Ok(ReceiptDto {
            plate,
            entry_timestamp: vehicle.entered_at,
            exit_timestamp: exited_at,
            elapsed_minutes: fee.elapsed_minutes,
            amount: fee.amount,
        })
    }
}

/// Current local wall-clock time truncated to whole seconds, matching the
/// precision of stored entry timestamps.
fn now_to_the_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Derives the exit timestamp from the checkout query.
///
/// Duration mode adds the offset to the entry and clamps results before the
/// entry back to it. Absolute mode reads `hours`/`minutes` as a time of day
/// on the entry date, rolling to the next day when that moment precedes the
/// entry (checkout assumed the next calendar day).
fn compute_exit(
    entered_at: NaiveDateTime,
    hours: i64,
    minutes: i64,
    mode: ExitMode,
) -> Result<NaiveDateTime> {
    match mode {
        ExitMode::Duration => {
            let offset = TimeDelta::try_hours(hours)
                .zip(TimeDelta::try_minutes(minutes))
                .and_then(|(h, m)| h.checked_add(&m))
                .ok_or_else(|| {
                    AppError::Validation("Exit duration is out of range".to_string())
                })?;

            let exited_at = entered_at
                .checked_add_signed(offset)
                .ok_or_else(|| {
                    AppError::Validation("Exit duration is out of range".to_string())
                })?;

            Ok(exited_at.max(entered_at))
        }
        ExitMode::Absolute => {
            if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
                return Err(AppError::Validation(
                    "Invalid exit time of day: hours must be 0-23 and minutes 0-59".to_string(),
                ));
            }

            let exited_at = entered_at
                .date()
                .and_hms_opt(hours as u32, minutes as u32, 0)
                .ok_or_else(|| {
                    AppError::Internal("Could not build exit timestamp".to_string())
                })?;

            if exited_at < entered_at {
                Ok(exited_at + TimeDelta::days(1))
            } else {
                Ok(exited_at)
            }
        }
    }
}
