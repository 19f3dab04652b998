use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::vehicles::dtos::{
    CreateVehicleDto, ReceiptDto, RemoveVehicleQuery, VehicleResponseDto,
};
use crate::features::vehicles::services::VehicleService;
use crate::shared::types::{ApiResponse, Meta};

/// Register a vehicle entering the lot
///
/// The plate is trimmed and uppercased before storage. Registration fails
/// when the normalized plate is already inside the lot.
#[utoipa::path(
    post,
    path = "/api/veiculos",
    request_body = CreateVehicleDto,
    responses(
        (status = 200, description = "Vehicle registered", body = ApiResponse<VehicleResponseDto>),
        (status = 400, description = "Blank plate"),
        (status = 409, description = "Plate already registered")
    ),
    tag = "vehicles"
)]
pub async fn register_vehicle(
    State(service): State<Arc<VehicleService>>,
    AppJson(dto): AppJson<CreateVehicleDto>,
) -> Result<Json<ApiResponse<VehicleResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let vehicle = service.register(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(vehicle),
        Some("Vehicle registered successfully".to_string()),
        None,
    )))
}

/// List all vehicles currently in the lot
#[utoipa::path(
    get,
    path = "/api/veiculos",
    responses(
        (status = 200, description = "List of parked vehicles", body = ApiResponse<Vec<VehicleResponseDto>>),
    ),
    tag = "vehicles"
)]
pub async fn list_vehicles(
    State(service): State<Arc<VehicleService>>,
) -> Result<Json<ApiResponse<Vec<VehicleResponseDto>>>> {
    let vehicles = service.list().await?;
    let total = vehicles.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(vehicles),
        None,
        Some(Meta { total }),
    )))
}

/// Check a vehicle out and charge the parking fee
///
/// `hours`/`minutes` describe the exit time: as an offset from entry in
/// `duration` mode (the default), or as a wall-clock time of day in
/// `absolute` mode (rolled to the next day when earlier than the entry).
#[utoipa::path(
    delete,
    path = "/api/veiculos/{plate}",
    params(
        ("plate" = String, Path, description = "License plate of the vehicle to check out"),
        RemoveVehicleQuery
    ),
    responses(
        (status = 200, description = "Checkout receipt", body = ApiResponse<ReceiptDto>),
        (status = 400, description = "Blank plate or invalid exit time of day"),
        (status = 404, description = "Plate not registered"),
        (status = 500, description = "No price rule covers the entry date")
    ),
    tag = "vehicles"
)]
pub async fn remove_vehicle(
    State(service): State<Arc<VehicleService>>,
    Path(plate): Path<String>,
    Query(query): Query<RemoveVehicleQuery>,
) -> Result<Json<ApiResponse<ReceiptDto>>> {
    let receipt = service.remove(&plate, query).await?;
    Ok(Json(ApiResponse::success(
        Some(receipt),
        Some("Vehicle checked out successfully".to_string()),
        None,
    )))
}
