use utoipa::{Modify, OpenApi};

use crate::features::vehicles::{dtos as vehicles_dtos, handlers as vehicles_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Vehicles
        vehicles_handlers::register_vehicle,
        vehicles_handlers::list_vehicles,
        vehicles_handlers::remove_vehicle,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Vehicles
            vehicles_dtos::CreateVehicleDto,
            vehicles_dtos::VehicleResponseDto,
            vehicles_dtos::ReceiptDto,
            vehicles_dtos::ExitMode,
            ApiResponse<vehicles_dtos::VehicleResponseDto>,
            ApiResponse<Vec<vehicles_dtos::VehicleResponseDto>>,
            ApiResponse<vehicles_dtos::ReceiptDto>,
        )
    ),
    tags(
        (name = "vehicles", description = "Parking session registration, listing and checkout"),
    ),
    info(
        title = "Estacionamento API",
        version = "0.1.0",
        description = "Parking lot management API",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
