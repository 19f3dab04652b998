mod vehicle_dto;

pub use vehicle_dto::{
    CreateVehicleDto, ExitMode, ReceiptDto, RemoveVehicleQuery, VehicleResponseDto,
};
