//! Vehicle registry: parking sessions keyed by license plate.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/veiculos` | Register a vehicle on entry |
//! | GET | `/api/veiculos` | List vehicles currently in the lot |
//! | DELETE | `/api/veiculos/{plate}` | Check a vehicle out and charge the fee |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::VehicleService;
