pub mod fee;
mod pricing_service;

pub use pricing_service::PricingService;
