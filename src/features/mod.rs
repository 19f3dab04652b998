pub mod pricing;
pub mod vehicles;
