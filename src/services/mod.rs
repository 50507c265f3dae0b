pub mod chart_service;
pub mod generate_service;
pub mod price_service;

pub use generate_service::ChartGenerator;
