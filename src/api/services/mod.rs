pub mod health;
pub mod rotation;

pub use health::{AppStartTime, HealthService, health_routes};
pub use rotation::rotation_v1_routes;
