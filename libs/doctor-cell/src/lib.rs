pub mod handlers;
pub mod router;
pub mod models;
pub mod services;

// Re-export all models and services for external use
pub use models::*;
pub use services::*;

pub use router::{doctor_routes, DoctorCellState};
pub use services::roster::DoctorRoster;
pub use services::search::DoctorSearchService;
