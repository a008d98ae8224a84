use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;
use crate::services::roster::DoctorRoster;

/// Router state: configuration plus the read-only roster.
#[derive(Debug, Clone)]
pub struct DoctorCellState {
    pub config: Arc<AppConfig>,
    pub roster: Arc<DoctorRoster>,
}

impl DoctorCellState {
    pub fn new(config: Arc<AppConfig>, roster: DoctorRoster) -> Self {
        Self {
            config,
            roster: Arc::new(roster),
        }
    }
}

/// Search routes, meant to be nested under `/search`.
pub fn doctor_routes(state: DoctorCellState) -> Router {
    Router::new()
        .route("/doctorsList", post(handlers::search_doctors_list))
        .route("/doctors", post(handlers::verify_doctor))
        .with_state(state)
}

/// Status route served at the application root.
pub fn status_routes(state: DoctorCellState) -> Router {
    Router::new()
        .route("/", get(handlers::service_status))
        .with_state(state)
}
