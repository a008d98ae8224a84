use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::{debug, info, warn};

use shared_utils::extractor::JsonBody;

use crate::models::{
    DoctorQuery, DoctorSearchResponse, Pagination, PaginationParams, SearchCriteria,
    ServiceStatus, VerificationResponse,
};
use crate::router::DoctorCellState;
use crate::services::search::DoctorSearchService;

const NO_DATA_MESSAGE: &str = "No doctor data loaded on server";

// ==============================================================================
// PUBLIC SEARCH HANDLERS
// ==============================================================================

/// `POST /search/doctorsList`: ranked, paginated roster search.
#[axum::debug_handler]
pub async fn search_doctors_list(
    State(state): State<DoctorCellState>,
    params: Result<Query<PaginationParams>, QueryRejection>,
    JsonBody(query): JsonBody<DoctorQuery>,
) -> Json<DoctorSearchResponse> {
    // a malformed query string only loses its pagination hints
    let params = params.map(|Query(params)| params).unwrap_or_else(|rejection| {
        warn!("Ignoring malformed query string: {}", rejection.body_text());
        PaginationParams::default()
    });
    let pagination = Pagination::resolve(
        query.page.or_else(|| params.page()),
        query.size.or_else(|| params.size()),
        &state.config,
    );
    let criteria = SearchCriteria::from(&query);

    debug!(
        "Search criteria - name: {:?}, specialty: {:?}, governorate: {:?}, page: {}, size: {}",
        criteria.name, criteria.specialty, criteria.governorate, pagination.page, pagination.size
    );

    let page = DoctorSearchService::new(&state.roster, &state.config).search(&criteria, pagination);
    let total_pages = pagination.total_pages(page.total);

    info!(
        "Found {} matching doctors, returning page {}/{} ({} items)",
        page.total,
        pagination.page,
        total_pages,
        page.doctors.len()
    );

    Json(DoctorSearchResponse {
        doctors: page.doctors,
        current_page: pagination.page,
        page_size: pagination.size,
        total_items: page.total,
        total_pages,
        message: state.roster.is_empty().then(|| NO_DATA_MESSAGE.to_string()),
    })
}

/// `POST /search/doctors`: does any doctor satisfy the criteria?
#[axum::debug_handler]
pub async fn verify_doctor(
    State(state): State<DoctorCellState>,
    JsonBody(query): JsonBody<DoctorQuery>,
) -> Json<VerificationResponse> {
    if state.roster.is_empty() {
        info!("Verification requested but the roster is empty");
        return Json(VerificationResponse {
            result: false,
            reason: Some(NO_DATA_MESSAGE.to_string()),
        });
    }

    let criteria = SearchCriteria::from(&query);
    debug!(
        "Verification criteria - name: {:?}, specialty: {:?}, governorate: {:?}",
        criteria.name, criteria.specialty, criteria.governorate
    );

    let result = DoctorSearchService::new(&state.roster, &state.config).exists(&criteria);
    info!("Verification result: {}", result);

    Json(VerificationResponse { result, reason: None })
}

/// `GET /`: liveness plus roster size.
#[axum::debug_handler]
pub async fn service_status(State(state): State<DoctorCellState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        message: "Doctor Search API is running.".to_string(),
        status: "OK".to_string(),
        data_loaded: !state.roster.is_empty(),
        record_count: state.roster.len(),
    })
}
