use axum::{
    extract::{Extension, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{
    CostByKindRow, MonthQuery, PeriodQuery, ReservationStatusCount, SlaReport, SummaryReport,
    UtilizationRow, VehicleCostRow, VehicleStatusCount,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(summary))
        .route("/utilization", get(utilization))
        .route("/costs", get(costs))
        .route("/costs-by-kind", get(costs_by_kind))
        .route("/sla", get(sla))
        .route("/reservations-status", get(reservations_status))
        .route("/vehicles-status", get(vehicles_status))
}

async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<SummaryReport>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.summary(query.month).await?;
    Ok(Json(response))
}

async fn utilization(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<UtilizationRow>>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.utilization(query.month).await?;
    Ok(Json(response))
}

async fn costs(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Vec<VehicleCostRow>>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.costs(period.start, period.end).await?;
    Ok(Json(response))
}

async fn costs_by_kind(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<Vec<CostByKindRow>>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.costs_by_kind(period.start, period.end).await?;
    Ok(Json(response))
}

async fn sla(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(period): Query<PeriodQuery>,
) -> Result<Json<SlaReport>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.sla(period.start, period.end).await?;
    Ok(Json(response))
}

async fn reservations_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<ReservationStatusCount>>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.reservations_status().await?;
    Ok(Json(response))
}

async fn vehicles_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<Vec<VehicleStatusCount>>, AppError> {
    access_gate::require(&user, Action::ReportView)?;
    let controller = ReportController::new(state.pool.clone());
    let response = controller.vehicles_status().await?;
    Ok(Json(response))
}
