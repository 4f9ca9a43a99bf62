use axum::{
    extract::{Extension, State},
    routing::post,
    Json, Router,
};

use crate::controllers::return_controller::ReturnController;
use crate::dto::return_dto::{CreateReturnRequest, ReturnResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::services::access_gate::{self, Action};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_return_router() -> Router<AppState> {
    Router::new().route("/", post(record_return))
}

async fn record_return(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateReturnRequest>,
) -> Result<Json<ApiResponse<ReturnResponse>>, AppError> {
    access_gate::require(&user, Action::ReturnRecord)?;
    let controller = ReturnController::new(state.pool.clone());
    let response = controller.record(&user, request).await?;
    Ok(Json(response))
}
