use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{CheckinRequest, CheckoutRequest, PageQuery, RefreshResponse, VehicleResponse};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::store::Page;
use crate::utils::errors::AppResult;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/refresh", post(refresh_vehicles))
        .route("/:id", get(get_vehicle))
        .route("/:id/checkout", post(checkout_vehicle))
        .route("/:id/checkin", post(checkin_vehicle))
}

fn controller(state: &AppState) -> VehicleController {
    VehicleController::new(state.store.clone(), state.config.page_size)
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<VehicleResponse>>> {
    let response = controller(&state).list(query).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<VehicleResponse>> {
    let response = controller(&state).get_by_id(id).await?;
    Ok(Json(response))
}

async fn refresh_vehicles(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RefreshResponse>>> {
    let response = controller(&state).refresh().await?;
    Ok(Json(response))
}

async fn checkout_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<VehicleResponse>>> {
    let Json(request) = payload?;
    let response = controller(&state).checkout(id, request).await?;
    Ok(Json(response))
}

async fn checkin_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<CheckinRequest>, JsonRejection>,
) -> AppResult<Json<ApiResponse<VehicleResponse>>> {
    let Json(request) = payload?;
    let response = controller(&state).checkin(id, request).await?;
    Ok(Json(response))
}
