//! Sellers service routes

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    filters::{CreationLengthFilter, FilterChain, FilterChainExt, UpdateValidityFilter},
    middleware::{Policy, auth_middleware, require_policy},
    models::{CreateSellerResponse, LoginRequest, LoginResponse, Seller, SellerInput},
    repositories::SellerDb,
    state::AppState,
    validation::validate_seller,
};

/// Create the router for the sellers service
pub fn create_router(state: AppState) -> Router {
    let private_routes = map_sellers_api("/private/sellers")
        .route_layer(middleware::from_fn_with_state(
            Policy::Manager,
            require_policy,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.jwt_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/sellers/create/:name",
            post(create_seller)
                .with_filter_chain(FilterChain::new().filter(CreationLengthFilter)),
        )
        .route(
            "/sellers/update/:id",
            put(update_seller)
                .with_filter_chain(FilterChain::new().filter(UpdateValidityFilter)),
        )
        .route("/sellers/getSeller/:id", get(get_seller))
        .route("/sellers/getAll", get(get_all_sellers))
        .route("/login", post(login))
        .merge(map_sellers_api("/public/sellers"))
        .merge(private_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Seller listing group mounted under `base`, with or without a trailing slash
fn map_sellers_api(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list_sellers))
        .route(&format!("{}/", base), get(list_sellers))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "sellers-service",
        "database": common::database::health_check(&state.db_pool).await,
    }))
}

/// Create a seller named after the last path segment
pub async fn create_seller(
    Path(name): Path<String>,
    mut db: SellerDb,
) -> ApiResult<Json<CreateSellerResponse>> {
    let seller = Seller::new(name);
    db.add(&seller).await?;

    Ok(Json(CreateSellerResponse {
        message: "Seller created successfully".to_string(),
        seller,
    }))
}

/// Rename an existing seller
pub async fn update_seller(
    Path(id): Path<Uuid>,
    mut db: SellerDb,
    Json(payload): Json<SellerInput>,
) -> ApiResult<StatusCode> {
    if db.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    validate_seller(&payload).map_err(ApiError::Problem)?;
    let name = payload.name.unwrap_or_default();

    db.update_name(id, &name).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Get a seller by ID
pub async fn get_seller(Path(id): Path<Uuid>, mut db: SellerDb) -> ApiResult<Json<Seller>> {
    db.find_by_id(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// List every seller, empty or not
pub async fn list_sellers(mut db: SellerDb) -> ApiResult<Json<Vec<Seller>>> {
    Ok(Json(db.get_all().await?))
}

/// List every seller, answering 404 when there are none
pub async fn get_all_sellers(mut db: SellerDb) -> ApiResult<Json<Vec<Seller>>> {
    let sellers = db.get_all().await?;

    if sellers.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(sellers))
}

/// User login endpoint
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    info!("Login attempt for user: {}", payload.username);

    let user = state
        .user_repository
        .find(&payload.username, &payload.password)
        .ok_or(ApiError::InvalidCredentials)?;

    let token = state.jwt_service.issue(&user).map_err(|e| {
        error!("Failed to issue token: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(LoginResponse {
        user: user.without_password(),
        token,
    }))
}
