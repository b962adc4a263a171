use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::models::*;
use crate::directory::ChannelDirectory;
use crate::identity::IdentityResolver;
use crate::models::{payment_link, BalanceSummary, PaymentChannel};
use crate::service::{LedgerService, NewExpense};
use crate::storage::{BatchSettleResult, Storage};

type Service<S, D, I> = Arc<LedgerService<S, D, I>>;

// Define API routes
pub fn api_routes<S, D, I>(service: Service<S, D, I>) -> Router
where
    S: Storage + 'static,
    D: ChannelDirectory + 'static,
    I: IdentityResolver + 'static,
{
    Router::new()
        .route("/", axum::routing::get(|| async { "OK" }))
        .route("/expenses", axum::routing::post(create_expense))
        .route(
            "/trips/{trip_id}/summary/{viewer_id}",
            axum::routing::get(get_balance_summary),
        )
        .route("/settlements", axum::routing::post(settle_obligation))
        .route("/settlements/bulk", axum::routing::post(settle_bulk))
        .route(
            "/users/{user_id}/channels",
            axum::routing::get(get_channels).put(save_channels),
        )
        .route(
            "/users/{user_id}/channels/primary",
            axum::routing::get(get_primary_channel),
        )
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense created", body = CreateExpenseResponse),
        (status = 400, description = "Invalid expense input", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_expense<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    let transaction_id = service
        .create_expense(NewExpense {
            trip_id: req.trip_id,
            payer_id: req.payer_id,
            amount: req.amount,
            currency: req.currency,
            description: req.description,
            participant_ids: req.participant_ids,
            preferred_channel_types: req.preferred_channel_types,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateExpenseResponse { transaction_id }),
    ))
}

#[utoipa::path(
    get,
    path = "/trips/{trip_id}/summary/{viewer_id}",
    params(
        ("trip_id" = Uuid, Path, description = "Trip to summarize"),
        ("viewer_id" = Uuid, Path, description = "User the balances are computed for")
    ),
    responses(
        (status = 200, description = "Balance summary", body = BalanceSummary),
        (status = 400, description = "Mixed currencies in trip", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_balance_summary<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Path((trip_id, viewer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<BalanceSummary>, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    let summary = service.get_balance_summary(trip_id, viewer_id).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    post,
    path = "/settlements",
    request_body = SettleObligationRequest,
    responses(
        (status = 200, description = "Obligation settled; body carries its new state", body = SettleObligationResponse),
        (status = 404, description = "Obligation not found", body = ErrorResponse),
        (status = 409, description = "Already settled by another actor; refresh before retrying", body = ErrorResponse)
    )
)]
pub async fn settle_obligation<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Json(req): Json<SettleObligationRequest>,
) -> Result<Json<SettleObligationResponse>, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    let obligation = service.settle_one(req.obligation_id, req.method).await?;
    Ok(Json(SettleObligationResponse { obligation }))
}

#[utoipa::path(
    post,
    path = "/settlements/bulk",
    request_body = BulkSettleRequest,
    responses(
        (status = 200, description = "Per-obligation results; partial success is normal", body = BatchSettleResult),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn settle_bulk<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Json(req): Json<BulkSettleRequest>,
) -> Result<Json<BatchSettleResult>, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    let result = service
        .settle_all_with_counterparty(req.trip_id, req.viewer_id, req.counterparty_id, req.method)
        .await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/channels",
    params(("user_id" = Uuid, Path, description = "Channel owner")),
    responses((status = 200, description = "The user's payment channels", body = [PaymentChannel]))
)]
pub async fn get_channels<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PaymentChannel>>, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    Ok(Json(service.channels(user_id).await?))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}/channels",
    params(("user_id" = Uuid, Path, description = "Channel owner")),
    request_body = SaveChannelsRequest,
    responses((status = 204, description = "Channels replaced"))
)]
pub async fn save_channels<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SaveChannelsRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    service.save_channels(user_id, req.channels).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/channels/primary",
    params(
        ("user_id" = Uuid, Path, description = "Channel owner"),
        PrimaryChannelQuery
    ),
    responses(
        (status = 200, description = "Best channel to pay this user, with a deep link when the type supports one", body = PrimaryChannelResponse)
    )
)]
pub async fn get_primary_channel<S, D, I>(
    State(service): State<Service<S, D, I>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<PrimaryChannelQuery>,
) -> Result<Json<PrimaryChannelResponse>, ApiError>
where
    S: Storage,
    D: ChannelDirectory,
    I: IdentityResolver,
{
    let channel = service.primary_channel(user_id).await?;
    let pay_link = match (&channel, query.amount) {
        (Some(channel), Some(amount)) => payment_link(channel, amount),
        _ => None,
    };
    Ok(Json(PrimaryChannelResponse { channel, pay_link }))
}
