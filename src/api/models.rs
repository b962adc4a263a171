use axum::{http::StatusCode, response::IntoResponse, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{ChannelType, DebtObligation, PaymentChannel};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct CreateExpenseRequest {
    pub trip_id: Uuid,
    pub payer_id: Uuid,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
    pub participant_ids: Vec<Uuid>,
    #[serde(default)]
    pub preferred_channel_types: Vec<ChannelType>,
}

#[derive(Serialize, ToSchema)]
pub struct CreateExpenseResponse {
    pub transaction_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct SettleObligationRequest {
    pub obligation_id: Uuid,
    pub method: ChannelType,
}

#[derive(Serialize, ToSchema)]
pub struct SettleObligationResponse {
    pub obligation: DebtObligation,
}

#[derive(Deserialize, ToSchema)]
pub struct BulkSettleRequest {
    pub trip_id: Uuid,
    pub viewer_id: Uuid,
    pub counterparty_id: Uuid,
    pub method: ChannelType,
}

#[derive(Deserialize, ToSchema)]
pub struct SaveChannelsRequest {
    pub channels: Vec<PaymentChannel>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct PrimaryChannelQuery {
    /// When present, a deep link for this amount is included if the channel
    /// type supports one.
    #[param(value_type = Option<String>)]
    pub amount: Option<Decimal>,
}

#[derive(Serialize, ToSchema)]
pub struct PrimaryChannelResponse {
    pub channel: Option<PaymentChannel>,
    pub pay_link: Option<String>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::ObligationNotFound(_) => StatusCode::NOT_FOUND,
            LedgerError::SettlementConflict(_) => StatusCode::CONFLICT,
            LedgerError::StorageError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            e if e.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
