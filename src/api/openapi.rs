use utoipa::OpenApi;

use crate::{
    api::models::{
        BulkSettleRequest, CreateExpenseRequest, CreateExpenseResponse, ErrorResponse,
        PrimaryChannelResponse, SaveChannelsRequest, SettleObligationRequest,
        SettleObligationResponse,
    },
    identity::UserProfile,
    models::{
        BalanceSummary, ChannelType, ContributingObligation, DebtObligation,
        ExpenseTransaction, PaymentChannel, PersonalBalance,
    },
    storage::BatchSettleResult,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_expense,
        super::handlers::get_balance_summary,
        super::handlers::settle_obligation,
        super::handlers::settle_bulk,
        super::handlers::get_channels,
        super::handlers::save_channels,
        super::handlers::get_primary_channel
    ),
    components(schemas(
        CreateExpenseRequest,
        CreateExpenseResponse,
        SettleObligationRequest,
        SettleObligationResponse,
        BulkSettleRequest,
        SaveChannelsRequest,
        PrimaryChannelResponse,
        ErrorResponse,
        ExpenseTransaction,
        DebtObligation,
        PaymentChannel,
        ChannelType,
        PersonalBalance,
        ContributingObligation,
        BalanceSummary,
        BatchSettleResult,
        UserProfile
    )),
    info(
        title = "tripledger API",
        description = "Shared-expense ledger and settlement engine for trips",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
