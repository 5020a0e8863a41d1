//! HTTP handlers for checkout endpoints.
//!
//! These handlers connect Axum routes to the checkout command handler and
//! turn its outcome into a redirect, a payment form or an error fragment.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Json, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::application::{
    CheckoutOutcome, CheckoutSettings, GatewayClient, SubmitCheckoutHandler,
};
use crate::domain::checkout::CheckoutError;
use crate::domain::foundation::ValidationError;
use crate::ports::PaymentLogRepository;

use super::dto::{CheckoutForm, HealthResponse};
use super::views::{render_checkout_page, render_error, render_payment_form};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the checkout endpoints.
///
/// Cloned per request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct CheckoutAppState {
    pub payment_log: Arc<dyn PaymentLogRepository>,
    pub gateway_client: GatewayClient,
    pub settings: Arc<CheckoutSettings>,
}

impl CheckoutAppState {
    pub fn new(
        payment_log: Arc<dyn PaymentLogRepository>,
        gateway_client: GatewayClient,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            payment_log,
            gateway_client,
            settings: Arc::new(settings),
        }
    }

    pub fn submit_checkout_handler(&self) -> SubmitCheckoutHandler {
        SubmitCheckoutHandler::new(
            self.payment_log.clone(),
            self.gateway_client.clone(),
            self.settings.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Checkout form
pub async fn show_form() -> Html<String> {
    Html(render_checkout_page())
}

/// POST / - Submit checkout form
pub async fn submit_checkout(
    State(state): State<CheckoutAppState>,
    form: Result<Form<CheckoutForm>, FormRejection>,
) -> Result<Response, CheckoutApiError> {
    let Form(form) = form.map_err(|rejection| {
        tracing::info!(error = %rejection, "Unreadable checkout form");
        CheckoutError::invalid_submission(ValidationError::invalid_format(
            "form",
            rejection.body_text(),
        ))
    })?;

    let result = state.submit_checkout_handler().handle(form.into()).await?;

    match result.outcome {
        CheckoutOutcome::Redirect { url } => {
            let location = HeaderValue::from_str(&url).map_err(|_| {
                tracing::warn!(log_id = %result.log_id, "Redirect URL is not a valid header value");
                CheckoutError::gateway_malformed("redirect url is not a valid header value")
            })?;
            tracing::info!(log_id = %result.log_id, "Redirecting payer to gateway");
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        CheckoutOutcome::PaymentForm(instruction) => {
            tracing::info!(
                log_id = %result.log_id,
                form_method = %instruction.method,
                "Rendering payment form"
            );
            Ok(Html(render_payment_form(&instruction)).into_response())
        }
    }
}

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that renders a `CheckoutError` as an HTML fragment.
pub struct CheckoutApiError(CheckoutError);

impl From<CheckoutError> for CheckoutApiError {
    fn from(err: CheckoutError) -> Self {
        CheckoutApiError(err)
    }
}

impl CheckoutApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            CheckoutError::InvalidSubmission(_) => StatusCode::BAD_REQUEST,
            CheckoutError::PersistenceFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CheckoutError::AmountTooSmall { .. } | CheckoutError::AmountTooLarge { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CheckoutError::GatewayRejected { .. } => StatusCode::PAYMENT_REQUIRED,
            CheckoutError::GatewayUnavailable(_) | CheckoutError::GatewayMalformed(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }
}

impl IntoResponse for CheckoutApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "Checkout failed");
        } else {
            tracing::info!(status = %status, error = %self.0, "Checkout refused");
        }
        (status, Html(render_error(&self.0))).into_response()
    }
}
