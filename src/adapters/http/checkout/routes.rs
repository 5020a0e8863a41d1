//! Axum router configuration for checkout endpoints.

use axum::{routing::get, Router};

use super::handlers::{health, show_form, submit_checkout, CheckoutAppState};

/// Create the checkout router.
///
/// # Routes
/// - `GET /` - Checkout form
/// - `POST /` - Submit checkout form
/// - `GET /health` - Liveness probe
pub fn checkout_router() -> Router<CheckoutAppState> {
    Router::new()
        .route("/", get(show_form).post(submit_checkout))
        .route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateway::MockPaymentGateway;
    use crate::adapters::storage::InMemoryPaymentLog;
    use crate::application::{CheckoutSettings, GatewayClient};
    use crate::domain::checkout::{GatewayMethod, Signer};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use secrecy::SecretString;
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    // ───────────────────────────────────────────────────────────────
    // Test fixtures
    // ───────────────────────────────────────────────────────────────

    struct Fixture {
        log: InMemoryPaymentLog,
        gateway: MockPaymentGateway,
        app: Router,
    }

    fn fixture_with_log(log: InMemoryPaymentLog) -> Fixture {
        let gateway = MockPaymentGateway::new();
        let state = CheckoutAppState::new(
            Arc::new(log.clone()),
            GatewayClient::new(
                Signer::new(SecretString::new("SecretKey01".to_string())),
                Arc::new(gateway.clone()),
            ),
            CheckoutSettings {
                shop_id: 5,
                shop_order_id: "101".to_string(),
                payer_account: "support@piastrix.com".to_string(),
                invoice_payway: "advcash_rub".to_string(),
                pay_url: "https://pay.piastrix.com/ru/pay".to_string(),
            },
        );

        Fixture {
            log,
            gateway,
            app: checkout_router().with_state(state),
        }
    }

    fn fixture() -> Fixture {
        fixture_with_log(InMemoryPaymentLog::new())
    }

    fn post_form(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ───────────────────────────────────────────────────────────────
    // Tests
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn get_root_serves_checkout_form() {
        let response = fixture()
            .app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains(r#"name="currency""#));
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = fixture()
            .app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn usd_submission_redirects_with_302() {
        let f = fixture();
        f.gateway.push_body(json!({
            "data": {"url": "https://x"},
            "error_code": 0,
            "message": "Ok",
            "result": true
        }));

        let response = f
            .app
            .oneshot(post_form("amount=10&currency=USD&description=Widget"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "https://x");
        assert_eq!(f.gateway.calls()[0].method, GatewayMethod::Bill);
        assert_eq!(f.log.len().await, 1);
    }

    #[tokio::test]
    async fn eur_submission_renders_signed_pay_form() {
        let f = fixture();

        let response = f
            .app
            .oneshot(post_form("amount=10&currency=EUR&description=Widget"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"action="https://pay.piastrix.com/ru/pay""#));
        assert!(html.contains(r#"name="sign""#));
        assert_eq!(f.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn rub_submission_renders_gateway_form() {
        let f = fixture();
        f.gateway.push_body(json!({
            "data": {
                "data": {"ac_sign": "abc"},
                "method": "GET",
                "url": "https://wallet.advcash.com/sci/"
            }
        }));

        let response = f
            .app
            .oneshot(post_form("amount=100&currency=RUB"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"method="GET" action="https://wallet.advcash.com/sci/""#));
        assert!(html.contains(r#"name="ac_sign" value="abc""#));
    }

    #[tokio::test]
    async fn rub_rejection_shows_gateway_code_and_message() {
        let f = fixture();
        f.gateway.push_body(json!({
            "error_code": 1001,
            "message": "Payway <b>disabled</b>"
        }));

        let response = f
            .app
            .oneshot(post_form("amount=100&currency=RUB"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(
            body_text(response).await,
            "<h2>[ERROR 1001] – Payway &lt;b&gt;disabled&lt;/b&gt;<br>Please return to form and enter a valid data.</h2>"
        );
    }

    #[tokio::test]
    async fn small_eur_amount_is_unprocessable() {
        let response = fixture()
            .app
            .oneshot(post_form("amount=0.00999&currency=EUR"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("[ERROR 4]"));
    }

    #[tokio::test]
    async fn garbage_amount_is_bad_request_and_not_logged() {
        let f = fixture();

        let response = f
            .app
            .oneshot(post_form("amount=abc&currency=EUR"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("[UNKNOWN ERROR] – Something is wrong."));
        assert!(f.log.is_empty().await);
    }

    #[tokio::test]
    async fn wrong_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"amount":"10","currency":"EUR"}"#))
            .unwrap();

        let response = fixture().app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn persistence_failure_is_500_without_gateway_call() {
        let f = fixture_with_log(InMemoryPaymentLog::failing());
        f.gateway.push_body(json!({"data": {"url": "https://x"}}));

        let response = f
            .app
            .oneshot(post_form("amount=10&currency=USD"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(f.gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn unreachable_gateway_is_502() {
        let f = fixture();
        f.gateway
            .push_error(crate::ports::GatewayError::Timeout("30s elapsed".to_string()));

        let response = f
            .app
            .oneshot(post_form("amount=10&currency=USD"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert!(body_text(response).await.contains("[GATEWAY ERROR]"));
    }
}
