//! SubmitCheckoutHandler - Command handler for a checkout form submission.
//!
//! One submission runs through a fixed sequence:
//!
//! 1. parse amount and currency
//! 2. append a payment log entry (before any outbound call)
//! 3. dispatch by currency: USD bills, RUB invoices, everything else gets a
//!    locally signed Pay form
//!
//! and ends in exactly one of: redirect, payment form, or `CheckoutError`.
//! The Pay limits (0.01 ..= 9 999 999 999 999 998) are only checked on the
//! Pay path; Bill and Invoice leave amount checks to the gateway.

use std::sync::Arc;

use serde_json::Value;

use super::{CheckoutSettings, GatewayClient};
use crate::domain::checkout::{
    BillRequest, CheckoutError, Currency, GatewayMethod, InvoiceRequest, PayRequest, PayerAmount,
    PaymentLogEntry, SignedRequest,
};
use crate::domain::foundation::PaymentLogId;
use crate::ports::{GatewayError, GatewayReply, PaymentLogRepository};

/// Raw form input.
#[derive(Debug, Clone)]
pub struct SubmitCheckoutCommand {
    pub amount: String,
    pub currency: String,
    pub description: Option<String>,
}

/// Result of a completed checkout attempt.
#[derive(Debug, Clone)]
pub struct SubmitCheckoutResult {
    pub log_id: PaymentLogId,
    pub outcome: CheckoutOutcome,
}

/// What the payer's browser should do next.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Send the payer to a gateway page.
    Redirect { url: String },

    /// Render a form the browser submits to the gateway.
    PaymentForm(PaymentInstruction),
}

/// Form the payer's browser submits to the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentInstruction {
    /// HTTP method of the form (`POST`, `GET`).
    pub method: String,
    /// Form action URL.
    pub url: String,
    pub payway_data: PaywayData,
}

/// Parameters carried by a payment form.
#[derive(Debug, Clone, PartialEq)]
pub enum PaywayData {
    /// Signed locally (Pay method).
    Signed(SignedRequest),

    /// Opaque payload returned by the gateway (Invoice method).
    Gateway(Value),
}

impl PaywayData {
    /// Flattened name/value pairs for hidden form inputs.
    ///
    /// Gateway payloads that are not JSON objects carry no inputs.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        match self {
            PaywayData::Signed(request) => request.fields().to_vec(),
            PaywayData::Gateway(Value::Object(fields)) => fields
                .iter()
                .map(|(name, value)| {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        Value::Null => String::new(),
                        other => other.to_string(),
                    };
                    (name.clone(), value)
                })
                .collect(),
            PaywayData::Gateway(_) => Vec::new(),
        }
    }
}

/// Handler for checkout form submissions.
pub struct SubmitCheckoutHandler {
    repository: Arc<dyn PaymentLogRepository>,
    gateway_client: GatewayClient,
    settings: Arc<CheckoutSettings>,
}

impl SubmitCheckoutHandler {
    pub fn new(
        repository: Arc<dyn PaymentLogRepository>,
        gateway_client: GatewayClient,
        settings: Arc<CheckoutSettings>,
    ) -> Self {
        Self {
            repository,
            gateway_client,
            settings,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitCheckoutCommand,
    ) -> Result<SubmitCheckoutResult, CheckoutError> {
        // 1. Parse input
        let currency: Currency = cmd.currency.parse()?;
        let amount: PayerAmount = cmd.amount.parse()?;

        // 2. Persist the attempt before anything leaves this service
        let entry = PaymentLogEntry::record(
            self.settings.shop_id,
            self.settings.shop_order_id.clone(),
            amount,
            currency,
            cmd.description,
        );

        let log_id = self.repository.append(&entry).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to store payment log entry");
            CheckoutError::persistence(e.to_string())
        })?;

        tracing::info!(
            log_id = %log_id,
            currency = %currency,
            amount = %entry.amount(),
            method = %currency.gateway_method(),
            "Payment log entry stored"
        );

        // 3. Dispatch by currency
        let outcome = match currency.gateway_method() {
            GatewayMethod::Bill => self.bill(&entry).await?,
            GatewayMethod::Invoice => self.invoice(&entry).await?,
            GatewayMethod::Pay => self.pay(&entry)?,
        };

        Ok(SubmitCheckoutResult { log_id, outcome })
    }

    async fn bill(&self, entry: &PaymentLogEntry) -> Result<CheckoutOutcome, CheckoutError> {
        let request = BillRequest::for_entry(entry, self.settings.payer_account.clone())
            .map_err(unsendable)?;
        let reply = self
            .gateway_client
            .submit(&request)
            .await
            .map_err(gateway_error)?;

        match reply {
            GatewayReply::Success { data } => {
                let url = data
                    .get("url")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        tracing::warn!("Bill reply is missing data.url");
                        CheckoutError::gateway_malformed("bill reply is missing data.url")
                    })?;
                Ok(CheckoutOutcome::Redirect {
                    url: url.to_string(),
                })
            }
            GatewayReply::Failure {
                error_code,
                message,
            } => Err(rejected(GatewayMethod::Bill, error_code, message)),
        }
    }

    async fn invoice(&self, entry: &PaymentLogEntry) -> Result<CheckoutOutcome, CheckoutError> {
        let request = InvoiceRequest::for_entry(entry, self.settings.invoice_payway.clone())
            .map_err(unsendable)?;
        let reply = self
            .gateway_client
            .submit(&request)
            .await
            .map_err(gateway_error)?;

        match reply {
            GatewayReply::Success { data } => {
                let method = data.get("method").and_then(Value::as_str);
                let url = data.get("url").and_then(Value::as_str);
                let payload = data.get("data");

                match (method, url, payload) {
                    (Some(method), Some(url), Some(payload)) => {
                        Ok(CheckoutOutcome::PaymentForm(PaymentInstruction {
                            method: method.to_string(),
                            url: url.to_string(),
                            payway_data: PaywayData::Gateway(payload.clone()),
                        }))
                    }
                    _ => {
                        tracing::warn!("Invoice reply is missing data.data, data.method or data.url");
                        Err(CheckoutError::gateway_malformed(
                            "invoice reply is missing data.data, data.method or data.url",
                        ))
                    }
                }
            }
            GatewayReply::Failure {
                error_code,
                message,
            } => Err(rejected(GatewayMethod::Invoice, error_code, message)),
        }
    }

    fn pay(&self, entry: &PaymentLogEntry) -> Result<CheckoutOutcome, CheckoutError> {
        entry.amount().ensure_within_pay_limits().map_err(|e| {
            tracing::info!(amount = %entry.amount(), error = %e, "Pay amount out of limits");
            e
        })?;

        let request = PayRequest::for_entry(entry).map_err(unsendable)?;
        let signed = self.gateway_client.sign(&request);

        Ok(CheckoutOutcome::PaymentForm(PaymentInstruction {
            method: "POST".to_string(),
            url: self.settings.pay_url.clone(),
            payway_data: PaywayData::Signed(signed),
        }))
    }
}

fn rejected(method: GatewayMethod, error_code: i64, message: String) -> CheckoutError {
    tracing::warn!(%method, error_code, message = %message, "Gateway rejected request");
    CheckoutError::gateway_rejected(error_code, message)
}

fn unsendable(err: CheckoutError) -> CheckoutError {
    tracing::info!(error = %err, "Amount has no two-decimal wire form");
    err
}

fn gateway_error(err: GatewayError) -> CheckoutError {
    tracing::error!(error = %err, "Gateway call failed");
    if err.is_transport() {
        CheckoutError::gateway_unavailable(err.to_string())
    } else {
        CheckoutError::gateway_malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::checkout::Signer;
    use crate::domain::foundation::ValidationError;
    use crate::ports::{PaymentGateway, StorageError};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use serde_json::json;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockPaymentLogRepository {
        entries: Mutex<Vec<PaymentLogEntry>>,
        fail_append: bool,
    }

    impl MockPaymentLogRepository {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail_append: false,
            }
        }

        fn failing() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
                fail_append: true,
            }
        }

        fn entries(&self) -> Vec<PaymentLogEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentLogRepository for MockPaymentLogRepository {
        async fn append(&self, entry: &PaymentLogEntry) -> Result<PaymentLogId, StorageError> {
            if self.fail_append {
                return Err(StorageError::Database("Simulated append failure".to_string()));
            }
            self.entries.lock().unwrap().push(entry.clone());
            Ok(entry.id())
        }
    }

    struct MockGateway {
        reply: Result<GatewayReply, GatewayError>,
        calls: Mutex<Vec<(GatewayMethod, SignedRequest)>>,
    }

    impl MockGateway {
        fn replying(body: Value) -> Self {
            Self {
                reply: GatewayReply::from_body(body),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn erroring(err: GatewayError) -> Self {
            Self {
                reply: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(GatewayMethod, SignedRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn submit(
            &self,
            method: GatewayMethod,
            request: &SignedRequest,
        ) -> Result<GatewayReply, GatewayError> {
            self.calls.lock().unwrap().push((method, request.clone()));
            self.reply.clone()
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn signer() -> Signer {
        Signer::new(SecretString::new("SecretKey01".to_string()))
    }

    fn settings() -> Arc<CheckoutSettings> {
        Arc::new(CheckoutSettings {
            shop_id: 5,
            shop_order_id: "101".to_string(),
            payer_account: "support@piastrix.com".to_string(),
            invoice_payway: "advcash_rub".to_string(),
            pay_url: "https://pay.piastrix.com/ru/pay".to_string(),
        })
    }

    fn handler(
        repository: Arc<MockPaymentLogRepository>,
        gateway: Arc<MockGateway>,
    ) -> SubmitCheckoutHandler {
        SubmitCheckoutHandler::new(
            repository,
            GatewayClient::new(signer(), gateway),
            settings(),
        )
    }

    fn command(amount: &str, currency: &str) -> SubmitCheckoutCommand {
        SubmitCheckoutCommand {
            amount: amount.to_string(),
            currency: currency.to_string(),
            description: Some("Blue widget".to_string()),
        }
    }

    fn unused_gateway() -> Arc<MockGateway> {
        Arc::new(MockGateway::replying(json!({})))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn usd_success_redirects_to_data_url() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({
            "data": {"url": "https://x"},
            "error_code": 0,
            "message": "Ok",
            "result": true
        })));

        let result = handler(repo.clone(), gateway.clone())
            .handle(command("10", "USD"))
            .await
            .unwrap();

        assert_eq!(
            result.outcome,
            CheckoutOutcome::Redirect {
                url: "https://x".to_string()
            }
        );
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, GatewayMethod::Bill);
        assert_eq!(calls[0].1.get("payer_account"), Some("support@piastrix.com"));
        assert_eq!(repo.entries().len(), 1);
        assert_eq!(repo.entries()[0].id(), result.log_id);
    }

    #[tokio::test]
    async fn usd_failure_passes_error_through() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({
            "data": null,
            "error_code": 3,
            "message": "Wrong sign"
        })));

        let err = handler(repo, gateway)
            .handle(command("10", "USD"))
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::gateway_rejected(3, "Wrong sign"));
    }

    #[tokio::test]
    async fn usd_success_without_url_is_malformed() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({"data": {"id": 1}})));

        let err = handler(repo, gateway)
            .handle(command("10", "USD"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::GatewayMalformed(_)));
    }

    #[tokio::test]
    async fn usd_skips_pay_limits() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({"data": {"url": "https://x"}})));

        let result = handler(repo, gateway.clone())
            .handle(command("0.001", "USD"))
            .await;

        assert!(result.is_ok());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn rub_success_renders_gateway_payment_form() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({
            "data": {
                "data": {"ac_account_email": "a@b.c", "ac_sign": "abc"},
                "method": "GET",
                "url": "https://wallet.advcash.com/sci/"
            },
            "error_code": 0,
            "message": "Ok"
        })));

        let result = handler(repo, gateway.clone())
            .handle(command("100", "RUB"))
            .await
            .unwrap();

        assert_eq!(
            result.outcome,
            CheckoutOutcome::PaymentForm(PaymentInstruction {
                method: "GET".to_string(),
                url: "https://wallet.advcash.com/sci/".to_string(),
                payway_data: PaywayData::Gateway(
                    json!({"ac_account_email": "a@b.c", "ac_sign": "abc"})
                ),
            })
        );
        let calls = gateway.calls();
        assert_eq!(calls[0].0, GatewayMethod::Invoice);
        assert_eq!(calls[0].1.get("payway"), Some("advcash_rub"));
        assert_eq!(calls[0].1.get("currency"), Some("643"));
    }

    #[tokio::test]
    async fn rub_reply_without_data_is_rejected_with_code_and_message() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({
            "error_code": 1001,
            "message": "Payway is disabled"
        })));

        let err = handler(repo, gateway)
            .handle(command("100", "RUB"))
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::gateway_rejected(1001, "Payway is disabled"));
    }

    #[tokio::test]
    async fn rub_success_missing_fields_is_malformed() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({
            "data": {"url": "https://x"}
        })));

        let err = handler(repo, gateway)
            .handle(command("100", "RUB"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::GatewayMalformed(_)));
    }

    #[tokio::test]
    async fn eur_never_calls_out_and_signs_locally() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = unused_gateway();

        let result = handler(repo.clone(), gateway.clone())
            .handle(command("10", "EUR"))
            .await
            .unwrap();

        assert!(gateway.calls().is_empty());
        assert_eq!(repo.entries().len(), 1);

        let CheckoutOutcome::PaymentForm(instruction) = result.outcome else {
            panic!("expected a payment form");
        };
        assert_eq!(instruction.method, "POST");
        assert_eq!(instruction.url, "https://pay.piastrix.com/ru/pay");

        let PaywayData::Signed(signed) = instruction.payway_data else {
            panic!("expected locally signed data");
        };
        let independent = signer().sign(
            [
                ("amount", "10.00"),
                ("currency", "978"),
                ("shop_id", "5"),
                ("shop_order_id", "101"),
                ("description", "Blue widget"),
            ],
            &["description"],
        );
        assert_eq!(signed.signature(), independent);
        assert_eq!(signed.fields().last().unwrap().0, "sign");
    }

    #[tokio::test]
    async fn uah_uses_the_pay_form() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = unused_gateway();

        let result = handler(repo, gateway.clone())
            .handle(command("10", "UAH"))
            .await
            .unwrap();

        assert!(gateway.calls().is_empty());
        let CheckoutOutcome::PaymentForm(instruction) = result.outcome else {
            panic!("expected a payment form");
        };
        let PaywayData::Signed(signed) = instruction.payway_data else {
            panic!("expected locally signed data");
        };
        assert_eq!(signed.get("currency"), Some("980"));
    }

    #[tokio::test]
    async fn eur_minimum_amount_is_accepted() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let result = handler(repo, unused_gateway())
            .handle(command("0.01", "EUR"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn eur_below_minimum_is_too_small_but_still_logged() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let err = handler(repo.clone(), unused_gateway())
            .handle(command("0.00999", "EUR"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::AmountTooSmall {
                amount: "0.00999".to_string()
            }
        );
        assert_eq!(repo.entries().len(), 1);
    }

    #[tokio::test]
    async fn eur_maximum_amount_is_accepted() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let result = handler(repo, unused_gateway())
            .handle(command("9999999999999998", "EUR"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn eur_above_maximum_is_too_large() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let err = handler(repo, unused_gateway())
            .handle(command("9999999999999999", "EUR"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::AmountTooLarge {
                amount: "9999999999999999".to_string()
            }
        );
    }

    #[tokio::test]
    async fn eur_exponent_beyond_decimal_range_is_too_large_but_still_logged() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let err = handler(repo.clone(), unused_gateway())
            .handle(command("1e30", "EUR"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::AmountTooLarge {
                amount: "1e30".to_string()
            }
        );
        assert_eq!(err.title(), "ERROR 5");
        assert_eq!(repo.entries().len(), 1);
    }

    #[tokio::test]
    async fn eur_amount_below_decimal_precision_is_too_small_but_still_logged() {
        for raw in ["1e-40", "0.00000000000000000000000000000001"] {
            let repo = Arc::new(MockPaymentLogRepository::new());
            let err = handler(repo.clone(), unused_gateway())
                .handle(command(raw, "EUR"))
                .await
                .unwrap_err();

            assert_eq!(
                err,
                CheckoutError::AmountTooSmall {
                    amount: raw.to_string()
                },
                "{raw}"
            );
            assert_eq!(err.title(), "ERROR 4");
            assert_eq!(repo.entries().len(), 1, "{raw}");
        }
    }

    #[tokio::test]
    async fn usd_amount_without_two_decimal_form_is_logged_but_never_sent() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({"data": {"url": "https://x"}})));

        let err = handler(repo.clone(), gateway.clone())
            .handle(command("1234567890123456789012345678", "USD"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::AmountTooLarge {
                amount: "1234567890123456789012345678".to_string()
            }
        );
        assert_eq!(repo.entries().len(), 1);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn rub_amount_beyond_decimal_range_is_never_sent() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({})));

        let err = handler(repo.clone(), gateway.clone())
            .handle(command("5E+40", "RUB"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::AmountTooLarge { .. }));
        assert_eq!(repo.entries().len(), 1);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn persistence_failure_stops_before_gateway() {
        let repo = Arc::new(MockPaymentLogRepository::failing());
        let gateway = Arc::new(MockGateway::replying(json!({"data": {"url": "https://x"}})));

        let err = handler(repo, gateway.clone())
            .handle(command("10", "USD"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::PersistenceFailure(_)));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_amount_is_neither_logged_nor_sent() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::replying(json!({"data": {"url": "https://x"}})));

        let err = handler(repo.clone(), gateway.clone())
            .handle(command("ten dollars", "USD"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::InvalidSubmission(_)));
        assert!(repo.entries().is_empty());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_currency_is_invalid_submission() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let err = handler(repo.clone(), unused_gateway())
            .handle(command("10", "GBP"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::InvalidSubmission(ValidationError::unsupported_value("currency", "GBP"))
        );
        assert!(repo.entries().is_empty());
    }

    #[tokio::test]
    async fn network_error_is_gateway_unavailable() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::erroring(GatewayError::Network(
            "connection refused".to_string(),
        )));

        let err = handler(repo.clone(), gateway)
            .handle(command("10", "RUB"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::GatewayUnavailable(_)));
        assert_eq!(repo.entries().len(), 1);
    }

    #[tokio::test]
    async fn non_json_reply_is_gateway_malformed() {
        let repo = Arc::new(MockPaymentLogRepository::new());
        let gateway = Arc::new(MockGateway::erroring(GatewayError::InvalidResponse(
            "expected value at line 1 column 1".to_string(),
        )));

        let err = handler(repo, gateway)
            .handle(command("10", "USD"))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::GatewayMalformed(_)));
    }

    #[test]
    fn gateway_payloads_flatten_to_form_fields() {
        let data = PaywayData::Gateway(json!({"a": "x", "b": 2, "c": null}));
        let mut fields = data.form_fields();
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), String::new()),
            ]
        );
        assert!(PaywayData::Gateway(json!("opaque")).form_fields().is_empty());
    }
}
