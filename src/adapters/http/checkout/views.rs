//! HTML rendering for the checkout page, payment forms and error fragments.
//!
//! Every value that did not originate in this crate (form input, gateway
//! payloads and messages) goes through `escape_html` before it is written
//! into markup.

use crate::application::PaymentInstruction;
use crate::domain::checkout::{CheckoutError, Currency};

/// Currencies offered in the checkout form's select box.
const FORM_CURRENCIES: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Rub];

/// Tail appended to every error fragment.
const RETURN_HINT: &str = "Please return to form and enter a valid data.";

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Checkout page served on `GET /`.
pub fn render_checkout_page() -> String {
    let options: String = FORM_CURRENCIES
        .iter()
        .map(|c| format!(r#"<option value="{code}">{code}</option>"#, code = c.as_str()))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>Checkout</title></head>
<body>
<form method="post" action="/">
<label>Amount <input type="text" name="amount" required></label>
<label>Currency <select name="currency">{options}</select></label>
<label>Description <textarea name="description"></textarea></label>
<button type="submit">Pay</button>
</form>
</body>
</html>"#
    )
}

/// Auto-submitting form that hands the payer over to the gateway.
pub fn render_payment_form(instruction: &PaymentInstruction) -> String {
    let inputs: String = instruction
        .payway_data
        .form_fields()
        .iter()
        .map(|(name, value)| {
            format!(
                r#"<input type="hidden" name="{}" value="{}">"#,
                escape_html(name),
                escape_html(value)
            )
        })
        .collect();

    format!(
        r#"<form id="payment-form" method="{method}" action="{url}">{inputs}<noscript><button type="submit">Continue</button></noscript></form>
<script>document.getElementById("payment-form").submit();</script>"#,
        method = escape_html(&instruction.method),
        url = escape_html(&instruction.url),
    )
}

/// Error fragment, e.g. `<h2>[ERROR 4] – ...</h2>`.
pub fn render_error(error: &CheckoutError) -> String {
    format!(
        "<h2>[{}] – {}<br>{}</h2>",
        escape_html(&error.title()),
        escape_html(&error.user_message()),
        RETURN_HINT
    )
}
