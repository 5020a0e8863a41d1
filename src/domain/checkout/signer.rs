//! Request signing.
//!
//! The gateway authenticates every request with a `sign` parameter computed
//! over the other parameters and the shop's secret key:
//!
//! 1. drop the excluded keys
//! 2. sort the remaining keys byte-wise
//! 3. join their values with `:`
//! 4. append the secret key with no separator
//! 5. SHA-256 the UTF-8 bytes and hex-encode in lowercase
//!
//! Values are not escaped, so a `:` inside a value is indistinguishable from
//! a separator. The gateway computes the same string, so this must stay
//! byte-for-byte identical.

use std::collections::BTreeMap;

use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

use super::GatewayRequest;

/// Name of the signature parameter.
pub const SIGN_FIELD: &str = "sign";

/// Computes request signatures with the shop's secret key.
#[derive(Debug, Clone)]
pub struct Signer {
    secret: SecretString,
}

impl Signer {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Signs a parameter set, skipping the `excluded` keys.
    ///
    /// Input order does not matter. If a key appears twice the last value
    /// wins, matching how the parameters collapse into a JSON object.
    pub fn sign<'a, I>(&self, params: I, excluded: &[&str]) -> String
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let canonical: BTreeMap<&str, &str> = params
            .into_iter()
            .filter(|(key, _)| !excluded.contains(key))
            .collect();

        let mut payload = canonical.into_values().collect::<Vec<_>>().join(":");
        payload.push_str(self.secret.expose_secret());

        hex_encode(&Sha256::digest(payload.as_bytes()))
    }

    /// Signs an ordered field list and appends `sign` as the last field.
    ///
    /// A caller-supplied `sign` field is dropped before hashing.
    pub fn sign_fields(&self, fields: Vec<(String, String)>, excluded: &[&str]) -> SignedRequest {
        let mut fields: Vec<(String, String)> = fields
            .into_iter()
            .filter(|(key, _)| key != SIGN_FIELD)
            .collect();

        let sign = self.sign(
            fields.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            excluded,
        );
        fields.push((SIGN_FIELD.to_string(), sign));

        SignedRequest { fields }
    }

    /// Signs a typed gateway request using its method's exclusion rules.
    pub fn sign_request<R: GatewayRequest>(&self, request: &R) -> SignedRequest {
        self.sign_fields(request.fields(), R::METHOD.excluded_from_sign())
    }
}

/// Ordered parameter set ending with its `sign` field.
///
/// Serializes as a JSON object in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    fields: Vec<(String, String)>,
}

impl SignedRequest {
    /// All fields in order, `sign` last.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The computed signature.
    pub fn signature(&self) -> &str {
        self.fields
            .last()
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }
}

impl Serialize for SignedRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Lowercase hex encoding.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
