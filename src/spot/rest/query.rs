//! Query string construction for REST requests.
//!
//! Parameters are any `Serialize` value that flattens to a map of scalar
//! fields. Keys are sorted before encoding so the same parameters always
//! produce the same query string, and therefore the same signature.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::auth::{Credentials, sign_query};
use crate::error::BinanceError;

/// Query key carrying the request time on signed requests.
pub const TIMESTAMP_PARAM: &str = "timestamp";
/// Query key carrying the HMAC on signed requests. Always the last parameter.
pub const SIGNATURE_PARAM: &str = "signature";

/// Flatten parameters into sorted key/value pairs.
///
/// Strings are used verbatim, numbers and booleans use their JSON rendering,
/// and `null` fields (e.g. `None`) are omitted. NaN and infinite floats are
/// rejected. A unit or `None` value means no parameters.
pub fn flatten_params<P>(params: &P) -> Result<BTreeMap<String, String>, BinanceError>
where
    P: Serialize + ?Sized,
{
    let value = serde_json::to_value(params)
        .map_err(|e| BinanceError::InvalidParams(e.to_string()))?;

    let fields = match value {
        Value::Null => return Ok(BTreeMap::new()),
        Value::Object(fields) => fields,
        other => {
            return Err(BinanceError::InvalidParams(format!(
                "expected a struct or map of fields, got {}",
                value_kind(&other)
            )));
        }
    };

    if fields.values().any(Value::is_null) {
        reject_non_finite(params, &fields)?;
    }

    let mut flat = BTreeMap::new();
    for (key, value) in fields {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            nested @ (Value::Array(_) | Value::Object(_)) => {
                return Err(BinanceError::InvalidParams(format!(
                    "field `{key}` is {}, only scalar values are supported",
                    value_kind(&nested)
                )));
            }
        };
        flat.insert(key, rendered);
    }

    Ok(flat)
}

/// `serde_json` renders NaN and infinities as `null`, which would otherwise
/// drop the field the same way as `None`. Form encoding keeps them, so any
/// `null` field that still has a value there was a non-finite float.
fn reject_non_finite<P>(params: &P, fields: &Map<String, Value>) -> Result<(), BinanceError>
where
    P: Serialize + ?Sized,
{
    // Nested values fail here; the caller reports those with a better message.
    let Ok(encoded) = serde_urlencoded::to_string(params) else {
        return Ok(());
    };
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&encoded)
        .map_err(|e| BinanceError::InvalidParams(e.to_string()))?;

    for (key, value) in pairs {
        let was_null = fields.get(&key).is_some_and(Value::is_null);
        if was_null && value.parse::<f64>().is_ok_and(|f| !f.is_finite()) {
            return Err(BinanceError::InvalidParams(format!(
                "field `{key}` is {value}, only finite numbers are supported"
            )));
        }
    }
    Ok(())
}

/// Build the form-encoded query string for an unsigned request.
///
/// # Example
///
/// ```rust
/// use binance_api_client::spot::rest::build_query;
///
/// #[derive(serde::Serialize)]
/// struct Params {
///     symbol: &'static str,
///     limit: u32,
/// }
///
/// let query = build_query(&Params { symbol: "BTCUSDT", limit: 5 }).unwrap();
/// assert_eq!(query, "limit=5&symbol=BTCUSDT");
/// ```
pub fn build_query<P>(params: &P) -> Result<String, BinanceError>
where
    P: Serialize + ?Sized,
{
    encode(&flatten_params(params)?)
}

/// Build the query string for a signed request.
///
/// The sorted parameters are followed by `timestamp`, and the HMAC of that
/// string is appended as the final `signature` parameter.
pub fn build_signed_query<P>(
    params: &P,
    credentials: &Credentials,
    timestamp_ms: u64,
) -> Result<String, BinanceError>
where
    P: Serialize + ?Sized,
{
    let flat = flatten_params(params)?;
    for reserved in [TIMESTAMP_PARAM, SIGNATURE_PARAM] {
        if flat.contains_key(reserved) {
            return Err(BinanceError::InvalidParams(format!(
                "`{reserved}` is set by the client on signed requests"
            )));
        }
    }

    let mut pairs: Vec<(&str, String)> = flat
        .iter()
        .map(|(k, v)| (k.as_str(), v.clone()))
        .collect();
    pairs.push((TIMESTAMP_PARAM, timestamp_ms.to_string()));

    let unsigned = serde_urlencoded::to_string(&pairs)
        .map_err(|e| BinanceError::InvalidParams(e.to_string()))?;
    let signature = sign_query(credentials, &unsigned)?;

    Ok(format!("{unsigned}&{SIGNATURE_PARAM}={signature}"))
}

fn encode(flat: &BTreeMap<String, String>) -> Result<String, BinanceError> {
    serde_urlencoded::to_string(flat).map_err(|e| BinanceError::InvalidParams(e.to_string()))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
