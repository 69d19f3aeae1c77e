//! Normalisation of backend responses.
//!
//! The backend answers with loosely shaped `Map<String, Object>` bodies: a
//! list may arrive bare or wrapped under a key, a message may or may not be
//! present. Everything here turns those bodies into typed results.

use hcms_core::api::ActionOutcome;
use hcms_core::error::{HcmsError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Default messages of one write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMessages {
    pub success: &'static str,
    pub failure: &'static str,
    pub network: &'static str,
}

pub const DELETE_DOCTOR: ActionMessages = ActionMessages {
    success: "Deletion successful.",
    failure: "Deletion failed.",
    network: "Network error: Deletion failed.",
};

pub const SAVE_DOCTOR: ActionMessages = ActionMessages {
    success: "Doctor saved successfully.",
    failure: "Doctor save failed.",
    network: "Network error: Doctor save failed.",
};

pub const BOOK_APPOINTMENT: ActionMessages = ActionMessages {
    success: "Appointment booked successfully.",
    failure: "Failed to book appointment.",
    network: "Network error: Failed to book appointment.",
};

pub const UPDATE_APPOINTMENT: ActionMessages = ActionMessages {
    success: "Appointment updated successfully.",
    failure: "Failed to update appointment.",
    network: "Network error: Failed to update appointment.",
};

pub const SAVE_PRESCRIPTION: ActionMessages = ActionMessages {
    success: "Prescription saved successfully.",
    failure: "Failed to save prescription.",
    network: "Network error: Failed to save prescription.",
};

pub const PATIENT_SIGNUP: ActionMessages = ActionMessages {
    success: "Registration completed successfully.",
    failure: "Registration failed.",
    network: "Network error: Registration failed.",
};

/// The server's own explanation, if the body carries one.
pub fn server_message(body: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Folds a write response into an [`ActionOutcome`].
pub fn action_outcome(status: u16, body: Option<Value>, messages: &ActionMessages) -> ActionOutcome {
    let success = (200..300).contains(&status);
    let message = body.as_ref().and_then(server_message).unwrap_or_else(|| {
        if success {
            messages.success.to_string()
        } else {
            messages.failure.to_string()
        }
    });
    ActionOutcome {
        success,
        message,
        data: body.filter(|b| !b.is_null()),
    }
}

/// Outcome of a write whose request never got a response.
pub fn network_outcome(messages: &ActionMessages) -> ActionOutcome {
    ActionOutcome::failed(messages.network)
}

/// Maps a non-success status of a fetch call.
pub fn status_error(status: u16, body: Option<&Value>) -> HcmsError {
    let message = body
        .and_then(server_message)
        .unwrap_or_else(|| format!("request failed with status {}", status));
    match status {
        401 | 403 => HcmsError::Unauthorized(message),
        _ => HcmsError::http(status, message),
    }
}

/// Maps a failure to obtain a response at all.
pub fn transport_error(err: &reqwest::Error) -> HcmsError {
    if err.is_timeout() {
        HcmsError::network("request timed out")
    } else if err.is_decode() {
        HcmsError::payload(err.to_string())
    } else {
        HcmsError::network(err.to_string())
    }
}

/// Parses a response body; an empty body is `null`.
pub fn parse_body(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| HcmsError::payload(format!("invalid JSON body: {}", e)))
}

/// Accepts a bare array or an object wrapping one under `key`. A wrapped
/// `null` is an empty list.
pub fn list<T: DeserializeOwned>(body: Value, key: &str) -> Result<Vec<T>> {
    let items = match body {
        Value::Array(_) => body,
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Null) => return Ok(Vec::new()),
            Some(inner @ Value::Array(_)) => inner,
            Some(other) => {
                return Err(HcmsError::payload(format!(
                    "'{}' is not a list: {}",
                    key, other
                )));
            }
            None => return Err(HcmsError::payload(format!("missing '{}' list", key))),
        },
        other => return Err(HcmsError::payload(format!("expected a list, got {}", other))),
    };
    serde_json::from_value(items).map_err(|e| HcmsError::payload(format!("bad '{}' item: {}", key, e)))
}

/// Accepts an object wrapped under `key` or the bare object itself.
pub fn object<T: DeserializeOwned>(body: Value, key: &str) -> Result<T> {
    optional_object(body, key)?.ok_or_else(|| HcmsError::payload(format!("missing '{}'", key)))
}

/// Like [`object`], with `null` and empty lists read as absent. A list
/// yields its first element.
pub fn optional_object<T: DeserializeOwned>(body: Value, key: &str) -> Result<Option<T>> {
    let inner = match body {
        Value::Object(mut map) if map.contains_key(key) => map.remove(key).unwrap_or(Value::Null),
        other => other,
    };
    let inner = match inner {
        Value::Null => return Ok(None),
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        other => other,
    };
    serde_json::from_value(inner)
        .map(Some)
        .map_err(|e| HcmsError::payload(format!("bad '{}': {}", key, e)))
}

/// Extracts the issued token from a login response.
pub fn token(body: &Value) -> Result<String> {
    body.get("token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| HcmsError::payload("login response carried no token"))
}
