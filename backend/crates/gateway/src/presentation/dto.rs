//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracking::TrackingDatas;

use crate::domain::value_objects::Outcome;

/// Payload sent back for a body that is not JSON at all
pub const INVALID_JSON_PAYLOAD: &str = "Invalid JSON";

/// Request body for POST /
///
/// Every field is optional at this layer; which ones a mode needs is checked
/// by the dispatcher.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRequest {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub tracking_datas: Option<TrackingDatas>,
}

/// Response envelope for every request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub result: Outcome,
    pub payload: Value,
}

impl Envelope {
    pub fn success(payload: Value) -> Self {
        Self {
            result: Outcome::Success,
            payload,
        }
    }

    /// Failure with an empty object payload
    pub fn failed() -> Self {
        Self {
            result: Outcome::Failed,
            payload: Value::Object(Default::default()),
        }
    }

    pub fn invalid_json() -> Self {
        Self {
            result: Outcome::Failed,
            payload: Value::String(INVALID_JSON_PAYLOAD.to_string()),
        }
    }
}

/// Success payload of CREATE and AUTHENTICATE
#[derive(Debug, Clone, Serialize)]
pub struct TokenPayload {
    pub token: String,
}

/// Success payload of PULL
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PullPayload {
    pub tracking_datas: TrackingDatas,
}
