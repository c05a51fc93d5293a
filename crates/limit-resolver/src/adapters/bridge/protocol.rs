use serde::{Deserialize, Serialize};

use crate::core::ResolvedLimit;

pub const PROTOCOL_VERSION: u32 = 1;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BridgeRequest {
    pub v: u32,
    pub id: String,
    pub cmd: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct BridgeResponse<T> {
    pub v: u32,
    pub id: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl<T> BridgeResponse<T> {
    pub fn ok(v: u32, id: String, data: T) -> Self {
        Self {
            v,
            id,
            status: "ok",
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn err(v: u32, id: String, code: &'static str, error: String) -> Self {
        Self {
            v,
            id,
            status: "error",
            data: None,
            error: Some(error),
            code: Some(code),
        }
    }
}

// Payloads

#[derive(Debug, Default, Deserialize)]
pub struct ResolvePayload {
    #[serde(default)]
    pub limit: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct PaginatePayload {
    #[serde(default)]
    pub limit: serde_json::Value,
    #[serde(default)]
    pub offset: usize,
    pub rows: Vec<serde_json::Value>,
}

// Response data

#[derive(Debug, Serialize)]
pub struct ResolveData {
    pub limit: ResolvedLimit,
    pub defaulted: bool,
}
