//! Typed backend operations
//!
//! Each operation is a registry lookup plus one wrapper call:
//! [`ApiClient::call`] when a payload comes back, [`ApiClient::call_ack`]
//! when only the status matters. None of them special-cases the response
//! handling.

mod analytics;
mod auth;
mod folders;
mod links;
mod organizations;
mod tags;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Encode a request payload as a JSON body
fn json_body(payload: &impl Serialize) -> ApiResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ApiError::Encode(e.to_string()))
}
