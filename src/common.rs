use serde::{Deserialize, Serialize};

use crate::{CacherError, Result};

/// Procedure name for lookups.
pub const GET_METHOD: &str = "Cacher.Get";
/// Procedure name for stores.
pub const SET_METHOD: &str = "Cacher.Set";

/// Arguments of `Cacher.Get`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRequest {
    /// The key to look up.
    pub key: String,
}

/// Reply of `Cacher.Get`.
///
/// `value` is only meaningful when `ok` is true; otherwise `error` holds
/// the cause.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetResponse {
    /// The stored value.
    pub value: String,
    /// Whether the lookup succeeded.
    pub ok: bool,
    /// Human-readable failure cause.
    pub error: String,
}

impl GetResponse {
    /// Converts the `ok`/`error` pair into a `Result`.
    pub fn into_result(self) -> Result<String> {
        if self.ok {
            Ok(self.value)
        } else {
            Err(CacherError::Application(self.error))
        }
    }
}

/// Arguments of `Cacher.Set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetRequest {
    /// The key to set.
    pub key: String,
    /// The value to associate with the key.
    pub value: String,
}

/// Reply of `Cacher.Set`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SetResponse {
    /// Whether the store succeeded.
    pub ok: bool,
    /// Human-readable failure cause.
    pub error: String,
}

impl SetResponse {
    /// Converts the `ok`/`error` pair into a `Result`.
    pub fn into_result(self) -> Result<()> {
        if self.ok {
            Ok(())
        } else {
            Err(CacherError::Application(self.error))
        }
    }
}

/// Call envelope sent from client to service.
#[derive(Debug, Serialize, Deserialize)]
pub struct RpcRequest<P> {
    /// Fully qualified procedure name, e.g. `Cacher.Get`.
    pub method: String,
    /// Positional parameters; Cacher procedures take exactly one.
    pub params: [P; 1],
    /// Per-connection sequence number echoed back in the response.
    pub id: u64,
}

/// Reply envelope sent from service to client.
#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<R> {
    /// Sequence number of the request this answers.
    pub id: u64,
    /// Procedure result, absent when the call failed.
    pub result: Option<R>,
    /// Call-level failure, `null` on success.
    pub error: Option<String>,
}
