//! Continuation checkpoints and their opaque token encoding
//!
//! A token is the checkpoint serialized as JSON, then base64 (URL-safe, no
//! padding). Stored values keep their kind tag, so *absent* and `null`
//! resume keys stay distinct across a round trip.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::QueryError;
use crate::value::Value;

/// Resume position of a paginated scan. Never mutated once encoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Identifier of the first row of the next page
    #[serde(rename = "RID")]
    pub rid: Value,
    /// Request round, 1 for the first continuation
    #[serde(rename = "RT")]
    pub round: u64,
    /// Rows sharing `rid` that were already returned
    #[serde(rename = "SRC")]
    pub skip: u64,
    /// Rows returned so far across all pages
    #[serde(rename = "TRC")]
    pub total: u64,
    /// ORDER BY keys of the next row, one per clause
    #[serde(rename = "RTD", default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<Vec<Value>>,
}

/// Token codec failures
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("continuation token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("continuation token is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<TokenError> for QueryError {
    fn from(err: TokenError) -> Self {
        QueryError::invalid_continuation(err.to_string())
    }
}

impl Checkpoint {
    /// Encodes into an opaque, string-safe token
    pub fn encode(&self) -> Result<String, TokenError> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decodes a token produced by [`Checkpoint::encode`]
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
