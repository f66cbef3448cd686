//! GraphQL Client
//!
//! Minimal GraphQL-over-HTTP client: one POST per operation, JSON in and out.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<D> {
    data: Option<D>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

/// HTTP client bound to one GraphQL endpoint
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GraphQlClient {
    /// Create a client for `endpoint` with a per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run one operation and decode its `data` member
    #[tracing::instrument(skip(self, document, variables), fields(endpoint = %self.endpoint))]
    pub async fn query<V, D>(&self, document: &str, variables: &V) -> Result<D>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: document,
                variables,
            })
            .send()
            .await?
            .error_for_status()?;

        let body = response.bytes().await?;
        tracing::debug!(bytes = body.len(), "GraphQL response received");
        decode_response(&body)
    }
}

/// Decode a GraphQL response body.
///
/// Errors without data fail the call; errors next to data are logged and the
/// data is kept.
pub(crate) fn decode_response<D: DeserializeOwned>(body: &[u8]) -> Result<D> {
    let response: GraphQlResponse<D> = serde_json::from_slice(body)?;
    let messages = || {
        response
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };

    match response.data {
        Some(data) => {
            if !response.errors.is_empty() {
                tracing::warn!(errors = %messages(), "GraphQL response carried partial errors");
            }
            Ok(data)
        }
        None if response.errors.is_empty() => Err(Error::GraphQl {
            message: "response contained no data".to_string(),
        }),
        None => Err(Error::GraphQl { message: messages() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Data {
        value: u32,
    }

    #[test]
    fn test_decode_data() {
        let data: Data = decode_response(br#"{"data": {"value": 3}}"#).expect("decode");
        assert_eq!(data, Data { value: 3 });
    }

    #[test]
    fn test_decode_errors_without_data() {
        let body = br#"{"data": null, "errors": [{"message": "bad page"}, {"message": "oops"}]}"#;
        let err = decode_response::<Data>(body).expect_err("should fail");
        assert!(matches!(err, Error::GraphQl { ref message } if message == "bad page; oops"));
    }

    #[test]
    fn test_decode_partial_errors_keep_data() {
        let body = br#"{"data": {"value": 1}, "errors": [{"message": "minor"}]}"#;
        let data: Data = decode_response(body).expect("decode");
        assert_eq!(data.value, 1);
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(matches!(decode_response::<Data>(b"{}"), Err(Error::GraphQl { .. })));
        assert!(matches!(decode_response::<Data>(b"not json"), Err(Error::Json { .. })));
    }
}
