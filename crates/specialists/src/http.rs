//! Shared HTTP plumbing for the remote specialist services.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Result, SpecialistError};
use crate::kind::SpecialistKind;

/// A `reqwest` client bound to one base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Creates a transport with a default client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a transport around an existing client.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins a path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POSTs `body` as JSON and decodes the JSON response.
    pub async fn post_json<B, T>(&self, specialist: SpecialistKind, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%specialist, %url, "calling specialist endpoint");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(specialist, e))?;

        decode(specialist, response).await
    }

    /// GETs `path` with the given query parameters and decodes the JSON response.
    pub async fn get_json<T>(
        &self,
        specialist: SpecialistKind,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%specialist, %url, "calling specialist endpoint");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(specialist, e))?;

        decode(specialist, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    specialist: SpecialistKind,
    response: reqwest::Response,
) -> Result<T> {
    let status = response.status();
    tracing::debug!(%specialist, status = status.as_u16(), "specialist responded");

    if !status.is_success() {
        return Err(SpecialistError::Status {
            specialist,
            status: status.as_u16(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| transport_error(specialist, e))?;

    serde_json::from_slice(&body).map_err(|e| SpecialistError::Decode {
        specialist,
        message: e.to_string(),
    })
}

fn transport_error(specialist: SpecialistKind, err: reqwest::Error) -> SpecialistError {
    SpecialistError::Transport {
        specialist,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let transport = HttpTransport::new("http://localhost:5000/");
        assert_eq!(transport.base_url(), "http://localhost:5000");
        assert_eq!(
            transport.endpoint("/api/search/llm"),
            "http://localhost:5000/api/search/llm"
        );
    }
}
