//! HTTP plumbing shared by the facade groups

use reqwest::{Client as HttpClient, Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use crate::deferred::Deferred;
use crate::error::{Result, SdkError, TransportError};
use crate::model::Acknowledgement;
use crate::target::ConnectionTarget;

/// Stateless dispatcher around one shared HTTP client
///
/// Cloning is cheap; every clone shares the same connection pool.
#[derive(Clone, Debug)]
pub(crate) struct Transport {
    http_client: HttpClient,
}

impl Transport {
    pub(crate) fn new(request_timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SdkError::config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(http_client))
    }

    pub(crate) fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// GET a JSON document; non-2xx is a transport error
    pub(crate) fn get_json<T>(
        &self,
        target: ConnectionTarget,
        operation: &'static str,
        path: &[&str],
        query: Vec<(&'static str, String)>,
    ) -> Result<Deferred<T>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let url = target.endpoint(path)?;
        let request = self.http_client.get(url).query(&query);
        Deferred::spawn(target, operation, async move {
            let response = checked(request.send().await?).await?;
            let body = response.bytes().await?;
            Ok::<T, TransportError>(serde_json::from_slice(&body)?)
        })
    }

    /// GET a plain text body; non-2xx is a transport error
    pub(crate) fn get_text(
        &self,
        target: ConnectionTarget,
        operation: &'static str,
        path: &[&str],
    ) -> Result<Deferred<String>> {
        let url = target.endpoint(path)?;
        let request = self.http_client.get(url);
        Deferred::spawn(target, operation, async move {
            let response = checked(request.send().await?).await?;
            Ok::<_, TransportError>(response.text().await?)
        })
    }

    /// Sends a mutating request; the status is reported in the acknowledgement
    pub(crate) fn acknowledge<B>(
        &self,
        target: ConnectionTarget,
        operation: &'static str,
        method: Method,
        path: &[&str],
        body: Option<&B>,
    ) -> Result<Deferred<Acknowledgement>>
    where
        B: Serialize + ?Sized,
    {
        let url = target.endpoint(path)?;
        let mut request = self.http_client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        Deferred::spawn(target, operation, async move {
            let response = request.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok::<_, TransportError>(Acknowledgement {
                operation,
                status,
                body: body.trim().to_string(),
            })
        })
    }
}

async fn checked(response: Response) -> std::result::Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(TransportError::UnexpectedStatus {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}
