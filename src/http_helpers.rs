use crate::errors::RelayerApiError;
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(30);

pub fn build_http_client() -> Result<Client, RelayerApiError> {
    Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(|e| RelayerApiError::Request(format!("failed to create client: {e}")))
}

pub async fn request<T: Serialize + ?Sized>(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&T>,
) -> Result<Value, RelayerApiError> {
    let mut req = client.request(method, url);
    if let Some(body) = body {
        req = req.json(body);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| RelayerApiError::Request(format!("request failed: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_else(|_| "unknown error".to_string());
        return Err(RelayerApiError::Api { status: status.as_u16(), body });
    }

    resp.json::<Value>()
        .await
        .map_err(|e| RelayerApiError::Request(format!("failed to parse JSON: {e}")))
}

pub async fn get(client: &Client, url: &str) -> Result<Value, RelayerApiError> {
    request::<Value>(client, Method::GET, url, None).await
}

pub async fn post<T: Serialize>(
    client: &Client,
    url: &str,
    body: &T,
) -> Result<Value, RelayerApiError> {
    request(client, Method::POST, url, Some(body)).await
}
