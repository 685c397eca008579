//! Financial Modeling Prep growth-statement client.
//!
//! API: `{base_url}/financial-growth?symbol=..&limit=..&apikey=..`
//! Auth: API key via `apikey` query param, resolved from the environment.
//! The full URL carries the key, so it is never logged.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use tracing::debug;

use super::GrowthProvider;
use crate::config::GrowthApiConfig;
use crate::types::DeskError;

/// Longest slice of an error body echoed back in `DeskError::Api`.
const MAX_ERROR_BODY: usize = 200;

pub struct FmpGrowthClient {
    http: Client,
    base_url: String,
    api_key: SecretString,
}

impl FmpGrowthClient {
    pub fn new(cfg: &GrowthApiConfig, api_key: SecretString) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(concat!("tickerdesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build growth API HTTP client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn growth_url(&self, symbol: &str, limit: u32) -> String {
        format!(
            "{}/financial-growth?symbol={}&limit={limit}&apikey={}",
            self.base_url,
            urlencoding::encode(symbol),
            urlencoding::encode(self.api_key.expose_secret()),
        )
    }
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl GrowthProvider for FmpGrowthClient {
    async fn fetch_growth(&self, symbol: &str, limit: u32) -> Result<serde_json::Value> {
        debug!(symbol, limit, base_url = %self.base_url, "Requesting financial growth");

        let resp = self
            .http
            .get(self.growth_url(symbol, limit))
            .send()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Growth request failed for {symbol}"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DeskError::Api {
                status: status.as_u16(),
                message: truncate(body.trim()),
            }
            .into());
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| e.without_url())
            .with_context(|| format!("Failed to parse growth response for {symbol}"))?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::run_probe;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// Serve one canned HTTP response on an ephemeral port. The handle
    /// yields the raw request head the client sent.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut chunk = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });
        (format!("http://{addr}"), handle)
    }

    fn client(base_url: &str) -> FmpGrowthClient {
        let cfg = GrowthApiConfig {
            base_url: base_url.to_string(),
            ..GrowthApiConfig::default()
        };
        FmpGrowthClient::new(&cfg, SecretString::new("k3y/+".to_string())).unwrap()
    }

    #[test]
    fn test_growth_url() {
        let c = client("https://financialmodelingprep.com/stable/");
        assert_eq!(
            c.growth_url("AAPL", 1),
            "https://financialmodelingprep.com/stable/financial-growth?symbol=AAPL&limit=1&apikey=k3y%2F%2B"
        );
    }

    #[test]
    fn test_growth_url_encodes_symbol() {
        let c = client("http://localhost:9");
        let url = c.growth_url("A&B", 5);
        assert!(url.contains("symbol=A%26B&limit=5"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        let long = "x".repeat(MAX_ERROR_BODY + 10);
        let t = truncate(&long);
        assert_eq!(t.len(), MAX_ERROR_BODY + 3);
        assert!(t.ends_with("..."));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let c = client("http://127.0.0.1:9");
        let err = c.fetch_growth("AAPL", 1).await.unwrap_err();
        assert!(!format!("{err:#}").contains("k3y"));
    }

    #[tokio::test]
    async fn test_success_body_printed_in_api_key_order() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"symbol":"AAPL","date":"2024-09-28","revenueGrowth":0.02}]"#,
        );
        let c = client(&base);

        let mut out = Vec::new();
        assert!(run_probe(&c, "AAPL", 1, &mut out).await.unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(
            "[\n  {\n    \"symbol\": \"AAPL\",\n    \"date\": \"2024-09-28\",\n    \"revenueGrowth\": 0.02"
        ));

        let request = server.join().unwrap();
        assert!(request.starts_with(
            "GET /financial-growth?symbol=AAPL&limit=1&apikey=k3y%2F%2B HTTP/1.1"
        ));
    }

    #[tokio::test]
    async fn test_error_message_body_with_200_is_passed_through() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", r#"{"Error Message":"Limit Reach"}"#);
        let c = client(&base);

        let data = c.fetch_growth("AAPL", 1).await.unwrap();
        assert_eq!(data, json!({ "Error Message": "Limit Reach" }));
        server.join().unwrap();

        let (base, server) = serve_once("HTTP/1.1 200 OK", r#"{"Error Message":"Limit Reach"}"#);
        let c = client(&base);
        let mut out = Vec::new();
        assert!(run_probe(&c, "AAPL", 1, &mut out).await.unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\n  \"Error Message\": \"Limit Reach\"\n}\n"
        );
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let (base, server) =
            serve_once("HTTP/1.1 401 Unauthorized", r#"{"Error Message":"Invalid API KEY."}"#);
        let c = client(&base);

        let err = c.fetch_growth("AAPL", 1).await.unwrap_err();
        match err.downcast_ref::<DeskError>() {
            Some(DeskError::Api { status, message }) => {
                assert_eq!(*status, 401);
                assert!(message.contains("Invalid API KEY."));
            }
            other => panic!("expected DeskError::Api, got {other:?}"),
        }
        assert!(!format!("{err:#}").contains("k3y"));
        server.join().unwrap();
    }
}
