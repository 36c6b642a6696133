use crate::domain::ports::{Probe, ProbeOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::time::Duration;
use url::Url;

/// 以 HTTPS HEAD 請求探測 URL；不跟隨轉址，3xx 視為可連線
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    allow_plain_http: bool,
}

impl HttpProbe {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("catalog-check/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            allow_plain_http: false,
        })
    }

    /// 允許 http:// (本機鏡像或測試伺服器)
    pub fn allow_plain_http(mut self) -> Self {
        self.allow_plain_http = true;
        self
    }

    fn check_scheme(&self, url: &str) -> std::result::Result<(), String> {
        let parsed = Url::parse(url).map_err(|e| format!("Invalid URL format: {}", e))?;
        match parsed.scheme() {
            "https" => Ok(()),
            "http" if self.allow_plain_http => Ok(()),
            _ => Err("URL should use HTTPS protocol".to_string()),
        }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeOutcome {
        if let Err(reason) = self.check_scheme(url) {
            tracing::debug!("HEAD {} skipped: {}", url, reason);
            return ProbeOutcome::Error { reason };
        }

        let request = self.client.head(url).timeout(timeout).send();

        // 外層 timeout 也涵蓋 DNS 與連線建立
        let outcome = match tokio::time::timeout(timeout, request).await {
            Err(_) => ProbeOutcome::Timeout,
            Ok(Err(e)) if e.is_timeout() => ProbeOutcome::Timeout,
            Ok(Err(e)) => ProbeOutcome::Error {
                reason: e.to_string(),
            },
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                if status < 400 {
                    ProbeOutcome::Reachable { status }
                } else {
                    ProbeOutcome::Error {
                        reason: format!("HTTP {}", status),
                    }
                }
            }
        };

        tracing::debug!("HEAD {} -> {}", url, outcome.describe());
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use httpmock::Method::HEAD;

    fn local_probe() -> HttpProbe {
        HttpProbe::new().unwrap().allow_plain_http()
    }

    #[tokio::test]
    async fn test_success_and_redirect_are_reachable() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/ok");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(HEAD).path("/moved");
            then.status(301).header("Location", "http://127.0.0.1:1/gone");
        });

        let probe = local_probe();
        let timeout = Duration::from_secs(5);

        assert_eq!(
            probe.probe(&server.url("/ok"), timeout).await,
            ProbeOutcome::Reachable { status: 200 }
        );
        assert_eq!(
            probe.probe(&server.url("/moved"), timeout).await,
            ProbeOutcome::Reachable { status: 301 }
        );
    }

    #[tokio::test]
    async fn test_error_status_is_unreachable() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(HEAD).path("/missing");
            then.status(404);
        });

        let outcome = local_probe()
            .probe(&server.url("/missing"), Duration::from_secs(5))
            .await;

        mock.assert();
        assert_eq!(
            outcome,
            ProbeOutcome::Error {
                reason: "HTTP 404".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_slow_host_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(HEAD).path("/slow");
            then.status(200).delay(Duration::from_secs(2));
        });

        let outcome = local_probe()
            .probe(&server.url("/slow"), Duration::from_millis(200))
            .await;

        assert_eq!(outcome, ProbeOutcome::Timeout);
    }

    #[tokio::test]
    async fn test_malformed_url_is_normalized_to_error() {
        let outcome = local_probe()
            .probe("not a url", Duration::from_secs(1))
            .await;

        assert!(matches!(outcome, ProbeOutcome::Error { .. }));
    }

    #[tokio::test]
    async fn test_plain_http_is_rejected_without_a_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(HEAD).path("/ok");
            then.status(200);
        });

        let probe = HttpProbe::new().unwrap();
        let outcome = probe.probe(&server.url("/ok"), Duration::from_secs(5)).await;

        mock.assert_hits(0);
        assert_eq!(
            outcome,
            ProbeOutcome::Error {
                reason: "URL should use HTTPS protocol".to_string()
            }
        );
        assert!(!outcome.is_reachable());

        let ftp = probe.probe("ftp://files.example.com/a", Duration::from_secs(1)).await;
        assert!(matches!(ftp, ProbeOutcome::Error { reason } if reason.contains("HTTPS")));
    }
}
