use std::time::Duration;

use anyhow::Context;
use log::{debug, info};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{
    error::SndsError,
    inputs::{AccessKey, ReportDate},
};

pub const DEFAULT_ENDPOINT: &str = "https://sendersupport.olc.protection.outlook.com/snds/";

const IP_STATUS_PATH: &str = "ipStatus.aspx";
const USAGE_DATA_PATH: &str = "data.aspx";

/// Client for the SNDS automated data access reports
#[derive(Debug, Clone)]
pub struct SndsClient {
    client: Client,
    endpoint: Url,
    key: AccessKey,
}

impl SndsClient {
    pub fn new(endpoint: Url, key: AccessKey, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("snds/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self::with_client(client, endpoint, key))
    }

    pub fn with_client(client: Client, endpoint: Url, key: AccessKey) -> Self {
        Self {
            client,
            endpoint,
            key,
        }
    }

    /// Raw ip status report (blocked ranges)
    pub async fn ip_status(&self) -> Result<String, SndsError> {
        let url = self.report_url("ip status", IP_STATUS_PATH, None)?;
        self.fetch("ip status", url).await
    }

    /// Raw usage data report, for the most recent day unless `date` is given
    pub async fn usage_data(&self, date: Option<&ReportDate>) -> Result<String, SndsError> {
        let url = self.report_url("usage data", USAGE_DATA_PATH, date)?;
        self.fetch("usage data", url).await
    }

    fn report_url(
        &self,
        report: &'static str,
        path: &str,
        date: Option<&ReportDate>,
    ) -> Result<Url, SndsError> {
        let mut url = self.endpoint.join(path).map_err(|e| SndsError::Fetch {
            report,
            reason: format!("invalid endpoint '{}': {e}", self.endpoint),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("key", self.key.as_str());
            if let Some(date) = date {
                query.append_pair("date", &date.to_string());
            }
        }
        Ok(url)
    }

    async fn fetch(&self, report: &'static str, url: Url) -> Result<String, SndsError> {
        let fetch_error = |reason: String| SndsError::Fetch { report, reason };

        info!(target: "snds", "Fetching {report} report");
        // the access key is part of the query, keep it out of the logs
        debug!(target: "snds", "GET {}{}", url.origin().ascii_serialization(), url.path());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(fetch_error(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(format!("failed to read response body: {e}")))?;
        info!(target: "snds", "Fetched {report} report - {} bytes", body.len());
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        sync::oneshot,
    };

    /// Serve one canned HTTP response and report the request line back
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> Result<(Url, oneshot::Receiver<String>)> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await?;
            let mut request = Vec::new();
            let mut buf = [0; 1024];
            while !request.ends_with(b"\r\n\r\n") {
                let n = stream.read(&mut buf).await?;
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let request = String::from_utf8_lossy(&request);
            let _ = tx.send(request.lines().next().unwrap_or_default().to_owned());
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await?;
            stream.shutdown().await?;
            anyhow::Ok(())
        });
        Ok((format!("http://{addr}/snds/").parse::<Url>()?, rx))
    }

    fn client(endpoint: Url) -> Result<SndsClient> {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(SndsClient::with_client(client, endpoint, "test-key".parse()?))
    }

    #[tokio::test]
    async fn fetches_ip_status() -> Result<()> {
        let body = "1.1.1.0,1.1.1.1,Yes,Blocked\r\n";
        let (endpoint, request) = serve_once("200 OK", body).await?;
        assert_eq!(client(endpoint)?.ip_status().await?, body);
        assert_eq!(
            request.await?,
            "GET /snds/ipStatus.aspx?key=test-key HTTP/1.1"
        );
        Ok(())
    }

    #[tokio::test]
    async fn fetches_usage_data_for_date() -> Result<()> {
        let (endpoint, request) = serve_once("200 OK", "").await?;
        let date = "092920".parse::<ReportDate>()?;
        assert_eq!(client(endpoint)?.usage_data(Some(&date)).await?, "");
        assert_eq!(
            request.await?,
            "GET /snds/data.aspx?key=test-key&date=092920 HTTP/1.1"
        );
        Ok(())
    }

    #[tokio::test]
    async fn non_200_is_a_fetch_error() -> Result<()> {
        let (endpoint, _request) = serve_once("401 Unauthorized", "denied").await?;
        let err = client(endpoint)?.usage_data(None).await.unwrap_err();
        assert!(
            matches!(&err, SndsError::Fetch { report: "usage data", reason } if reason.contains("401")),
            "unexpected error: {err}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_is_a_fetch_error() -> Result<()> {
        // bind then drop so nothing is listening on the port
        let addr = TcpListener::bind("127.0.0.1:0").await?.local_addr()?;
        let endpoint = format!("http://{addr}/snds/").parse::<Url>()?;
        assert!(matches!(
            client(endpoint)?.ip_status().await,
            Err(SndsError::Fetch { report: "ip status", .. })
        ));
        Ok(())
    }
}
