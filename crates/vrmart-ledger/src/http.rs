//! HTTP transport for the asset ledger.
//!
//! Talks to the ledger through its JSON gateway:
//! `POST {host}/api/v2/canister/{canister_id}/{query|call}/{method}` with body
//! `{"sender": <principal or null>, "args": [...]}`. The response body is the
//! method's return value encoded as JSON.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};
use vrmart_core::{Asset, AssetId, CreateAssetRequest, Principal};

use crate::actor::{ActorFactory, BoxFuture, DynLedgerActor, LedgerActor};
use crate::environment::LedgerEnvironment;
use crate::error::{LedgerError, LedgerResult};
use crate::result::{CreateAssetResult, PurchaseResult};

/// Default timeout for ledger requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only or state-changing call.
#[derive(Debug, Clone, Copy)]
enum CallKind {
    Query,
    Update,
}

impl CallKind {
    fn path_segment(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Update => "call",
        }
    }
}

/// Gateway request envelope.
#[derive(Debug, Serialize)]
struct CallEnvelope<'a, A: Serialize> {
    sender: Option<&'a Principal>,
    args: A,
}

/// Ledger actor over HTTP.
pub struct HttpLedgerActor {
    client: Client,
    host: String,
    canister_id: String,
    sender: Option<Principal>,
}

impl HttpLedgerActor {
    /// Create an actor for `canister_id` on `host`, calling as `sender`.
    pub fn new(
        host: impl Into<String>,
        canister_id: impl Into<String>,
        sender: Option<Principal>,
    ) -> LedgerResult<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            canister_id: canister_id.into(),
            sender,
        })
    }

    fn method_url(&self, kind: CallKind, method: &str) -> String {
        format!(
            "{}/api/v2/canister/{}/{}/{}",
            self.host,
            self.canister_id,
            kind.path_segment(),
            method
        )
    }

    async fn invoke<A, R>(&self, kind: CallKind, method: &str, args: A) -> LedgerResult<R>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let url = self.method_url(kind, method);
        debug!(url = %url, method, "Calling ledger");

        let envelope = CallEnvelope {
            sender: self.sender.as_ref(),
            args,
        };

        let response = self
            .client
            .post(&url)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::Transport(format!("HTTP {status}: {body}")));
        }

        response.json().await.map_err(|e| {
            LedgerError::Transport(format!("Failed to parse {method} response: {e}"))
        })
    }
}

impl LedgerActor for HttpLedgerActor {
    fn get_all_assets(&self) -> BoxFuture<'_, LedgerResult<Vec<Asset>>> {
        Box::pin(self.invoke(CallKind::Query, "getAllAssets", ()))
    }

    fn get_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<Option<Asset>>> {
        Box::pin(self.invoke(CallKind::Query, "getAsset", (id,)))
    }

    fn get_assets_by_category<'a>(
        &'a self,
        category: &'a str,
    ) -> BoxFuture<'a, LedgerResult<Vec<Asset>>> {
        Box::pin(self.invoke(CallKind::Query, "getAssetsByCategory", (category,)))
    }

    fn get_user_assets<'a>(
        &'a self,
        owner: &'a Principal,
    ) -> BoxFuture<'a, LedgerResult<Vec<Asset>>> {
        Box::pin(self.invoke(CallKind::Query, "getUserAssets", (owner,)))
    }

    fn create_asset<'a>(
        &'a self,
        owner: &'a Principal,
        request: &'a CreateAssetRequest,
    ) -> BoxFuture<'a, LedgerResult<CreateAssetResult>> {
        Box::pin(self.invoke(CallKind::Update, "createAsset", (owner, request)))
    }

    fn purchase_asset<'a>(
        &'a self,
        owner: &'a Principal,
        id: AssetId,
    ) -> BoxFuture<'a, LedgerResult<PurchaseResult>> {
        Box::pin(self.invoke(CallKind::Update, "purchaseAsset", (owner, id)))
    }

    fn like_asset(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(self.invoke(CallKind::Update, "likeAsset", (id,)))
    }

    fn increment_views(&self, id: AssetId) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(self.invoke(CallKind::Update, "incrementViews", (id,)))
    }
}

/// Builds `HttpLedgerActor`s for one environment.
///
/// In the local environment every build first checks the replica's status
/// endpoint, so a missing replica surfaces at login instead of on the first
/// call.
pub struct HttpActorFactory {
    environment: LedgerEnvironment,
    host: String,
    canister_id: String,
}

impl HttpActorFactory {
    pub fn new(environment: LedgerEnvironment, canister_id: impl Into<String>) -> Self {
        Self {
            environment,
            host: environment.host().to_string(),
            canister_id: canister_id.into(),
        }
    }

    /// Override the ledger host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    async fn check_replica(&self) -> LedgerResult<()> {
        let url = format!("{}/api/v2/status", self.host.trim_end_matches('/'));
        let response = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::Transport(format!("Failed to create HTTP client: {e}")))?
            .get(&url)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("Replica unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "Replica status check failed: HTTP {}",
                response.status()
            )));
        }
        Ok(())
    }
}

impl ActorFactory for HttpActorFactory {
    fn build(&self, principal: Option<Principal>) -> BoxFuture<'_, LedgerResult<DynLedgerActor>> {
        Box::pin(async move {
            if !self.environment.is_production() {
                self.check_replica().await?;
            }

            info!(
                host = %self.host,
                canister_id = %self.canister_id,
                principal = ?principal.as_ref().map(Principal::as_str),
                "Ledger actor created"
            );
            let actor = HttpLedgerActor::new(&self.host, &self.canister_id, principal)?;
            Ok(Arc::new(actor) as DynLedgerActor)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its base URL.
    async fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        format!("http://{addr}")
    }

    #[test]
    fn test_method_url() {
        let actor = HttpLedgerActor::new("http://localhost:4943/", "abc-cai", None).unwrap();
        assert_eq!(
            actor.method_url(CallKind::Query, "getAllAssets"),
            "http://localhost:4943/api/v2/canister/abc-cai/query/getAllAssets"
        );
        assert_eq!(
            actor.method_url(CallKind::Update, "likeAsset"),
            "http://localhost:4943/api/v2/canister/abc-cai/call/likeAsset"
        );
    }

    #[test]
    fn test_envelope_serialization() {
        let principal: Principal = "2vxsx-fae".parse().unwrap();
        let envelope = CallEnvelope {
            sender: Some(&principal),
            args: (&principal, 7u64),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        assert_eq!(json, r#"{"sender":"2vxsx-fae","args":["2vxsx-fae",7]}"#);

        let anonymous = CallEnvelope::<()> {
            sender: None,
            args: (),
        };
        assert_eq!(
            serde_json::to_string(&anonymous).unwrap(),
            r#"{"sender":null,"args":null}"#
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_transport_error() {
        let host = serve_once("503 Service Unavailable", "replica down").await;
        let actor = HttpLedgerActor::new(&host, "abc-cai", None).unwrap();

        let err = actor.like_asset(7).await.unwrap_err();
        assert!(matches!(err, LedgerError::Transport(_)));
        assert_eq!(
            err.to_string(),
            "Transport error: HTTP 503 Service Unavailable: replica down"
        );
    }

    #[tokio::test]
    async fn test_success_response_is_decoded() {
        let host = serve_once("200 OK", "true").await;
        let actor = HttpLedgerActor::new(&host, "abc-cai", None).unwrap();
        assert!(actor.like_asset(7).await.unwrap());

        let host = serve_once("200 OK", "\"liked\"").await;
        let actor = HttpLedgerActor::new(&host, "abc-cai", None).unwrap();
        let err = actor.like_asset(7).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse likeAsset response"));
    }
}
