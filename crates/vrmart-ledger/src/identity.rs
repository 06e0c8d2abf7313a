//! Identity provider boundary.
//!
//! The provider owns the user's session: it restores a persisted session at
//! startup, runs the interactive login flow and resolves the principal that
//! ledger calls are made on behalf of.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use vrmart_core::Principal;

use crate::actor::BoxFuture;
use crate::error::{LedgerError, LedgerResult};

/// Session and login flow of an identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Load a previously persisted session. Returns whether one was found.
    fn restore(&self) -> BoxFuture<'_, LedgerResult<bool>>;

    /// Run the interactive login flow against `provider_url`.
    ///
    /// Resolves `false` when the user cancels or the provider reports failure.
    fn login<'a>(&'a self, provider_url: &'a str) -> BoxFuture<'a, LedgerResult<bool>>;

    /// Forget the session, including any persisted copy.
    fn logout(&self) -> BoxFuture<'_, LedgerResult<()>>;

    /// Principal of the current session, if resolved.
    fn principal(&self) -> Option<Principal>;
}

/// Arc wrapper for IdentityProvider trait objects.
pub type DynIdentityProvider = Arc<dyn IdentityProvider>;

/// Persisted form of a session.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    principal: Principal,
}

/// Identity provider that keeps its session in a JSON file.
///
/// Login prints the provider URL and reads the principal the provider hands
/// back. An empty or malformed answer counts as a failed login. The prompt
/// runs on the blocking pool.
pub struct FileIdentityProvider {
    session_path: PathBuf,
    input: Arc<Mutex<Box<dyn BufRead + Send>>>,
    output: Arc<Mutex<Box<dyn Write + Send>>>,
    current: RwLock<Option<Principal>>,
}

impl FileIdentityProvider {
    /// Provider prompting on the terminal.
    pub fn new(session_path: impl Into<PathBuf>) -> Self {
        Self::with_io(
            session_path,
            BufReader::new(std::io::stdin()),
            std::io::stderr(),
        )
    }

    /// Provider with explicit prompt streams.
    pub fn with_io(
        session_path: impl Into<PathBuf>,
        input: impl BufRead + Send + 'static,
        output: impl Write + Send + 'static,
    ) -> Self {
        Self {
            session_path: session_path.into(),
            input: Arc::new(Mutex::new(Box::new(input))),
            output: Arc::new(Mutex::new(Box::new(output))),
            current: RwLock::new(None),
        }
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    async fn prompt(&self, provider_url: &str) -> LedgerResult<String> {
        let input = Arc::clone(&self.input);
        let output = Arc::clone(&self.output);
        let provider_url = provider_url.to_string();

        let answer = tokio::task::spawn_blocking(move || -> std::io::Result<String> {
            {
                let mut out = output.lock();
                writeln!(out, "Authorize at {provider_url}")?;
                write!(out, "Principal: ")?;
                out.flush()?;
            }

            let mut answer = String::new();
            input.lock().read_line(&mut answer)?;
            Ok(answer.trim().to_string())
        })
        .await
        .map_err(|e| LedgerError::Identity(format!("login prompt aborted: {e}")))??;
        Ok(answer)
    }
}

impl IdentityProvider for FileIdentityProvider {
    fn restore(&self) -> BoxFuture<'_, LedgerResult<bool>> {
        Box::pin(async move {
            let content = match tokio::fs::read_to_string(&self.session_path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %self.session_path.display(), "No persisted session");
                    return Ok(false);
                }
                Err(e) => return Err(e.into()),
            };

            let stored: StoredSession = serde_json::from_str(&content)?;
            info!(principal = %stored.principal, "Restored persisted session");
            *self.current.write() = Some(stored.principal);
            Ok(true)
        })
    }

    fn login<'a>(&'a self, provider_url: &'a str) -> BoxFuture<'a, LedgerResult<bool>> {
        Box::pin(async move {
            let answer = self.prompt(provider_url).await?;
            if answer.is_empty() {
                info!("Login cancelled");
                return Ok(false);
            }

            let principal: Principal = match answer.parse() {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "Identity provider returned an invalid principal");
                    return Ok(false);
                }
            };

            if let Some(parent) = self.session_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            let stored = StoredSession {
                principal: principal.clone(),
            };
            tokio::fs::write(&self.session_path, serde_json::to_vec(&stored)?).await?;

            info!(principal = %principal, "Session persisted");
            *self.current.write() = Some(principal);
            Ok(true)
        })
    }

    fn logout(&self) -> BoxFuture<'_, LedgerResult<()>> {
        Box::pin(async move {
            self.current.write().take();
            match tokio::fs::remove_file(&self.session_path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        })
    }

    fn principal(&self) -> Option<Principal> {
        self.current.read().clone()
    }
}
