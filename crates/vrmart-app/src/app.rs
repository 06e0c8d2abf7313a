//! Application wiring.
//!
//! Builds the local catalog, the ledger client and the session context
//! from configuration and hands out views over them.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::views::{CatalogView, CreateForm, DetailView};
use std::sync::Arc;
use tracing::info;
use vrmart_catalog::CatalogStore;
use vrmart_core::ItemId;
use vrmart_ledger::{
    DynActorFactory, DynIdentityProvider, FileIdentityProvider, HttpActorFactory, LedgerClient,
};
use vrmart_session::SessionContext;

/// Main application.
pub struct Application {
    config: AppConfig,
    catalog: Arc<CatalogStore>,
    session: Arc<SessionContext>,
}

impl Application {
    /// Create an application talking to the configured ledger over HTTP.
    ///
    /// Nothing is contacted until `start()`.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let identity = Arc::new(FileIdentityProvider::new(&config.session_file));

        let mut factory = HttpActorFactory::new(config.environment, &config.canister_id);
        if let Some(host) = &config.host {
            factory = factory.with_host(host);
        }

        Ok(Self::with_ledger(config, identity, Arc::new(factory)))
    }

    /// Create an application over explicit ledger seams.
    pub fn with_ledger(
        config: AppConfig,
        identity: DynIdentityProvider,
        factory: DynActorFactory,
    ) -> Self {
        let client = LedgerClient::new(identity, factory, config.identity_provider_url());
        let session = Arc::new(SessionContext::new(Arc::new(client)));
        let catalog = Arc::new(CatalogStore::seeded());

        info!(
            environment = ?config.environment,
            host = %config.ledger_host(),
            canister_id = %config.canister_id,
            "Application created"
        );

        Self {
            config,
            catalog,
            session,
        }
    }

    /// Restore any persisted session.
    pub async fn start(&self) {
        self.session.init().await;
        info!(state = %self.session.state(), "Session ready");
    }

    /// Log out if needed and reset the session.
    pub async fn shutdown(&self) {
        self.session.teardown().await;
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn catalog_view(&self) -> CatalogView {
        CatalogView::new(self.catalog.clone())
    }

    /// Open an item's detail page, counting the view.
    pub fn detail(&self, id: ItemId) -> Option<DetailView> {
        DetailView::load(&self.catalog, id)
    }

    pub fn create_form(&self) -> CreateForm {
        CreateForm::new(self.config.upload.clone())
    }
}
