//! Sync coordinator
//!
//! Applies each mutation to the remote service and mirrors the result into
//! the local store. Drafts are validated locally before any remote call.
//! Only transport failures ever fall back, and only in
//! [`SyncMode::Permissive`]. Mutations take `&mut self`, so a second one
//! cannot start while the first is still waiting on the remote.

use std::sync::Arc;
use std::time::Duration;

use rv_contracts::{Contract, CreatePaymentContract, CreateProjectContract};
use rv_core::config::{SyncConfig, SyncMode};
use rv_core::error::RvError;
use rv_core::result::RvResult;
use rv_core::traits::Id;
use rv_models::{CreateProjectDto, NewPayment, Project};
use rv_services::StoreHandle;
use tracing::{debug, info, warn};

use crate::http::HttpRemoteSync;
use crate::remote::RemoteSync;

/// Where a mutation was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncResult<T> {
    /// Accepted by the remote service and mirrored locally
    Remote(T),
    /// Applied to the local store only
    LocalFallback(T),
}

impl<T> SyncResult<T> {
    pub fn into_inner(self) -> T {
        match self {
            SyncResult::Remote(value) | SyncResult::LocalFallback(value) => value,
        }
    }

    pub fn value(&self) -> &T {
        match self {
            SyncResult::Remote(value) | SyncResult::LocalFallback(value) => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, SyncResult::LocalFallback(_))
    }
}

pub struct SyncedStore {
    mode: SyncMode,
    remote: Option<Arc<dyn RemoteSync>>,
    store: StoreHandle,
}

impl SyncedStore {
    /// Local store only; every result is a [`SyncResult::LocalFallback`]
    pub fn offline(store: StoreHandle) -> Self {
        Self {
            mode: SyncMode::Offline,
            remote: None,
            store,
        }
    }

    pub fn new(mode: SyncMode, remote: Arc<dyn RemoteSync>, store: StoreHandle) -> Self {
        let remote = (mode != SyncMode::Offline).then_some(remote);
        Self { mode, remote, store }
    }

    /// Build the coordinator for the configured mode
    pub fn from_config(config: &SyncConfig, store: StoreHandle) -> RvResult<Self> {
        if config.mode == SyncMode::Offline {
            return Ok(Self::offline(store));
        }
        let remote = HttpRemoteSync::new(
            config.remote_url.clone(),
            Duration::from_secs(config.request_timeout_seconds),
        )?;
        info!(mode = ?config.mode, remote_url = %config.remote_url, "Remote sync configured");
        Ok(Self::new(config.mode, Arc::new(remote), store))
    }

    pub fn mode(&self) -> SyncMode {
        self.mode
    }

    pub fn store(&self) -> &StoreHandle {
        &self.store
    }

    /// Replace the local store with the remote project list
    pub async fn refresh(&mut self) -> RvResult<SyncResult<usize>> {
        let Some(remote) = self.remote.clone() else {
            return Ok(SyncResult::LocalFallback(self.store.read().len()));
        };

        match remote.list_projects().await {
            Ok(projects) => {
                let count = projects.len();
                self.store.write().replace_all(projects)?;
                info!(projects = count, "Store refreshed from remote");
                Ok(SyncResult::Remote(count))
            }
            Err(e) => self.fallback(e, "refresh", |store| Ok(store.len())),
        }
    }

    pub async fn create_project(&mut self, draft: CreateProjectDto) -> RvResult<SyncResult<Project>> {
        CreateProjectContract::new().validate(&draft)?;

        let Some(remote) = self.remote.clone() else {
            return Ok(SyncResult::LocalFallback(self.store.write().create(draft)?));
        };

        match remote.create_project(draft.clone()).await {
            Ok(project) => {
                self.store.write().upsert(project.clone())?;
                Ok(SyncResult::Remote(project))
            }
            Err(e) => self.fallback(e, "create_project", |store| store.create(draft)),
        }
    }

    pub async fn delete_project(&mut self, id: Id) -> RvResult<SyncResult<()>> {
        let Some(remote) = self.remote.clone() else {
            self.store.write().delete(id)?;
            return Ok(SyncResult::LocalFallback(()));
        };

        match remote.delete_project(id).await {
            Ok(()) => {
                match self.store.write().delete(id) {
                    Ok(_) => {}
                    // the local copy may already be gone after a refresh
                    Err(e) if e.is_not_found() => debug!(project_id = id, "Project already absent locally"),
                    Err(e) => return Err(e),
                }
                Ok(SyncResult::Remote(()))
            }
            Err(e) => self.fallback(e, "delete_project", |store| store.delete(id).map(|_| ())),
        }
    }

    pub async fn add_payment(&mut self, project_id: Id, draft: NewPayment) -> RvResult<SyncResult<Project>> {
        CreatePaymentContract::new().validate(&draft)?;

        let Some(remote) = self.remote.clone() else {
            return Ok(SyncResult::LocalFallback(self.store.write().add_payment(project_id, draft)?));
        };

        match remote.add_payment(project_id, draft.clone()).await {
            Ok(project) => {
                self.store.write().upsert(project.clone())?;
                Ok(SyncResult::Remote(project))
            }
            Err(e) => self.fallback(e, "add_payment", |store| store.add_payment(project_id, draft)),
        }
    }

    pub async fn delete_payment(&mut self, project_id: Id, payment_id: Id) -> RvResult<SyncResult<Project>> {
        let Some(remote) = self.remote.clone() else {
            let project = self.store.write().remove_payment(project_id, payment_id)?;
            return Ok(SyncResult::LocalFallback(project));
        };

        match remote.delete_payment(project_id, payment_id).await {
            Ok(project) => {
                self.store.write().upsert(project.clone())?;
                Ok(SyncResult::Remote(project))
            }
            Err(e) => self.fallback(e, "delete_payment", |store| {
                store.remove_payment(project_id, payment_id)
            }),
        }
    }

    /// Apply `local` when `error` permits a fallback, otherwise return `error`
    fn fallback<T>(
        &self,
        error: RvError,
        operation: &'static str,
        local: impl FnOnce(&mut rv_services::ProjectStore) -> RvResult<T>,
    ) -> RvResult<SyncResult<T>> {
        if self.mode != SyncMode::Permissive || !error.is_transport() {
            return Err(error);
        }
        warn!(operation, error = %error, "Remote unavailable, applying locally");
        let mut store = self.store.write();
        local(&mut *store).map(SyncResult::LocalFallback)
    }
}
