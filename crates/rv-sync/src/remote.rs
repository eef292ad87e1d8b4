//! Remote project service boundary

use async_trait::async_trait;
use rv_core::result::RvResult;
use rv_core::traits::Id;
use rv_models::{CreateProjectDto, NewPayment, Project};

/// Operations the remote service offers.
///
/// Network, HTTP and timeout failures are reported as
/// [`RvError::Transport`](rv_core::RvError::Transport).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteSync: Send + Sync {
    /// All projects with their ledgers, newest first
    async fn list_projects(&self) -> RvResult<Vec<Project>>;

    async fn create_project(&self, draft: CreateProjectDto) -> RvResult<Project>;

    async fn delete_project(&self, id: Id) -> RvResult<()>;

    /// Add a payment and return the owning project as stored remotely
    async fn add_payment(&self, project_id: Id, draft: NewPayment) -> RvResult<Project>;

    /// Delete a payment by its own id and return the owning project
    async fn delete_payment(&self, project_id: Id, payment_id: Id) -> RvResult<Project>;
}
