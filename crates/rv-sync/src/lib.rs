//! # rv-sync
//!
//! Mirrors project store operations to a remote service.
//!
//! - [`RemoteSync`] is the boundary to the remote project service.
//! - [`HttpRemoteSync`] implements it over the REST surface.
//! - [`SyncedStore`] applies each mutation remotely and locally, following
//!   the [`SyncMode`] chosen when it was built.

pub mod coordinator;
pub mod http;
pub mod remote;

pub use coordinator::{SyncResult, SyncedStore};
pub use http::HttpRemoteSync;
pub use remote::RemoteSync;
pub use rv_core::config::SyncMode;
