//! Concrete provider backends for tenantsync.
//!
//! - [`tfvc::TfvcProvider`] — centralized VCS over the TFVC REST API
//! - [`fs::FsProvider`] — a checkout on the local filesystem
//!
//! Both implement [`tenantsync_engine::Provider`]; the engine never sees a
//! concrete type.

pub mod fs;
pub mod tfvc;

pub use fs::FsProvider;
pub use tfvc::TfvcProvider;
