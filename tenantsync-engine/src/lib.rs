//! # tenantsync-engine
//!
//! Change detection and tree materialization over a version-control
//! provider.
//!
//! Construct a [`ChangeDetector`] to ask whether a changeset touched tenant
//! configuration, and a [`TreeMaterializer`] to walk the configured project
//! tree and assemble a [`tenantsync_core::ConfigBundle`] ready for
//! deployment. Both depend only on the [`Provider`] trait; concrete
//! backends live in `tenantsync-providers`.

pub mod decoder;
pub mod detector;
pub mod error;
pub mod materializer;
pub mod provider;

pub use detector::ChangeDetector;
pub use error::{EngineError, ProviderError};
pub use materializer::TreeMaterializer;
pub use provider::Provider;
