//! Application layer — port trait definitions and phase orchestration.
//!
//! This module depends only on `crate::domain` and `cxpack_common` — never
//! on `crate::infra`, `crate::commands`, or `crate::output`.

pub mod ports;
pub mod services;

#[allow(unused_imports)]
pub use ports::{
    ArchiveExtractor, ArtifactFetcher, BuildLog, FileHasher, LaunchOptionSink, NetworkGate,
    ServiceRegistry, StagingFs,
};
