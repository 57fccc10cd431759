//! Application services — one module per buildpack phase.
//!
//! Each service composes domain logic with port trait calls. Services import
//! only from `crate::domain`, `crate::application::ports`, and
//! `cxpack_common` — never from `crate::infra`, `crate::commands`, or
//! `crate::output`.

pub mod detect;
pub mod release;
pub mod stage;
