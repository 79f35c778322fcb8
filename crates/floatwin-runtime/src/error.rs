#![forbid(unsafe_code)]

//! Controller-level error taxonomy.
//!
//! Two classes survive to the caller: rejected configuration (construction
//! only) and host collaborator failures (attach/detach). Stray input is
//! dropped inside the components and never becomes an error.

use thiserror::Error;

use floatwin_core::config::ConfigError;

use crate::host::HostError;

/// Failures surfaced by [`WindowController`](crate::controller::WindowController).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ControllerError {
    #[error("invalid overlay configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("host collaborator failure: {0}")]
    Host(#[from] HostError),
}
