//! shellrc - interactive console customizations for a replicated database

pub mod config;
pub mod error;
pub mod host;
pub mod lister;
pub mod prompt;
pub mod render;
pub mod status;

pub use config::ShellConfig;
pub use error::{ShellError, ShellResult};
pub use host::{ShellHost, SnapshotHost};
pub use lister::{filter_names, list_databases};
pub use prompt::{PromptBuilder, PromptParts};
pub use render::{PrintMode, Query, Renderer, SessionConfig};
pub use status::{
    MemberRecord, ReplicaState, ReplicaStatusResponse, SHORT_DIAGNOSTIC_MAX_LEN, ServerStatus,
};
