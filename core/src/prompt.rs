//! Replica-set aware prompt.
//!
//! Formats:
//!
//! ```text
//! standalone:    <process>|<host>|<db>>
//! replica set:   <set>:<state>|<db>>
//! diagnostic:    <info>|<db>>
//! ```

use std::fmt;

use crate::host::ShellHost;
use crate::status::ReplicaState;

/// Placeholder for a segment the server did not report.
pub const UNDEFINED: &str = "undefined";

#[derive(Debug, Default, Clone, Copy)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt from fresh status. Never fails; every error
    /// degrades to a weaker prompt.
    pub fn build<H: ShellHost + ?Sized>(&self, host: &mut H) -> String {
        self.parts(host).to_string()
    }

    /// Fetch status and split the prompt into its two segments.
    pub fn parts<H: ShellHost + ?Sized>(&self, host: &mut H) -> PromptParts {
        let state = ReplicaState::decode(host.replica_status());
        PromptParts {
            status: self.status_segment(&state, host),
            database: host.current_database().to_string(),
        }
    }

    /// The status segment (everything before `|<db>> `).
    pub fn status_segment<H: ShellHost + ?Sized>(
        &self,
        state: &ReplicaState,
        host: &mut H,
    ) -> String {
        match state {
            ReplicaState::Standalone => match host.server_status() {
                Ok(status) => format!(
                    "{}|{}",
                    status.process.as_deref().unwrap_or(UNDEFINED),
                    status.host.as_deref().unwrap_or(UNDEFINED)
                ),
                Err(err) => {
                    tracing::debug!("server status unavailable: {}", err);
                    format!("{}|{}", UNDEFINED, UNDEFINED)
                }
            },
            ReplicaState::Replica { set, state } => format!(
                "{}:{}",
                set.as_deref().unwrap_or(UNDEFINED),
                state.as_deref().unwrap_or(UNDEFINED)
            ),
            ReplicaState::Diagnostic { text } => text.clone(),
        }
    }
}

/// A rendered prompt before it is joined into `<status>|<db>> `.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub status: String,
    pub database: String,
}

impl fmt::Display for PromptParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}> ", self.status, self.database)
    }
}
