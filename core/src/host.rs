//! The host shell the console talks to.
//!
//! Everything the prompt, lister and renderer know about the server comes
//! through [`ShellHost`]. The live implementation lives in the `driver`
//! crate; [`SnapshotHost`] serves canned replies from a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ShellError, ShellResult};
use crate::status::{ReplicaStatusResponse, ServerStatus};

pub trait ShellHost {
    /// `replSetGetStatus` against the admin database.
    fn replica_status(&mut self) -> ShellResult<ReplicaStatusResponse>;

    /// `serverStatus` of the connected process.
    fn server_status(&mut self) -> ShellResult<ServerStatus>;

    /// All database names known to the connection, in server order.
    fn database_names(&mut self) -> ShellResult<Vec<String>>;

    fn current_database(&self) -> &str;

    fn use_database(&mut self, name: &str);

    /// Evaluate an expression against the current database.
    fn evaluate(&mut self, expression: &str) -> ShellResult<Value>;
}

impl<H: ShellHost + ?Sized> ShellHost for &mut H {
    fn replica_status(&mut self) -> ShellResult<ReplicaStatusResponse> {
        (**self).replica_status()
    }

    fn server_status(&mut self) -> ShellResult<ServerStatus> {
        (**self).server_status()
    }

    fn database_names(&mut self) -> ShellResult<Vec<String>> {
        (**self).database_names()
    }

    fn current_database(&self) -> &str {
        (**self).current_database()
    }

    fn use_database(&mut self, name: &str) {
        (**self).use_database(name)
    }

    fn evaluate(&mut self, expression: &str) -> ShellResult<Value> {
        (**self).evaluate(expression)
    }
}

/// Canned host state, usually loaded from a JSON file.
///
/// A missing `replSetGetStatus` or `serverStatus` behaves like an
/// unreachable server for that call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotHost {
    #[serde(default = "default_database")]
    pub current_database: String,
    #[serde(default, rename = "replSetGetStatus")]
    pub repl_set_get_status: Option<ReplicaStatusResponse>,
    #[serde(default)]
    pub server_status: Option<ServerStatus>,
    #[serde(default)]
    pub databases: Vec<String>,
    /// Expression text -> result value.
    #[serde(default)]
    pub results: BTreeMap<String, Value>,
}

fn default_database() -> String {
    "test".to_string()
}

impl Default for SnapshotHost {
    fn default() -> Self {
        Self {
            current_database: default_database(),
            repl_set_get_status: None,
            server_status: None,
            databases: Vec::new(),
            results: BTreeMap::new(),
        }
    }
}

impl SnapshotHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> ShellResult<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let snapshot = serde_json::from_str(&raw)?;
        tracing::debug!("loaded snapshot from {}", path.as_ref().display());
        Ok(snapshot)
    }

    pub fn with_replica_status(mut self, status: ReplicaStatusResponse) -> Self {
        self.repl_set_get_status = Some(status);
        self
    }

    pub fn with_server_status(mut self, process: &str, host: &str) -> Self {
        self.server_status = Some(ServerStatus {
            process: Some(process.to_string()),
            host: Some(host.to_string()),
        });
        self
    }

    pub fn with_databases<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.databases = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_result(mut self, expression: &str, value: Value) -> Self {
        self.results.insert(expression.to_string(), value);
        self
    }
}

impl ShellHost for SnapshotHost {
    fn replica_status(&mut self) -> ShellResult<ReplicaStatusResponse> {
        self.repl_set_get_status
            .clone()
            .ok_or_else(|| ShellError::Connection("snapshot has no replSetGetStatus".to_string()))
    }

    fn server_status(&mut self) -> ShellResult<ServerStatus> {
        self.server_status
            .clone()
            .ok_or_else(|| ShellError::Connection("snapshot has no serverStatus".to_string()))
    }

    fn database_names(&mut self) -> ShellResult<Vec<String>> {
        Ok(self.databases.clone())
    }

    fn current_database(&self) -> &str {
        &self.current_database
    }

    fn use_database(&mut self, name: &str) {
        self.current_database = name.to_string();
    }

    fn evaluate(&mut self, expression: &str) -> ShellResult<Value> {
        let expression = expression.trim();
        self.results.get(expression).cloned().ok_or_else(|| {
            ShellError::Command(format!("no snapshot result for `{}`", expression))
        })
    }
}
