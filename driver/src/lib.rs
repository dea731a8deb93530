use serde_json::Value;
use shellrc_core::config::ConnectionConfig;
use shellrc_core::{ReplicaStatusResponse, ServerStatus, ShellError, ShellHost, ShellResult};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::{Instant, timeout};

/// Talks to the server through the database's own client executable.
pub struct ShellDriver {
	client_binary: String,
	uri: String,
	database: String,
	command_timeout: Option<Duration>,
}

impl ShellDriver {
	pub fn new(config: &ConnectionConfig, database: impl Into<String>) -> Self {
		Self {
			client_binary: config.client_binary.clone(),
			uri: config.uri.clone(),
			database: database.into(),
			command_timeout: config.command_timeout_secs.map(Duration::from_secs),
		}
	}

	pub fn uri(&self) -> &str {
		&self.uri
	}

	pub fn database(&self) -> &str {
		&self.database
	}

	pub fn set_database(&mut self, name: &str) {
		self.database = name.to_string();
	}

	/// Evaluate `expression` against `database` and decode the JSON it prints.
	pub async fn eval_in(&self, database: &str, expression: &str) -> ShellResult<Value> {
		let script = build_script(database, expression)?;
		let mut command = Command::new(&self.client_binary);
		command
			.arg(&self.uri)
			.args(["--quiet", "--norc", "--eval"])
			.arg(&script)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);

		let start = Instant::now();
		let output = match self.command_timeout {
			Some(limit) => timeout(limit, command.output())
				.await
				.map_err(|_| ShellError::Timeout)?,
			None => command.output().await,
		}
		.map_err(|e| {
			ShellError::Connection(format!("Failed to run {}: {}", self.client_binary, e))
		})?;

		tracing::trace!(
			"{} on {} finished in {:.1?}",
			expression,
			database,
			start.elapsed()
		);

		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			return Err(ShellError::Command(first_line(&stderr).to_string()));
		}

		parse_output(&String::from_utf8_lossy(&output.stdout))
	}

	pub async fn eval(&self, expression: &str) -> ShellResult<Value> {
		self.eval_in(&self.database, expression).await
	}

	pub async fn replica_status(&self) -> ShellResult<ReplicaStatusResponse> {
		let value = self
			.eval_in("admin", "db.adminCommand({ replSetGetStatus: 1 })")
			.await?;
		Ok(serde_json::from_value(value)?)
	}

	pub async fn server_status(&self) -> ShellResult<ServerStatus> {
		let value = self.eval_in("admin", "db.serverStatus()").await?;
		Ok(serde_json::from_value(value)?)
	}

	pub async fn database_names(&self) -> ShellResult<Vec<String>> {
		let value = self
			.eval_in("admin", "db.getMongo().getDBNames()")
			.await?;
		Ok(serde_json::from_value(value)?)
	}
}

/// Evaluates `expression` against `database`, unwraps cursors and prints one
/// line of relaxed extended JSON.
fn build_script(database: &str, expression: &str) -> ShellResult<String> {
	let expression = expression.trim().trim_end_matches(';');
	if expression.is_empty() {
		return Err(ShellError::InvalidInput("empty expression".to_string()));
	}
	let database = serde_json::to_string(database)?;
	Ok(format!(
		"const __db = db.getSiblingDB({database});\n\
		 let __result = (function (db) {{ return ({expression}); }})(__db);\n\
		 if (__result && typeof __result.toArray === \"function\") {{\n\
		 __result = __result.toArray();\n\
		 }}\n\
		 const __out = __result === undefined ? null : __result;\n\
		 print(EJSON.stringify(__out, {{ relaxed: true }}));"
	))
}

/// The client may print warnings before the result; the last non-empty
/// line is the JSON payload.
fn parse_output(stdout: &str) -> ShellResult<Value> {
	let line = stdout
		.lines()
		.map(str::trim)
		.rev()
		.find(|line| !line.is_empty())
		.ok_or_else(|| ShellError::Protocol("client produced no output".to_string()))?;

	serde_json::from_str(line)
		.map_err(|e| ShellError::Protocol(format!("Unexpected client output `{}`: {}", line, e)))
}

fn first_line(text: &str) -> &str {
	text.lines()
		.map(str::trim)
		.find(|line| !line.is_empty())
		.unwrap_or("client exited with an error")
}

// Blocking wrapper for synchronous usage
pub struct BlockingShellDriver {
	driver: ShellDriver,
	runtime: tokio::runtime::Runtime,
}

impl BlockingShellDriver {
	pub fn new(driver: ShellDriver) -> ShellResult<Self> {
		let runtime = tokio::runtime::Builder::new_current_thread()
			.enable_all()
			.build()?;
		Ok(Self { driver, runtime })
	}

	pub fn from_config(config: &ConnectionConfig, database: &str) -> ShellResult<Self> {
		Self::new(ShellDriver::new(config, database))
	}

	pub fn uri(&self) -> &str {
		self.driver.uri()
	}
}

impl ShellHost for BlockingShellDriver {
	fn replica_status(&mut self) -> ShellResult<ReplicaStatusResponse> {
		self.runtime.block_on(self.driver.replica_status())
	}

	fn server_status(&mut self) -> ShellResult<ServerStatus> {
		self.runtime.block_on(self.driver.server_status())
	}

	fn database_names(&mut self) -> ShellResult<Vec<String>> {
		self.runtime.block_on(self.driver.database_names())
	}

	fn current_database(&self) -> &str {
		self.driver.database()
	}

	fn use_database(&mut self, name: &str) {
		self.driver.set_database(name);
	}

	fn evaluate(&mut self, expression: &str) -> ShellResult<Value> {
		self.runtime.block_on(self.driver.eval(expression))
	}
}
