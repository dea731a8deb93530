//! shellrc interactive console
//!
//! Pretty-prints results by default and shows replica-set state in the prompt.

mod commands;
mod display;
mod history;
mod prompt;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use driver::BlockingShellDriver;
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Config, Editor, Helper, Result as RlResult};
use shellrc_core::render::parse_query;
use shellrc_core::{
	PrintMode, Renderer, SessionConfig, ShellConfig, ShellHost, ShellResult, SnapshotHost,
	list_databases,
};
use tracing_subscriber::{EnvFilter, fmt};

use commands::Command;
use display::DisplayConfig;
use history::HistoryManager;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "shellrc", version, about = "Interactive database console")]
struct Args {
	/// Path to the TOML config file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Serve replies from a JSON snapshot instead of a live server
	#[arg(long)]
	snapshot: Option<PathBuf>,

	/// Connection string passed to the client executable
	#[arg(long)]
	uri: Option<String>,

	/// Database client executable
	#[arg(long)]
	client: Option<String>,

	/// Database to start in
	#[arg(long)]
	db: Option<String>,

	/// Start with pretty printing off
	#[arg(long)]
	ugly: bool,

	/// Disable colored output
	#[arg(long)]
	no_color: bool,

	/// Skip the startup banner
	#[arg(short, long)]
	quiet: bool,

	/// Increase log verbosity (-v debug, -vv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,
}

impl Args {
	fn apply(&self, cfg: &mut ShellConfig) {
		if let Some(snapshot) = &self.snapshot {
			cfg.shell.snapshot = Some(snapshot.clone());
		}
		if let Some(uri) = &self.uri {
			cfg.connection.uri = uri.clone();
		}
		if let Some(client) = &self.client {
			cfg.connection.client_binary = client.clone();
		}
		if let Some(db) = &self.db {
			cfg.shell.default_database = Some(db.clone());
		}
		if self.ugly {
			cfg.shell.print_mode = PrintMode::Ugly;
		}
		if self.no_color {
			cfg.shell.use_colors = false;
		}
	}
}

/// Custom helper without completion; the console evaluates free-form expressions.
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
	type Candidate = String;
}

impl Hinter for ReplHelper {
	type Hint = String;
}

impl Highlighter for ReplHelper {}

impl Validator for ReplHelper {}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
	fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	init_logging(args.verbose);

	let mut cfg = ShellConfig::load(args.config.as_deref())?;
	args.apply(&mut cfg);

	if !cfg.shell.use_colors {
		colored::control::set_override(false);
	}

	let (host, target) = open_host(&cfg)?;

	let display_config = DisplayConfig {
		use_colors: cfg.shell.use_colors,
		show_banner: !args.quiet,
	};

	if display_config.show_banner {
		display::print_banner(&target);
	}

	let mut repl = Repl::new(host, &cfg, display_config)?;
	repl.run()?;
	Ok(())
}

/// Pick the host named by the config and point it at the starting database.
/// Returns the host and a label describing what it is connected to.
fn open_host(cfg: &ShellConfig) -> ShellResult<(Box<dyn ShellHost>, String)> {
	match &cfg.shell.snapshot {
		Some(path) => {
			let mut snapshot = SnapshotHost::load(path)?;
			// Without an explicit database the snapshot keeps its own.
			if let Some(db) = &cfg.shell.default_database {
				snapshot.use_database(db);
			}
			Ok((Box::new(snapshot), format!("snapshot {}", path.display())))
		}
		None => {
			let driver = BlockingShellDriver::from_config(&cfg.connection, cfg.shell.database())?;
			let target = driver.uri().to_string();
			Ok((Box::new(driver), target))
		}
	}
}

/// The main REPL state machine.
struct Repl {
	host: Box<dyn ShellHost>,
	editor: Editor<ReplHelper, DefaultHistory>,
	history: HistoryManager,
	session: SessionConfig,
	renderer: Renderer,
	display_config: DisplayConfig,
}

impl Repl {
	fn new(
		host: Box<dyn ShellHost>,
		cfg: &ShellConfig,
		display_config: DisplayConfig,
	) -> RlResult<Self> {
		let config = Config::builder()
			.history_ignore_space(true)
			.auto_add_history(false)
			.build();

		let mut editor = Editor::with_config(config)?;
		editor.set_helper(Some(ReplHelper));

		let history = HistoryManager::new(&cfg.shell.history_file);
		history.load(&mut editor);

		Ok(Self {
			host,
			editor,
			history,
			session: SessionConfig::new(cfg.shell.print_mode),
			renderer: Renderer::new(),
			display_config,
		})
	}

	fn prompt(&mut self) -> String {
		prompt::generate_prompt(self.host.as_mut(), &self.display_config)
	}

	fn run(&mut self) -> anyhow::Result<()> {
		loop {
			let prompt = self.prompt();

			match self.editor.readline(&prompt) {
				Ok(line) => {
					if self.handle_line(&line)? {
						break;
					}
				}
				Err(ReadlineError::Interrupted) => {
					display::print_info("Use :q or Ctrl+D to quit");
				}
				Err(ReadlineError::Eof) => break,
				Err(e) => return Err(e.into()),
			}
		}

		if let Err(e) = self.history.save(&mut self.editor) {
			tracing::warn!("failed to save history: {}", e);
		}
		println!("Goodbye!");
		Ok(())
	}

	/// Handle a line of input. Returns true if we should exit.
	fn handle_line(&mut self, line: &str) -> anyhow::Result<bool> {
		let trimmed = line.trim();
		if trimmed.is_empty() {
			return Ok(false);
		}

		self.editor.add_history_entry(line)?;

		if let Some(cmd_str) = trimmed.strip_prefix(':') {
			return Ok(self.execute_command(Command::parse(cmd_str)));
		}

		if let Some(name) = commands::parse_use_statement(trimmed) {
			self.switch_database(name);
			return Ok(false);
		}

		self.evaluate(trimmed);
		Ok(false)
	}

	/// Execute a command. Returns true if we should exit.
	fn execute_command(&mut self, cmd: Command) -> bool {
		match cmd {
			Command::Quit => return true,

			Command::Help => display::print_help(),

			Command::Databases(filter) => {
				let mut stdout = io::stdout().lock();
				if let Err(e) = list_databases(self.host.as_mut(), &filter, &mut stdout) {
					tracing::warn!("listing databases failed: {}", e);
					display::print_error(&format!("Failed to list databases: {}", e));
				}
			}

			Command::Use(name) => self.switch_database(&name),

			Command::Ugly => {
				self.session.set_print_mode(PrintMode::Ugly);
				display::print_print_mode(self.session.print_mode());
			}

			Command::Pretty => {
				self.session.set_print_mode(PrintMode::Pretty);
				display::print_print_mode(self.session.print_mode());
			}

			Command::Mode(arg) if arg.is_empty() => {
				display::print_print_mode(self.session.print_mode())
			}

			Command::Mode(arg) => match arg.parse::<PrintMode>() {
				Ok(mode) => {
					self.session.set_print_mode(mode);
					display::print_print_mode(mode);
				}
				Err(e) => display::print_error(&e.to_string()),
			},

			Command::Prompt => println!("{}", self.prompt()),

			Command::History => self.history.display(&self.editor),

			Command::Unknown(s) => {
				println!("Unknown command: {} (type :h for help)", s.red());
			}
		}
		false
	}

	fn switch_database(&mut self, name: &str) {
		self.host.use_database(name);
		println!("switched to db {}", name.cyan().bold());
	}

	fn evaluate(&mut self, input: &str) {
		let query = parse_query(&self.session, input);

		let value = match self.host.evaluate(query.expression()) {
			Ok(value) => value,
			Err(e) => {
				display::print_error(&e.to_string());
				return;
			}
		};

		match self.renderer.render(&query, &value) {
			Ok(text) => println!("{}", text),
			Err(e) => display::print_error(&format!("Failed to render result: {}", e)),
		}
	}
}
