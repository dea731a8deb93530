use rustyline::history::{DefaultHistory, History, SearchDirection};
use rustyline::{Editor, Helper, Result};
use std::path::{Path, PathBuf};

const SHOWN_ENTRIES: usize = 20;

pub struct HistoryManager {
	history_file: PathBuf,
}

impl HistoryManager {
	pub fn new<P: AsRef<Path>>(history_file: P) -> Self {
		Self {
			history_file: history_file.as_ref().to_path_buf(),
		}
	}

	pub fn load<H: Helper>(&self, editor: &mut Editor<H, DefaultHistory>) {
		// First run has no history file yet
		if let Err(e) = editor.load_history(&self.history_file) {
			tracing::debug!("no history loaded from {}: {}", self.history_file.display(), e);
		}
	}

	pub fn save<H: Helper>(&self, editor: &mut Editor<H, DefaultHistory>) -> Result<()> {
		editor.save_history(&self.history_file)
	}

	pub fn display<H: Helper>(&self, editor: &Editor<H, DefaultHistory>) {
		let history_len = editor.history().len();

		if history_len == 0 {
			println!("No history available");
			return;
		}

		let start = history_len.saturating_sub(SHOWN_ENTRIES);

		println!();
		println!("{}", "─".repeat(60));
		for i in start..history_len {
			if let Ok(Some(search_result)) = editor.history().get(i, SearchDirection::Forward) {
				let entry: &str = &search_result.entry;
				let shown = if entry.chars().count() > 60 {
					format!("{}...", entry.chars().take(57).collect::<String>())
				} else {
					entry.to_string()
				};
				println!("{:4} │ {}", i + 1, shown);
			}
		}
		println!("{}", "─".repeat(60));
	}
}
