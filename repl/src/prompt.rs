use super::display::DisplayConfig;
use colored::Colorize;
use shellrc_core::{PromptBuilder, ShellHost};

pub fn generate_prompt<H: ShellHost + ?Sized>(host: &mut H, config: &DisplayConfig) -> String {
	let parts = PromptBuilder::new().parts(host);

	if config.use_colors {
		format!(
			"{}{}{}> ",
			parts.status.bright_cyan().bold(),
			"|".bright_black(),
			parts.database
		)
	} else {
		parts.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use shellrc_core::SnapshotHost;

	#[test]
	fn test_plain_prompt_matches_builder() {
		let mut host = SnapshotHost::new().with_server_status("mongod", "localhost:27017");
		let config = DisplayConfig {
			use_colors: false,
			..DisplayConfig::default()
		};
		assert_eq!(generate_prompt(&mut host, &config), "mongod|localhost:27017|test> ");
	}
}
