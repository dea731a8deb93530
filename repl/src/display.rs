use colored::Colorize;
use shellrc_core::PrintMode;

#[derive(Debug, Clone)]
pub struct DisplayConfig {
	pub use_colors: bool,
	pub show_banner: bool,
}

impl Default for DisplayConfig {
	fn default() -> Self {
		Self {
			use_colors: true,
			show_banner: true,
		}
	}
}

pub fn print_banner(target: &str) {
	println!();
	println!("{}", "shellrc interactive console".bold());
	println!("Connected to {}", target.bright_cyan());
	println!("Type {} for help, {} to quit", ":h".cyan(), ":q".cyan());
	println!();
}

pub fn print_help() {
	println!();
	println!("{}", "Commands:".bold());
	println!("  {} [filter]     List databases containing filter", ":dbs".cyan());
	println!("  {} <db>         Switch database (or `use <db>`)", ":use".cyan());
	println!("  {}              Disable pretty printing", ":ugly".cyan());
	println!("  {}            Enable pretty printing", ":pretty".cyan());
	println!("  {} [pretty|ugly] Show or set print mode", ":mode".cyan());
	println!("  {}            Show the current prompt", ":prompt".cyan());
	println!("  {}           Show input history", ":history".cyan());
	println!("  {}  {}        Exit", ":q".cyan(), ":quit".cyan());
	println!("  {}  {}        Show this help", ":h".cyan(), ":help".cyan());
	println!();
	println!("Any other line is evaluated against the current database.");
	println!("Append {} to print one result compactly.", ".ugly()".cyan());
	println!();
}

pub fn print_error(msg: &str) {
	println!("{} {}", "✗".bright_red().bold(), msg.bright_red());
}

pub fn print_info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue(), msg.bright_white());
}

pub fn print_print_mode(mode: PrintMode) {
	let label = match mode {
		PrintMode::Pretty => "pretty".bright_green().bold(),
		PrintMode::Ugly => "ugly".bright_yellow(),
	};
	println!("Print mode: {}", label);
}
