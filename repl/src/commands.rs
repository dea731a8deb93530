//! REPL command parsing
//!
//! Handles parsing of colon-prefixed commands like :help, :dbs, etc.

/// A REPL command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Exit the REPL
    Quit,
    /// Show help
    Help,
    /// List databases, optionally filtered by substring
    Databases(String),
    /// Switch the current database
    Use(String),
    /// Turn pretty printing off for the session
    Ugly,
    /// Turn pretty printing back on
    Pretty,
    /// Show the session print mode, or set it when an argument is given
    Mode(String),
    /// Re-render the prompt and print it
    Prompt,
    /// Show input history
    History,
    /// Unknown command
    Unknown(String),
}

impl Command {
    /// Parse a command string (without the leading colon).
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let (name, rest) = match input.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (input, ""),
        };

        match name {
            "q" | "quit" | "exit" => Command::Quit,
            "h" | "help" | "?" => Command::Help,
            "dbs" | "databases" | "ls" => Command::Databases(rest.to_string()),
            "use" | "u" if !rest.is_empty() => Command::Use(rest.to_string()),
            "ugly" => Command::Ugly,
            "pretty" => Command::Pretty,
            "mode" => Command::Mode(rest.to_string()),
            "prompt" | "p" => Command::Prompt,
            "history" | "hist" => Command::History,
            _ => Command::Unknown(input.to_string()),
        }
    }
}

/// Recognise the shell-style `use <db>` statement typed without a colon.
pub fn parse_use_statement(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("use ")?;
    let name = rest.trim().trim_end_matches(';').trim();
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("q"), Command::Quit);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse("h"), Command::Help);
        assert_eq!(Command::parse("ugly"), Command::Ugly);
        assert_eq!(Command::parse("pretty"), Command::Pretty);
        assert_eq!(Command::parse("mode"), Command::Mode(String::new()));
        assert_eq!(Command::parse("mode ugly"), Command::Mode("ugly".into()));
        assert_eq!(Command::parse("p"), Command::Prompt);
        assert_eq!(
            Command::parse("unknown"),
            Command::Unknown("unknown".into())
        );
    }

    #[test]
    fn test_parse_databases() {
        assert_eq!(Command::parse("dbs"), Command::Databases(String::new()));
        assert_eq!(
            Command::parse("dbs  test "),
            Command::Databases("test".into())
        );
    }

    #[test]
    fn test_parse_use() {
        assert_eq!(Command::parse("use orders"), Command::Use("orders".into()));
        assert_eq!(Command::parse("use"), Command::Unknown("use".into()));
    }

    #[test]
    fn test_use_statement() {
        assert_eq!(parse_use_statement("use orders"), Some("orders"));
        assert_eq!(parse_use_statement("  use orders; "), Some("orders"));
        assert_eq!(parse_use_statement("use "), None);
        assert_eq!(parse_use_statement("user.find()"), None);
        assert_eq!(parse_use_statement("use two words"), None);
    }
}
