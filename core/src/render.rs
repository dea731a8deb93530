//! Query result rendering and the pretty/ugly print mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ShellError, ShellResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintMode {
    #[default]
    Pretty,
    Ugly,
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintMode::Pretty => write!(f, "pretty"),
            PrintMode::Ugly => write!(f, "ugly"),
        }
    }
}

impl FromStr for PrintMode {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(PrintMode::Pretty),
            "ugly" | "compact" => Ok(PrintMode::Ugly),
            other => Err(ShellError::InvalidInput(format!("unknown print mode: {}", other))),
        }
    }
}

/// Per-session settings read by the renderer. Starts out pretty.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    print_mode: PrintMode,
}

impl SessionConfig {
    pub fn new(print_mode: PrintMode) -> Self {
        Self { print_mode }
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    pub fn set_print_mode(&mut self, mode: PrintMode) {
        self.print_mode = mode;
    }

    /// Start a query that inherits the session's print mode.
    pub fn query(&self, expression: impl Into<String>) -> Query {
        Query {
            expression: expression.into(),
            print_mode: self.print_mode,
        }
    }
}

/// A query about to be evaluated and rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    expression: String,
    print_mode: PrintMode,
}

impl Query {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn print_mode(&self) -> PrintMode {
        self.print_mode
    }

    /// Render this query's results without pretty formatting.
    pub fn ugly(&mut self) -> &mut Self {
        self.print_mode = PrintMode::Ugly;
        self
    }
}

/// Suffix that opts a single query out of pretty printing.
pub const UGLY_SUFFIX: &str = ".ugly()";

/// Split a trailing `.ugly()` off a line of input and build the query.
pub fn parse_query(session: &SessionConfig, input: &str) -> Query {
    let trimmed = input.trim().trim_end_matches(';').trim_end();
    match trimmed.strip_suffix(UGLY_SUFFIX) {
        Some(expression) => {
            let mut query = session.query(expression.trim_end());
            query.ugly();
            query
        }
        None => session.query(trimmed),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, query: &Query, value: &Value) -> ShellResult<String> {
        let text = match query.print_mode() {
            PrintMode::Pretty => serde_json::to_string_pretty(value)?,
            PrintMode::Ugly => serde_json::to_string(value)?,
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_session_defaults_to_pretty() {
        let session = SessionConfig::default();
        assert_eq!(session.print_mode(), PrintMode::Pretty);
        assert_eq!(session.query("db.users.find()").print_mode(), PrintMode::Pretty);
    }

    #[test]
    fn test_ugly_returns_same_handle() {
        let session = SessionConfig::default();
        let mut query = session.query("db.users.find()");
        let addr = &query as *const Query;

        let chained = query.ugly();
        assert_eq!(chained as *const Query, addr);
        assert_eq!(chained.print_mode(), PrintMode::Ugly);

        let again = query.ugly().ugly();
        assert_eq!(again.print_mode(), PrintMode::Ugly);
        assert_eq!(again.expression(), "db.users.find()");
    }

    #[test]
    fn test_ugly_query_leaves_session_alone() {
        let session = SessionConfig::default();
        let mut query = session.query("db.users.find()");
        query.ugly();
        assert_eq!(session.print_mode(), PrintMode::Pretty);
    }

    #[test]
    fn test_session_opt_out() {
        let mut session = SessionConfig::default();
        session.set_print_mode(PrintMode::Ugly);
        assert_eq!(session.query("x").print_mode(), PrintMode::Ugly);
    }

    #[test]
    fn test_parse_query_suffix() {
        let session = SessionConfig::default();

        let query = parse_query(&session, "db.users.find({}).ugly();");
        assert_eq!(query.expression(), "db.users.find({})");
        assert_eq!(query.print_mode(), PrintMode::Ugly);

        let query = parse_query(&session, "  db.users.find()  ");
        assert_eq!(query.expression(), "db.users.find()");
        assert_eq!(query.print_mode(), PrintMode::Pretty);
    }

    #[test]
    fn test_render_modes() {
        let session = SessionConfig::default();
        let value = json!({ "name": "ada", "tags": ["a"] });
        let renderer = Renderer::new();

        let mut query = session.query("q");
        assert_eq!(
            renderer.render(&query, &value).unwrap(),
            "{\n  \"name\": \"ada\",\n  \"tags\": [\n    \"a\"\n  ]\n}"
        );

        query.ugly();
        assert_eq!(
            renderer.render(&query, &value).unwrap(),
            "{\"name\":\"ada\",\"tags\":[\"a\"]}"
        );
    }

    #[test]
    fn test_print_mode_from_str() {
        assert_eq!("Pretty".parse::<PrintMode>().unwrap(), PrintMode::Pretty);
        assert_eq!("ugly".parse::<PrintMode>().unwrap(), PrintMode::Ugly);
        assert!("loud".parse::<PrintMode>().is_err());
    }
}
