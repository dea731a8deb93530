//! Database name listing with a substring filter.

use std::io::Write;

use crate::error::ShellResult;
use crate::host::ShellHost;

/// Names containing `filter` (case-sensitive), in their original order.
/// An empty filter keeps everything.
pub fn filter_names<'a>(names: &'a [String], filter: &str) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|name| name.contains(filter))
        .collect()
}

/// Print matching database names one per line, then a blank line.
pub fn list_databases<H, W>(host: &mut H, filter: &str, out: &mut W) -> ShellResult<()>
where
    H: ShellHost + ?Sized,
    W: Write,
{
    let names = host.database_names()?;
    for name in filter_names(&names, filter) {
        writeln!(out, "{}", name)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SnapshotHost;
    use pretty_assertions::assert_eq;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_all_in_order() {
        let all = names(&["local", "admin", "config", "app"]);
        assert_eq!(filter_names(&all, ""), vec!["local", "admin", "config", "app"]);
    }

    #[test]
    fn test_substring_filter() {
        let all = names(&["test", "testing", "production"]);
        assert_eq!(filter_names(&all, "test"), vec!["test", "testing"]);
    }

    #[test]
    fn test_filter_is_case_sensitive_and_literal() {
        let all = names(&["Test", "test", "t*st"]);
        assert_eq!(filter_names(&all, "test"), vec!["test"]);
        assert_eq!(filter_names(&all, "t*"), vec!["t*st"]);
    }

    #[test]
    fn test_list_databases_output() {
        let mut host = SnapshotHost::new().with_databases(["test", "testing", "production"]);
        let mut out = Vec::new();
        list_databases(&mut host, "test", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "test\ntesting\n\n");
    }

    #[test]
    fn test_list_databases_without_matches() {
        let mut host = SnapshotHost::new().with_databases(["admin"]);
        let mut out = Vec::new();
        list_databases(&mut host, "zzz", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n");
    }
}
