//! Parse a project `.env` into a key-value map; application happens in lib.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Path of the `.env` to read: `override_dir` if given, else current directory.
/// `None` when no file is present.
fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    (path.is_file()).then_some(path)
}

/// Minimal `.env` parser: `KEY=VALUE` lines, optional `export ` prefix.
///
/// * Empty lines and lines starting with `#` are skipped; `#` inside a value
///   is kept.
/// * Double-quoted values support the `\"` escape; single-quoted values are
///   stripped verbatim.
/// * No multiline values or line continuations.
fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();
        let value = if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value[1..value.len() - 1].replace("\\\"", "\"")
        } else if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
            value[1..value.len() - 1].to_string()
        } else {
            value.to_string()
        };
        map.insert(key.to_string(), value);
    }
    map
}

/// Loads `.env` into a map. A missing file is an empty map, not an error.
pub fn load_env_map(override_dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    let content = std::fs::read_to_string(path)?;
    Ok(parse_dotenv(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_pairs() {
        let map = parse_dotenv("GEMINI_API_KEY=abc\nEDUGENIUS_MODEL=gemini-2.0-flash\n");
        assert_eq!(map.get("GEMINI_API_KEY"), Some(&"abc".to_string()));
        assert_eq!(
            map.get("EDUGENIUS_MODEL"),
            Some(&"gemini-2.0-flash".to_string())
        );
    }

    #[test]
    fn skips_comments_blank_lines_and_bare_words() {
        let map = parse_dotenv("# comment\n\nNOT_A_PAIR\nKEY=val\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("KEY"), Some(&"val".to_string()));
    }

    #[test]
    fn export_prefix_is_accepted() {
        let map = parse_dotenv("export KEY=val\n");
        assert_eq!(map.get("KEY"), Some(&"val".to_string()));
    }

    #[test]
    fn double_quotes_strip_and_unescape() {
        let map = parse_dotenv(r#"KEY="say \"hi\"""#);
        assert_eq!(map.get("KEY"), Some(&"say \"hi\"".to_string()));
    }

    #[test]
    fn single_quotes_strip_verbatim() {
        let map = parse_dotenv("KEY='a # literal'");
        assert_eq!(map.get("KEY"), Some(&"a # literal".to_string()));
    }

    #[test]
    fn empty_value_is_kept_as_empty_string() {
        let map = parse_dotenv("KEY=\n");
        assert_eq!(map.get("KEY"), Some(&String::new()));
    }

    #[test]
    fn empty_key_is_skipped() {
        let map = parse_dotenv("=value\nKEY=ok\n");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn missing_file_yields_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_env_map(Some(dir.path())).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn reads_env_file_from_override_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "A=1\nB=2\n").unwrap();
        let map = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(map.get("A"), Some(&"1".to_string()));
        assert_eq!(map.get("B"), Some(&"2".to_string()));
    }
}
