//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }

    /// A config with no sections; every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_ref()
            .and_then(|v| Self::parse_bool(v.trim()))
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[server]
listen = 127.0.0.1:5000

[provider]
kind = yahoo
user_agent = quoteproxy-test/1.0
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("server", "listen"),
            Some("127.0.0.1:5000".to_string())
        );
        assert_eq!(
            adapter.get_string("provider", "user_agent"),
            Some("quoteproxy-test/1.0".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[search]\nlimit = 10\n").unwrap();
        assert_eq!(adapter.get_string("search", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn empty_returns_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_string("server", "listen"), None);
        assert_eq!(adapter.get_int("search", "limit", 10), 10);
        assert!(adapter.get_bool("server", "cors", true));
    }

    #[test]
    fn get_int_returns_value() {
        let adapter = FileConfigAdapter::from_string("[indicators]\nrsi_period = 21\n").unwrap();
        assert_eq!(adapter.get_int("indicators", "rsi_period", 14), 21);
    }

    #[test]
    fn get_int_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[indicators]\n").unwrap();
        assert_eq!(adapter.get_int("indicators", "missing", 42), 42);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[indicators]\nrsi_period = abc\n").unwrap();
        assert_eq!(adapter.get_int("indicators", "rsi_period", 14), 14);
    }

    #[test]
    fn get_bool_returns_true_values() {
        let adapter =
            FileConfigAdapter::from_string("[server]\na = true\nb = yes\nc = 1\nd = on\n").unwrap();
        assert!(adapter.get_bool("server", "a", false));
        assert!(adapter.get_bool("server", "b", false));
        assert!(adapter.get_bool("server", "c", false));
        assert!(adapter.get_bool("server", "d", false));
    }

    #[test]
    fn get_bool_returns_false_values() {
        let adapter =
            FileConfigAdapter::from_string("[server]\na = false\nb = no\nc = 0\nd = off\n").unwrap();
        assert!(!adapter.get_bool("server", "a", true));
        assert!(!adapter.get_bool("server", "b", true));
        assert!(!adapter.get_bool("server", "c", true));
        assert!(!adapter.get_bool("server", "d", true));
    }

    #[test]
    fn get_bool_returns_default_for_missing() {
        let adapter = FileConfigAdapter::from_string("[server]\n").unwrap();
        assert!(adapter.get_bool("server", "missing", true));
        assert!(!adapter.get_bool("server", "missing", false));
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config("[provider]\ndata_dir = /srv/quotes\n");
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("provider", "data_dir"),
            Some("/srv/quotes".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(result.is_err());
    }
}
