//! Config file reading, parsing and writing

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Flattened file contents: lowercased keys, nested tables joined with `.`.
pub type FileValues = BTreeMap<String, Value>;

/// Extensions tried, in order, when searching for `<profile>.<ext>`.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            "json" => Ok(ConfigFormat::Json),
            _ => Err(Error::UnsupportedConfigFormat { path: path.to_path_buf() }),
        }
    }
}

/// Read and parse a config file.
///
/// A missing file yields [`Error::ConfigRead`] with a `NotFound` source;
/// callers decide whether that matters via [`Error::is_not_found`].
pub fn load_file(path: &Path) -> Result<FileValues> {
    let content = fs::read_to_string(path)
        .map_err(|source| Error::ConfigRead { path: path.to_path_buf(), source })?;
    let format = ConfigFormat::from_path(path)?;

    let document = parse_document(&content, format, path)?;
    let Value::Object(map) = document else {
        return Err(Error::ConfigParse {
            path: path.to_path_buf(),
            message: "top level must be a table of keys".to_string(),
        });
    };

    let mut values = FileValues::new();
    flatten_into(&mut values, None, map);
    Ok(values)
}

fn parse_document(content: &str, format: ConfigFormat, path: &Path) -> Result<Value> {
    let parsed = match format {
        ConfigFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => {
            // An empty YAML document is valid and means "no keys".
            if content.trim().is_empty() {
                Ok(Value::Object(Map::new()))
            } else {
                serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string())
            }
        }
        ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
    };

    parsed.map_err(|message| Error::ConfigParse { path: path.to_path_buf(), message })
}

fn flatten_into(values: &mut FileValues, parent: Option<&str>, map: Map<String, Value>) {
    for (key, value) in map {
        let key = key.to_lowercase();
        let full_key = match parent {
            Some(parent) => format!("{}.{}", parent, key),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten_into(values, Some(&full_key), nested),
            other => {
                values.insert(full_key, other);
            }
        }
    }
}

/// Set `key` to `raw` in the config file at `path`, creating the file and
/// its parent directories when needed. Other keys are preserved.
pub fn write_key(path: &Path, key: &str, raw: &str) -> Result<()> {
    let format = ConfigFormat::from_path(path)?;

    let mut document = match fs::read_to_string(path) {
        Ok(content) => match parse_document(&content, format, path)? {
            Value::Object(map) => map,
            _ => {
                return Err(Error::ConfigParse {
                    path: path.to_path_buf(),
                    message: "top level must be a table of keys".to_string(),
                })
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(source) => return Err(Error::ConfigRead { path: path.to_path_buf(), source }),
    };

    document.insert(key.to_lowercase(), infer_value(raw));
    let document = Value::Object(document);

    let rendered = match format {
        ConfigFormat::Toml => toml::to_string_pretty(&document).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::to_string(&document).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::to_string_pretty(&document).map_err(|e| e.to_string()),
    }
    .map_err(|message| Error::ConfigParse { path: path.to_path_buf(), message })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| Error::ConfigWrite { path: path.to_path_buf(), source })?;
    }
    fs::write(path, rendered)
        .map_err(|source| Error::ConfigWrite { path: path.to_path_buf(), source })
}

/// Booleans and integers keep their type in the written file; anything else
/// is stored as a string.
fn infer_value(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => raw.parse::<i64>().map(Value::from).unwrap_or_else(|_| Value::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_flattens_nested_tables() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("main.toml");
        fs::write(&path, "access-token = \"abc\"\npage = 3\n\n[Output]\nColor = true\n")
            .expect("write");

        let values = load_file(&path).expect("load");
        assert_eq!(values["access-token"], Value::String("abc".into()));
        assert_eq!(values["page"], Value::from(3));
        assert_eq!(values["output.color"], Value::Bool(true));
    }

    #[test]
    fn test_load_yaml_and_json() {
        let tmp = TempDir::new().expect("tmp");
        let yaml = tmp.path().join("dev.yaml");
        fs::write(&yaml, "account: acme\nsandbox: true\n").expect("write");
        let json = tmp.path().join("dev.json");
        fs::write(&json, r#"{"domain": "example.com"}"#).expect("write");

        assert_eq!(load_file(&yaml).expect("yaml")["account"], Value::String("acme".into()));
        assert_eq!(load_file(&json).expect("json")["domain"], Value::String("example.com".into()));
    }

    #[test]
    fn test_empty_yaml_has_no_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("main.yml");
        fs::write(&path, "\n").expect("write");
        assert!(load_file(&path).expect("load").is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_file(&tmp.path().join("absent.toml")).expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("main.toml");
        fs::write(&path, "access-token = \n").expect("write");

        let err = load_file(&path).expect_err("malformed");
        assert!(!err.is_not_found());
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_unsupported_extension() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.ini");
        fs::write(&path, "account = acme\n").expect("write");

        let err = load_file(&path).expect_err("unsupported");
        assert!(matches!(err, Error::UnsupportedConfigFormat { .. }));
    }

    #[test]
    fn test_missing_file_without_extension_is_not_found() {
        let tmp = TempDir::new().expect("tmp");
        let err = load_file(&tmp.path().join("opensdk")).expect_err("missing");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_write_key_preserves_existing_keys() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("nested").join("main.toml");

        write_key(&path, "account", "acme").expect("first write");
        write_key(&path, "per-page", "50").expect("second write");
        write_key(&path, "sandbox", "true").expect("third write");

        let values = load_file(&path).expect("load");
        assert_eq!(values["account"], Value::String("acme".into()));
        assert_eq!(values["per-page"], Value::from(50));
        assert_eq!(values["sandbox"], Value::Bool(true));
    }

    #[test]
    fn test_write_key_yaml() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("main.yaml");
        fs::write(&path, "domain: example.com\n").expect("write");

        write_key(&path, "Query", "name:foo").expect("write key");

        let values = load_file(&path).expect("load");
        assert_eq!(values["domain"], Value::String("example.com".into()));
        assert_eq!(values["query"], Value::String("name:foo".into()));
    }
}
