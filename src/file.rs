//! Document loading: read a YAML file from disk and parse it into an untyped
//! [`serde_yaml::Value`] tree.
//!
//! Loading happens in three steps, and the order matters for which error a
//! caller sees:
//!
//! 1. **Read**: the file is opened and read in full. Failure is an
//!    [`IoError`](YamlfigError::IoError).
//! 2. **Extension check**: the file name must end in `.yaml` or `.yml`
//!    (case-insensitive). This runs *after* a successful read, so a missing
//!    `config.json` reports an I/O error while an existing one reports
//!    [`UnsupportedExtension`](YamlfigError::UnsupportedExtension).
//! 3. **Parse**: the bytes are parsed as a single YAML document and merge
//!    keys (`<<`) are expanded. Malformed content, or a merge key pointing at
//!    something other than a mapping, is a [`ParseError`](YamlfigError::ParseError).
//!
//! The root is expected to be a mapping, but a scalar or sequence root is not a
//! load error: every lookup against it simply comes back empty.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_yaml::Value;

use crate::error::YamlfigError;
use crate::resolve::normalize_key;

/// Whether `path` names a YAML file (`.yaml` / `.yml`, any case).
pub fn has_yaml_extension(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    name.ends_with(".yaml") || name.ends_with(".yml")
}

/// Read the whole file into memory. The handle is closed when this returns,
/// on success and on error alike.
pub fn read_file(path: &Path) -> Result<Vec<u8>, YamlfigError> {
    let io_error = |source| YamlfigError::IoError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let mut content = Vec::new();
    file.read_to_end(&mut content).map_err(io_error)?;
    Ok(content)
}

/// Parse raw bytes into a value tree. Blank input yields `Value::Null`.
/// Merge keys (`<<: *anchor`) are expanded into the mapping that holds them.
pub fn parse_document(path: &Path, content: &[u8]) -> Result<Value, YamlfigError> {
    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    let parse_error = |source| YamlfigError::ParseError {
        path: path.to_path_buf(),
        source,
    };

    let mut value: Value = serde_yaml::from_slice(content).map_err(parse_error)?;
    value.apply_merge().map_err(parse_error)?;
    Ok(value)
}

/// Validate the extension of `path`, then parse already-read `content`.
pub fn load_source(path: &Path, content: &[u8]) -> Result<Value, YamlfigError> {
    if !has_yaml_extension(path) {
        return Err(YamlfigError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }
    parse_document(path, content)
}

/// Read, validate and parse the document at `path`.
pub fn load_document(path: &Path) -> Result<Value, YamlfigError> {
    let content = read_file(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read config file");
    load_source(path, &content)
}

/// Reject documents where two keys of the same mapping fold to the same
/// lowercase name. Only used when strict key checking is enabled.
pub fn check_ambiguous_keys(path: &Path, value: &Value) -> Result<(), YamlfigError> {
    match value {
        Value::Mapping(map) => {
            let mut seen = HashSet::new();
            for (key, child) in map {
                if let Some(normalized) = normalize_key(key)
                    && !seen.insert(normalized.clone())
                {
                    return Err(YamlfigError::AmbiguousKey {
                        path: path.to_path_buf(),
                        key: normalized,
                    });
                }
                check_ambiguous_keys(path, child)?;
            }
            Ok(())
        }
        Value::Sequence(items) => items
            .iter()
            .try_for_each(|item| check_ambiguous_keys(path, item)),
        Value::Tagged(tagged) => check_ambiguous_keys(path, &tagged.value),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn yaml_extensions_are_case_insensitive() {
        assert!(has_yaml_extension(Path::new("config.yaml")));
        assert!(has_yaml_extension(Path::new("config.yml")));
        assert!(has_yaml_extension(Path::new("CONFIG.YML")));
        assert!(has_yaml_extension(Path::new("dir/Config.Yaml")));
    }

    #[test]
    fn other_extensions_rejected() {
        assert!(!has_yaml_extension(Path::new("dummy.file")));
        assert!(!has_yaml_extension(Path::new("config.json")));
        assert!(!has_yaml_extension(Path::new("config.yaml.bak")));
        assert!(!has_yaml_extension(Path::new("yaml")));
    }

    #[test]
    fn load_valid_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.yml");
        fs::write(&path, "service:\n  timeout: 15ms\n").unwrap();

        let value = load_document(&path).unwrap();
        let service = value.get("service").unwrap();
        assert_eq!(service.get("timeout").unwrap().as_str(), Some("15ms"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = load_document(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(YamlfigError::IoError { .. })));
    }

    #[test]
    fn missing_file_with_wrong_extension_reports_io_first() {
        let dir = TempDir::new().unwrap();
        let result = load_document(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(YamlfigError::IoError { .. })));
    }

    #[test]
    fn readable_file_with_wrong_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dummy.file");
        fs::write(&path, "service:\n  name: serv1\n").unwrap();

        let result = load_document(&path);
        assert!(matches!(
            result,
            Err(YamlfigError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn wrong_extension_wins_over_bad_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.txt");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let result = load_document(&path);
        assert!(matches!(
            result,
            Err(YamlfigError::UnsupportedExtension { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "key: [unclosed\n").unwrap();

        let result = load_document(&path);
        assert!(matches!(result, Err(YamlfigError::ParseError { .. })));
    }

    #[test]
    fn empty_file_is_null_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "\n  \n").unwrap();

        assert_eq!(load_document(&path).unwrap(), Value::Null);
    }

    #[test]
    fn merge_keys_expanded() {
        let src = b"base: &b\n  timeout: 1s\nservice:\n  <<: *b\n  name: s\n";
        let value = load_source(Path::new("x.yaml"), src).unwrap();
        let service = value.get("service").unwrap();
        assert_eq!(service.get("timeout").unwrap().as_str(), Some("1s"));
        assert!(service.get("<<").is_none());
    }

    #[test]
    fn local_keys_override_merged_ones() {
        let src = b"base: &b\n  timeout: 1s\nservice:\n  <<: *b\n  timeout: 2s\n";
        let value = load_source(Path::new("x.yaml"), src).unwrap();
        let service = value.get("service").unwrap();
        assert_eq!(service.get("timeout").unwrap().as_str(), Some("2s"));
    }

    #[test]
    fn merge_of_scalar_is_parse_error() {
        let result = load_source(Path::new("x.yaml"), b"a: &s 1\nb:\n  <<: *s\n");
        assert!(matches!(result, Err(YamlfigError::ParseError { .. })));
    }

    #[test]
    fn scalar_root_loads() {
        let value = load_source(Path::new("x.yaml"), b"just a string").unwrap();
        assert_eq!(value.as_str(), Some("just a string"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_file_returns_io_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("locked.yaml");
        fs::write(&path, "a: 1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so only assert when the read fails.
        if let Err(err) = load_document(&path) {
            assert!(matches!(err, YamlfigError::IoError { .. }));
        }

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn ambiguous_keys_detected() {
        let value: Value = serde_yaml::from_str("service:\n  Name: a\n  name: b\n").unwrap();
        let result = check_ambiguous_keys(Path::new("x.yaml"), &value);
        match result {
            Err(YamlfigError::AmbiguousKey { key, .. }) => assert_eq!(key, "name"),
            other => panic!("Expected AmbiguousKey, got {other:?}"),
        }
    }

    #[test]
    fn distinct_keys_pass_strict_check() {
        let value: Value =
            serde_yaml::from_str("service:\n  name: a\n  port: 1\nlist:\n  - x: 1\n").unwrap();
        assert!(check_ambiguous_keys(Path::new("x.yaml"), &value).is_ok());
    }
}
