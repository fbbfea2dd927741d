#[cfg(test)]
pub mod test {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    /// Flat service section with a string and a duration.
    pub const SERVICE_DOC: &str = "service:\n  name: serv1\n  timeout: 15ms\n";

    /// Two levels of nesting with an integer leaf.
    pub const NESTED_DOC: &str = "service:\n  alfa:\n    beta: 42\n";

    /// A document covering every scalar kind the coercion layer handles.
    pub const FULL_DOC: &str = "\
Service:
  Name: serv1
  Timeout: 15ms
  Port: 8080
  Debug: true
  Ratio: 0.75
  Alfa:
    Beta: 42
hosts:
  - a.example.com
  - b.example.com
";

    /// Write `content` to `file_name` inside a fresh temp dir. The dir must be
    /// kept alive for as long as the file is used.
    pub fn write_doc(file_name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(file_name);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn fixtures_parse() {
        for src in [SERVICE_DOC, NESTED_DOC, FULL_DOC] {
            let value: serde_yaml::Value = serde_yaml::from_str(src).unwrap();
            assert!(value.is_mapping());
        }
    }
}
