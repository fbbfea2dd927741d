use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::YamlfigError;
use crate::field::Field;
use crate::file;
use crate::ops::{self, LookupResult};
use crate::resolve;
use crate::types::LookupAction;

/// Name reported by [`YamlFileProvider`] in errors.
pub const PROVIDER_NAME: &str = "YAMLFileProvider";

/// Field tag key consulted by [`YamlFileProvider`] unless overridden.
pub const DEFAULT_TAG: &str = "file_yml";

/// A pluggable source of field values for a tag-driven configuration engine.
///
/// The host engine calls [`init`](Self::init) once, then
/// [`provide`](Self::provide) for each field. A recoverable error from
/// `provide` (see [`YamlfigError::is_recoverable`]) means "not mine, try the
/// next provider".
pub trait Provider {
    fn name(&self) -> &str;

    /// The field tag key this provider reads its paths from.
    fn tag(&self) -> &str;

    fn init(&mut self) -> Result<(), YamlfigError>;

    fn provide(&self, field: &mut dyn Field) -> Result<(), YamlfigError>;
}

/// Supplies field values from a single YAML file.
///
/// The provider starts uninitialized. [`init`](Provider::init) reads and
/// parses the file; after that the document is never modified, so any number
/// of `provide` calls see the same data.
///
/// ```ignore
/// let mut provider = YamlFileProvider::new("config.yml");
/// provider.init()?;
///
/// let mut timeout = Duration::ZERO;
/// let mut field = TaggedField::new("Timeout", &mut timeout)
///     .with_tag("file_yml", "service.timeout");
/// provider.provide(&mut field)?;
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileProvider {
    file_name: PathBuf,
    tag_key: String,
    strict_keys: bool,
    document: Option<Value>,
}

impl YamlFileProvider {
    pub fn new(file_name: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            tag_key: DEFAULT_TAG.to_string(),
            strict_keys: false,
            document: None,
        }
    }

    /// Read paths from a different field tag (default: `file_yml`).
    pub fn tag_key(mut self, key: &str) -> Self {
        self.tag_key = key.to_string();
        self
    }

    /// Fail [`init`](Provider::init) with [`YamlfigError::AmbiguousKey`] when two
    /// keys of one mapping differ only by case (default: `false`, the last such
    /// key wins at lookup time).
    pub fn strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    pub fn file_name(&self) -> &Path {
        &self.file_name
    }

    /// Whether a document has been loaded.
    pub fn is_ready(&self) -> bool {
        self.document.is_some()
    }

    /// Load from bytes the caller already holds instead of reading the file.
    /// The extension of the configured file name is still checked.
    pub fn init_from_source(&mut self, content: &[u8]) -> Result<(), YamlfigError> {
        let document = file::load_source(&self.file_name, content)?;
        self.install(document)
    }

    /// The loaded document.
    pub fn document(&self) -> Result<&Value, YamlfigError> {
        self.document
            .as_ref()
            .ok_or_else(|| YamlfigError::NotInitialized {
                provider: PROVIDER_NAME.into(),
            })
    }

    /// Resolve a dotted key directly, without a field descriptor.
    pub fn lookup(&self, key: &str) -> Result<Option<String>, YamlfigError> {
        let document = self.document()?;
        Ok(resolve::find_value(document, &resolve::split_path(key)))
    }

    /// Run an inspection operation against the loaded document.
    pub fn handle(&self, action: LookupAction) -> Result<LookupResult, YamlfigError> {
        let document = self.document()?;
        match action {
            LookupAction::Get { key } => ops::get_value(document, &key),
            LookupAction::List => Ok(ops::list_values(document)),
        }
    }

    fn install(&mut self, document: Value) -> Result<(), YamlfigError> {
        if self.strict_keys {
            file::check_ambiguous_keys(&self.file_name, &document)?;
        }
        if !document.is_mapping() {
            tracing::debug!(
                path = %self.file_name.display(),
                "document root is not a mapping; every lookup will miss"
            );
        }
        self.document = Some(document);
        Ok(())
    }
}

impl Provider for YamlFileProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn tag(&self) -> &str {
        &self.tag_key
    }

    fn init(&mut self) -> Result<(), YamlfigError> {
        let document = file::load_document(&self.file_name)?;
        self.install(document)
    }

    fn provide(&self, field: &mut dyn Field) -> Result<(), YamlfigError> {
        let path = match field.tag(&self.tag_key) {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => {
                return Err(YamlfigError::MissingTag {
                    provider: PROVIDER_NAME.into(),
                    tag: self.tag_key.clone(),
                });
            }
        };

        let document = self.document()?;
        let value = resolve::find_value(document, &resolve::split_path(&path)).ok_or_else(
            || YamlfigError::ValueNotFound {
                provider: PROVIDER_NAME.into(),
                path: path.clone(),
            },
        )?;

        tracing::debug!(field = field.name(), path = %path, "resolved field");
        field.set_from_str(&value)
    }
}
