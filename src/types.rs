/// An inspection operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupAction {
    /// Show the value at a dotted key.
    Get { key: String },
    /// Show every leaf of the document as `key = value`.
    List,
}
