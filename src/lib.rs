//! A YAML file value provider for tag-driven configuration engines.
//!
//! A host engine walks a struct, and for each field asks its providers in
//! turn for a value. Yamlfig is one such provider: given a field tagged with
//! a dotted path, it finds the value at that path in a YAML file and hands it
//! back as a string for the host to coerce.
//!
//! ```ignore
//! let mut provider = YamlFileProvider::new("config.yml");
//! provider.init()?;
//!
//! let mut timeout = Duration::ZERO;
//! let mut field = TaggedField::new("Timeout", &mut timeout)
//!     .with_tag("file_yml", "service.timeout");
//! provider.provide(&mut field)?;
//! ```
//!
//! # Lifecycle
//!
//! A [`YamlFileProvider`] is created with a file name and starts
//! uninitialized. [`init()`](Provider::init) reads the file, checks that its
//! name ends in `.yaml` or `.yml` (any case), and parses it. After that the
//! document is read-only and [`provide()`](Provider::provide) can be called
//! any number of times. Calling `provide()` before `init()` returns
//! [`YamlfigError::NotInitialized`].
//!
//! # Paths
//!
//! A tag value like `service.alfa.beta` is split on `.` and walked one
//! mapping at a time. Matching is case-insensitive on both sides, so
//! `Service: { Timeout: 15ms }` answers `service.timeout`. Paths never index
//! into sequences. If two keys in the same mapping differ only by case, the
//! last one in the file wins; enable
//! [`strict_keys`](YamlFileProvider::strict_keys) to reject such files at
//! load time instead.
//!
//! Leaves are stringified canonically: numbers and booleans as written,
//! null as the empty string, sequences and mappings as compact YAML.
//!
//! # Field descriptors
//!
//! Providers never reflect over structs. They talk to a [`Field`], which
//! exposes tags by key and a `set_from_str` hook. [`TaggedField`] implements
//! it over any `&mut T` where `T: FromConfigStr`: strings, paths, booleans,
//! integers, floats, [`Duration`](std::time::Duration)s (`15ms`, `1h30m`)
//! and `Option`s of those.
//!
//! # Fallback
//!
//! [`YamlfigError::MissingTag`] and [`YamlfigError::ValueNotFound`] are
//! recoverable: the field simply isn't this provider's to fill.
//! [`ProviderChain`] tries providers in order and falls through on exactly
//! those two errors. Everything else (I/O, extension, parse, coercion) stops
//! the field.
//!
//! # Inspection
//!
//! [`YamlFileProvider::handle()`] runs a [`LookupAction`] (`get` a key or
//! `list` all leaves) against the loaded file. With the `clap` feature,
//! [`LookupArgs`] provides ready-made subcommands that produce those actions.

pub mod error;
pub mod types;

mod chain;
#[cfg(feature = "clap")]
mod cli;
mod field;
mod file;
mod flatten;
mod ops;
mod provider;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use chain::ProviderChain;
#[cfg(feature = "clap")]
pub use cli::{LookupArgs, LookupSubcommand};
pub use error::YamlfigError;
pub use field::{Field, FromConfigStr, TaggedField, parse_duration};
pub use ops::LookupResult;
pub use provider::{DEFAULT_TAG, PROVIDER_NAME, Provider, YamlFileProvider};
pub use resolve::{find_value, split_path};
pub use types::LookupAction;
