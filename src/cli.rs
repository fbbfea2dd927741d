//! Clap adapter for yamlfig.
//!
//! Compiled only when the `clap` Cargo feature is enabled (on by default).
//! [`LookupArgs`] can be embedded in an app's clap derive to expose
//! `get <key>` and `list` over a YAML config file. The only bridge to the
//! core is [`LookupArgs::into_action()`]; from there everything flows through
//! [`YamlFileProvider::handle()`](crate::YamlFileProvider::handle).

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::provider::YamlFileProvider;
use crate::types::LookupAction;

/// Clap-derived args for inspecting a YAML config file.
///
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     lookup: LookupArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct LookupArgs {
    /// YAML file to read (.yaml or .yml).
    #[arg(short, long, global = true, default_value = "config.yml")]
    pub file: PathBuf,

    #[command(subcommand)]
    pub action: Option<LookupSubcommand>,
}

/// Available lookup subcommands.
#[derive(Debug, Subcommand)]
pub enum LookupSubcommand {
    /// Show every key-value pair in the file.
    List,
    /// Show the value at a dotted key.
    Get {
        /// Dotted key path, case-insensitive (e.g. "service.timeout").
        key: String,
    },
}

impl LookupArgs {
    /// An uninitialized provider for the selected file. Call `init()` on it
    /// before [`handle()`](YamlFileProvider::handle).
    pub fn provider(&self) -> YamlFileProvider {
        YamlFileProvider::new(&self.file)
    }

    /// Convert clap-parsed args into a framework-agnostic `LookupAction`.
    ///
    /// Bare invocation (no subcommand) and explicit `list` both map to
    /// `LookupAction::List`.
    pub fn into_action(self) -> LookupAction {
        match self.action {
            None | Some(LookupSubcommand::List) => LookupAction::List,
            Some(LookupSubcommand::Get { key }) => LookupAction::Get { key },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    /// Wrapper so we can use `try_parse_from` on the args.
    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        lookup: LookupArgs,
    }

    fn parse(args: &[&str]) -> LookupArgs {
        TestCli::try_parse_from(args).unwrap().lookup
    }

    #[test]
    fn parse_get() {
        let args = parse(&["test", "get", "service.timeout"]);
        let action = args.into_action();
        assert_eq!(
            action,
            LookupAction::Get {
                key: "service.timeout".into()
            }
        );
    }

    #[test]
    fn parse_bare_is_list() {
        let args = parse(&["test"]);
        assert_eq!(args.file, PathBuf::from("config.yml"));
        assert_eq!(args.into_action(), LookupAction::List);
    }

    #[test]
    fn parse_explicit_list() {
        let args = parse(&["test", "list"]);
        assert_eq!(args.into_action(), LookupAction::List);
    }

    #[test]
    fn parse_file_before_subcommand() {
        let args = parse(&["test", "--file", "/etc/app.yaml", "get", "port"]);
        assert_eq!(args.file, PathBuf::from("/etc/app.yaml"));
        assert_eq!(args.into_action(), LookupAction::Get { key: "port".into() });
    }

    #[test]
    fn parse_file_after_subcommand() {
        let args = parse(&["test", "list", "-f", "local.yml"]);
        assert_eq!(args.file, PathBuf::from("local.yml"));
    }

    #[test]
    fn provider_reads_selected_file() {
        use crate::fixtures::test::{SERVICE_DOC, write_doc};
        use crate::provider::Provider;

        let (_dir, path) = write_doc("app.yaml", SERVICE_DOC);
        let file = path.to_string_lossy().into_owned();
        let args = parse(&["test", "--file", &file, "get", "service.name"]);

        let mut provider = args.provider();
        assert_eq!(provider.file_name(), path.as_path());
        provider.init().unwrap();
        let result = provider.handle(args.into_action()).unwrap();
        assert_eq!(result.to_string(), "service.name = serv1");
    }

    #[test]
    fn invalid_subcommand_errors() {
        let result = TestCli::try_parse_from(["test", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn get_requires_key() {
        let result = TestCli::try_parse_from(["test", "get"]);
        assert!(result.is_err());
    }
}
