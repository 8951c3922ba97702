use std::path::PathBuf;

use clap::Parser;
use fetch_metadata::{Configuration, ModuleDescriptor};

use crate::error::AppError;

// Shamelessly borrowed from https://github.com/crate-ci/clap-cargo/blob/0378657ffdf2b67bcd6f1ab56e04a1322b92dd0e/src/style.rs
use anstyle::AnsiColor::*;
use anstyle::Effects;
use anstyle::Style;

const HEADER: Style = Green.on_default().effects(Effects::BOLD);
const USAGE: Style = Green.on_default().effects(Effects::BOLD);
const LITERAL: Style = Cyan.on_default().effects(Effects::BOLD);
const PLACEHOLDER: Style = Cyan.on_default();
const ERROR: Style = Red.on_default().effects(Effects::BOLD);
const VALID: Style = Cyan.on_default().effects(Effects::BOLD);
const INVALID: Style = Yellow.on_default().effects(Effects::BOLD);

const APP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(HEADER)
    .usage(USAGE)
    .literal(LITERAL)
    .placeholder(PLACEHOLDER)
    .error(ERROR)
    .valid(VALID)
    .invalid(INVALID);

/// Environment variable naming a configuration file, checked when `--config` isn't given.
pub const CONFIG_ENV: &str = "FETCH_METADATA_CONFIG";

#[derive(Debug, Parser)]
#[command(name = "fetch-metadata")]
#[command(version)]
#[command(about = "Read a module's metadata.json from its git repository via a shallow clone")]
#[command(long_about = None)]
#[command(styles = APP_STYLING)]
#[command(term_width = 80)]
pub struct Args {
    /// Repository to clone: an http(s) URL or user@host:path
    #[arg(value_name = "REMOTE")]
    remote: String,

    /// Revision to read. Takes priority over --tag, --commit and --branch.
    #[arg(long = "ref", value_name = "REF")]
    git_ref: Option<String>,

    /// Tag to read. Takes priority over --commit and --branch.
    #[arg(long, value_name = "TAG")]
    tag: Option<String>,

    /// Commit to read. Takes priority over --branch.
    #[arg(long, value_name = "SHA")]
    commit: Option<String>,

    /// Branch to read. If no revision is given the remote's default branch is read.
    #[arg(long, value_name = "BRANCH")]
    branch: Option<String>,

    /// Read this file, relative to the repository root, instead of metadata.json
    #[arg(long, value_name = "PATH")]
    file: Option<String>,

    /// Proxy for http and https remotes. Overrides the configuration file.
    #[arg(long, value_name = "URL")]
    proxy: Option<String>,

    /// Configuration file to use. If omitted, check the `FETCH_METADATA_CONFIG` environment
    /// variable and then the user's config directory.
    #[arg(long = "config", short = 'c', value_name = "PATH")]
    config_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', value_enum, value_name = "FORMAT", default_value_t)]
    format: OutputFormat,

    /// Log more detail to stderr (-v for info, -vv for debug). `RUST_LOG` takes precedence.
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The file content exactly as stored
    #[default]
    Raw,
    /// A JSON object with the remote, ref, file and content
    Json,
}

#[derive(Debug)]
pub struct ValidatedArgs {
    pub module: ModuleDescriptor,
    /// `None` means the module's metadata file.
    pub file: Option<String>,
    pub config: Configuration,
    pub format: OutputFormat,
}

impl ValidatedArgs {
    /// Load the configuration, falling back to `FETCH_METADATA_CONFIG` then the user's config
    /// directory. No configuration file at all is not an error.
    fn detect_config(arg: Option<PathBuf>) -> Result<Configuration, AppError> {
        let path = match arg {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => PathBuf::from(path),
                None => match directories::ProjectDirs::from("", "", "fetch-metadata") {
                    Some(dirs) if dirs.config_dir().join("config.toml").is_file() => {
                        dirs.config_dir().join("config.toml")
                    }
                    _ => {
                        tracing::debug!("no configuration file, using defaults");
                        return Ok(Configuration::default());
                    }
                },
            },
        };
        tracing::debug!(path = %path.display(), "loading configuration");
        Configuration::load(&path).map_err(|err| AppError::config(path, err))
    }

    fn validate_file(arg: Option<String>) -> Result<Option<String>, AppError> {
        match arg {
            Some(file) if file.is_empty() || file.starts_with('/') => Err(
                AppError::arg_validation(format!(
                    "--file must be a path relative to the repository root, got '{file}'"
                )),
            ),
            file => Ok(file),
        }
    }
}

impl TryFrom<Args> for ValidatedArgs {
    type Error = AppError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let file = Self::validate_file(args.file)?;
        let mut config = Self::detect_config(args.config_file)?;
        if let Some(proxy) = args.proxy {
            config = config.with_proxy(proxy);
        }
        let module = ModuleDescriptor {
            remote: Some(args.remote),
            git_ref: args.git_ref,
            tag: args.tag,
            commit: args.commit,
            branch: args.branch,
        };
        Ok(ValidatedArgs {
            module,
            file,
            config,
            format: args.format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fetch-metadata").chain(args.iter().copied()))
            .expect("Failed to parse arguments")
    }

    #[test]
    fn revision_flags_populate_the_module() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "").unwrap();
        let args = parse(&[
            "https://github.com/puppetlabs/puppetlabs-ntp.git",
            "--branch",
            "main",
            "--tag",
            "v9.0.0",
            "--config",
            config.to_str().unwrap(),
        ]);
        let validated = ValidatedArgs::try_from(args).unwrap();
        assert_eq!(validated.module.selected_ref(), "v9.0.0");
        assert_eq!(validated.file, None);
        assert_eq!(validated.format, OutputFormat::Raw);
    }

    #[test]
    fn proxy_flag_overrides_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        std::fs::write(&config, "[git]\nproxy = \"http://file.proxy:3128\"\n").unwrap();

        let from_file = parse(&["git@github.com:a/b.git", "-c", config.to_str().unwrap()]);
        let validated = ValidatedArgs::try_from(from_file).unwrap();
        assert_eq!(validated.config.proxy(), Some("http://file.proxy:3128"));

        let overridden = parse(&[
            "git@github.com:a/b.git",
            "-c",
            config.to_str().unwrap(),
            "--proxy",
            "http://proxy.local:3128",
        ]);
        let validated = ValidatedArgs::try_from(overridden).unwrap();
        assert_eq!(validated.config.proxy(), Some("http://proxy.local:3128"));
    }

    #[test]
    fn absolute_file_is_rejected() {
        let err = ValidatedArgs::validate_file(Some("/etc/passwd".to_string())).unwrap_err();
        assert_eq!(err.error_kind(), &crate::error::AppErrorKind::ArgValidation);
        assert!(ValidatedArgs::validate_file(Some(String::new())).is_err());
        assert_eq!(
            ValidatedArgs::validate_file(Some("manifests/init.pp".to_string())).unwrap(),
            Some("manifests/init.pp".to_string())
        );
    }

    #[test]
    fn verbosity_is_counted() {
        assert_eq!(parse(&["git@github.com:a/b.git", "-vv"]).verbose, 2);
    }
}
