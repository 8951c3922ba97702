use fetch_metadata::{METADATA_FILE, ModuleDescriptor, SystemRunner, remote};

use crate::args::{OutputFormat, ValidatedArgs};
use crate::error::AppError;
use crate::progress::make_progress_spinner;

/// What gets printed for `--format json`.
#[derive(Debug, serde::Serialize)]
pub struct Fetched<'a> {
    pub remote: &'a str,
    #[serde(rename = "ref")]
    pub git_ref: &'a str,
    pub file: &'a str,
    pub content: &'a str,
}

/// Fetch the requested file, showing a spinner while the clone runs.
pub fn fetch(args: &ValidatedArgs) -> Result<String, AppError> {
    let module = &args.module;
    let file = args.file.as_deref().unwrap_or(METADATA_FILE);
    tracing::info!(%module, %file, "fetching");
    let bar = make_progress_spinner(format!("cloning {module}"));
    let result = match &args.file {
        None => fetch_metadata::metadata(module, &args.config),
        Some(file) => read_file(module, file, &args.config),
    };
    bar.finish_and_clear();
    match result {
        Ok(Some(content)) => Ok(content),
        Ok(None) => Err(AppError::unusable_remote(remote_of(module).to_string())),
        Err(err) => Err(AppError::fetch(module.to_string(), file.to_string(), err)),
    }
}

/// The same gate as [`fetch_metadata::metadata`], for an arbitrary file.
fn read_file(
    module: &ModuleDescriptor,
    file: &str,
    config: &fetch_metadata::Configuration,
) -> Result<Option<String>, fetch_metadata::Error> {
    let remote = remote_of(module);
    if !remote::is_valid_remote(remote) {
        return Ok(None);
    }
    fetch_metadata::clone::clone_and_read_file(
        &SystemRunner,
        remote,
        module.selected_ref(),
        file,
        config.proxy(),
    )
    .map(Some)
}

fn remote_of(module: &ModuleDescriptor) -> &str {
    module.remote.as_deref().unwrap_or_default()
}

/// Render fetched content in the requested format.
pub fn render(args: &ValidatedArgs, content: &str) -> String {
    match args.format {
        OutputFormat::Raw => content.to_string(),
        OutputFormat::Json => {
            let fetched = Fetched {
                remote: remote_of(&args.module),
                git_ref: args.module.selected_ref(),
                file: args.file.as_deref().unwrap_or(METADATA_FILE),
                content,
            };
            // Serialising borrowed strings cannot fail.
            serde_json::to_string_pretty(&fetched).unwrap_or_default() + "\n"
        }
    }
}
