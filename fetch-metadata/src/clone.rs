//! Reading one file out of a remote repository via a throwaway shallow clone.
//!
//! This is the slow path: a bare, depth-1, single-branch clone into a temporary directory
//! followed by `git show <ref>:<file>`. Nothing is kept once the call returns.

use std::path::Path;
use std::process::Command;

use crate::error::Error;
use crate::module::HEAD;
use crate::remote::redacted;
use crate::runner::CommandRunner;

/// Prefix of the temporary directory each fetch clones into.
pub const WORKSPACE_PREFIX: &str = "fetch-metadata-";

/// Content this short (in characters) is never a real file: `""`, a newline, or `{}`.
const MIN_CONTENT_LEN: usize = 2;

/// Clone `url` at `git_ref` and return the content of `file`, a path relative to the
/// repository root.
///
/// Exactly two commands are run through `runner`: the clone, then the read. Neither is retried.
/// The temporary clone is removed before this returns, whatever the outcome.
#[tracing::instrument(
    skip(runner, url, proxy),
    fields(remote = %redacted(url), proxy = ?proxy.map(redacted))
)]
pub fn clone_and_read_file<R: CommandRunner + ?Sized>(
    runner: &R,
    url: &str,
    git_ref: &str,
    file: &str,
    proxy: Option<&str>,
) -> Result<String, Error> {
    with_workspace(|workspace| {
        let clone = runner.run(&mut clone_command(url, git_ref, workspace, proxy), true)?;
        if !clone.success {
            tracing::warn!(output = %clone.output.trim_end(), "clone failed");
            return Err(Error::Clone {
                url: url.to_string(),
                proxy: proxy.map(str::to_string),
                output: clone.output,
            });
        }
        let read = runner.run(&mut show_command(git_ref, file, workspace), false)?;
        let chars = read.output.chars().count();
        if !read.success || chars <= MIN_CONTENT_LEN {
            tracing::warn!(success = read.success, chars, "invalid content");
            return Err(Error::InvalidContent {
                git_ref: git_ref.to_string(),
                file: file.to_string(),
                output: read.output,
            });
        }
        tracing::debug!(chars, "read file from clone");
        Ok(read.output)
    })
}

/// Run `body` with a fresh temporary directory which is removed afterwards.
///
/// If `body` fails its error is returned after the directory has been removed. Should it panic,
/// the directory is removed while unwinding.
fn with_workspace<T, F>(body: F) -> Result<T, Error>
where
    F: FnOnce(&Path) -> Result<T, Error>,
{
    let workspace = tempfile::Builder::new()
        .prefix(WORKSPACE_PREFIX)
        .tempdir()?;
    let result = body(workspace.path());
    let released = workspace.close();
    let value = result?;
    released?;
    Ok(value)
}

/// `git clone --bare --depth=1 --single-branch [--branch=<ref>] [proxy config] -- <url> <into>`
fn clone_command(url: &str, git_ref: &str, into: &Path, proxy: Option<&str>) -> Command {
    let mut git = Command::new("git");
    git.args(["clone", "--bare", "--depth=1", "--single-branch"]);
    // `--branch=HEAD` is rejected by git; without it the remote's default branch is cloned.
    if git_ref != HEAD {
        git.arg(format!("--branch={git_ref}"));
    }
    if let Some(proxy) = proxy {
        git.arg("--config")
            .arg(format!("http.proxy={proxy}"))
            .arg("--config")
            .arg(format!("https.proxy={proxy}"));
    }
    git.arg("--").arg(url).arg(into);
    git
}

/// `git show <ref>:<file>`, run inside the clone.
fn show_command(git_ref: &str, file: &str, repo: &Path) -> Command {
    let mut git = Command::new("git");
    git.arg("show")
        .arg(format!("{git_ref}:{file}"))
        .current_dir(repo);
    git
}
