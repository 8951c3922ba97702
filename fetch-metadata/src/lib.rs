//! Read a module's `metadata.json` straight out of its git repository.
//!
//! When a dependency resolver cannot query a module's metadata any faster way, it can fall back
//! to this crate: make a bare, depth-1 clone of the module's repository into a temporary
//! directory, `git show` the metadata file at the requested revision, and throw the clone away.
//! Requires `git` to be installed and available on `PATH`.
//!
//! # Usage
//!
//! ```no_run
//! use fetch_metadata::{Configuration, ModuleDescriptor};
//!
//! let module = ModuleDescriptor::new("https://github.com/puppetlabs/puppetlabs-ntp.git")
//!     .with_tag("v9.0.0");
//! let config = Configuration::default().with_proxy("http://proxy.local:3128");
//!
//! match fetch_metadata::metadata(&module, &config)? {
//!     Some(json) => println!("{json}"),
//!     None => println!("{module} cannot be cloned"),
//! }
//! # Ok::<(), fetch_metadata::Error>(())
//! ```
//!
//! # Choosing a revision
//!
//! The first of `ref`, `tag`, `commit`, `branch` which is set is used. With none set the
//! remote's default branch (`HEAD`) is read.
//!
//! # Remotes
//!
//! Only `http://`, `https://` and SCP-like SSH remotes (`git@host:path`) are cloned. Modules
//! without a remote, or with any other kind, are skipped: [`metadata`] returns `Ok(None)` so the
//! caller can try another source.
//!
//! Nothing here parses the fetched content.

pub mod clone;
mod error;
pub mod module;
pub mod remote;
pub mod runner;

#[doc(inline)]
pub use crate::error::Error;
#[doc(inline)]
pub use crate::module::{Configuration, GitConfiguration, HEAD, ModuleDescriptor};
#[doc(inline)]
pub use crate::runner::{CommandOutput, CommandRunner, SystemRunner};

/// The file read from each module's repository.
pub const METADATA_FILE: &str = "metadata.json";

/// Fetch the metadata file of `module` by cloning its remote with the system `git`.
///
/// Returns `Ok(None)` if the module has no remote or its remote is not one this crate can clone.
pub fn metadata(module: &ModuleDescriptor, config: &Configuration) -> Result<Option<String>, Error> {
    metadata_with(&SystemRunner, module, config)
}

/// Like [`metadata`], but running commands through `runner`.
pub fn metadata_with<R: CommandRunner + ?Sized>(
    runner: &R,
    module: &ModuleDescriptor,
    config: &Configuration,
) -> Result<Option<String>, Error> {
    let Some(remote) = module.remote.as_deref() else {
        return Ok(None);
    };
    if !remote::is_valid_remote(remote) {
        tracing::debug!(
            remote = %remote::redacted(remote),
            "skipping remote which cannot be cloned"
        );
        return Ok(None);
    }
    let git_ref = module.selected_ref();
    tracing::debug!(remote = %remote::redacted(remote), %git_ref, "querying git repository");
    clone::clone_and_read_file(runner, remote, git_ref, METADATA_FILE, config.proxy()).map(Some)
}
