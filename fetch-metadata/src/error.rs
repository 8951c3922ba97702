/// The main error enum for this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration could not be deserialised.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// `git clone` exited unsuccessfully. `output` is whatever the clone wrote to stderr.
    #[error(
        "failed to clone '{url}'{with_proxy}: {output}",
        with_proxy = .proxy.as_ref().map(|p| format!(" with proxy {p}")).unwrap_or_default()
    )]
    Clone {
        url: String,
        proxy: Option<String>,
        output: String,
    },

    /// `git show` failed, or produced too little output to be the requested file.
    #[error("invalid content for '{file}' at '{git_ref}': {output}")]
    InvalidContent {
        git_ref: String,
        file: String,
        output: String,
    },
}
