//! The resolver's view of a module and the settings which affect how it is fetched.

/// The ref used when a module names no revision at all: whatever the remote's default is.
pub const HEAD: &str = "HEAD";

/// A module to be resolved, as declared by the caller.
///
/// Every field is optional because modules come from many kinds of source and only some of
/// them live in a git repository.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize, PartialEq, Eq, Clone)]
pub struct ModuleDescriptor {
    /// Upstream repository URL, either HTTP(S) or SCP-like SSH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl ModuleDescriptor {
    /// A descriptor with only a remote set, to be narrowed down with the `with_*` methods.
    pub fn new<S: Into<String>>(remote: S) -> Self {
        Self {
            remote: Some(remote.into()),
            ..Self::default()
        }
    }

    pub fn with_ref<S: Into<String>>(mut self, git_ref: S) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn with_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_commit<S: Into<String>>(mut self, commit: S) -> Self {
        self.commit = Some(commit.into());
        self
    }

    pub fn with_branch<S: Into<String>>(mut self, branch: S) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// The revision to read, by priority: explicit ref, tag, commit, branch, then [`HEAD`].
    pub fn selected_ref(&self) -> &str {
        [&self.git_ref, &self.tag, &self.commit, &self.branch]
            .into_iter()
            .find_map(|candidate| candidate.as_deref())
            .unwrap_or(HEAD)
    }
}

impl std::fmt::Display for ModuleDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.remote {
            Some(remote) => write!(f, "{remote}")?,
            None => write!(f, "<no remote>")?,
        }
        write!(f, " (ref: {})", self.selected_ref())
    }
}

/// Settings for the git commands run while fetching.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GitConfiguration {
    /// Proxy used for both `http` and `https` remotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
}

/// Configuration consumed by [`metadata`](crate::metadata).
#[derive(Debug, Default, serde::Deserialize, serde::Serialize, PartialEq, Eq, Clone)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    #[serde(default)]
    pub git: GitConfiguration,
}

impl Configuration {
    /// Parse a configuration from a TOML document:
    ///
    /// ```toml
    /// [git]
    /// proxy = "http://proxy.local:3128"
    /// ```
    pub fn from_toml_str(document: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(document)?)
    }

    /// Read and parse the configuration file at `path`.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, crate::Error> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Use `proxy` for all git traffic.
    pub fn with_proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        self.git.proxy = Some(proxy.into());
        self
    }

    pub fn proxy(&self) -> Option<&str> {
        self.git.proxy.as_deref()
    }
}
