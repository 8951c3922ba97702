use std::process::ExitCode;

/// Categories of application errors that can be matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppErrorKind {
    /// Argument validation errors, including a remote which can't be cloned
    ArgValidation,
    /// Configuration file reading or parsing errors
    Config,
    /// The clone or the read failed
    Fetch,
}

/// Internal error type that contains all application error variants.
#[derive(Debug, thiserror::Error)]
pub enum AppErrorInner {
    #[error("Argument error: {0}")]
    ArgValidation(String),
    #[error("remote '{remote}' cannot be cloned: expected an http(s) URL or user@host:path")]
    UnusableRemote { remote: String },
    #[error("failed to load configuration from {}", path.display())]
    Config {
        path: std::path::PathBuf,
        #[source]
        err: fetch_metadata::Error,
    },
    #[error("failed to fetch '{file}' from {module}")]
    Fetch {
        module: String,
        file: String,
        #[source]
        err: fetch_metadata::Error,
    },
}

/// The main application-level error type. The kind decides the exit code, while the inner error
/// carries what the application was doing when it failed.
///
/// This type uses the newtype pattern to wrap a boxed inner error, reducing stack size.
#[derive(Debug)]
pub struct AppError(Box<AppErrorInner>, AppErrorKind);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl AppError {
    /// Create a new AppError with the given inner error and kind
    pub fn new(inner: AppErrorInner, kind: AppErrorKind) -> Self {
        Self(Box::new(inner), kind)
    }

    /// Get the error kind for pattern matching
    pub fn error_kind(&self) -> &AppErrorKind {
        &self.1
    }

    /// Create an argument validation error
    pub fn arg_validation(msg: String) -> Self {
        Self::new(AppErrorInner::ArgValidation(msg), AppErrorKind::ArgValidation)
    }

    /// Create an error for a remote the library would skip
    pub fn unusable_remote(remote: String) -> Self {
        Self::new(
            AppErrorInner::UnusableRemote { remote },
            AppErrorKind::ArgValidation,
        )
    }

    /// Create a configuration error
    pub fn config(path: std::path::PathBuf, err: fetch_metadata::Error) -> Self {
        Self::new(AppErrorInner::Config { path, err }, AppErrorKind::Config)
    }

    /// Create a fetch error
    pub fn fetch(module: String, file: String, err: fetch_metadata::Error) -> Self {
        Self::new(
            AppErrorInner::Fetch { module, file, err },
            AppErrorKind::Fetch,
        )
    }

    /// This error followed by each of its sources, one per line.
    pub fn report(&self) -> String {
        let mut report = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            report.push_str(&format!("\n  caused by: {}", err.to_string().trim_end()));
            source = err.source();
        }
        report
    }
}

impl From<AppError> for ExitCode {
    fn from(error: AppError) -> Self {
        ExitCode::from(match error.error_kind() {
            AppErrorKind::Fetch => 1,
            AppErrorKind::ArgValidation => 2,
            AppErrorKind::Config => 3,
        })
    }
}
