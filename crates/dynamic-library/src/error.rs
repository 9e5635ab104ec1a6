use std::path::PathBuf;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The loader rejected the path. `reason` is the loader's own message.
    Load { path: PathBuf, reason: String },
    /// None of the requested names is exported. Holds the first name asked for.
    Resolve { name: String },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load { path, reason } => {
                write!(f, "library '{}' could not be loaded: {}", path.display(), reason)
            }
            Self::Resolve { name } => write!(f, "symbol '{}' not found", name),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
