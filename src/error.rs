use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong between reading the host table and
/// running the external tool.
#[derive(Debug, Error)]
pub enum VtError {
    #[error("Failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown host alias '{0}'")]
    UnknownAlias(String),

    #[error("Unknown user shortcut '{0}'")]
    UnknownUserShortcut(String),

    #[error("Missing arguments for '{0}'")]
    Arity(&'static str),

    /// `view` only makes sense for a guest.
    #[error("'{0}' is a physical host and has no domain to view")]
    NotVirtual(String),

    #[error("{program} {reason}")]
    ChildProcess { program: String, reason: String },
}

/// What the dispatcher prints instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    HostListing,
    UserListing,
    Usage,
}

impl VtError {
    /// Non-fatal errors degrade to a listing or the usage text.
    /// Configuration errors have no fallback.
    pub fn fallback(&self) -> Option<Fallback> {
        match self {
            VtError::ConfigRead { .. } | VtError::ConfigParse { .. } => None,
            VtError::UnknownAlias(_) => Some(Fallback::HostListing),
            VtError::UnknownUserShortcut(_) => Some(Fallback::UserListing),
            VtError::Arity(_) | VtError::NotVirtual(_) | VtError::ChildProcess { .. } => {
                Some(Fallback::Usage)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, VtError>;
