use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::dependency::OptionalDependency;

#[derive(Debug, Serialize, Deserialize)]
pub enum AppError {
    Internal(String),
    Config(String),
    SecurityError(String),
    Dependency(DependencyError),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Config(msg) => write!(f, "Config error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::Dependency(err) => write!(f, "Dependency error: {}", err),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<DependencyError> for AppError {
    fn from(err: DependencyError) -> Self {
        AppError::Dependency(err)
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Failure to resolve one of the optional libraries behind the import check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependencyError {
    /// The cargo feature carrying the library was disabled at build time.
    NotCompiled {
        dependency: OptionalDependency,
        feature: String,
    },
    /// The library is linked but refused to initialise.
    LoadFailed {
        dependency: OptionalDependency,
        reason: String,
    },
}

impl DependencyError {
    pub fn dependency(&self) -> OptionalDependency {
        match self {
            DependencyError::NotCompiled { dependency, .. }
            | DependencyError::LoadFailed { dependency, .. } => *dependency,
        }
    }
}

impl fmt::Display for DependencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyError::NotCompiled {
                dependency,
                feature,
            } => write!(
                f,
                "{} ({}) no está disponible: compila con la feature `{}`",
                dependency.display_name(),
                dependency.library(),
                feature
            ),
            DependencyError::LoadFailed { dependency, reason } => write!(
                f,
                "{} ({}) no se pudo cargar: {}",
                dependency.display_name(),
                dependency.library(),
                reason
            ),
        }
    }
}

impl std::error::Error for DependencyError {}

pub type Result<T> = std::result::Result<T, AppError>;
