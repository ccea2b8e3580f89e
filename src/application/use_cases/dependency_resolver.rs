//! On-demand resolution of the optional libraries.
//!
//! Each library sits behind a cargo feature. Resolving one means confirming it
//! was compiled in and building a trivial handle from it; nothing is parsed,
//! opened or sent over the network.

use tracing::{debug, info, warn};

use crate::domain::dependency::{OptionalDependency, ResolvedDependency};
use crate::domain::error::DependencyError;
use crate::domain::page::DependencyOutcome;

pub trait DependencyProbe: Send + Sync {
    fn dependency(&self) -> OptionalDependency;
    fn resolve(&self) -> std::result::Result<ResolvedDependency, DependencyError>;
}

/// Probe backed by the library compiled into this binary.
pub struct LibraryProbe {
    dependency: OptionalDependency,
}

impl LibraryProbe {
    pub fn new(dependency: OptionalDependency) -> Self {
        Self { dependency }
    }
}

impl DependencyProbe for LibraryProbe {
    fn dependency(&self) -> OptionalDependency {
        self.dependency
    }

    fn resolve(&self) -> std::result::Result<ResolvedDependency, DependencyError> {
        load(self.dependency)?;
        Ok(ResolvedDependency::new(self.dependency))
    }
}

#[allow(unreachable_patterns)]
fn load(dependency: OptionalDependency) -> std::result::Result<(), DependencyError> {
    match dependency {
        #[cfg(feature = "spreadsheet")]
        OptionalDependency::Spreadsheet => load_spreadsheet_reader(),
        #[cfg(feature = "pdf")]
        OptionalDependency::PdfText => load_pdf_extractor(),
        #[cfg(feature = "drive")]
        OptionalDependency::DriveAuth => load_drive_client(),
        other => Err(DependencyError::NotCompiled {
            dependency: other,
            feature: other.feature().to_string(),
        }),
    }
}

#[cfg(feature = "spreadsheet")]
fn load_spreadsheet_reader() -> std::result::Result<(), DependencyError> {
    let range: calamine::Range<calamine::Data> = calamine::Range::empty();
    debug!(height = range.height(), "calamine loaded");
    Ok(())
}

#[cfg(feature = "pdf")]
fn load_pdf_extractor() -> std::result::Result<(), DependencyError> {
    let document = lopdf::Document::with_version("1.5");
    debug!(version = %document.version, "lopdf loaded");
    Ok(())
}

#[cfg(feature = "drive")]
fn load_drive_client() -> std::result::Result<(), DependencyError> {
    let load_failed = |err: crate::domain::error::AppError| DependencyError::LoadFailed {
        dependency: OptionalDependency::DriveAuth,
        reason: err.to_string(),
    };
    let client = crate::infrastructure::drive::DriveAuthClient::new().map_err(load_failed)?;
    let request = client.token_request().map_err(load_failed)?;
    debug!(method = %request.method(), url = %request.url(), "drive auth client loaded");
    Ok(())
}

pub struct DependencyResolver {
    probes: Vec<Box<dyn DependencyProbe>>,
}

impl Default for DependencyResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyResolver {
    pub fn new() -> Self {
        Self::with_probes(
            OptionalDependency::ALL
                .iter()
                .map(|dependency| Box::new(LibraryProbe::new(*dependency)) as Box<dyn DependencyProbe>)
                .collect(),
        )
    }

    pub fn with_probes(probes: Vec<Box<dyn DependencyProbe>>) -> Self {
        Self { probes }
    }

    pub fn dependencies(&self) -> Vec<OptionalDependency> {
        self.probes.iter().map(|probe| probe.dependency()).collect()
    }

    /// Resolves every probe in order and stops at the first failure.
    pub fn resolve_optional_dependencies(&self) -> DependencyOutcome {
        let mut resolved = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let dependency = probe.dependency();
            debug!(library = dependency.library(), "Resolving optional dependency");
            let item = probe.resolve().map_err(|err| {
                warn!(library = dependency.library(), error = %err, "Optional dependency failed");
                err
            })?;
            resolved.push(item);
        }
        info!(count = resolved.len(), "Optional dependencies resolved");
        Ok(resolved)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Probe that fails with a fixed reason.
    pub(crate) struct BrokenProbe(pub OptionalDependency);

    impl DependencyProbe for BrokenProbe {
        fn dependency(&self) -> OptionalDependency {
            self.0
        }

        fn resolve(&self) -> std::result::Result<ResolvedDependency, DependencyError> {
            Err(DependencyError::LoadFailed {
                dependency: self.0,
                reason: "simulated".to_string(),
            })
        }
    }

    struct CountingProbe {
        dependency: OptionalDependency,
        calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
    }

    impl DependencyProbe for CountingProbe {
        fn dependency(&self) -> OptionalDependency {
            self.dependency
        }

        fn resolve(&self) -> std::result::Result<ResolvedDependency, DependencyError> {
            self.calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(ResolvedDependency::new(self.dependency))
        }
    }

    #[test]
    fn test_default_order() {
        let resolver = DependencyResolver::new();
        assert_eq!(
            resolver.dependencies(),
            vec![
                OptionalDependency::Spreadsheet,
                OptionalDependency::PdfText,
                OptionalDependency::DriveAuth,
            ]
        );
    }

    #[cfg(all(feature = "spreadsheet", feature = "pdf", feature = "drive"))]
    #[test]
    fn test_default_features_resolve() {
        let resolved = DependencyResolver::new()
            .resolve_optional_dependencies()
            .expect("all default features compiled in");
        let libraries: Vec<&str> = resolved.iter().map(|item| item.library.as_str()).collect();
        assert_eq!(libraries, vec!["calamine", "lopdf", "drive-auth"]);
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_missing_feature_reports_not_compiled() {
        let err = LibraryProbe::new(OptionalDependency::PdfText)
            .resolve()
            .unwrap_err();
        assert_eq!(
            err,
            DependencyError::NotCompiled {
                dependency: OptionalDependency::PdfText,
                feature: "pdf".to_string(),
            }
        );
    }

    #[test]
    fn test_stops_at_first_failure() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let resolver = DependencyResolver::with_probes(vec![
            Box::new(BrokenProbe(OptionalDependency::Spreadsheet)),
            Box::new(CountingProbe {
                dependency: OptionalDependency::PdfText,
                calls: calls.clone(),
            }),
        ]);

        let err = resolver.resolve_optional_dependencies().unwrap_err();
        assert_eq!(err.dependency(), OptionalDependency::Spreadsheet);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failure_after_partial_success() {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let resolver = DependencyResolver::with_probes(vec![
            Box::new(CountingProbe {
                dependency: OptionalDependency::Spreadsheet,
                calls: calls.clone(),
            }),
            Box::new(BrokenProbe(OptionalDependency::DriveAuth)),
        ]);

        let err = resolver.resolve_optional_dependencies().unwrap_err();
        assert_eq!(err.dependency(), OptionalDependency::DriveAuth);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }
}
