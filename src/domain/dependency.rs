use serde::{Deserialize, Serialize};

/// Libraries loaded only when the import check is requested.
///
/// Each one is gated behind a cargo feature so a deployment can be built
/// without it; the check then reports it as missing instead of crashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionalDependency {
    Spreadsheet,
    PdfText,
    DriveAuth,
}

impl OptionalDependency {
    /// Resolution order used by the import check.
    pub const ALL: [OptionalDependency; 3] = [
        OptionalDependency::Spreadsheet,
        OptionalDependency::PdfText,
        OptionalDependency::DriveAuth,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            OptionalDependency::Spreadsheet => "Lector de hojas de cálculo",
            OptionalDependency::PdfText => "Extractor de texto PDF",
            OptionalDependency::DriveAuth => "Cliente de autenticación de Drive",
        }
    }

    /// Name shown in the confirmation message.
    pub fn library(&self) -> &'static str {
        match self {
            OptionalDependency::Spreadsheet => "calamine",
            OptionalDependency::PdfText => "lopdf",
            OptionalDependency::DriveAuth => "drive-auth",
        }
    }

    pub fn feature(&self) -> &'static str {
        match self {
            OptionalDependency::Spreadsheet => "spreadsheet",
            OptionalDependency::PdfText => "pdf",
            OptionalDependency::DriveAuth => "drive",
        }
    }

    /// Whether the backing library was compiled into this binary.
    pub fn is_compiled(&self) -> bool {
        match self {
            OptionalDependency::Spreadsheet => cfg!(feature = "spreadsheet"),
            OptionalDependency::PdfText => cfg!(feature = "pdf"),
            OptionalDependency::DriveAuth => cfg!(feature = "drive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
    pub dependency: OptionalDependency,
    pub library: String,
}

impl ResolvedDependency {
    pub fn new(dependency: OptionalDependency) -> Self {
        Self {
            dependency,
            library: dependency.library().to_string(),
        }
    }
}
