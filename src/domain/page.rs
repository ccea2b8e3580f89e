//! Page model for the smoke test.
//!
//! `render_page` is a pure function of the secret store, the trigger state and
//! the import outcome. Any front end (HTML, JSON) formats the resulting
//! [`PageView`] without adding logic of its own.

use serde::{Deserialize, Serialize};

use crate::domain::dependency::ResolvedDependency;
use crate::domain::error::DependencyError;
use crate::domain::secret_store::SecretStore;

pub const DEFAULT_SECRET_KEY: &str = "GDRIVE_SERVICE_JSON";
pub const SECRET_PRESENT: &str = "✅ presente";
pub const SECRET_MISSING: &str = "❌ no encontrado";

pub type DependencyOutcome = std::result::Result<Vec<ResolvedDependency>, DependencyError>;

/// Static texts of the page plus the secret key it checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    pub title: String,
    pub icon: String,
    pub heading: String,
    pub description: String,
    pub secret_key: String,
    pub trigger_label: String,
    pub loading_label: String,
    pub caption: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "Prueba de despliegue".to_string(),
            icon: "🧪".to_string(),
            heading: "🧪 Prueba mínima de despliegue".to_string(),
            description: "Si ves esto, la app se renderizó correctamente.".to_string(),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            trigger_label: "🚀 Probar imports pesados".to_string(),
            loading_label: "Importando librerías…".to_string(),
            caption: "¿No carga la página? Revisa el comando de arranque, que el puerto \
                      coincida con el que expone la plataforma y que el binario se haya \
                      compilado con las features spreadsheet, pdf y drive."
                .to_string(),
        }
    }
}

impl PageSettings {
    pub fn with_secret_key(mut self, key: impl Into<String>) -> Self {
        self.secret_key = key.into();
        self
    }
}

/// What the user has done on this request.
#[derive(Debug, Clone, Copy)]
pub enum PageAction<'a> {
    Idle,
    Loading,
    Resolved(&'a DependencyOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerState {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretIndicator {
    pub key: String,
    pub present: bool,
    pub status: String,
}

impl SecretIndicator {
    pub fn line(&self) -> String {
        format!("{} en Secrets: {}", self.key, self.status)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerView {
    pub label: String,
    pub loading_label: String,
    pub state: TriggerState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutcomeView {
    Success {
        message: String,
        libraries: Vec<String>,
    },
    Failure {
        message: String,
        error: DependencyError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub title: String,
    pub icon: String,
    pub heading: String,
    pub description: String,
    pub secret: SecretIndicator,
    pub trigger: TriggerView,
    pub outcome: Option<OutcomeView>,
    pub caption: String,
}

impl PageView {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Some(OutcomeView::Failure { .. }))
    }
}

pub fn secret_indicator(secrets: &dyn SecretStore, key: &str) -> SecretIndicator {
    let present = secrets.has_key(key);
    SecretIndicator {
        key: key.to_string(),
        present,
        status: (if present { SECRET_PRESENT } else { SECRET_MISSING }).to_string(),
    }
}

pub fn confirmation_message(resolved: &[ResolvedDependency]) -> String {
    let libraries: Vec<&str> = resolved.iter().map(|item| item.library.as_str()).collect();
    format!("✅ Imports OK ({})", libraries.join(", "))
}

pub fn render_page(
    secrets: &dyn SecretStore,
    settings: &PageSettings,
    action: PageAction<'_>,
) -> PageView {
    let (state, outcome) = match action {
        PageAction::Idle => (TriggerState::Idle, None),
        PageAction::Loading => (TriggerState::Loading, None),
        PageAction::Resolved(Ok(resolved)) => (
            TriggerState::Succeeded,
            Some(OutcomeView::Success {
                message: confirmation_message(resolved),
                libraries: resolved.iter().map(|item| item.library.clone()).collect(),
            }),
        ),
        PageAction::Resolved(Err(err)) => (
            TriggerState::Failed,
            Some(OutcomeView::Failure {
                message: format!("❌ Falló la importación: {}", err),
                error: err.clone(),
            }),
        ),
    };

    PageView {
        title: settings.title.clone(),
        icon: settings.icon.clone(),
        heading: settings.heading.clone(),
        description: settings.description.clone(),
        secret: secret_indicator(secrets, &settings.secret_key),
        trigger: TriggerView {
            label: settings.trigger_label.clone(),
            loading_label: settings.loading_label.clone(),
            state,
        },
        outcome,
        caption: settings.caption.clone(),
    }
}
