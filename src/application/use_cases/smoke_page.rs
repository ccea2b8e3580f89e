use std::sync::Arc;

use tracing::info;

use crate::application::use_cases::dependency_resolver::DependencyResolver;
use crate::domain::page::{render_page, PageAction, PageSettings, PageView, TriggerState};
use crate::domain::secret_store::SecretStore;

pub struct SmokePageUseCase {
    secrets: Arc<dyn SecretStore>,
    resolver: Arc<DependencyResolver>,
    settings: PageSettings,
}

impl SmokePageUseCase {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        resolver: Arc<DependencyResolver>,
        settings: PageSettings,
    ) -> Self {
        Self {
            secrets,
            resolver,
            settings,
        }
    }

    /// Plain page load; the trigger stays idle.
    pub fn render(&self) -> PageView {
        render_page(self.secrets.as_ref(), &self.settings, PageAction::Idle)
    }

    /// Trigger pressed: resolve the optional libraries and render the outcome.
    ///
    /// Blocking; callers on an async runtime should move it off the reactor.
    pub fn check_imports(&self) -> PageView {
        info!(
            state = ?TriggerState::Loading,
            libraries = self.resolver.dependencies().len(),
            "Import check started"
        );

        let outcome = self.resolver.resolve_optional_dependencies();
        let page = render_page(
            self.secrets.as_ref(),
            &self.settings,
            PageAction::Resolved(&outcome),
        );

        info!(state = ?page.trigger.state, "Import check finished");
        page
    }
}
