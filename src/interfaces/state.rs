use crate::application::SmokePageUseCase;

pub struct AppState {
    pub smoke_page: SmokePageUseCase,
}
