pub mod use_cases;

pub use use_cases::dependency_resolver::{DependencyProbe, DependencyResolver, LibraryProbe};
pub use use_cases::smoke_page::SmokePageUseCase;
