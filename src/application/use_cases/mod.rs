pub mod dependency_resolver;
pub mod smoke_page;
