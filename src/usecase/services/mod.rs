pub mod import_service;
pub mod query_service;
pub mod saved_query_service;
pub mod screening_service;
