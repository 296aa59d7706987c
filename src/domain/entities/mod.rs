pub mod dataset;
pub mod query;
pub mod saved_query;
pub mod screen;
pub mod tag;
