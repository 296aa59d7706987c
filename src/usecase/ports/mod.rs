pub mod repo;
pub mod screener;
