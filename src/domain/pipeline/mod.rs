pub mod csv_export;
pub mod filter;
pub mod paginate;
pub mod sort;
