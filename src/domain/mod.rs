pub mod entities;
pub mod pipeline;
