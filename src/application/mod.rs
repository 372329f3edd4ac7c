//! Application services layer.

pub mod feed;
pub mod follows;
pub mod pagination;
pub mod repos;
