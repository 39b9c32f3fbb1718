//! Application services

pub mod category;

pub use category::CategoryQueryService;
