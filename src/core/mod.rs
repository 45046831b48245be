pub mod error;
pub mod error_pages;
pub mod types;
