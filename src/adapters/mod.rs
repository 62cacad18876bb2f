pub mod auth;
pub mod sheets;
pub mod workbook;
