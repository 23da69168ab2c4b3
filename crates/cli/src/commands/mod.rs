pub mod classify;
pub mod delete;
pub mod upload;
