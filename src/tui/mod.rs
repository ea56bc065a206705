pub mod app;
pub mod handlers;
pub mod input;
pub mod persistence;
pub mod ui;
