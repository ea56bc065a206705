pub mod codec;
pub mod models;
