pub mod config;
pub mod errors;
pub mod repository;
pub mod util;

pub use mongodb;
pub use repository::*;
