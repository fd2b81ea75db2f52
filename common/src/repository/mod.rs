pub mod db;
pub mod index_trait;
pub mod memory_repository;
pub mod query_builder;
pub mod repository_util;

pub use db::*;
pub use index_trait::*;
pub use memory_repository::*;
pub use query_builder::*;
pub use repository_util::*;
