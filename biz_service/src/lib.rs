pub mod biz_service;
pub mod client;
pub mod dto;
pub mod entitys;
pub mod error_code;
pub mod job;
pub mod manager;
pub mod mapper;
pub mod repos;

#[cfg(test)]
mod test_support;

pub use crate::biz_service::{init_service, BizServices};
