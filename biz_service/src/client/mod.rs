pub mod meeting_client;
pub mod object_storage;
