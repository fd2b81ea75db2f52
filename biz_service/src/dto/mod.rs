pub mod application_dto;
pub mod attendance_dto;
pub mod banner_dto;
pub mod coupon_dto;
pub mod memo_dto;
pub mod mission_dto;
pub mod program_dto;
pub mod review_dto;
pub mod user_dto;

use common::query_builder::{DEFAULT_PAGE_SIZE, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IdResponse {
    pub id: i64,
}

impl From<i64> for IdResponse {
    fn from(id: i64) -> Self {
        Self { id }
    }
}

/// `?page=1&size=20`, 1-based.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

impl PageQuery {
    pub fn to_page(&self) -> PageRequest {
        self.to_page_with(DEFAULT_PAGE_SIZE)
    }

    pub fn to_page_with(&self, default_size: u64) -> PageRequest {
        PageRequest::new(self.page, self.size, default_size)
    }
}
