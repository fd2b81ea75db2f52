use crate::dto::review_dto::{ReviewCreateRequest, ReviewResponse};
use crate::dto::IdResponse;
use crate::manager::review_manager::ReviewManager;
use crate::manager::session_manager::Principal;
use crate::mapper::review_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::sync::Arc;

pub struct ReviewService {
    reviews: Arc<ReviewManager>,
}

impl ReviewService {
    pub fn new(reviews: Arc<ReviewManager>) -> Self {
        Self { reviews }
    }

    pub async fn create(&self, program_id: i64, principal: Principal, req: &ReviewCreateRequest) -> Result<IdResponse, AppError> {
        Ok(self.reviews.create(program_id, principal.user_id, req).await?.into())
    }

    pub async fn set_visible(&self, review_id: i64, is_visible: bool) -> Result<IdResponse, AppError> {
        Ok(self.reviews.set_visible(review_id, is_visible).await?.into())
    }

    pub async fn admin_list(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<ReviewResponse>, AppError> {
        Ok(self.reviews.list_by_program(program_id, page).await?.map(review_mapper::to_response))
    }
}
