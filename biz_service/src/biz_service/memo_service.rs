use crate::dto::memo_dto::{MemoRequest, MemoResponse};
use crate::dto::IdResponse;
use crate::manager::memo_manager::MemoManager;
use crate::mapper::memo_mapper;
use common::errors::AppError;
use std::sync::Arc;

pub struct MemoService {
    memos: Arc<MemoManager>,
}

impl MemoService {
    pub fn new(memos: Arc<MemoManager>) -> Self {
        Self { memos }
    }

    pub async fn create(&self, user_id: i64, req: &MemoRequest) -> Result<IdResponse, AppError> {
        Ok(self.memos.create(user_id, &req.contents).await?.into())
    }

    pub async fn update(&self, memo_id: i64, req: &MemoRequest) -> Result<IdResponse, AppError> {
        Ok(self.memos.update(memo_id, &req.contents).await?.into())
    }

    pub async fn delete(&self, memo_id: i64) -> Result<IdResponse, AppError> {
        Ok(self.memos.delete(memo_id).await?.into())
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<MemoResponse>, AppError> {
        Ok(self.memos.list_by_user(user_id).await?.into_iter().map(memo_mapper::to_response).collect())
    }
}
