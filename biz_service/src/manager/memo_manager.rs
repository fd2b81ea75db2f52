use crate::entitys::memo_entity::MemoEntity;
use crate::error_code::ErrorCode;
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::newest_first;
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use mongodb::bson::doc;

/// Admin notes about users.
pub struct MemoManager {
    repos: Repos,
}

impl MemoManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn create(&self, user_id: i64, contents: &str) -> Result<i64, AppError> {
        if self.repos.user.find_by_id(user_id).await?.is_none() {
            return Err(ErrorCode::UserNotFound.into());
        }
        let memo = MemoEntity { id: build_snow_id(), user_id, contents: contents.to_string(), create_time: now() };
        self.repos.memo.insert(&memo).await?;
        Ok(memo.id)
    }

    pub async fn update(&self, memo_id: i64, contents: &str) -> Result<i64, AppError> {
        let modified = self.repos.memo.update_one(doc! { "_id": memo_id }, doc! { "$set": { "contents": contents } }).await?;
        if modified == 0 && self.repos.memo.find_by_id(memo_id).await?.is_none() {
            return Err(ErrorCode::MemoNotFound.into());
        }
        Ok(memo_id)
    }

    pub async fn delete(&self, memo_id: i64) -> Result<i64, AppError> {
        if self.repos.memo.delete_by_id(memo_id).await? == 0 {
            return Err(ErrorCode::MemoNotFound.into());
        }
        Ok(memo_id)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<MemoEntity>, AppError> {
        self.repos.memo.find_all(doc! { "user_id": user_id }, Some(newest_first())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::is_code;
    use crate::manager::user_manager::UserManager;
    use crate::test_support::{sign_up_request, test_repos};

    #[tokio::test]
    async fn memo_lifecycle() {
        let repos = test_repos();
        let memos = MemoManager::new(repos.clone());
        let user = UserManager::new(repos.clone()).sign_up(&sign_up_request("a@x.io", "010-1111-1111")).await.unwrap();

        assert!(is_code(&memos.create(999, "ghost").await.unwrap_err(), ErrorCode::UserNotFound));
        let memo_id = memos.create(user.id, "called twice").await.unwrap();
        memos.update(memo_id, "called three times").await.unwrap();
        let listed = memos.list_by_user(user.id).await.unwrap();
        assert_eq!(listed[0].contents, "called three times");

        memos.delete(memo_id).await.unwrap();
        assert!(is_code(&memos.update(memo_id, "x").await.unwrap_err(), ErrorCode::MemoNotFound));
        assert!(is_code(&memos.delete(memo_id).await.unwrap_err(), ErrorCode::MemoNotFound));
    }
}
