use crate::dto::review_dto::ReviewCreateRequest;
use crate::entitys::review_entity::ReviewEntity;
use crate::error_code::ErrorCode;
use crate::mapper::review_mapper;
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::info;
use mongodb::bson::doc;

pub struct ReviewManager {
    repos: Repos,
}

impl ReviewManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn create(&self, program_id: i64, user_id: i64, req: &ReviewCreateRequest) -> Result<i64, AppError> {
        if self.repos.program.find_by_id(program_id).await?.is_none() {
            return Err(ErrorCode::ProgramNotFound.into());
        }
        let review = review_mapper::to_entity(build_snow_id(), program_id, user_id, req, now());
        self.repos.review.insert(&review).await?;
        info!("review {} ({} stars) for program {}", review.id, review.grade, program_id);
        Ok(review.id)
    }

    pub async fn set_visible(&self, review_id: i64, is_visible: bool) -> Result<i64, AppError> {
        let modified = self.repos.review.update_one(doc! { "_id": review_id }, doc! { "$set": { "is_visible": is_visible } }).await?;
        if modified == 0 && self.repos.review.find_by_id(review_id).await?.is_none() {
            return Err(ErrorCode::ReviewNotFound.into());
        }
        Ok(review_id)
    }

    /// Reviews shown on the program page.
    pub async fn visible_by_program(&self, program_id: i64) -> Result<Vec<ReviewEntity>, AppError> {
        self.repos.review.find_all(doc! { "program_id": program_id, "is_visible": true }, Some(newest_first())).await
    }

    pub async fn list_by_program(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<ReviewEntity>, AppError> {
        self.repos.review.query_by_page(doc! { "program_id": program_id }, Some(newest_first()), page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::is_code;
    use crate::test_support::{insert_program, test_repos};

    #[tokio::test]
    async fn hidden_reviews_leave_the_program_page() {
        let repos = test_repos();
        let reviews = ReviewManager::new(repos.clone());
        let req = ReviewCreateRequest { grade: 5, review_contents: "great".into() };
        assert!(is_code(&reviews.create(1, 1, &req).await.unwrap_err(), ErrorCode::ProgramNotFound));

        let program_id = insert_program(&repos).await;
        let kept = reviews.create(program_id, 1, &req).await.unwrap();
        let hidden = reviews.create(program_id, 2, &req).await.unwrap();
        reviews.set_visible(hidden, false).await.unwrap();

        let visible = reviews.visible_by_program(program_id).await.unwrap();
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![kept]);
        assert_eq!(reviews.list_by_program(program_id, &PageRequest::default()).await.unwrap().page_info.total_elements, 2);
        assert!(is_code(&reviews.set_visible(404, true).await.unwrap_err(), ErrorCode::ReviewNotFound));
    }
}
