use crate::dto::review_dto::{ReviewCreateRequest, ReviewResponse};
use crate::entitys::review_entity::ReviewEntity;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, program_id: i64, user_id: i64, req: &ReviewCreateRequest, now: i64) -> ReviewEntity {
    ReviewEntity {
        id,
        program_id,
        user_id: Some(user_id),
        grade: req.grade,
        review_contents: req.review_contents.clone(),
        is_visible: true,
        create_time: now,
    }
}

pub fn to_response(review: ReviewEntity) -> ReviewResponse {
    ReviewResponse {
        id: review.id,
        program_id: review.program_id,
        grade: review.grade,
        review_contents: review.review_contents,
        is_visible: review.is_visible,
        create_time: time_to_str(review.create_time),
    }
}
