use crate::entitys::coupon_entity::CouponType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponCreateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[serde(default)]
    pub coupon_type: CouponType,
    #[validate(range(min = 0))]
    pub discount: i32,
    #[validate(range(min = 1))]
    pub time: i32,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,
    pub coupon_type: Option<CouponType>,
    #[validate(range(min = 0))]
    pub discount: Option<i32>,
    #[validate(range(min = 1))]
    pub time: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub coupon_type: CouponType,
    pub discount: i32,
    pub time: i32,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponApplyResponse {
    pub id: i64,
    pub name: String,
    pub coupon_type: CouponType,
    pub discount: i32,
    pub time: i32,
}
