use crate::entitys::banner_entity::BannerType;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerCreateRequest {
    #[serde(rename = "type")]
    pub banner_type: BannerType,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub content: Option<String>,
    pub color_code: Option<String>,
    pub link: Option<String>,
    pub img_url: Option<String>,
    /// key of a file uploaded through `/file/{key}`
    pub file_key: Option<String>,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdateRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    pub content: Option<String>,
    pub color_code: Option<String>,
    pub link: Option<String>,
    pub img_url: Option<String>,
    pub file_key: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_visible: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BannerTypeQuery {
    #[serde(rename = "type")]
    pub banner_type: BannerType,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub banner_type: BannerType,
    pub title: String,
    pub content: Option<String>,
    pub color_code: Option<String>,
    pub link: Option<String>,
    pub img_url: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub is_visible: bool,
}
