use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BannerType {
    Main,
    Program,
    Line,
    Popup,
}

/// Banners of every placement, popups included.
#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("banner_type"))]
pub struct BannerEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub banner_type: BannerType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    /// storage key of the uploaded image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
    pub start_date: i64,
    pub end_date: i64,
    pub is_visible: bool,
}

impl BannerEntity {
    pub fn is_shown_at(&self, now: i64) -> bool {
        self.is_visible && self.start_date <= now && now <= self.end_date
    }
}
