use crate::dto::banner_dto::{BannerCreateRequest, BannerResponse};
use crate::entitys::banner_entity::BannerEntity;
use crate::mapper::parse_date_field;
use common::errors::AppError;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, req: &BannerCreateRequest, img_url: Option<String>) -> Result<BannerEntity, AppError> {
    Ok(BannerEntity {
        id,
        banner_type: req.banner_type,
        title: req.title.clone(),
        content: req.content.clone(),
        color_code: req.color_code.clone(),
        link: req.link.clone(),
        img_url: img_url.or_else(|| req.img_url.clone()),
        file_key: req.file_key.clone(),
        start_date: parse_date_field("startDate", &req.start_date)?,
        end_date: parse_date_field("endDate", &req.end_date)?,
        is_visible: req.is_visible,
    })
}

pub fn to_response(banner: BannerEntity) -> BannerResponse {
    BannerResponse {
        id: banner.id,
        banner_type: banner.banner_type,
        title: banner.title,
        content: banner.content,
        color_code: banner.color_code,
        link: banner.link,
        img_url: banner.img_url,
        start_date: time_to_str(banner.start_date),
        end_date: time_to_str(banner.end_date),
        is_visible: banner.is_visible,
    }
}
