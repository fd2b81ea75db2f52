use crate::dto::banner_dto::{BannerCreateRequest, BannerUpdateRequest};
use crate::entitys::banner_entity::{BannerEntity, BannerType};
use crate::error_code::ErrorCode;
use crate::mapper::{banner_mapper, parse_opt_date_field};
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult, QueryBuilder};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::info;
use mongodb::bson::doc;

pub struct BannerManager {
    repos: Repos,
}

impl BannerManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn find_banner(&self, banner_id: i64) -> Result<BannerEntity, AppError> {
        self.repos.banner.find_by_id(banner_id).await?.ok_or_else(|| ErrorCode::BannerNotFound.into())
    }

    /// `img_url` overrides the request url when the image was uploaded here.
    pub async fn create(&self, req: &BannerCreateRequest, img_url: Option<String>) -> Result<i64, AppError> {
        let banner = banner_mapper::to_entity(build_snow_id(), req, img_url)?;
        self.repos.banner.insert(&banner).await?;
        info!("{} banner {} created", banner.banner_type, banner.id);
        Ok(banner.id)
    }

    pub async fn update(&self, banner_id: i64, req: &BannerUpdateRequest, img_url: Option<String>) -> Result<i64, AppError> {
        let mut banner = self.find_banner(banner_id).await?;
        let start_date = parse_opt_date_field("startDate", req.start_date.as_deref())?;
        let end_date = parse_opt_date_field("endDate", req.end_date.as_deref())?;

        common::merge_fields!(banner, req; title, is_visible);
        common::merge_opt_fields!(banner, req; content, color_code, link, img_url, file_key);
        common::util::patch::set_opt_if_some(&mut banner.img_url, img_url);
        common::util::patch::set_if_some(&mut banner.start_date, start_date);
        common::util::patch::set_if_some(&mut banner.end_date, end_date);

        self.repos.banner.save(banner.id, &banner).await?;
        Ok(banner.id)
    }

    /// Returns the removed banner so its stored image can be cleaned up.
    pub async fn delete(&self, banner_id: i64) -> Result<BannerEntity, AppError> {
        let banner = self.find_banner(banner_id).await?;
        self.repos.banner.delete_by_id(banner_id).await?;
        info!("banner {} deleted", banner_id);
        Ok(banner)
    }

    pub async fn list_by_type(&self, banner_type: BannerType, page: &PageRequest) -> Result<PageResult<BannerEntity>, AppError> {
        self.repos.banner.query_by_page(doc! { "banner_type": banner_type.as_ref() }, Some(newest_first()), page).await
    }

    /// Visible banners whose display window contains the current time.
    pub async fn shown_now(&self, banner_type: BannerType) -> Result<Vec<BannerEntity>, AppError> {
        let current = now();
        let filter = QueryBuilder::new()
            .eq("banner_type", banner_type.as_ref())
            .eq("is_visible", true)
            .lte("start_date", current)
            .gte("end_date", current)
            .build();
        self.repos.banner.find_all(filter, Some(newest_first())).await
    }
}
