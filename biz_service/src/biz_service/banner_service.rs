use crate::client::object_storage::ObjectStorage;
use crate::dto::banner_dto::{BannerCreateRequest, BannerResponse, BannerUpdateRequest};
use crate::dto::IdResponse;
use crate::entitys::banner_entity::BannerType;
use crate::manager::banner_manager::BannerManager;
use crate::mapper::banner_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use log::warn;
use std::sync::Arc;

/// Banners and popups. Images uploaded through the file endpoint are
/// referenced by `file_key` and resolved to a public url here.
pub struct BannerService {
    banners: Arc<BannerManager>,
    storage: Arc<dyn ObjectStorage>,
}

impl BannerService {
    pub fn new(banners: Arc<BannerManager>, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { banners, storage }
    }

    fn stored_url(&self, file_key: Option<&String>) -> Option<String> {
        file_key.map(|key| self.storage.url(key))
    }

    pub async fn create(&self, req: &BannerCreateRequest) -> Result<IdResponse, AppError> {
        let img_url = self.stored_url(req.file_key.as_ref());
        Ok(self.banners.create(req, img_url).await?.into())
    }

    pub async fn update(&self, banner_id: i64, req: &BannerUpdateRequest) -> Result<IdResponse, AppError> {
        let img_url = self.stored_url(req.file_key.as_ref());
        Ok(self.banners.update(banner_id, req, img_url).await?.into())
    }

    /// Removes the banner, then its stored image.
    pub async fn delete(&self, banner_id: i64) -> Result<IdResponse, AppError> {
        let banner = self.banners.delete(banner_id).await?;
        if let Some(key) = &banner.file_key {
            if let Err(e) = self.storage.delete(key).await {
                warn!("banner {} deleted but its image {} stays: {}", banner_id, key, e);
            }
        }
        Ok(banner.id.into())
    }

    pub async fn get_one(&self, banner_id: i64) -> Result<BannerResponse, AppError> {
        Ok(banner_mapper::to_response(self.banners.find_banner(banner_id).await?))
    }

    pub async fn admin_list(&self, banner_type: BannerType, page: &PageRequest) -> Result<PageResult<BannerResponse>, AppError> {
        Ok(self.banners.list_by_type(banner_type, page).await?.map(banner_mapper::to_response))
    }

    pub async fn shown_now(&self, banner_type: BannerType) -> Result<Vec<BannerResponse>, AppError> {
        Ok(self.banners.shown_now(banner_type).await?.into_iter().map(banner_mapper::to_response).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::object_storage::LocalObjectStorage;
    use crate::test_support::{date_in_days, test_repos};
    use common::util::common_utils::build_uuid;

    #[tokio::test]
    async fn deleting_a_banner_removes_its_image() {
        let root = std::env::temp_dir().join(format!("banner-{}", build_uuid()));
        let storage: Arc<dyn ObjectStorage> = Arc::new(LocalObjectStorage::new(&root, "/files"));
        let service = BannerService::new(Arc::new(BannerManager::new(test_repos())), storage.clone());

        storage.put("banner/top.png", vec![7]).await.unwrap();
        let req = BannerCreateRequest {
            banner_type: BannerType::Popup,
            title: "Open".into(),
            content: None,
            color_code: None,
            link: None,
            img_url: None,
            file_key: Some("banner/top.png".into()),
            start_date: date_in_days(-1),
            end_date: date_in_days(1),
            is_visible: true,
        };
        let id = service.create(&req).await.unwrap().id;
        assert_eq!(service.get_one(id).await.unwrap().img_url.as_deref(), Some("/files/banner/top.png"));

        service.delete(id).await.unwrap();
        assert!(!root.join("banner/top.png").exists());
        let _ = tokio::fs::remove_dir_all(root).await;
    }
}
