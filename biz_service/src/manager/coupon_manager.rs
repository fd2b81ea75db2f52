use crate::dto::coupon_dto::{CouponCreateRequest, CouponUpdateRequest};
use crate::entitys::coupon_entity::CouponEntity;
use crate::error_code::{on_duplicate, ErrorCode};
use crate::mapper::{coupon_mapper, parse_opt_date_field};
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::{info, warn};
use mongodb::bson::doc;

pub const COUPON_PAGE_SIZE: u64 = 10;

pub struct CouponManager {
    repos: Repos,
}

impl CouponManager {
    pub fn new(repos: Repos) -> Self {
        Self { repos }
    }

    pub async fn find_coupon(&self, coupon_id: i64) -> Result<CouponEntity, AppError> {
        self.repos.coupon.find_by_id(coupon_id).await?.ok_or_else(|| ErrorCode::CouponNotFound.into())
    }

    async fn ensure_code_free(&self, code: &str, owner: Option<i64>) -> Result<(), AppError> {
        if let Some(existing) = self.repos.coupon.find_one(doc! { "code": code }).await? {
            if Some(existing.id) != owner {
                warn!("coupon code {} already taken by {}", code, existing.id);
                return Err(ErrorCode::DuplicateCoupon.into());
            }
        }
        Ok(())
    }

    pub async fn create(&self, req: &CouponCreateRequest) -> Result<i64, AppError> {
        let coupon = coupon_mapper::to_entity(build_snow_id(), req)?;
        self.ensure_code_free(&coupon.code, None).await?;
        self.repos.coupon.insert(&coupon).await.map_err(on_duplicate(ErrorCode::DuplicateCoupon))?;
        info!("coupon {} created with code {}", coupon.id, coupon.code);
        Ok(coupon.id)
    }

    pub async fn update(&self, coupon_id: i64, req: &CouponUpdateRequest) -> Result<i64, AppError> {
        let mut coupon = self.find_coupon(coupon_id).await?;
        let start_date = parse_opt_date_field("startDate", req.start_date.as_deref())?;
        let end_date = parse_opt_date_field("endDate", req.end_date.as_deref())?;
        if let Some(code) = &req.code {
            let code = code.trim().to_string();
            self.ensure_code_free(&code, Some(coupon.id)).await?;
            coupon.code = code;
        }

        common::merge_fields!(coupon, req; name, coupon_type, discount, time);
        common::util::patch::set_if_some(&mut coupon.start_date, start_date);
        common::util::patch::set_if_some(&mut coupon.end_date, end_date);

        self.repos.coupon.save(coupon.id, &coupon).await.map_err(on_duplicate(ErrorCode::DuplicateCoupon))?;
        Ok(coupon.id)
    }

    pub async fn delete(&self, coupon_id: i64) -> Result<i64, AppError> {
        if self.repos.coupon.delete_by_id(coupon_id).await? == 0 {
            return Err(ErrorCode::CouponNotFound.into());
        }
        info!("coupon {} deleted", coupon_id);
        Ok(coupon_id)
    }

    pub async fn list(&self, page: &PageRequest) -> Result<PageResult<CouponEntity>, AppError> {
        self.repos.coupon.query_by_page(doc! {}, Some(newest_first()), page).await
    }

    /// Coupon by code, only inside its validity window.
    pub async fn get_available(&self, code: &str) -> Result<CouponEntity, AppError> {
        let coupon = self
            .repos
            .coupon
            .find_one(doc! { "code": code.trim() })
            .await?
            .ok_or(AppError::from(ErrorCode::CouponNotFound))?;
        if !coupon.is_valid_at(now()) {
            return Err(ErrorCode::CouponExpired.into());
        }
        Ok(coupon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitys::coupon_entity::CouponType;
    use crate::error_code::is_code;
    use crate::test_support::{date_in_days, test_repos};

    fn coupon_request(code: &str, start_in_days: i64, end_in_days: i64) -> CouponCreateRequest {
        CouponCreateRequest {
            name: "welcome".into(),
            code: code.into(),
            coupon_type: CouponType::Event,
            discount: 5000,
            time: 1,
            start_date: date_in_days(start_in_days),
            end_date: date_in_days(end_in_days),
        }
    }

    #[tokio::test]
    async fn codes_are_unique() {
        let coupons = CouponManager::new(test_repos());
        let id = coupons.create(&coupon_request("HELLO", -1, 1)).await.unwrap();
        let other = coupons.create(&coupon_request("BYE", -1, 1)).await.unwrap();

        let err = coupons.create(&coupon_request("HELLO", -1, 1)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateCoupon));

        let rename = CouponUpdateRequest { code: Some("HELLO".into()), ..Default::default() };
        let err = coupons.update(other, &rename).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateCoupon));
        coupons.update(id, &rename).await.unwrap();
    }

    #[tokio::test]
    async fn availability_follows_the_window() {
        let coupons = CouponManager::new(test_repos());
        coupons.create(&coupon_request("NOW", -1, 1)).await.unwrap();
        coupons.create(&coupon_request("LATER", 1, 2)).await.unwrap();
        coupons.create(&coupon_request("PAST", -3, -2)).await.unwrap();

        assert_eq!(coupons.get_available("NOW").await.unwrap().discount, 5000);
        assert!(is_code(&coupons.get_available("LATER").await.unwrap_err(), ErrorCode::CouponExpired));
        assert!(is_code(&coupons.get_available("PAST").await.unwrap_err(), ErrorCode::CouponExpired));
        assert!(is_code(&coupons.get_available("NONE").await.unwrap_err(), ErrorCode::CouponNotFound));
    }

    #[tokio::test]
    async fn delete_unknown_coupon() {
        let coupons = CouponManager::new(test_repos());
        assert!(is_code(&coupons.delete(1).await.unwrap_err(), ErrorCode::CouponNotFound));
    }
}
