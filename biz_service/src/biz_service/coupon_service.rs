use crate::dto::coupon_dto::{CouponApplyResponse, CouponCreateRequest, CouponResponse, CouponUpdateRequest};
use crate::dto::IdResponse;
use crate::manager::coupon_manager::CouponManager;
use crate::mapper::coupon_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::sync::Arc;

pub struct CouponService {
    coupons: Arc<CouponManager>,
}

impl CouponService {
    pub fn new(coupons: Arc<CouponManager>) -> Self {
        Self { coupons }
    }

    pub async fn create(&self, req: &CouponCreateRequest) -> Result<IdResponse, AppError> {
        Ok(self.coupons.create(req).await?.into())
    }

    pub async fn update(&self, coupon_id: i64, req: &CouponUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.coupons.update(coupon_id, req).await?.into())
    }

    pub async fn delete(&self, coupon_id: i64) -> Result<IdResponse, AppError> {
        Ok(self.coupons.delete(coupon_id).await?.into())
    }

    pub async fn get_one(&self, coupon_id: i64) -> Result<CouponResponse, AppError> {
        Ok(coupon_mapper::to_response(self.coupons.find_coupon(coupon_id).await?))
    }

    pub async fn list(&self, page: &PageRequest) -> Result<PageResult<CouponResponse>, AppError> {
        Ok(self.coupons.list(page).await?.map(coupon_mapper::to_response))
    }

    pub async fn apply(&self, code: &str) -> Result<CouponApplyResponse, AppError> {
        Ok(coupon_mapper::to_apply_response(self.coupons.get_available(code).await?))
    }
}
