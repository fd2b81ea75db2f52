use crate::dto::coupon_dto::{CouponApplyResponse, CouponCreateRequest, CouponResponse};
use crate::entitys::coupon_entity::CouponEntity;
use crate::mapper::parse_date_field;
use common::errors::AppError;
use common::util::date_util::time_to_str;

pub fn to_entity(id: i64, req: &CouponCreateRequest) -> Result<CouponEntity, AppError> {
    Ok(CouponEntity {
        id,
        name: req.name.clone(),
        code: req.code.trim().to_string(),
        coupon_type: req.coupon_type,
        discount: req.discount,
        time: req.time,
        start_date: parse_date_field("startDate", &req.start_date)?,
        end_date: parse_date_field("endDate", &req.end_date)?,
    })
}

pub fn to_response(coupon: CouponEntity) -> CouponResponse {
    CouponResponse {
        id: coupon.id,
        name: coupon.name,
        code: coupon.code,
        coupon_type: coupon.coupon_type,
        discount: coupon.discount,
        time: coupon.time,
        start_date: time_to_str(coupon.start_date),
        end_date: time_to_str(coupon.end_date),
    }
}

pub fn to_apply_response(coupon: CouponEntity) -> CouponApplyResponse {
    CouponApplyResponse { id: coupon.id, name: coupon.name, coupon_type: coupon.coupon_type, discount: coupon.discount, time: coupon.time }
}
