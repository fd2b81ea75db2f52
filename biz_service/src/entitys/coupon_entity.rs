use mongo_macro::MongoIndexModelProvider as MongoDeriveMongoIndex;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ToSchema, AsRefStr, Display, EnumString)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponType {
    #[default]
    Partnership,
    Event,
    Grade,
}

#[derive(Debug, Clone, Serialize, Deserialize, MongoDeriveMongoIndex)]
#[mongo_index(fields("code"), unique, name = "uk_coupon_code")]
pub struct CouponEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub code: String,
    pub coupon_type: CouponType,
    pub discount: i32,
    /// allowed uses per user
    pub time: i32,
    pub start_date: i64,
    pub end_date: i64,
}

impl CouponEntity {
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.start_date <= now && now <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(99, false)]
    #[case(100, true)]
    #[case(150, true)]
    #[case(200, true)]
    #[case(201, false)]
    fn validity_window_is_inclusive(#[case] now: i64, #[case] valid: bool) {
        let coupon = CouponEntity {
            id: 1,
            name: "welcome".into(),
            code: "WELCOME".into(),
            coupon_type: CouponType::Event,
            discount: 1000,
            time: 1,
            start_date: 100,
            end_date: 200,
        };
        assert_eq!(coupon.is_valid_at(now), valid);
    }
}
