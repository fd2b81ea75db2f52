pub mod application_entity;
pub mod attendance_entity;
pub mod banner_entity;
pub mod coupon_entity;
pub mod faq_entity;
pub mod mail_entity;
pub mod memo_entity;
pub mod mission_entity;
pub mod program_entity;
pub mod review_entity;
pub mod user_entity;
