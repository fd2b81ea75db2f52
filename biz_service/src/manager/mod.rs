pub mod application_manager;
pub mod attendance_manager;
pub mod banner_manager;
pub mod coupon_manager;
pub mod memo_manager;
pub mod mission_manager;
pub mod program_manager;
pub mod review_manager;
pub mod session_manager;
pub mod user_manager;
