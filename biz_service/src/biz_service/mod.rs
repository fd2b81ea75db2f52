pub mod application_service;
pub mod attendance_service;
pub mod banner_service;
pub mod coupon_service;
pub mod file_service;
pub mod mail_service;
pub mod memo_service;
pub mod mission_service;
pub mod program_service;
pub mod review_service;
pub mod user_service;

use crate::client::meeting_client::MeetingClient;
use crate::client::object_storage::ObjectStorage;
use crate::job::remind_mail_job::RemindMailJob;
use crate::manager::application_manager::ApplicationManager;
use crate::manager::attendance_manager::AttendanceManager;
use crate::manager::banner_manager::BannerManager;
use crate::manager::coupon_manager::CouponManager;
use crate::manager::memo_manager::MemoManager;
use crate::manager::mission_manager::MissionManager;
use crate::manager::program_manager::ProgramManager;
use crate::manager::review_manager::ReviewManager;
use crate::manager::session_manager::SessionManager;
use crate::manager::user_manager::UserManager;
use crate::repos::Repos;
use common::config::AppConfig;
use std::sync::Arc;

/// Every service the HTTP layer and the jobs talk to.
#[derive(Clone)]
pub struct BizServices {
    pub user: Arc<user_service::UserService>,
    pub program: Arc<program_service::ProgramService>,
    pub application: Arc<application_service::ApplicationService>,
    pub mission: Arc<mission_service::MissionService>,
    pub attendance: Arc<attendance_service::AttendanceService>,
    pub coupon: Arc<coupon_service::CouponService>,
    pub banner: Arc<banner_service::BannerService>,
    pub memo: Arc<memo_service::MemoService>,
    pub review: Arc<review_service::ReviewService>,
    pub file: Arc<file_service::FileService>,
    pub remind_job: Arc<RemindMailJob>,
}

pub fn init_service(repos: Repos, config: &AppConfig, meeting: Arc<dyn MeetingClient>, storage: Arc<dyn ObjectStorage>) -> BizServices {
    let mail = config.get_mail();

    let users = Arc::new(UserManager::new(repos.clone()));
    let sessions = Arc::new(SessionManager::new(&config.get_auth()));
    let programs = Arc::new(ProgramManager::new(repos.clone(), meeting));
    let applications = Arc::new(ApplicationManager::new(repos.clone(), programs.clone()));
    let missions = Arc::new(MissionManager::new(repos.clone()));
    let attendances = Arc::new(AttendanceManager::new(repos.clone()));
    let reviews = Arc::new(ReviewManager::new(repos.clone()));
    let outbox = Arc::new(mail_service::MailService::new(repos.mail.clone(), &mail));

    BizServices {
        user: Arc::new(user_service::UserService::new(users.clone(), sessions)),
        program: Arc::new(program_service::ProgramService::new(programs.clone(), applications.clone(), reviews.clone(), &mail.service_name)),
        application: Arc::new(application_service::ApplicationService::new(
            applications.clone(),
            programs.clone(),
            users,
            missions.clone(),
            attendances.clone(),
        )),
        mission: Arc::new(mission_service::MissionService::new(missions)),
        attendance: Arc::new(attendance_service::AttendanceService::new(attendances)),
        coupon: Arc::new(coupon_service::CouponService::new(Arc::new(CouponManager::new(repos.clone())))),
        banner: Arc::new(banner_service::BannerService::new(Arc::new(BannerManager::new(repos.clone())), storage.clone())),
        memo: Arc::new(memo_service::MemoService::new(Arc::new(MemoManager::new(repos.clone())))),
        review: Arc::new(review_service::ReviewService::new(reviews)),
        file: Arc::new(file_service::FileService::new(storage)),
        remind_job: Arc::new(RemindMailJob::new(programs, applications, outbox, &mail.service_name)),
    }
}
