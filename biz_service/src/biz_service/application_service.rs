use crate::dto::application_dto::{
    ApplicationAdminResponse, ApplicationCreateRequest, ApplicationIntroductionRequest, ApplicationUpdateRequest,
    ChallengeApplicationAdminResponse, ChallengeApplicationDetailResponse, EmailListResponse, UserApplicationResponse,
};
use crate::dto::IdResponse;
use crate::entitys::application_entity::ApprovalState;
use crate::entitys::attendance_entity::{AttendanceEntity, AttendanceResult};
use crate::error_code::ErrorCode;
use crate::manager::application_manager::{Applicant, ApplicationManager};
use crate::manager::attendance_manager::AttendanceManager;
use crate::manager::mission_manager::MissionManager;
use crate::manager::program_manager::ProgramManager;
use crate::manager::session_manager::Principal;
use crate::manager::user_manager::UserManager;
use crate::mapper::application_mapper;
use common::errors::AppError;
use common::query_builder::{PageRequest, PageResult};
use std::collections::HashMap;
use std::sync::Arc;

pub struct ApplicationService {
    applications: Arc<ApplicationManager>,
    programs: Arc<ProgramManager>,
    users: Arc<UserManager>,
    missions: Arc<MissionManager>,
    attendances: Arc<AttendanceManager>,
}

impl ApplicationService {
    pub fn new(
        applications: Arc<ApplicationManager>,
        programs: Arc<ProgramManager>,
        users: Arc<UserManager>,
        missions: Arc<MissionManager>,
        attendances: Arc<AttendanceManager>,
    ) -> Self {
        Self { applications, programs, users, missions, attendances }
    }

    /// Members complete their profile from the submission before applying; anyone else applies as guest.
    /// The profile is only touched once the submission passed its admission checks.
    pub async fn submit(&self, program_id: i64, req: &ApplicationCreateRequest, principal: Option<Principal>) -> Result<IdResponse, AppError> {
        let applicant = principal.map_or(Applicant::Guest, |p| Applicant::Member(p.user_id));
        if let Applicant::Member(user_id) = applicant {
            self.applications.check_admission(program_id, req, applicant).await?;
            self.users.complete_profile(user_id, req).await?;
        }
        Ok(self.applications.submit(program_id, req, applicant).await?.id.into())
    }

    pub async fn list_by_program(
        &self,
        program_id: i64,
        approval: Option<ApprovalState>,
        page: &PageRequest,
    ) -> Result<PageResult<ApplicationAdminResponse>, AppError> {
        let applications = self.applications.list_by_program(program_id, approval, page).await?;
        let member_ids = applications.items.iter().filter_map(|a| a.user_id).collect();
        let users = self.users.find_by_ids(member_ids).await?;
        Ok(applications.map(|a| {
            let user = a.user_id.and_then(|id| users.get(&id));
            application_mapper::to_admin_response(a, user)
        }))
    }

    pub async fn my_list(&self, principal: Principal, page: &PageRequest) -> Result<PageResult<UserApplicationResponse>, AppError> {
        self.list_for_user(principal.user_id, page).await
    }

    pub async fn list_for_user(&self, user_id: i64, page: &PageRequest) -> Result<PageResult<UserApplicationResponse>, AppError> {
        let applications = self.applications.list_by_user(user_id, page).await?;
        let program_ids = applications.items.iter().map(|a| a.program_id).collect();
        let programs: HashMap<_, _> = self.programs.find_by_ids(program_ids).await?.into_iter().map(|p| (p.id, p)).collect();
        Ok(applications.map(|a| {
            let program = programs.get(&a.program_id);
            application_mapper::to_user_response(a, program)
        }))
    }

    pub async fn update(&self, application_id: i64, req: &ApplicationUpdateRequest) -> Result<IdResponse, AppError> {
        Ok(self.applications.update(application_id, req).await?.into())
    }

    pub async fn update_introduction(&self, application_id: i64, principal: Principal, req: &ApplicationIntroductionRequest) -> Result<IdResponse, AppError> {
        Ok(self.applications.update_introduction(application_id, principal.user_id, &req.introduction).await?.into())
    }

    /// Members may withdraw their own application; admins any.
    pub async fn remove(&self, application_id: i64, principal: Principal) -> Result<IdResponse, AppError> {
        if !principal.is_admin() {
            let application = self.applications.find_application(application_id).await?;
            if application.user_id != Some(principal.user_id) {
                return Err(ErrorCode::ApplicationNotOwned.into());
            }
        }
        Ok(self.applications.remove(application_id).await?.into())
    }

    pub async fn reject_remaining(&self, program_id: i64) -> Result<u64, AppError> {
        self.applications.bulk_reject_remaining(program_id).await
    }

    pub async fn email_lists(&self, program_id: i64) -> Result<EmailListResponse, AppError> {
        self.programs.find_program(program_id).await?;
        Ok(EmailListResponse {
            approved: self.applications.approved_emails(program_id).await?,
            not_approved: self.applications.not_approved_emails(program_id).await?,
        })
    }

    /// Approved participants of a challenge with how many missions they handed in and passed.
    pub async fn challenge_admin_list(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<ChallengeApplicationAdminResponse>, AppError> {
        self.programs.find_program(program_id).await?;
        let applications = self.applications.approved_by_program(program_id, page).await?;
        let member_ids: Vec<i64> = applications.items.iter().filter_map(|a| a.user_id).collect();
        let users = self.users.find_by_ids(member_ids.clone()).await?;

        let mission_ids: Vec<i64> = self.missions.all_by_program(program_id).await?.into_iter().map(|m| m.id).collect();
        let mission_count = mission_ids.len();
        let mut by_user: HashMap<i64, Vec<AttendanceEntity>> = HashMap::new();
        for attendance in self.attendances.list_for_missions(mission_ids, member_ids).await? {
            by_user.entry(attendance.user_id).or_default().push(attendance);
        }

        Ok(applications.map(|a| {
            let attended = a.user_id.and_then(|id| by_user.get(&id)).map(Vec::as_slice).unwrap_or_default();
            let user = a.user_id.and_then(|id| users.get(&id));
            ChallengeApplicationAdminResponse {
                mission_count,
                attendance_count: attended.len(),
                pass_count: attended.iter().filter(|at| at.result == AttendanceResult::Pass).count(),
                application: application_mapper::to_admin_response(a, user),
            }
        }))
    }

    /// Motive of one application and, mission by mission, what its member handed in.
    pub async fn challenge_admin_detail(&self, program_id: i64, application_id: i64) -> Result<ChallengeApplicationDetailResponse, AppError> {
        let application = self.applications.find_application(application_id).await?;
        if application.program_id != program_id {
            return Err(ErrorCode::ApplicationNotFound.into());
        }
        let missions = self.missions.all_by_program(program_id).await?;
        let attendances = match application.user_id {
            Some(user_id) => self.attendances.list_for_missions(missions.iter().map(|m| m.id).collect(), vec![user_id]).await?,
            None => vec![],
        };
        let missions = missions
            .iter()
            .map(|m| application_mapper::to_mission_progress(m, attendances.iter().find(|a| a.mission_id == m.id)))
            .collect();
        Ok(ChallengeApplicationDetailResponse { application_id, apply_motive: application.apply_motive, missions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::attendance_dto::AttendanceAdminUpdateRequest;
    use crate::dto::program_dto::ProgramUpdateRequest;
    use crate::entitys::attendance_entity::AttendanceStatus;
    use crate::entitys::program_entity::{ProgramStatus, ProgramType};
    use crate::entitys::user_entity::{AccountType, UserRole};
    use crate::error_code::is_code;
    use crate::repos::Repos;
    use crate::test_support::{mission_request, program_request, sign_up_request, test_repos, StubMeetingClient};

    struct Fixture {
        repos: Repos,
        users: Arc<UserManager>,
        programs: Arc<ProgramManager>,
        missions: Arc<MissionManager>,
        attendances: Arc<AttendanceManager>,
        service: ApplicationService,
    }

    fn fixture() -> Fixture {
        let repos = test_repos();
        let users = Arc::new(UserManager::new(repos.clone()));
        let programs = Arc::new(ProgramManager::new(repos.clone(), Arc::new(StubMeetingClient::default())));
        let applications = Arc::new(ApplicationManager::new(repos.clone(), programs.clone()));
        let missions = Arc::new(MissionManager::new(repos.clone()));
        let attendances = Arc::new(AttendanceManager::new(repos.clone()));
        let service = ApplicationService::new(applications, programs.clone(), users.clone(), missions.clone(), attendances.clone());
        Fixture { repos, users, programs, missions, attendances, service }
    }

    fn profile(university: &str) -> ApplicationCreateRequest {
        ApplicationCreateRequest {
            university: Some(university.into()),
            major: Some("CS".into()),
            account_type: Some(AccountType::Toss),
            account_number: Some("1000-1".into()),
            apply_motive: Some(format!("{} motive", university)),
            ..Default::default()
        }
    }

    async fn member(f: &Fixture, email: &str, phone_num: &str) -> Principal {
        let user = f.users.sign_up(&sign_up_request(email, phone_num)).await.unwrap();
        Principal { user_id: user.id, role: UserRole::Member }
    }

    fn guest(email: &str) -> ApplicationCreateRequest {
        ApplicationCreateRequest {
            guest_name: Some("Guest".into()),
            guest_phone_num: Some("010-9999-9999".into()),
            guest_email: Some(email.into()),
            ..Default::default()
        }
    }

    fn decide(is_approved: bool) -> ApplicationUpdateRequest {
        ApplicationUpdateRequest { is_approved: Some(is_approved), ..Default::default() }
    }

    #[tokio::test]
    async fn member_submission_completes_profile_and_lists_with_program() {
        let f = fixture();
        let principal = member(&f, "a@x.io", "010-1111-1111").await;
        let program = f.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();

        let err = f.service.submit(program.id, &ApplicationCreateRequest::default(), Some(principal)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationUserBadRequest));

        let id = f.service.submit(program.id, &profile("SNU"), Some(principal)).await.unwrap().id;

        let mine = f.service.my_list(principal, &PageRequest::default()).await.unwrap();
        assert_eq!(mine.items[0].id, id);
        assert_eq!(mine.items[0].program_title.as_deref(), Some("Portfolio Camp"));

        let admin_rows = f.service.list_by_program(program.id, None, &PageRequest::default()).await.unwrap();
        assert_eq!(admin_rows.items[0].email.as_deref(), Some("a@x.io"));

        let stranger = Principal { user_id: principal.user_id + 1, role: UserRole::Member };
        assert!(is_code(&f.service.remove(id, stranger).await.unwrap_err(), ErrorCode::ApplicationNotOwned));
        f.service.remove(id, principal).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_submission_leaves_profile_untouched() {
        let f = fixture();
        let principal = member(&f, "b@x.io", "010-2222-2222").await;
        let program = f.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        let closed = ProgramUpdateRequest { status: Some(ProgramStatus::Closed), ..Default::default() };
        f.programs.update(program.id, &closed).await.unwrap();

        let err = f.service.submit(program.id, &profile("KAIST"), Some(principal)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationProgramClosed));
        let stored = f.repos.user.find_by_id(principal.user_id).await.unwrap().unwrap();
        assert_eq!((stored.university, stored.major, stored.account_number), (None, None, None));

        let open = f.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        f.service.submit(open.id, &profile("KAIST"), Some(principal)).await.unwrap();
        let err = f.service.submit(open.id, &profile("POSTECH"), Some(principal)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateApplication));
        let stored = f.repos.user.find_by_id(principal.user_id).await.unwrap().unwrap();
        assert_eq!(stored.university.as_deref(), Some("KAIST"));
    }

    #[tokio::test]
    async fn email_lists_split_on_approval() {
        let f = fixture();
        let program = f.programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        let kept = member(&f, "kept@x.io", "010-1000-0001").await;
        let waiting = member(&f, "waiting@x.io", "010-1000-0002").await;

        let kept_id = f.service.submit(program.id, &profile("SNU"), Some(kept)).await.unwrap().id;
        f.service.submit(program.id, &profile("SNU"), Some(waiting)).await.unwrap();
        let dropped_id = f.service.submit(program.id, &guest("Dropped@X.io"), None).await.unwrap().id;
        f.service.update(kept_id, &decide(true)).await.unwrap();
        f.service.update(dropped_id, &decide(false)).await.unwrap();

        let lists = f.service.email_lists(program.id).await.unwrap();
        assert_eq!(lists.approved, vec!["kept@x.io".to_string()]);
        assert_eq!(lists.not_approved, vec!["waiting@x.io".to_string(), "dropped@x.io".to_string()]);
        assert!(is_code(&f.service.email_lists(program.id + 1).await.unwrap_err(), ErrorCode::ProgramNotFound));
    }

    #[tokio::test]
    async fn challenge_views_tally_mission_progress() {
        let f = fixture();
        let program = f.programs.create(&program_request(ProgramType::ChallengeFull, 10)).await.unwrap();
        let day1 = f.missions.create(program.id, &mission_request(1, 3)).await.unwrap();
        let day2 = f.missions.create(program.id, &mission_request(2, 4)).await.unwrap();
        f.missions.create(program.id, &mission_request(3, 5)).await.unwrap();

        let busy = member(&f, "busy@x.io", "010-3000-0001").await;
        let idle = member(&f, "idle@x.io", "010-3000-0002").await;
        let pending = member(&f, "pending@x.io", "010-3000-0003").await;
        let busy_id = f.service.submit(program.id, &profile("SNU"), Some(busy)).await.unwrap().id;
        let idle_id = f.service.submit(program.id, &profile("KU"), Some(idle)).await.unwrap().id;
        f.service.submit(program.id, &profile("YU"), Some(pending)).await.unwrap();
        f.service.update(busy_id, &decide(true)).await.unwrap();
        f.service.update(idle_id, &decide(true)).await.unwrap();

        let first = f.attendances.submit(day1, busy.user_id, "https://blog.test/1").await.unwrap();
        f.attendances.submit(day2, busy.user_id, "https://blog.test/2").await.unwrap();
        let pass = AttendanceAdminUpdateRequest { result: Some(AttendanceResult::Pass), ..Default::default() };
        f.attendances.admin_update(first.id, &pass).await.unwrap();

        let rows = f.service.challenge_admin_list(program.id, &PageRequest::default()).await.unwrap();
        assert_eq!(rows.page_info.total_elements, 2);
        let tally: Vec<_> = rows.items.iter().map(|r| (r.application.id, r.mission_count, r.attendance_count, r.pass_count)).collect();
        assert_eq!(tally, vec![(busy_id, 3, 2, 1), (idle_id, 3, 0, 0)]);
        assert_eq!(rows.items[0].application.email.as_deref(), Some("busy@x.io"));

        let detail = f.service.challenge_admin_detail(program.id, busy_id).await.unwrap();
        assert_eq!(detail.apply_motive.as_deref(), Some("SNU motive"));
        let days: Vec<_> = detail.missions.iter().map(|m| (m.th, m.attendance_result)).collect();
        assert_eq!(days, vec![(1, Some(AttendanceResult::Pass)), (2, Some(AttendanceResult::Waiting)), (3, None)]);
        assert_eq!(detail.missions[0].attendance_status, Some(AttendanceStatus::Present));
        assert_eq!(detail.missions[1].link.as_deref(), Some("https://blog.test/2"));

        let err = f.service.challenge_admin_detail(program.id + 1, busy_id).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationNotFound));
    }
}
