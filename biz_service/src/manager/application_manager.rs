use crate::dto::application_dto::{ApplicationCreateRequest, ApplicationUpdateRequest};
use crate::entitys::application_entity::{ApplicationEntity, ApplicationStatus, ApprovalEvent, ApprovalState};
use crate::entitys::program_entity::ProgramStatus;
use crate::error_code::{on_duplicate, ErrorCode};
use crate::manager::program_manager::ProgramManager;
use crate::mapper::application_mapper;
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult, QueryBuilder};
use common::util::common_utils::build_snow_id;
use common::util::date_util::now;
use log::{error, info, warn};
use mongodb::bson::{doc, Document};
use std::sync::Arc;

/// Who submits an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicant {
    Member(i64),
    /// Identified by the guest fields of the submission.
    Guest,
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

pub struct ApplicationManager {
    repos: Repos,
    programs: Arc<ProgramManager>,
}

impl ApplicationManager {
    pub fn new(repos: Repos, programs: Arc<ProgramManager>) -> Self {
        Self { repos, programs }
    }

    pub async fn find_application(&self, application_id: i64) -> Result<ApplicationEntity, AppError> {
        self.repos.application.find_by_id(application_id).await?.ok_or_else(|| ErrorCode::ApplicationNotFound.into())
    }

    fn identity_filter(program_id: i64, applicant: Applicant, req: &ApplicationCreateRequest) -> Document {
        match applicant {
            Applicant::Member(user_id) => doc! { "program_id": program_id, "user_id": user_id },
            Applicant::Guest => {
                let email = req.guest_email.as_deref().unwrap_or_default().trim().to_lowercase();
                doc! { "program_id": program_id, "guest_email": email }
            }
        }
    }

    /// Rejects a submission that could never be stored: missing guest contact,
    /// a program that is not OPEN, or an identity that already applied.
    pub async fn check_admission(&self, program_id: i64, req: &ApplicationCreateRequest, applicant: Applicant) -> Result<(), AppError> {
        if applicant == Applicant::Guest && !(present(&req.guest_name) && present(&req.guest_phone_num) && present(&req.guest_email)) {
            warn!("guest application to program {} is missing contact fields", program_id);
            return Err(ErrorCode::ApplicationGuestBadRequest.into());
        }

        let program = self.programs.find_program(program_id).await?;
        if program.status != ProgramStatus::Open {
            warn!("application to program {} rejected, program is {}", program_id, program.status);
            return Err(ErrorCode::ApplicationProgramClosed.into());
        }

        if self.repos.application.count(Self::identity_filter(program_id, applicant, req)).await? > 0 {
            warn!("duplicate application to program {} by {:?}", program_id, applicant);
            return Err(ErrorCode::DuplicateApplication.into());
        }
        Ok(())
    }

    /// Stores a new application and takes a seat in the program.
    pub async fn submit(&self, program_id: i64, req: &ApplicationCreateRequest, applicant: Applicant) -> Result<ApplicationEntity, AppError> {
        self.check_admission(program_id, req, applicant).await?;

        let application = application_mapper::to_entity(build_snow_id(), program_id, req, applicant, now());
        self.repos.application.insert(&application).await.map_err(on_duplicate(ErrorCode::DuplicateApplication))?;

        if let Err(e) = self.programs.increment_headcount(program_id).await {
            warn!("application {} withdrawn, headcount update failed: {}", application.id, e);
            if let Err(cleanup) = self.repos.application.delete_by_id(application.id).await {
                error!("could not withdraw application {}: {}", application.id, cleanup);
            }
            return Err(e);
        }
        info!("application {} submitted to program {} by {:?}", application.id, program_id, applicant);
        Ok(application)
    }

    /// Approval decision first, then an explicit status, then the other fields.
    pub async fn update(&self, application_id: i64, req: &ApplicationUpdateRequest) -> Result<i64, AppError> {
        let mut application = self.find_application(application_id).await?;

        if let Some(is_approved) = req.is_approved {
            application.approval = ApprovalState::from(is_approved);
            application.status = application.status.on_event(ApprovalEvent::Decided(is_approved));
        }
        common::merge_fields!(application, req; status);
        common::merge_opt_fields!(application, req; grade, wish_company, wish_job, apply_motive, attendance);

        self.repos.application.save(application.id, &application).await?;
        info!("application {} updated: {} / {}", application.id, application.status, application.approval);
        Ok(application.id)
    }

    /// Only while the program is open. Applications whose program is gone can always be removed.
    pub async fn remove(&self, application_id: i64) -> Result<i64, AppError> {
        let application = self.find_application(application_id).await?;
        if let Some(program) = self.repos.program.find_by_id(application.program_id).await? {
            if program.status != ProgramStatus::Open {
                warn!("application {} kept, program {} is {}", application_id, program.id, program.status);
                return Err(ErrorCode::ApplicationCannotBeDeleted.into());
            }
        }
        self.repos.application.delete_by_id(application_id).await?;
        info!("application {} deleted", application_id);
        Ok(application_id)
    }

    /// Moves every still-APPLIED application of the program to APPLIED_NOT_APPROVED.
    pub async fn bulk_reject_remaining(&self, program_id: i64) -> Result<u64, AppError> {
        let next = ApplicationStatus::Applied.on_event(ApprovalEvent::RemainingRejected);
        let modified = self
            .repos
            .application
            .update_many(
                doc! { "program_id": program_id, "status": ApplicationStatus::Applied.as_ref() },
                doc! { "$set": { "status": next.as_ref(), "approval": ApprovalState::Rejected.as_ref() } },
            )
            .await?;
        info!("{} remaining applications of program {} rejected", modified, program_id);
        Ok(modified)
    }

    pub async fn update_introduction(&self, application_id: i64, user_id: i64, introduction: &str) -> Result<i64, AppError> {
        let application = self.find_application(application_id).await?;
        if application.user_id != Some(user_id) {
            warn!("user {} tried to edit application {}", user_id, application_id);
            return Err(ErrorCode::ApplicationNotOwned.into());
        }
        self.repos.application.update_one(doc! { "_id": application_id }, doc! { "$set": { "introduction": introduction } }).await?;
        Ok(application_id)
    }

    pub async fn list_by_program(&self, program_id: i64, approval: Option<ApprovalState>, page: &PageRequest) -> Result<PageResult<ApplicationEntity>, AppError> {
        let filter = QueryBuilder::new().eq("program_id", program_id).eq_opt("approval", approval.as_ref().map(|a| a.as_ref())).build();
        self.repos.application.query_by_page(filter, Some(newest_first()), page).await
    }

    /// Approved applications of a program, oldest first.
    pub async fn approved_by_program(&self, program_id: i64, page: &PageRequest) -> Result<PageResult<ApplicationEntity>, AppError> {
        self.repos
            .application
            .query_by_page(doc! { "program_id": program_id, "approval": ApprovalState::Approved.as_ref() }, Some(doc! { "_id": 1 }), page)
            .await
    }

    pub async fn list_by_user(&self, user_id: i64, page: &PageRequest) -> Result<PageResult<ApplicationEntity>, AppError> {
        self.repos.application.query_by_page(doc! { "user_id": user_id }, Some(newest_first()), page).await
    }

    pub async fn has_applied(&self, program_id: i64, user_id: i64) -> Result<bool, AppError> {
        Ok(self.repos.application.count(doc! { "program_id": program_id, "user_id": user_id }).await? > 0)
    }

    /// Contact emails of the program's applications in the given approval state.
    pub async fn emails_by_approval(&self, program_id: i64, approval: ApprovalState) -> Result<Vec<String>, AppError> {
        self.emails_where(doc! { "program_id": program_id, "approval": approval.as_ref() }).await
    }

    /// Undecided and rejected applications alike.
    pub async fn not_approved_emails(&self, program_id: i64) -> Result<Vec<String>, AppError> {
        self.emails_where(doc! { "program_id": program_id, "approval": { "$ne": ApprovalState::Approved.as_ref() } }).await
    }

    /// Member emails come from the account, guest emails from the application; first occurrence wins.
    async fn emails_where(&self, filter: Document) -> Result<Vec<String>, AppError> {
        let applications = self.repos.application.find_all(filter, Some(doc! { "_id": 1 })).await?;

        let member_ids: Vec<i64> = applications.iter().filter_map(|a| a.user_id).collect();
        let members = if member_ids.is_empty() {
            vec![]
        } else {
            self.repos.user.find_all(QueryBuilder::new().in_array("_id", member_ids).build(), None).await?
        };

        let mut emails = Vec::with_capacity(applications.len());
        for application in &applications {
            let email = match application.user_id {
                Some(user_id) => members.iter().find(|u| u.id == user_id).map(|u| u.email.clone()),
                None => application.guest_email.clone(),
            };
            if let Some(email) = email {
                if !emails.contains(&email) {
                    emails.push(email);
                }
            }
        }
        Ok(emails)
    }

    pub async fn approved_emails(&self, program_id: i64) -> Result<Vec<String>, AppError> {
        self.emails_by_approval(program_id, ApprovalState::Approved).await
    }

    /// Motives written by approved applicants, oldest first.
    pub async fn approved_motives(&self, program_id: i64) -> Result<Vec<String>, AppError> {
        let applications = self
            .repos
            .application
            .find_all(doc! { "program_id": program_id, "approval": ApprovalState::Approved.as_ref() }, Some(doc! { "_id": 1 }))
            .await?;
        Ok(applications.into_iter().filter_map(|a| a.apply_motive).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitys::program_entity::ProgramType;
    use crate::error_code::is_code;
    use crate::test_support::{program_request, test_repos, StubMeetingClient};

    struct Fixture {
        repos: Repos,
        programs: Arc<ProgramManager>,
        applications: ApplicationManager,
    }

    fn fixture() -> Fixture {
        let repos = test_repos();
        let programs = Arc::new(ProgramManager::new(repos.clone(), Arc::new(StubMeetingClient::default())));
        let applications = ApplicationManager::new(repos.clone(), programs.clone());
        Fixture { repos, programs, applications }
    }

    fn guest(email: Option<&str>) -> ApplicationCreateRequest {
        ApplicationCreateRequest {
            guest_name: Some("Guest".into()),
            guest_phone_num: Some("010-9999-9999".into()),
            guest_email: email.map(Into::into),
            apply_motive: Some("to learn".into()),
            ..Default::default()
        }
    }

    async fn open_program(f: &Fixture, max_headcount: i32) -> i64 {
        f.programs.create(&program_request(ProgramType::Bootcamp, max_headcount)).await.unwrap().id
    }

    #[tokio::test]
    async fn member_cannot_apply_twice() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let first = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(7)).await.unwrap();
        assert_eq!(first.status, ApplicationStatus::Applied);
        assert_eq!(first.approval, ApprovalState::Undecided);

        let err = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(7)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateApplication));
        assert_eq!(f.programs.find_program(program_id).await.unwrap().headcount, 1);
    }

    #[tokio::test]
    async fn guest_email_is_case_insensitive_identity() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        f.applications.submit(program_id, &guest(Some("g@x.io")), Applicant::Guest).await.unwrap();
        let err = f.applications.submit(program_id, &guest(Some("G@X.io")), Applicant::Guest).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateApplication));
    }

    #[tokio::test]
    async fn unique_index_backs_up_the_pre_check() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let application = application_mapper::to_entity(build_snow_id(), program_id, &ApplicationCreateRequest::default(), Applicant::Member(3), now());
        f.repos.application.insert(&application).await.unwrap();
        let again = application_mapper::to_entity(build_snow_id(), program_id, &ApplicationCreateRequest::default(), Applicant::Member(3), now());
        let err = f.repos.application.insert(&again).await.map_err(on_duplicate(ErrorCode::DuplicateApplication)).unwrap_err();
        assert!(is_code(&err, ErrorCode::DuplicateApplication));
    }

    #[tokio::test]
    async fn guest_without_email_persists_nothing() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let err = f.applications.submit(program_id, &guest(None), Applicant::Guest).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationGuestBadRequest));
        assert_eq!(f.repos.application.count(doc! {}).await.unwrap(), 0);
        assert_eq!(f.programs.find_program(program_id).await.unwrap().headcount, 0);
    }

    #[tokio::test]
    async fn full_program_closes_and_refuses_more() {
        let f = fixture();
        let program_id = open_program(&f, 2).await;
        f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(1)).await.unwrap();
        f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(2)).await.unwrap();
        assert_eq!(f.programs.find_program(program_id).await.unwrap().status, ProgramStatus::Closed);

        let err = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(3)).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationProgramClosed));
        assert_eq!(f.repos.application.count(doc! {}).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn approval_then_explicit_status() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let a = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(1)).await.unwrap();
        let b = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(2)).await.unwrap();

        let approve = ApplicationUpdateRequest { is_approved: Some(true), wish_job: Some("PM".into()), ..Default::default() };
        f.applications.update(a.id, &approve).await.unwrap();
        let stored = f.applications.find_application(a.id).await.unwrap();
        assert_eq!((stored.status, stored.approval), (ApplicationStatus::InProgress, ApprovalState::Approved));
        assert_eq!(stored.wish_job.as_deref(), Some("PM"));

        let override_status = ApplicationUpdateRequest { is_approved: Some(false), status: Some(ApplicationStatus::Done), ..Default::default() };
        f.applications.update(b.id, &override_status).await.unwrap();
        let stored = f.applications.find_application(b.id).await.unwrap();
        assert_eq!((stored.status, stored.approval), (ApplicationStatus::Done, ApprovalState::Rejected));

        let err = f.applications.update(404, &ApplicationUpdateRequest::default()).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationNotFound));
    }

    #[tokio::test]
    async fn remove_only_while_program_open() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let a = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(1)).await.unwrap();
        let b = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(2)).await.unwrap();
        f.applications.remove(a.id).await.unwrap();

        f.repos.program.update_one(doc! { "_id": program_id }, doc! { "$set": { "status": "CLOSED" } }).await.unwrap();
        let err = f.applications.remove(b.id).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationCannotBeDeleted));
        assert!(f.repos.application.find_by_id(b.id).await.unwrap().is_some());

        f.programs.delete(program_id).await.unwrap();
        f.applications.remove(b.id).await.unwrap();
    }

    #[tokio::test]
    async fn bulk_reject_touches_only_applied_rows() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let mut ids = vec![];
        for user_id in 1..=3 {
            ids.push(f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(user_id)).await.unwrap().id);
        }
        f.applications.update(ids[0], &ApplicationUpdateRequest { is_approved: Some(true), ..Default::default() }).await.unwrap();

        assert_eq!(f.applications.bulk_reject_remaining(program_id).await.unwrap(), 2);
        assert_eq!(f.applications.bulk_reject_remaining(program_id).await.unwrap(), 0);
        assert_eq!(f.applications.find_application(ids[0]).await.unwrap().status, ApplicationStatus::InProgress);
        let rejected = f.applications.find_application(ids[1]).await.unwrap();
        assert_eq!((rejected.status, rejected.approval), (ApplicationStatus::AppliedNotApproved, ApprovalState::Rejected));
    }

    #[tokio::test]
    async fn introduction_only_by_owner() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let a = f.applications.submit(program_id, &ApplicationCreateRequest::default(), Applicant::Member(1)).await.unwrap();
        f.applications.update_introduction(a.id, 1, "hello").await.unwrap();
        let err = f.applications.update_introduction(a.id, 2, "mine now").await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ApplicationNotOwned));
        assert_eq!(f.applications.find_application(a.id).await.unwrap().introduction.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn approved_emails_include_guests() {
        let f = fixture();
        let program_id = open_program(&f, 10).await;
        let g = f.applications.submit(program_id, &guest(Some("g@x.io")), Applicant::Guest).await.unwrap();
        f.applications.submit(program_id, &guest(Some("h@x.io")), Applicant::Guest).await.unwrap();
        f.applications.update(g.id, &ApplicationUpdateRequest { is_approved: Some(true), ..Default::default() }).await.unwrap();

        assert_eq!(f.applications.approved_emails(program_id).await.unwrap(), vec!["g@x.io".to_string()]);
        assert_eq!(f.applications.approved_motives(program_id).await.unwrap(), vec!["to learn".to_string()]);
        assert!(f.applications.emails_by_approval(program_id, ApprovalState::Rejected).await.unwrap().is_empty());
    }
}
