use crate::client::meeting_client::MeetingClient;
use crate::dto::program_dto::{ProgramCreateRequest, ProgramUpdateRequest};
use crate::entitys::application_entity::ApplicationStatus;
use crate::entitys::faq_entity::FaqEntity;
use crate::entitys::program_entity::{FeeType, MailStatus, ProgramEntity, ProgramStatus, ProgramType};
use crate::error_code::ErrorCode;
use crate::mapper::program_mapper::{self, ProgramDates};
use crate::mapper::parse_opt_date_field;
use crate::repos::Repos;
use common::errors::AppError;
use common::query_builder::{newest_first, PageRequest, PageResult, QueryBuilder};
use common::util::common_utils::{build_snow_id, random_digits};
use common::util::date_util::now;
use log::{error, info, warn};
use mongodb::bson::doc;
use std::sync::Arc;

const MENTOR_PASSWORD_DIGITS: u32 = 4;

/// Fee and chat inputs a program type requires.
fn check_required_inputs(req: &ProgramCreateRequest) -> Result<(), AppError> {
    let has_account = req.fee_due_date.is_some() && req.account_type.is_some() && req.account_number.is_some();
    match req.fee_type {
        FeeType::Charge if req.fee_charge.is_none() || !has_account => return Err(ErrorCode::ProgramChargeInputRequired.into()),
        FeeType::Refund if req.fee_refund.is_none() || !has_account => return Err(ErrorCode::ProgramRefundInputRequired.into()),
        _ => {}
    }
    if req.program_type.is_challenge() && (req.open_kakao_link.is_none() || req.open_kakao_password.is_none()) {
        return Err(ErrorCode::ProgramChallengeInputRequired.into());
    }
    Ok(())
}

pub struct ProgramManager {
    repos: Repos,
    meeting: Arc<dyn MeetingClient>,
}

impl ProgramManager {
    pub fn new(repos: Repos, meeting: Arc<dyn MeetingClient>) -> Self {
        Self { repos, meeting }
    }

    pub async fn find_program(&self, program_id: i64) -> Result<ProgramEntity, AppError> {
        self.repos.program.find_by_id(program_id).await?.ok_or_else(|| ErrorCode::ProgramNotFound.into())
    }

    /// Validates, books the meeting room, then writes the program and its FAQs.
    pub async fn create(&self, req: &ProgramCreateRequest) -> Result<ProgramEntity, AppError> {
        if let Err(e) = check_required_inputs(req) {
            warn!("program '{}' rejected: {}", req.title, e);
            return Err(e);
        }
        let dates = ProgramDates::parse(req)?;

        let meeting = if req.program_type.needs_meeting() {
            Some(self.meeting.create_meeting(req.program_type, &req.title, req.th, dates.start_date).await?)
        } else {
            None
        };
        let mentor_password = (req.program_type == ProgramType::LetsChat).then(|| random_digits(MENTOR_PASSWORD_DIGITS));

        let program = program_mapper::to_entity(build_snow_id(), req, dates, meeting, mentor_password, now());
        self.repos.program.insert(&program).await?;

        for faq in program_mapper::to_faq_entities(program.id, &req.faq_list) {
            if let Err(e) = self.repos.faq.insert(&faq).await {
                error!("faq insert failed for program {}, removing the program: {}", program.id, e);
                self.remove_with_faqs(program.id).await?;
                return Err(e);
            }
        }
        info!("program {} created ({} #{}, {})", program.id, program.program_type, program.th, program.status);
        Ok(program)
    }

    pub async fn update(&self, program_id: i64, req: &ProgramUpdateRequest) -> Result<i64, AppError> {
        let mut program = self.find_program(program_id).await?;
        if let Some(max_headcount) = req.max_headcount {
            if max_headcount > 0 && max_headcount < program.headcount {
                warn!("program {} capacity {} is below its headcount {}", program_id, max_headcount, program.headcount);
                return Err(AppError::Validation(format!(
                    "maxHeadcount {} is below the current headcount {}",
                    max_headcount, program.headcount
                )));
            }
        }

        // all dates parse before anything is touched
        let due_date = parse_opt_date_field("dueDate", req.due_date.as_deref())?;
        let announcement_date = parse_opt_date_field("announcementDate", req.announcement_date.as_deref())?;
        let start_date = parse_opt_date_field("startDate", req.start_date.as_deref())?;
        let end_date = parse_opt_date_field("endDate", req.end_date.as_deref())?;
        let fee_due_date = parse_opt_date_field("feeDueDate", req.fee_due_date.as_deref())?;

        common::merge_fields!(program, req; program_type, th, title, max_headcount, fee_type, contents, way, topic, is_visible);
        common::merge_opt_fields!(
            program, req;
            fee_charge, fee_refund, account_type, account_number, discount_value, notice, location, link, open_kakao_link, open_kakao_password
        );
        common::util::patch::set_if_some(&mut program.announcement_date, announcement_date);
        common::util::patch::set_if_some(&mut program.start_date, start_date);
        common::util::patch::set_if_some(&mut program.end_date, end_date);
        common::util::patch::set_opt_if_some(&mut program.fee_due_date, fee_due_date);

        let current = now();
        if let Some(due_date) = due_date {
            program.due_date = due_date;
            program.status = ProgramStatus::for_due_date(due_date, current);
        }
        program.status = program.status.on_headcount(program.headcount, program.max_headcount);
        common::merge_fields!(program, req; status);
        program.update_time = current;

        self.repos.program.save(program.id, &program).await?;
        info!("program {} updated, status {}", program.id, program.status);
        Ok(program.id)
    }

    /// Takes one seat. Fails with `ProgramFull` once capacity is reached and
    /// closes the program when the last seat goes.
    ///
    /// The increment is conditional on the capacity read just before, so the
    /// store itself refuses a seat past `max_headcount`.
    pub async fn increment_headcount(&self, program_id: i64) -> Result<ProgramEntity, AppError> {
        loop {
            let program = self.find_program(program_id).await?;
            let max_headcount = program.max_headcount;
            if max_headcount > 0 && program.headcount >= max_headcount {
                warn!("program {} is full ({}/{})", program_id, program.headcount, max_headcount);
                return Err(ErrorCode::ProgramFull.into());
            }

            let filter = if max_headcount > 0 {
                doc! { "_id": program_id, "max_headcount": max_headcount, "headcount": { "$lt": max_headcount } }
            } else {
                doc! { "_id": program_id, "max_headcount": 0 }
            };
            let update = doc! { "$inc": { "headcount": 1 }, "$set": { "update_time": now() } };
            let Some(mut updated) = self.repos.program.find_one_and_update(filter, update).await? else {
                // filled up or capacity edited in between, re-read decides
                continue;
            };

            let status = updated.status.on_headcount(updated.headcount, updated.max_headcount);
            if status != updated.status {
                self.repos.program.update_one(doc! { "_id": program_id }, doc! { "$set": { "status": status.as_ref() } }).await?;
                info!("program {} reached {} applicants and is now {}", program_id, updated.headcount, status);
                updated.status = status;
            }
            return Ok(updated);
        }
    }

    /// Deletes regardless of status; applications and missions stay.
    pub async fn delete(&self, program_id: i64) -> Result<i64, AppError> {
        self.find_program(program_id).await?;
        self.remove_with_faqs(program_id).await?;
        info!("program {} deleted", program_id);
        Ok(program_id)
    }

    async fn remove_with_faqs(&self, program_id: i64) -> Result<(), AppError> {
        self.repos.faq.delete_many(doc! { "program_id": program_id }).await?;
        self.repos.program.delete_by_id(program_id).await?;
        Ok(())
    }

    pub async fn faqs(&self, program_id: i64) -> Result<Vec<FaqEntity>, AppError> {
        self.repos.faq.find_all(doc! { "program_id": program_id }, Some(doc! { "_id": 1 })).await
    }

    pub async fn thumbnail_list(&self, program_type: Option<ProgramType>, page: &PageRequest) -> Result<PageResult<ProgramEntity>, AppError> {
        let filter = QueryBuilder::new().eq("is_visible", true).eq_opt("program_type", program_type.as_ref().map(|t| t.as_ref())).build();
        self.repos.program.query_by_page(filter, Some(newest_first()), page).await
    }

    pub async fn admin_list(&self, program_type: Option<ProgramType>, th: Option<i32>, page: &PageRequest) -> Result<PageResult<ProgramEntity>, AppError> {
        let filter = QueryBuilder::new().eq_opt("program_type", program_type.as_ref().map(|t| t.as_ref())).eq_opt("th", th).build();
        self.repos.program.query_by_page(filter, Some(newest_first()), page).await
    }

    pub async fn find_by_ids(&self, ids: Vec<i64>) -> Result<Vec<ProgramEntity>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.repos.program.find_all(QueryBuilder::new().in_array("_id", ids).build(), None).await
    }

    pub async fn count_done(&self) -> Result<u64, AppError> {
        self.repos.program.count(doc! { "status": ProgramStatus::Done.as_ref() }).await
    }

    /// Final headcount is the number of applications in progress.
    pub async fn save_final_headcount(&self, program_id: i64) -> Result<i32, AppError> {
        self.find_program(program_id).await?;
        let in_progress = self
            .repos
            .application
            .count(doc! { "program_id": program_id, "status": ApplicationStatus::InProgress.as_ref() })
            .await?;
        let final_head_count = i32::try_from(in_progress).unwrap_or(i32::MAX);
        self.repos
            .program
            .update_one(doc! { "_id": program_id }, doc! { "$set": { "final_head_count": final_head_count, "update_time": now() } })
            .await?;
        info!("program {} final headcount {}", program_id, final_head_count);
        Ok(final_head_count)
    }

    pub async fn mentor_password(&self, program_id: i64) -> Result<Option<String>, AppError> {
        Ok(self.find_program(program_id).await?.mentor_password)
    }

    pub async fn check_mentor_password(&self, program_id: i64, password: &str) -> Result<ProgramEntity, AppError> {
        let program = self.find_program(program_id).await?;
        if program.mentor_password.as_deref() != Some(password) {
            warn!("mentor password mismatch for program {}", program_id);
            return Err(ErrorCode::ProgramMentorPasswordMismatch.into());
        }
        Ok(program)
    }

    pub async fn mark_mail_status(&self, program_id: i64, mail_status: MailStatus) -> Result<(), AppError> {
        let modified = self
            .repos
            .program
            .update_one(doc! { "_id": program_id }, doc! { "$set": { "mail_status": mail_status.as_ref(), "update_time": now() } })
            .await?;
        if modified == 0 {
            self.find_program(program_id).await?;
        }
        info!("program {} mail status {}", program_id, mail_status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_code::is_code;
    use crate::test_support::{date_in_days, program_request, test_repos, StubMeetingClient};
    use crate::entitys::user_entity::AccountType;

    fn manager(repos: &Repos) -> (ProgramManager, Arc<StubMeetingClient>) {
        let meeting = Arc::new(StubMeetingClient::default());
        (ProgramManager::new(repos.clone(), meeting.clone()), meeting)
    }

    #[tokio::test]
    async fn charge_program_without_fee_writes_nothing() {
        let repos = test_repos();
        let (programs, meeting) = manager(&repos);
        let mut req = program_request(ProgramType::LetsChat, 10);
        req.fee_type = FeeType::Charge;

        let err = programs.create(&req).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramChargeInputRequired));
        assert_eq!(repos.program.count(doc! {}).await.unwrap(), 0);
        assert_eq!(repos.faq.count(doc! {}).await.unwrap(), 0);
        assert_eq!(meeting.call_count(), 0);

        req.fee_charge = Some(30000);
        req.fee_due_date = Some(date_in_days(5));
        req.account_type = Some(AccountType::Kb);
        req.account_number = Some("123-45".into());
        programs.create(&req).await.unwrap();
    }

    #[tokio::test]
    async fn challenge_requires_open_chat() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let mut req = program_request(ProgramType::ChallengeFull, 10);
        req.open_kakao_password = None;
        let err = programs.create(&req).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramChallengeInputRequired));
    }

    #[tokio::test]
    async fn malformed_date_fails_before_meeting_call() {
        let repos = test_repos();
        let (programs, meeting) = manager(&repos);
        let mut req = program_request(ProgramType::LetsChat, 10);
        req.start_date = "2024/01/01".into();
        let err = programs.create(&req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(meeting.call_count(), 0);
    }

    #[tokio::test]
    async fn lets_chat_gets_meeting_and_mentor_password() {
        let repos = test_repos();
        let (programs, meeting) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::LetsChat, 10)).await.unwrap();

        let password = program.mentor_password.clone().unwrap();
        assert_eq!(password.len(), 4);
        assert!(password.chars().all(|c| c.is_ascii_digit()));
        assert!(program.meeting.is_some());
        assert_eq!(meeting.call_count(), 1);
        assert_eq!(program.status, ProgramStatus::Open);
        assert_eq!(programs.faqs(program.id).await.unwrap().len(), 1);

        programs.check_mentor_password(program.id, &password).await.unwrap();
        let err = programs.check_mentor_password(program.id, "x").await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramMentorPasswordMismatch));
    }

    #[tokio::test]
    async fn bootcamp_skips_meeting() {
        let repos = test_repos();
        let (programs, meeting) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        assert!(program.meeting.is_none() && program.mentor_password.is_none());
        assert_eq!(meeting.call_count(), 0);
    }

    #[tokio::test]
    async fn headcount_never_exceeds_capacity() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 3)).await.unwrap();

        let mut statuses = vec![];
        for _ in 0..3 {
            statuses.push(programs.increment_headcount(program.id).await.unwrap().status);
        }
        assert_eq!(statuses, vec![ProgramStatus::Open, ProgramStatus::Open, ProgramStatus::Closed]);

        let err = programs.increment_headcount(program.id).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramFull));
        assert_eq!(programs.find_program(program.id).await.unwrap().headcount, 3);
    }

    #[tokio::test]
    async fn concurrent_seats_stop_at_capacity() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let programs = Arc::new(programs);
        let program_id = programs.create(&program_request(ProgramType::Bootcamp, 5)).await.unwrap().id;

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..20 {
            let programs = programs.clone();
            tasks.spawn(async move { programs.increment_headcount(program_id).await });
        }
        let (mut taken, mut full) = (0, 0);
        while let Some(joined) = tasks.join_next().await {
            match joined.unwrap() {
                Ok(_) => taken += 1,
                Err(e) => {
                    assert!(is_code(&e, ErrorCode::ProgramFull), "unexpected error {e}");
                    full += 1;
                }
            }
        }
        assert_eq!((taken, full), (5, 15));
        let stored = programs.find_program(program_id).await.unwrap();
        assert_eq!((stored.headcount, stored.status), (5, ProgramStatus::Closed));
    }

    #[tokio::test]
    async fn capacity_cannot_drop_below_headcount() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        for _ in 0..3 {
            programs.increment_headcount(program.id).await.unwrap();
        }

        let shrink = ProgramUpdateRequest { max_headcount: Some(2), ..Default::default() };
        assert!(matches!(programs.update(program.id, &shrink).await.unwrap_err(), AppError::Validation(_)));
        assert_eq!(programs.find_program(program.id).await.unwrap().max_headcount, 10);

        let exact = ProgramUpdateRequest { max_headcount: Some(3), ..Default::default() };
        programs.update(program.id, &exact).await.unwrap();
        let stored = programs.find_program(program.id).await.unwrap();
        assert_eq!((stored.headcount, stored.max_headcount, stored.status), (3, 3, ProgramStatus::Closed));
        assert!(is_code(&programs.increment_headcount(program.id).await.unwrap_err(), ErrorCode::ProgramFull));

        let unlimited = ProgramUpdateRequest { max_headcount: Some(0), status: Some(ProgramStatus::Open), ..Default::default() };
        programs.update(program.id, &unlimited).await.unwrap();
        assert_eq!(programs.increment_headcount(program.id).await.unwrap().headcount, 4);
    }

    #[tokio::test]
    async fn unlimited_program_stays_open() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 0)).await.unwrap();
        for _ in 0..5 {
            assert_eq!(programs.increment_headcount(program.id).await.unwrap().status, ProgramStatus::Open);
        }
    }

    #[tokio::test]
    async fn update_derives_status_unless_given() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();

        let past = ProgramUpdateRequest { due_date: Some(date_in_days(-1)), title: Some("Renamed".into()), ..Default::default() };
        programs.update(program.id, &past).await.unwrap();
        let stored = programs.find_program(program.id).await.unwrap();
        assert_eq!(stored.status, ProgramStatus::Closed);
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.th, 1);

        let forced = ProgramUpdateRequest { due_date: Some(date_in_days(-1)), status: Some(ProgramStatus::Open), ..Default::default() };
        programs.update(program.id, &forced).await.unwrap();
        assert_eq!(programs.find_program(program.id).await.unwrap().status, ProgramStatus::Open);

        let broken = ProgramUpdateRequest { title: Some("Lost".into()), end_date: Some("someday".into()), ..Default::default() };
        assert!(programs.update(program.id, &broken).await.is_err());
        assert_eq!(programs.find_program(program.id).await.unwrap().title, "Renamed");
    }

    #[tokio::test]
    async fn delete_removes_faqs_and_reports_missing() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        let program = programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        programs.delete(program.id).await.unwrap();
        assert_eq!(repos.faq.count(doc! {}).await.unwrap(), 0);
        let err = programs.delete(program.id).await.unwrap_err();
        assert!(is_code(&err, ErrorCode::ProgramNotFound));
    }

    #[tokio::test]
    async fn listings_filter_by_type_and_visibility() {
        let repos = test_repos();
        let (programs, _) = manager(&repos);
        programs.create(&program_request(ProgramType::Bootcamp, 10)).await.unwrap();
        programs.create(&program_request(ProgramType::LetsChat, 10)).await.unwrap();
        let mut hidden = program_request(ProgramType::Bootcamp, 10);
        hidden.is_visible = false;
        hidden.th = 2;
        programs.create(&hidden).await.unwrap();

        let page = PageRequest::default();
        assert_eq!(programs.thumbnail_list(None, &page).await.unwrap().page_info.total_elements, 2);
        assert_eq!(programs.thumbnail_list(Some(ProgramType::Bootcamp), &page).await.unwrap().items.len(), 1);
        assert_eq!(programs.admin_list(Some(ProgramType::Bootcamp), None, &page).await.unwrap().items.len(), 2);
        assert_eq!(programs.admin_list(Some(ProgramType::Bootcamp), Some(2), &page).await.unwrap().items.len(), 1);
    }
}
