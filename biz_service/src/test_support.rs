//! Fixtures shared by the manager and service tests.

use crate::client::meeting_client::MeetingClient;
use crate::dto::mission_dto::MissionCreateRequest;
use crate::dto::program_dto::{FaqRequest, ProgramCreateRequest};
use crate::dto::user_dto::UserSignUpRequest;
use crate::entitys::program_entity::{FeeType, MeetingInfo, ProgramTopic, ProgramType, ProgramWay};
use crate::mapper::program_mapper::{self, ProgramDates};
use crate::repos::Repos;
use async_trait::async_trait;
use common::errors::AppError;
use common::util::common_utils::build_snow_id;
use common::util::date_util::{now, time_to_str};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn test_repos() -> Repos {
    Repos::memory()
}

pub fn sign_up_request(email: &str, phone_num: &str) -> UserSignUpRequest {
    UserSignUpRequest { name: "Kim".into(), email: email.into(), phone_num: phone_num.into(), password: "abcd1234".into() }
}

/// `days` from now, in the request date format.
pub fn date_in_days(days: i64) -> String {
    time_to_str(now() + days * 86_400)
}

/// A free BOOTCAMP program that is open for applications.
pub fn program_request(program_type: ProgramType, max_headcount: i32) -> ProgramCreateRequest {
    ProgramCreateRequest {
        program_type,
        th: 1,
        title: "Portfolio Camp".into(),
        max_headcount,
        fee_type: FeeType::Free,
        fee_charge: None,
        fee_refund: None,
        fee_due_date: None,
        account_type: None,
        account_number: None,
        discount_value: None,
        due_date: date_in_days(7),
        announcement_date: date_in_days(8),
        start_date: date_in_days(10),
        end_date: date_in_days(20),
        contents: "contents".into(),
        notice: None,
        way: ProgramWay::Online,
        location: None,
        link: None,
        topic: ProgramTopic::All,
        is_visible: true,
        open_kakao_link: Some("https://open.kakao.com/o/abc".into()),
        open_kakao_password: Some("1234".into()),
        faq_list: vec![FaqRequest { question: "When?".into(), answer: "Soon.".into() }],
    }
}

/// Meeting client answering with fixed data and counting its calls.
#[derive(Default)]
pub struct StubMeetingClient {
    pub calls: AtomicUsize,
}

impl StubMeetingClient {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MeetingClient for StubMeetingClient {
    async fn create_meeting(&self, _program_type: ProgramType, title: &str, th: i32, _start_date: i64) -> Result<MeetingInfo, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(MeetingInfo { join_url: format!("https://meet.test/{}-{}", title.len(), th), meeting_id: "100200300".into(), password: "pw".into() })
    }
}

/// Stores an open program directly, bypassing the create rules.
pub async fn insert_program(repos: &Repos) -> i64 {
    let req = program_request(ProgramType::Bootcamp, 0);
    let dates = ProgramDates::parse(&req).unwrap();
    let program = program_mapper::to_entity(build_snow_id(), &req, dates, None, None, now());
    repos.program.insert(&program).await.unwrap();
    program.id
}

/// Day `th` mission ending `end_in_days` from now; odd days are visible.
pub fn mission_request(th: i32, end_in_days: i64) -> MissionCreateRequest {
    MissionCreateRequest {
        th,
        title: format!("day {}", th),
        contents: "write something".into(),
        guide: None,
        template_link: None,
        mission_type: Default::default(),
        refund: 0,
        start_date: date_in_days(end_in_days - 1),
        end_date: date_in_days(end_in_days),
        is_visible: th % 2 == 1,
    }
}
