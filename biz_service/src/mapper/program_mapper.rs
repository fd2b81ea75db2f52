use crate::dto::program_dto::{
    FaqRequest, FaqResponse, LetsChatAfterNoticeResponse, LetsChatPriorNoticeResponse, ProgramAdminResponse, ProgramCreateRequest,
    ProgramDetailResponse, ProgramThumbnailResponse,
};
use crate::dto::review_dto::ReviewResponse;
use crate::entitys::faq_entity::FaqEntity;
use crate::entitys::mail_entity::MailType;
use crate::entitys::program_entity::{MailStatus, MeetingInfo, ProgramEntity, ProgramStatus};
use crate::mapper::{parse_date_field, parse_opt_date_field};
use common::errors::AppError;
use common::util::common_utils::build_snow_id;
use common::util::date_util::time_to_str;

/// Dates of a create request, parsed before anything else happens.
#[derive(Debug, Clone, Copy)]
pub struct ProgramDates {
    pub due_date: i64,
    pub announcement_date: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub fee_due_date: Option<i64>,
}

impl ProgramDates {
    pub fn parse(req: &ProgramCreateRequest) -> Result<Self, AppError> {
        Ok(Self {
            due_date: parse_date_field("dueDate", &req.due_date)?,
            announcement_date: parse_date_field("announcementDate", &req.announcement_date)?,
            start_date: parse_date_field("startDate", &req.start_date)?,
            end_date: parse_date_field("endDate", &req.end_date)?,
            fee_due_date: parse_opt_date_field("feeDueDate", req.fee_due_date.as_deref())?,
        })
    }
}

pub fn to_entity(
    id: i64,
    req: &ProgramCreateRequest,
    dates: ProgramDates,
    meeting: Option<MeetingInfo>,
    mentor_password: Option<String>,
    now: i64,
) -> ProgramEntity {
    ProgramEntity {
        id,
        program_type: req.program_type,
        status: ProgramStatus::for_due_date(dates.due_date, now),
        th: req.th,
        title: req.title.clone(),
        headcount: 0,
        max_headcount: req.max_headcount,
        final_head_count: 0,
        fee_type: req.fee_type,
        fee_charge: req.fee_charge,
        fee_refund: req.fee_refund,
        fee_due_date: dates.fee_due_date,
        account_type: req.account_type,
        account_number: req.account_number.clone(),
        discount_value: req.discount_value,
        due_date: dates.due_date,
        announcement_date: dates.announcement_date,
        start_date: dates.start_date,
        end_date: dates.end_date,
        contents: req.contents.clone(),
        notice: req.notice.clone(),
        way: req.way,
        location: req.location.clone(),
        link: req.link.clone(),
        topic: req.topic,
        is_visible: req.is_visible,
        open_kakao_link: req.open_kakao_link.clone(),
        open_kakao_password: req.open_kakao_password.clone(),
        meeting,
        mentor_password,
        mail_status: MailStatus::None,
        create_time: now,
        update_time: now,
    }
}

pub fn to_faq_entities(program_id: i64, faqs: &[FaqRequest]) -> Vec<FaqEntity> {
    faqs.iter()
        .map(|faq| FaqEntity { id: build_snow_id(), program_id, question: faq.question.clone(), answer: faq.answer.clone() })
        .collect()
}

pub fn to_faq_response(faq: FaqEntity) -> FaqResponse {
    FaqResponse { id: faq.id, question: faq.question, answer: faq.answer }
}

pub fn to_thumbnail(program: ProgramEntity) -> ProgramThumbnailResponse {
    ProgramThumbnailResponse {
        id: program.id,
        status: program.status,
        program_type: program.program_type,
        th: program.th,
        title: program.title,
        due_date: time_to_str(program.due_date),
        start_date: time_to_str(program.start_date),
    }
}

pub fn to_detail(program: ProgramEntity, faqs: Vec<FaqEntity>, reviews: Vec<ReviewResponse>, is_applied: bool) -> ProgramDetailResponse {
    ProgramDetailResponse {
        id: program.id,
        status: program.status,
        program_type: program.program_type,
        th: program.th,
        title: program.title,
        contents: program.contents,
        notice: program.notice,
        way: program.way,
        location: program.location,
        topic: program.topic,
        fee_type: program.fee_type,
        fee_charge: program.fee_charge,
        fee_refund: program.fee_refund,
        discount_value: program.discount_value,
        due_date: time_to_str(program.due_date),
        announcement_date: time_to_str(program.announcement_date),
        start_date: time_to_str(program.start_date),
        end_date: time_to_str(program.end_date),
        faq_list: faqs.into_iter().map(to_faq_response).collect(),
        review_list: reviews,
        is_applied,
    }
}

pub fn to_admin_response(program: ProgramEntity) -> ProgramAdminResponse {
    ProgramAdminResponse {
        id: program.id,
        program_type: program.program_type,
        status: program.status,
        th: program.th,
        title: program.title,
        headcount: program.headcount,
        max_headcount: program.max_headcount,
        final_head_count: program.final_head_count,
        fee_type: program.fee_type,
        fee_charge: program.fee_charge,
        fee_refund: program.fee_refund,
        fee_due_date: program.fee_due_date.map(time_to_str),
        account_type: program.account_type,
        account_number: program.account_number,
        discount_value: program.discount_value,
        due_date: time_to_str(program.due_date),
        announcement_date: time_to_str(program.announcement_date),
        start_date: time_to_str(program.start_date),
        end_date: time_to_str(program.end_date),
        contents: program.contents,
        notice: program.notice,
        way: program.way,
        location: program.location,
        link: program.link,
        topic: program.topic,
        is_visible: program.is_visible,
        open_kakao_link: program.open_kakao_link,
        open_kakao_password: program.open_kakao_password,
        meeting: program.meeting,
        mail_status: program.mail_status,
    }
}

pub fn to_prior_notice(program: ProgramEntity, apply_motives: Vec<String>) -> LetsChatPriorNoticeResponse {
    LetsChatPriorNoticeResponse {
        title: program.title,
        start_date: time_to_str(program.start_date),
        end_date: time_to_str(program.end_date),
        way: program.way,
        location: program.location,
        join_url: program.meeting.map(|m| m.join_url),
        apply_motives,
    }
}

pub fn to_after_notice(program: &ProgramEntity) -> LetsChatAfterNoticeResponse {
    LetsChatAfterNoticeResponse { title: program.title.clone(), review_link: format!("/program/{}/review", program.id) }
}

/// Subject and body of a lifecycle mail.
pub fn email_template(program: &ProgramEntity, mail_type: MailType, service_name: &str) -> (String, String) {
    let heading = format!("[{}] {} #{}", service_name, program.title, program.th);
    match mail_type {
        MailType::Approved => {
            let mut lines = vec![
                format!("Congratulations, you have been selected for {}.", program.title),
                format!("Schedule: {} ~ {}", time_to_str(program.start_date), time_to_str(program.end_date)),
            ];
            if let Some(meeting) = &program.meeting {
                lines.push(format!("Meeting link: {} (password {})", meeting.join_url, meeting.password));
            }
            if let (Some(link), Some(password)) = (&program.open_kakao_link, &program.open_kakao_password) {
                lines.push(format!("Open chat: {} (password {})", link, password));
            }
            if let (Some(charge), Some(account)) = (program.fee_charge.or(program.fee_refund), &program.account_number) {
                lines.push(format!("Please transfer {} to account {} by {}.", charge, account, program.fee_due_date.map(time_to_str).unwrap_or_default()));
            }
            (format!("{} selection result", heading), lines.join("\n"))
        }
        MailType::Remind => {
            let mut lines = vec![format!("{} starts at {}.", program.title, time_to_str(program.start_date))];
            if let Some(meeting) = &program.meeting {
                lines.push(format!("Meeting link: {}", meeting.join_url));
            }
            if let Some(location) = &program.location {
                lines.push(format!("Location: {}", location));
            }
            (format!("{} reminder", heading), lines.join("\n"))
        }
        MailType::Review => (
            format!("{} review request", heading),
            format!("Thank you for joining {}. Leave a review at /program/{}/review", program.title, program.id),
        ),
    }
}
