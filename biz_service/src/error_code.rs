use common::errors::AppError;

/// Business failures with stable wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UserNotFound,
    DuplicateUser,
    MismatchPassword,
    AdminRequired,

    ProgramNotFound,
    ProgramChargeInputRequired,
    ProgramRefundInputRequired,
    ProgramChallengeInputRequired,
    ProgramMentorPasswordMismatch,
    ProgramFull,

    ApplicationNotFound,
    DuplicateApplication,
    ApplicationGuestBadRequest,
    ApplicationCannotBeDeleted,
    ApplicationUserBadRequest,
    ApplicationUserBadRequestAccount,
    ApplicationNotOwned,
    ApplicationProgramClosed,

    MissionNotFound,
    AttendanceNotFound,
    DuplicateAttendance,
    CouponNotFound,
    CouponExpired,
    DuplicateCoupon,
    BannerNotFound,
    MemoNotFound,
    ReviewNotFound,
}

enum Kind {
    NotFound,
    BadRequest,
    Conflict,
    Forbidden,
}

impl ErrorCode {
    fn describe(self) -> (Kind, &'static str, &'static str) {
        use ErrorCode::*;
        match self {
            UserNotFound => (Kind::NotFound, "USER_404_1", "User does not exist."),
            DuplicateUser => (Kind::Conflict, "USER_409_1", "A user with this email or phone number already exists."),
            MismatchPassword => (Kind::BadRequest, "USER_400_1", "Password does not match."),
            AdminRequired => (Kind::Forbidden, "USER_403_1", "Administrator role required."),

            ProgramNotFound => (Kind::NotFound, "PROGRAM_404_1", "Program does not exist."),
            ProgramChargeInputRequired => (Kind::BadRequest, "PROGRAM_400_1", "Charge programs need fee, fee due date and account information."),
            ProgramRefundInputRequired => (Kind::BadRequest, "PROGRAM_400_2", "Refund programs need deposit, fee due date and account information."),
            ProgramChallengeInputRequired => (Kind::BadRequest, "PROGRAM_400_3", "Challenge programs need the open chat link and password."),
            ProgramMentorPasswordMismatch => (Kind::Forbidden, "PROGRAM_403_1", "Mentor password does not match."),
            ProgramFull => (Kind::Conflict, "PROGRAM_409_1", "Program has reached its maximum headcount."),

            ApplicationNotFound => (Kind::NotFound, "APPLICATION_404_1", "Application does not exist."),
            DuplicateApplication => (Kind::Conflict, "APPLICATION_409_1", "Already applied to this program."),
            ApplicationGuestBadRequest => (Kind::BadRequest, "APPLICATION_400_1", "Guests must provide name, phone number and email."),
            ApplicationCannotBeDeleted => (Kind::BadRequest, "APPLICATION_400_2", "Applications can only be deleted while the program is open."),
            ApplicationUserBadRequest => (Kind::BadRequest, "APPLICATION_400_3", "University and major are required."),
            ApplicationUserBadRequestAccount => (Kind::BadRequest, "APPLICATION_400_4", "Account type and number are required."),
            ApplicationNotOwned => (Kind::Forbidden, "APPLICATION_403_1", "Application belongs to another user."),
            ApplicationProgramClosed => (Kind::BadRequest, "APPLICATION_400_5", "Program is not accepting applications."),

            MissionNotFound => (Kind::NotFound, "MISSION_404_1", "Mission does not exist."),
            AttendanceNotFound => (Kind::NotFound, "ATTENDANCE_404_1", "Attendance does not exist."),
            DuplicateAttendance => (Kind::Conflict, "ATTENDANCE_409_1", "Attendance already submitted for this mission."),
            CouponNotFound => (Kind::NotFound, "COUPON_404_1", "Coupon does not exist."),
            CouponExpired => (Kind::BadRequest, "COUPON_400_1", "Coupon is not valid at this time."),
            DuplicateCoupon => (Kind::Conflict, "COUPON_409_1", "Coupon code already exists."),
            BannerNotFound => (Kind::NotFound, "BANNER_404_1", "Banner or popup does not exist."),
            MemoNotFound => (Kind::NotFound, "MEMO_404_1", "Memo does not exist."),
            ReviewNotFound => (Kind::NotFound, "REVIEW_404_1", "Review does not exist."),
        }
    }

    pub fn code(self) -> &'static str {
        self.describe().1
    }
}

impl From<ErrorCode> for AppError {
    fn from(value: ErrorCode) -> Self {
        let (kind, code, reason) = value.describe();
        let reason = reason.to_string();
        match kind {
            Kind::NotFound => AppError::NotFound { code, reason },
            Kind::BadRequest => AppError::BadRequest { code, reason },
            Kind::Conflict => AppError::Conflict { code, reason },
            Kind::Forbidden => AppError::Forbidden { code, reason },
        }
    }
}

/// Maps a unique index violation to `code`, leaving other errors untouched.
pub fn on_duplicate(code: ErrorCode) -> impl Fn(AppError) -> AppError {
    move |err| match err {
        AppError::DuplicateKey(_) => code.into(),
        other => other,
    }
}

/// True when `err` was produced from `code`.
pub fn is_code(err: &AppError, code: ErrorCode) -> bool {
    err.code() == code.code()
}
