use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use app_api::configure;
use biz_service::client::meeting_client::DisabledMeetingClient;
use biz_service::client::object_storage::LocalObjectStorage;
use biz_service::init_service;
use biz_service::repos::Repos;
use common::config::{AppConfig, AuthConfig, DatabaseBackend, DatabaseConfig};
use common::util::date_util::{now, time_to_str};
use serde_json::{json, Value};
use std::sync::Arc;

const ADMIN_EMAIL: &str = "admin@intern-hub.test";
const ADMIN_PASSWORD: &str = "admin1234";

fn test_config() -> AppConfig {
    AppConfig {
        database: Some(DatabaseConfig { backend: DatabaseBackend::Memory, ..Default::default() }),
        auth: Some(AuthConfig {
            admin_email: Some(ADMIN_EMAIL.to_string()),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn date_in_days(days: i64) -> String {
    time_to_str(now() + days * 86_400)
}

fn program_body(max_headcount: i32) -> Value {
    json!({
        "type": "BOOTCAMP",
        "th": 3,
        "title": "Backend Bootcamp",
        "maxHeadcount": max_headcount,
        "dueDate": date_in_days(7),
        "announcementDate": date_in_days(8),
        "startDate": date_in_days(10),
        "endDate": date_in_days(30),
        "contents": "eight weeks of backend",
        "isVisible": true,
        "faqList": [{"question": "Online?", "answer": "Yes."}]
    })
}

macro_rules! app {
    () => {{
        let config = test_config();
        let upload_dir = std::env::temp_dir().join(format!("intern-hub-api-{}-{}", std::process::id(), line!()));
        let services = init_service(
            Repos::memory(),
            &config,
            Arc::new(DisabledMeetingClient),
            Arc::new(LocalObjectStorage::new(upload_dir, "/files")),
        );
        services.user.bootstrap_admin(&config.get_auth()).await.unwrap();
        test::init_service(App::new().app_data(web::Data::new(services)).configure(configure)).await
    }};
}

macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

macro_rules! sign_in {
    ($app:expr, $email:expr, $password:expr) => {{
        let req = test::TestRequest::post().uri("/user/signin").set_json(json!({"email": $email, "password": $password}));
        let (status, body) = call_json!($app, req);
        assert_eq!(status, StatusCode::OK, "{}", body);
        format!("Bearer {}", body["data"]["accessToken"].as_str().unwrap())
    }};
}

#[actix_web::test]
async fn health_and_openapi_are_public() {
    let app = app!();
    let resp = test::call_service(&app, test::TestRequest::get().uri("/program/tg").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(test::read_body(resp).await, "success");

    let (status, doc) = call_json!(app, test::TestRequest::get().uri("/api-doc/openapi.json"));
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/application/{program_id}"].is_object());
}

#[actix_web::test]
async fn admin_routes_check_the_session() {
    let app = app!();
    let (status, body) = call_json!(app, test::TestRequest::get().uri("/program/admin"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "COMMON_401_1");

    let signup = json!({"name": "Lee", "email": "lee@x.io", "phoneNum": "010-1234-5678", "password": "abcd1234"});
    let (status, _) = call_json!(app, test::TestRequest::post().uri("/user/signup").set_json(signup));
    assert_eq!(status, StatusCode::CREATED);
    let member = sign_in!(app, "lee@x.io", "abcd1234");

    let req = test::TestRequest::get().uri("/program/admin").insert_header(("Authorization", member.clone()));
    let (status, body) = call_json!(app, req);
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "USER_403_1");

    let admin = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);
    let req = test::TestRequest::get().uri("/program/admin?page=1&size=5").insert_header(("Authorization", admin));
    let (status, body) = call_json!(app, req);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pageInfo"]["pageNum"], 1);

    let req = test::TestRequest::get().uri("/user/signout").insert_header(("Authorization", member.clone()));
    assert_eq!(test::call_service(&app, req.to_request()).await.status(), StatusCode::OK);
    let req = test::TestRequest::get().uri("/user").insert_header(("Authorization", member));
    assert_eq!(test::call_service(&app, req.to_request()).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn stale_token_is_not_treated_as_guest() {
    let app = app!();
    let admin = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);
    let req = test::TestRequest::post().uri("/program").insert_header(("Authorization", admin.clone())).set_json(program_body(10));
    let program_id = call_json!(app, req).1["data"]["id"].as_i64().unwrap();

    let guest = json!({"guestName": "Han", "guestPhoneNum": "010-7777-8888", "guestEmail": "han@x.io", "applyMotive": "frontend"});
    let uri = format!("/application/{}", program_id);
    let req = test::TestRequest::post().uri(&uri).insert_header(("Authorization", "Bearer not-a-session")).set_json(guest.clone());
    let (status, body) = call_json!(app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "COMMON_401_1");

    let req = test::TestRequest::get().uri(&format!("/program/admin/{}", program_id)).insert_header(("Authorization", admin));
    assert_eq!(call_json!(app, req).1["data"]["headcount"], 0);

    let (status, _) = call_json!(app, test::TestRequest::post().uri(&uri).set_json(guest));
    assert_eq!(status, StatusCode::CREATED);
}

#[actix_web::test]
async fn guest_and_member_apply_then_get_reminded() {
    let app = app!();
    let admin = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);

    let req = test::TestRequest::post().uri("/program").insert_header(("Authorization", admin.clone())).set_json(program_body(10));
    let (status, body) = call_json!(app, req);
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let program_id = body["data"]["id"].as_i64().unwrap();

    let guest = json!({"guestName": "Park", "guestPhoneNum": "010-2222-3333", "guestEmail": "park@x.io", "applyMotive": "backend"});
    let uri = format!("/application/{}", program_id);
    let (status, body) = call_json!(app, test::TestRequest::post().uri(&uri).set_json(guest.clone()));
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let guest_application = body["data"]["id"].as_i64().unwrap();

    let (status, body) = call_json!(app, test::TestRequest::post().uri(&uri).set_json(guest));
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "APPLICATION_409_1");

    let (status, body) = call_json!(app, test::TestRequest::post().uri(&uri).set_json(json!({"guestName": "NoMail"})));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "APPLICATION_400_1");

    let signup = json!({"name": "Choi", "email": "choi@x.io", "phoneNum": "010-5555-6666", "password": "abcd1234"});
    call_json!(app, test::TestRequest::post().uri("/user/signup").set_json(signup));
    let member = sign_in!(app, "choi@x.io", "abcd1234");
    let profile = json!({"university": "SNU", "major": "CS", "accountType": "TOSS", "accountNumber": "1000-22"});
    let req = test::TestRequest::post().uri(&uri).insert_header(("Authorization", member.clone())).set_json(profile);
    assert_eq!(call_json!(app, req).0, StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&format!("/program/{}", program_id)).insert_header(("Authorization", member.clone()));
    let (_, detail) = call_json!(app, req);
    assert_eq!(detail["data"]["isApplied"], true);
    assert_eq!(detail["data"]["faqList"].as_array().map(|f| f.len()), Some(1));

    let req = test::TestRequest::get().uri(&format!("/program/admin/{}", program_id)).insert_header(("Authorization", admin.clone()));
    assert_eq!(call_json!(app, req).1["data"]["headcount"], 2);

    let req = test::TestRequest::patch()
        .uri(&format!("/application/{}", guest_application))
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"isApproved": true}));
    assert_eq!(call_json!(app, req).0, StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/application/admin/{}?approval=APPROVED", program_id))
        .insert_header(("Authorization", admin.clone()));
    let (_, approved) = call_json!(app, req);
    assert_eq!(approved["data"]["items"][0]["status"], "IN_PROGRESS");

    let req = test::TestRequest::post().uri(&format!("/program/{}/remind-mail", program_id)).insert_header(("Authorization", admin.clone()));
    let (status, report) = call_json!(app, req);
    assert_eq!(status, StatusCode::OK, "{}", report);
    assert_eq!(report["data"]["recipients"], 1);

    let req = test::TestRequest::patch()
        .uri(&format!("/application/admin/{}/reject-remaining", program_id))
        .insert_header(("Authorization", admin));
    assert_eq!(call_json!(app, req).1["data"], 1);
}

#[actix_web::test]
async fn admin_follows_applicants_across_programs() {
    let app = app!();
    let admin = sign_in!(app, ADMIN_EMAIL, ADMIN_PASSWORD);
    let req = test::TestRequest::post().uri("/program").insert_header(("Authorization", admin.clone())).set_json(program_body(10));
    let program_id = call_json!(app, req).1["data"]["id"].as_i64().unwrap();

    let mission = json!({"th": 1, "title": "day 1", "contents": "write", "startDate": date_in_days(0), "endDate": date_in_days(2), "isVisible": true});
    let req = test::TestRequest::post().uri(&format!("/mission/{}", program_id)).insert_header(("Authorization", admin.clone())).set_json(mission);
    let (status, body) = call_json!(app, req);
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let mission_id = body["data"]["id"].as_i64().unwrap();

    let signup = json!({"name": "Jung", "email": "jung@x.io", "phoneNum": "010-4444-5555", "password": "abcd1234"});
    call_json!(app, test::TestRequest::post().uri("/user/signup").set_json(signup));
    let member = sign_in!(app, "jung@x.io", "abcd1234");
    let req = test::TestRequest::get().uri("/user").insert_header(("Authorization", member.clone()));
    let user_id = call_json!(app, req).1["data"]["id"].as_i64().unwrap();

    let profile = json!({"university": "SNU", "major": "CS", "accountType": "TOSS", "accountNumber": "1000-33", "applyMotive": "ship things"});
    let req = test::TestRequest::post().uri(&format!("/application/{}", program_id)).insert_header(("Authorization", member.clone())).set_json(profile);
    let application_id = call_json!(app, req).1["data"]["id"].as_i64().unwrap();
    let guest = json!({"guestName": "Oh", "guestPhoneNum": "010-6666-7777", "guestEmail": "oh@x.io"});
    call_json!(app, test::TestRequest::post().uri(&format!("/application/{}", program_id)).set_json(guest));

    let req = test::TestRequest::patch()
        .uri(&format!("/application/{}", application_id))
        .insert_header(("Authorization", admin.clone()))
        .set_json(json!({"isApproved": true}));
    assert_eq!(call_json!(app, req).0, StatusCode::OK);
    let req = test::TestRequest::post()
        .uri(&format!("/attendance/{}", mission_id))
        .insert_header(("Authorization", member))
        .set_json(json!({"link": "https://blog.test/day1"}));
    assert_eq!(call_json!(app, req).0, StatusCode::CREATED);

    let req = test::TestRequest::get().uri(&format!("/application/admin/{}/email", program_id)).insert_header(("Authorization", admin.clone()));
    let (status, emails) = call_json!(app, req);
    assert_eq!(status, StatusCode::OK, "{}", emails);
    assert_eq!(emails["data"], json!({"approved": ["jung@x.io"], "notApproved": ["oh@x.io"]}));

    let req = test::TestRequest::get().uri(&format!("/application/admin/challenge/{}", program_id)).insert_header(("Authorization", admin.clone()));
    let (_, rows) = call_json!(app, req);
    assert_eq!(rows["data"]["pageInfo"]["totalElements"], 1);
    assert_eq!(rows["data"]["items"][0]["id"], application_id);
    assert_eq!(rows["data"]["items"][0]["missionCount"], 1);
    assert_eq!(rows["data"]["items"][0]["attendanceCount"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/application/admin/challenge/{}/{}", program_id, application_id))
        .insert_header(("Authorization", admin.clone()));
    let (_, detail) = call_json!(app, req);
    assert_eq!(detail["data"]["applyMotive"], "ship things");
    assert_eq!(detail["data"]["missions"][0]["link"], "https://blog.test/day1");

    let req = test::TestRequest::get().uri(&format!("/program/admin/user/{}", user_id)).insert_header(("Authorization", admin));
    let (status, programs) = call_json!(app, req);
    assert_eq!(status, StatusCode::OK, "{}", programs);
    assert_eq!(programs["data"]["items"][0]["programId"], program_id);
    assert_eq!(programs["data"]["items"][0]["programTitle"], "Backend Bootcamp");
    assert_eq!(programs["data"]["items"][0]["status"], "IN_PROGRESS");
}
