//! HTTP contract tests for the user routes over the in-memory repository.
//!
//! Each test drives a fresh app through `actix_web::test`, so the routing,
//! JSON handling, domain service and repository all take part.

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use user_service::test_support::{MutableClock, configure_users, memory_http_state};

const UNKNOWN_ID: &str = "00000000-0000-4000-8000-000000000000";

#[fixture]
fn clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::default())
}

async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body_json(response).await;
    (status, body)
}

fn person(name: &str, email: &str) -> Value {
    json!({ "name": name, "email": email, "dob": "1815-12-10" })
}

macro_rules! user_app {
    ($clock:expr) => {
        test::init_service(App::new().configure(configure_users(memory_http_state($clock)))).await
    };
}

async fn add<S>(app: &S, body: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(app, test::TestRequest::post().uri("/addUser").set_json(body)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["data"].clone()
}

#[rstest]
#[actix_web::test]
async fn create_returns_the_normalised_record(clock: Arc<MutableClock>) {
    let app = user_app!(clock);

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/addUser")
            .set_json(json!({ "name": " Ada ", "email": "  Ada@Example.COM ", "dob": "1815-12-10" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"], json!(false));
    assert_eq!(body["message"], json!("User Added"));
    let data = &body["data"];
    assert!(data["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(data["name"], json!("Ada"));
    assert_eq!(data["email"], json!("ada@example.com"));
    assert_eq!(data["dob"], json!("1815-12-10"));
    assert_eq!(data["isActive"], json!(true));
    assert_eq!(data["createdAt"], data["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn duplicate_email_is_an_unexpected_failure(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    add(&app, person("Ada", "ada@example.com")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::post()
            .uri("/addUser")
            .set_json(person("Imposter", "ADA@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Internal Server Error"));
    assert_eq!(body["errorobj"]["name"], json!("DuplicateKeyError"));
}

#[rstest]
#[case::missing_email(json!({ "name": "Ada", "dob": "1815-12-10" }))]
#[case::bad_dob(json!({ "name": "Ada", "email": "ada@example.com", "dob": "yesterday" }))]
#[actix_web::test]
async fn invalid_create_reports_a_validation_error(
    clock: Arc<MutableClock>,
    #[case] payload: Value,
) {
    let app = user_app!(clock);

    let (status, body) =
        send(&app, test::TestRequest::post().uri("/addUser").set_json(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorobj"]["name"], json!("ValidationError"));
}

#[rstest]
#[actix_web::test]
async fn empty_collection_rejects_the_first_page(clock: Arc<MutableClock>) {
    let app = user_app!(clock);

    let (status, body) = send(&app, test::TestRequest::get().uri("/getUser/1")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({
            "error": true,
            "message": "Invalid page number",
            "paginationInfo": { "currentPage": 1, "totalPages": 0 },
        })
    );
}

#[rstest]
#[case::last_page("/getUser/3/5", StatusCode::OK)]
#[case::past_the_end("/getUser/4/5", StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn pages_are_bounded_by_the_total(
    clock: Arc<MutableClock>,
    #[case] uri: &str,
    #[case] expected: StatusCode,
) {
    let app = user_app!(clock);
    for n in 0..12 {
        add(&app, person(&format!("User {n}"), &format!("user{n}@example.com"))).await;
    }

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, expected);
    assert_eq!(body["paginationInfo"]["totalPages"], json!(3));
    if expected == StatusCode::OK {
        let names: Vec<&str> = body["users"]
            .as_array()
            .expect("users array")
            .iter()
            .filter_map(|user| user["name"].as_str())
            .collect();
        assert_eq!(names, ["User 10", "User 11"]);
    }
}

#[rstest]
#[actix_web::test]
async fn oversized_page_numbers_lie_past_the_end(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    add(&app, person("Ada", "ada@example.com")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri("/getUser/99999999999999999999999"),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("Invalid page number"));
    assert_eq!(
        body["paginationInfo"],
        json!({ "currentPage": u64::MAX, "totalPages": 1 })
    );
}

#[rstest]
#[case::zero_page("/getUser/0")]
#[case::negative_page("/getUser/-1")]
#[case::zero_limit("/getUser/1/0")]
#[case::negative_limit("/getUser/1/-3")]
#[actix_web::test]
async fn non_positive_segments_are_unexpected_failures(
    clock: Arc<MutableClock>,
    #[case] uri: &str,
) {
    let app = user_app!(clock);
    add(&app, person("Ada", "ada@example.com")).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!(true));
    assert_eq!(body["message"], json!("Internal Server Error"));
    assert_eq!(body["errorobj"]["name"], json!("PageRequestError"));
    assert!(body.get("users").is_none());
}

#[rstest]
#[actix_web::test]
async fn list_defaults_apply_without_segments(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    for n in 0..7 {
        add(&app, person(&format!("User {n}"), &format!("user{n}@example.com"))).await;
    }

    let (status, body) = send(&app, test::TestRequest::get().uri("/getUser")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        body["paginationInfo"],
        json!({ "currentPage": 1, "totalPages": 2 })
    );
}

#[rstest]
#[actix_web::test]
async fn unknown_id_is_rejected_with_the_id_in_the_message(clock: Arc<MutableClock>) {
    let app = user_app!(clock);

    let (status, body) = send(
        &app,
        test::TestRequest::get().uri(&format!("/getUserById/{UNKNOWN_ID}")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!(format!("No user found with the given ID: {UNKNOWN_ID}"))
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_id_is_an_unexpected_failure(clock: Arc<MutableClock>) {
    let app = user_app!(clock);

    let (status, body) = send(&app, test::TestRequest::get().uri("/getUserById/not-an-id")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorobj"]["name"], json!("CastError"));
    assert_eq!(body["errorobj"]["value"], json!("not-an-id"));
}

#[rstest]
#[actix_web::test]
async fn created_user_can_be_fetched(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let id = created["id"].as_str().expect("id");

    let (status, body) =
        send(&app, test::TestRequest::get().uri(&format!("/getUserById/{id}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("user is fetched successfully"));
    assert_eq!(body["user"], created);
}

#[rstest]
#[case::uppercase(str::to_uppercase)]
#[case::simple(|id: &str| id.replace('-', ""))]
#[actix_web::test]
async fn any_spelling_of_an_id_fetches_the_record(
    clock: Arc<MutableClock>,
    #[case] respell: fn(&str) -> String,
) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let alias = respell(created["id"].as_str().expect("id"));

    let (status, body) =
        send(&app, test::TestRequest::get().uri(&format!("/getUserById/{alias}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], created["id"]);
    assert_eq!(body["user"], created);
}

#[rstest]
#[actix_web::test]
async fn patch_accepts_an_uppercase_id(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let alias = created["id"].as_str().expect("id").to_uppercase();

    let (status, body) = send(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/updateWithPatchById/{alias}"))
            .set_json(json!({ "name": "Countess" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedUser"]["id"], created["id"]);
    assert_eq!(body["updatedUser"]["name"], json!("Countess"));
}

#[rstest]
#[actix_web::test]
async fn replace_requires_is_active_to_be_present(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let id = created["id"].as_str().expect("id");

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/updateWithPutById/{id}"))
            .set_json(person("Grace", "grace@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({
            "error": true,
            "message": "All fields (name, email, dob, isActive) are required.",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn replace_returns_before_and_after_snapshots(clock: Arc<MutableClock>) {
    let app = user_app!(clock.clone());
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let id = created["id"].as_str().expect("id");
    clock.advance_seconds(60);

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/updateWithPutById/{id}"))
            .set_json(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "dob": "1906-12-09",
                "isActive": false,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("user updated"));
    assert_eq!(body["userToUpdate"], created);
    let after = &body["userAfterUpdate"];
    assert_eq!(after["id"], created["id"]);
    assert_eq!(after["name"], json!("Grace"));
    assert_eq!(after["isActive"], json!(false));
    assert_eq!(after["createdAt"], created["createdAt"]);
    assert_ne!(after["updatedAt"], created["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn replace_accepts_textual_flags_and_epoch_dates(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let id = created["id"].as_str().expect("id");

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/updateWithPutById/{id}"))
            .set_json(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "dob": -1_990_137_600_000_i64,
                "isActive": "false",
            })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "replace failed: {body}");
    let after = &body["userAfterUpdate"];
    assert_eq!(after["isActive"], json!(false));
    assert_eq!(after["dob"], json!("1906-12-09"));
}

#[rstest]
#[actix_web::test]
async fn replace_of_unknown_id_is_rejected(clock: Arc<MutableClock>) {
    let app = user_app!(clock);

    let (status, body) = send(
        &app,
        test::TestRequest::put()
            .uri(&format!("/updateWithPutById/{UNKNOWN_ID}"))
            .set_json(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "dob": "1906-12-09",
                "isActive": true,
            })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!(format!("no user found with given id {UNKNOWN_ID}"))
    );
}

#[rstest]
#[actix_web::test]
async fn patch_changes_only_the_given_fields(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    let created = add(&app, person("Ada", "ada@example.com")).await;
    let id = created["id"].as_str().expect("id");

    let (status, body) = send(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/updateWithPatchById/{id}"))
            .set_json(json!({ "name": "Countess" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User partially updated"));
    assert!(body.get("userToUpdate").is_none());
    let updated = &body["updatedUser"];
    assert_eq!(updated["name"], json!("Countess"));
    for field in ["id", "email", "dob", "isActive", "createdAt"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
}

#[rstest]
#[actix_web::test]
async fn patch_of_unknown_id_leaves_the_store_untouched(clock: Arc<MutableClock>) {
    let app = user_app!(clock);
    add(&app, person("Ada", "ada@example.com")).await;
    let (_, before) = send(&app, test::TestRequest::get().uri("/getUser")).await;

    let (status, body) = send(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/updateWithPatchById/{UNKNOWN_ID}"))
            .set_json(json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["message"],
        json!(format!("No user found with the given ID: {UNKNOWN_ID}"))
    );
    let (_, after) = send(&app, test::TestRequest::get().uri("/getUser")).await;
    assert_eq!(after, before);
}
