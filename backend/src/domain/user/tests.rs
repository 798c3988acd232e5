//! Tests for user record construction, changes, and replacement checks.

use super::*;
use chrono::TimeZone;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn base_draft() -> UserDraft {
    UserDraft {
        name: Some("  Nusarat ".into()),
        email: Some("  Nusarat@Example.COM ".into()),
        dob: Some("1990-01-01".into()),
        is_active: None,
    }
}

#[fixture]
fn draft() -> UserDraft {
    base_draft()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[rstest]
fn from_draft_normalises_and_defaults(draft: UserDraft, now: DateTime<Utc>) {
    let user = User::from_draft(draft, UserId::new("u-1"), now).expect("valid draft");

    assert_eq!(user.id().as_str(), "u-1");
    assert_eq!(user.profile().name, "Nusarat");
    assert_eq!(user.profile().email, "nusarat@example.com");
    assert_eq!(user.profile().dob, date(1990, 1, 1));
    assert!(user.profile().is_active);
    assert_eq!(user.created_at(), now);
    assert_eq!(user.updated_at(), now);
}

#[rstest]
fn from_draft_keeps_explicit_inactive_flag(mut draft: UserDraft, now: DateTime<Utc>) {
    draft.is_active = Some(false);
    let user = User::from_draft(draft, UserId::random(), now).expect("valid draft");
    assert!(!user.profile().is_active);
}

#[rstest]
#[case::missing_name(UserDraft { name: None, ..base_draft() }, UserValidationError::MissingName)]
#[case::blank_name(UserDraft { name: Some("   ".into()), ..base_draft() }, UserValidationError::MissingName)]
#[case::missing_email(UserDraft { email: None, ..base_draft() }, UserValidationError::MissingEmail)]
#[case::empty_email(UserDraft { email: Some(String::new()), ..base_draft() }, UserValidationError::MissingEmail)]
#[case::missing_dob(UserDraft { dob: None, ..base_draft() }, UserValidationError::MissingDob)]
#[case::bad_dob(
    UserDraft { dob: Some("yesterday".into()), ..base_draft() },
    UserValidationError::InvalidDob { value: "yesterday".into() }
)]
fn from_draft_rejects_invalid_input(
    #[case] input: UserDraft,
    #[case] expected: UserValidationError,
    now: DateTime<Utc>,
) {
    let err = User::from_draft(input, UserId::random(), now).expect_err("invalid draft");
    assert_eq!(err, expected);
}

#[rstest]
#[case("2002-10-02", date(2002, 10, 2))]
#[case(" 2002-10-02 ", date(2002, 10, 2))]
#[case("2002-10-02T23:30:00Z", date(2002, 10, 2))]
#[case("2002-10-02T23:30:00-02:00", date(2002, 10, 3))]
fn parse_dob_accepts_dates_and_timestamps(#[case] raw: &str, #[case] expected: NaiveDate) {
    assert_eq!(parse_dob(raw), Ok(expected));
}

#[rstest]
fn validation_errors_name_their_field() {
    assert_eq!(UserValidationError::MissingName.field(), "name");
    assert_eq!(UserValidationError::MissingEmail.field(), "email");
    assert_eq!(
        UserValidationError::InvalidDob { value: "x".into() }.field(),
        "dob"
    );
}

#[rstest]
fn user_serialises_flat_camel_case(draft: UserDraft, now: DateTime<Utc>) {
    let user = User::from_draft(draft, UserId::new("u-1"), now).expect("valid draft");
    let value = serde_json::to_value(&user).expect("serialise user");

    assert_eq!(
        value,
        json!({
            "id": "u-1",
            "name": "Nusarat",
            "email": "nusarat@example.com",
            "dob": "1990-01-01",
            "isActive": true,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z",
        })
    );
    assert!(value.get("is_active").is_none());
    assert!(value.get("profile").is_none());
}

#[rstest]
fn partial_changes_only_touch_provided_fields(draft: UserDraft, now: DateTime<Utc>) {
    let user = User::from_draft(draft, UserId::new("u-1"), now).expect("valid draft");
    let later = now + chrono::TimeDelta::minutes(5);
    let changes = UserChanges::from_partial_draft(
        UserDraft {
            name: Some(" Renamed ".into()),
            ..UserDraft::default()
        },
        later,
    )
    .expect("valid changes");

    let updated = user.with_changes(&changes);

    assert_eq!(updated.profile().name, "Renamed");
    assert_eq!(updated.profile().email, user.profile().email);
    assert_eq!(updated.profile().dob, user.profile().dob);
    assert_eq!(updated.profile().is_active, user.profile().is_active);
    assert_eq!(updated.created_at(), now);
    assert_eq!(updated.updated_at(), later);
    assert_eq!(updated.id(), user.id());
}

#[rstest]
fn partial_changes_validate_provided_fields(now: DateTime<Utc>) {
    let err = UserChanges::from_partial_draft(
        UserDraft {
            email: Some("  ".into()),
            ..UserDraft::default()
        },
        now,
    )
    .expect_err("blank email rejected");
    assert_eq!(err, UserValidationError::MissingEmail);
}

#[rstest]
fn replacement_accepts_false_but_not_absent_flag(mut draft: UserDraft) {
    draft.is_active = Some(false);
    assert!(UserReplacement::try_from_draft(draft.clone()).is_ok());

    draft.is_active = None;
    assert_eq!(
        UserReplacement::try_from_draft(draft),
        Err(IncompleteReplacement)
    );
}

#[rstest]
#[case::no_name(UserDraft { name: None, is_active: Some(true), ..base_draft() })]
#[case::empty_name(UserDraft { name: Some(String::new()), is_active: Some(true), ..base_draft() })]
#[case::no_email(UserDraft { email: None, is_active: Some(true), ..base_draft() })]
#[case::empty_dob(UserDraft { dob: Some(String::new()), is_active: Some(true), ..base_draft() })]
fn replacement_requires_text_fields(#[case] input: UserDraft) {
    assert_eq!(
        UserReplacement::try_from_draft(input),
        Err(IncompleteReplacement)
    );
}

#[rstest]
fn replacement_changes_cover_every_field(mut draft: UserDraft, now: DateTime<Utc>) {
    draft.is_active = Some(false);
    let changes = UserReplacement::try_from_draft(draft)
        .expect("complete replacement")
        .into_changes(now)
        .expect("valid replacement");

    assert_eq!(changes.name.as_deref(), Some("Nusarat"));
    assert_eq!(changes.email.as_deref(), Some("nusarat@example.com"));
    assert_eq!(changes.dob, Some(date(1990, 1, 1)));
    assert_eq!(changes.is_active, Some(false));
    assert_eq!(changes.updated_at, now);
}

#[rstest]
fn user_id_exposes_uuid_only_when_well_formed() {
    let generated = UserId::random();
    assert!(generated.to_uuid().is_some());
    assert!(UserId::new("not-a-uuid").to_uuid().is_none());
}
