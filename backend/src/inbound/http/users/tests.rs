//! Tests for users API handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::test_support::{room_id, user_id};
use crate::domain::{Error, RoomBooking};
use crate::inbound::http::identity::AUTHENTICATED_USER_HEADER;
use crate::inbound::http::test_utils::{StateBuilder, hotel, room, test_app, user};

async fn get(builder: StateBuilder, uri: &str, actor: i64) -> (StatusCode, Value) {
    send(builder, actix_test::TestRequest::get().uri(uri), actor).await
}

async fn send(
    builder: StateBuilder,
    request: actix_test::TestRequest,
    actor: i64,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(builder)).await;
    let request = request
        .insert_header((AUTHENTICATED_USER_HEADER, actor.to_string()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

#[rstest]
#[actix_web::test]
async fn me_returns_profile_with_derived_lists() {
    let mut builder = StateBuilder::default().acting_as(2, Role::Landlord);
    builder
        .users
        .expect_profile()
        .with(eq(user_id(2)))
        .return_once(|id| {
            Ok(UserProfile {
                user: user(id.get(), Role::Landlord),
                owned_hotels: vec![hotel(3, 2)],
                booked_rooms: vec![room(10, 4, RoomBooking::Booked { by: id })],
            })
        });

    let (status, body) = get(builder, "/api/v1/users/me", 2).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);
    assert_eq!(body["role"], "LANDLORD");
    assert_eq!(body["language"], "RU");
    assert_eq!(body["hotels"][0]["id"], 3);
    assert_eq!(body["bookedRooms"][0]["id"], 10);
}

#[rstest]
#[actix_web::test]
async fn get_user_looks_up_the_path_id() {
    let mut builder = StateBuilder::default();
    builder
        .users
        .expect_find_user()
        .returning(|id| match id.get() {
            7 => Ok(user(7, Role::Client)),
            9 => Ok(user(9, Role::Landlord)),
            _ => Err(Error::not_found("user not found")),
        });

    let (status, body) = get(builder, "/api/v1/users/9", 7).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "user9@example.com");
    assert_eq!(body["role"], "LANDLORD");
}

#[rstest]
#[actix_web::test]
async fn admin_lists_users() {
    let mut builder = StateBuilder::default().acting_as(1, Role::Admin);
    builder
        .users
        .expect_list_users()
        .return_once(|| Ok(vec![user(1, Role::Admin), user(7, Role::Client)]));

    let (status, body) = get(builder, "/api/v1/users", 1).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1]["role"], "CLIENT");
}

#[rstest]
#[case(Role::Client)]
#[case(Role::Landlord)]
#[actix_web::test]
async fn non_admins_cannot_list_users(#[case] role: Role) {
    let mut builder = StateBuilder::default().acting_as(7, role);
    builder.users.expect_list_users().never();

    let (status, body) = get(builder, "/api/v1/users", 7).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["details"]["required"], "ADMIN");
}

#[rstest]
#[actix_web::test]
async fn caller_changes_their_language() {
    let mut builder = StateBuilder::default().acting_as(7, Role::Client);
    builder
        .users_command
        .expect_change_language()
        .with(eq(user_id(7)), eq(Language::Kz))
        .return_once(|id, language| Ok(user(id.get(), Role::Client).with_language(language)));

    let (status, body) = send(
        builder,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me/language")
            .set_json(json!({"language": "kz"})),
        7,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 7);
    assert_eq!(body["language"], "KZ");
}

#[rstest]
#[actix_web::test]
async fn unknown_language_is_rejected_before_the_store() {
    let mut builder = StateBuilder::default().acting_as(7, Role::Client);
    builder.users_command.expect_change_language().never();

    let (status, body) = send(
        builder,
        actix_test::TestRequest::put()
            .uri("/api/v1/users/me/language")
            .set_json(json!({"language": "DE"})),
        7,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "language");
}

#[rstest]
#[actix_web::test]
async fn admin_deletes_a_user_and_sees_released_rooms() {
    let mut builder = StateBuilder::default().acting_as(1, Role::Admin);
    builder
        .users_command
        .expect_delete_user()
        .with(eq(user_id(7)))
        .return_once(|id| {
            Ok(UserRemoval {
                user_id: id,
                released_rooms: vec![room_id(12), room_id(14)],
            })
        });

    let (status, body) = send(
        builder,
        actix_test::TestRequest::delete().uri("/api/v1/users/7"),
        1,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], UserRemoval::MESSAGE);
    assert_eq!(body["userId"], 7);
    assert_eq!(body["releasedRooms"], json!([12, 14]));
}

#[rstest]
#[case(Role::Client)]
#[case(Role::Landlord)]
#[actix_web::test]
async fn only_admins_delete_users(#[case] role: Role) {
    let mut builder = StateBuilder::default().acting_as(7, role);
    builder.users_command.expect_delete_user().never();

    let (status, _) = send(
        builder,
        actix_test::TestRequest::delete().uri("/api/v1/users/9"),
        7,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[actix_web::test]
async fn deleting_a_landlord_with_hotels_is_a_conflict() {
    let mut builder = StateBuilder::default().acting_as(1, Role::Admin);
    builder
        .users_command
        .expect_delete_user()
        .return_once(|_| Err(Error::conflict("user still owns hotels")));

    let (status, body) = send(
        builder,
        actix_test::TestRequest::delete().uri("/api/v1/users/2"),
        1,
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
}
