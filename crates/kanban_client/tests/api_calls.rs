//! Domain calls through the facade against a scripted server.

use kanban_client::{
    BoardUpdate, Card, Category, ClientError, FailureKind, FileUpload, HttpMethod, HttpResponse,
    OperationStatus, RequestBody, StatusPhase, User, UserUpdate,
};
use kanban_testkit::prelude::*;
use serde_json::json;

fn user(name: &str) -> User {
    User {
        username: name.into(),
        displayname: name.into(),
        email: format!("{name}@example.com"),
    }
}

#[tokio::test]
async fn user_scoped_calls_need_a_session() {
    let (session, server) = test_session();

    assert!(matches!(session.get_boards().await, Err(ClientError::NotAuthenticated)));
    assert!(matches!(
        session.get_users_cards(0, "").await,
        Err(ClientError::NotAuthenticated)
    ));
    assert!(matches!(session.delete_user().await, Err(ClientError::NotAuthenticated)));

    assert_eq!(server.request_count(), 0);
    assert_eq!(session.status(), OperationStatus::default());
}

#[tokio::test]
async fn boards_of_signed_in_user() {
    let (session, server) = signed_in_session("user");
    server.on_json(
        HttpMethod::Get,
        "/wodss3/api/users/user/boards",
        200,
        json!([{
            "name": "testboard 01",
            "id": "5741e1625aaaa44224c47208",
            "owner": {"username": "admin", "displayname": "admin", "email": "admin@example.com"},
            "tasks": [1, 1, 0],
            "users": []
        }]),
    );

    let boards = session.get_boards().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].id, "5741e1625aaaa44224c47208");
    assert_eq!(boards[0].tasks, [1, 1, 0]);

    let expected = format!("token={}", session.get_token().unwrap());
    let request = server.last_request().unwrap();
    assert_eq!(request.header_value("Cookie"), Some(expected.as_str()));
    assert!(session.status().is_idle());
}

#[tokio::test]
async fn default_card_filters_are_omitted() {
    let (session, server) = signed_in_session("user");
    server.on_json(
        HttpMethod::Get,
        "/wodss3/api/users/user/cards",
        200,
        json!({"page": 0, "pagesize": 10, "pagecount": 1, "content": [], "tasks": [3, 2, 1]}),
    );

    let page = session.get_users_cards(0, "").await.unwrap();
    assert_eq!(page.tasks, [3, 2, 1]);
    assert!(server.last_request().unwrap().query.is_empty());

    session.get_users_cards(2, "").await.unwrap();
    let request = server.last_request().unwrap();
    assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);

    session.get_users_cards(0, "bug").await.unwrap();
    let request = server.last_request().unwrap();
    assert_eq!(request.query_value("page"), Some("0"));
    assert_eq!(request.query_value("search"), Some("bug"));
}

#[tokio::test]
async fn conflict_detail_is_surfaced_verbatim() {
    let (session, server) = signed_in_session("user");
    server.on_json(
        HttpMethod::Post,
        "/wodss3/api/boards/",
        409,
        json!({ "result": "Username/email does already exist" }),
    );

    let err = session.create_board("Sprint").await.unwrap_err();
    let failure = err.as_request().unwrap();
    assert_eq!(failure.message, "Username/email does already exist");
    assert_eq!(failure.kind, FailureKind::Conflict);
    assert_eq!(session.status().message, "Username/email does already exist");

    let request = server.last_request().unwrap();
    assert_eq!(request.body, RequestBody::Json(json!({ "name": "Sprint" })));
}

#[tokio::test]
async fn missing_board_reports_path() {
    let (session, server) = signed_in_session("user");
    server.on_status(HttpMethod::Get, "/wodss3/api/boards/nope", 404);

    let err = session.get_board("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "could not load board (server path not valid)");
    assert!(session.status().error);
}

#[tokio::test]
async fn unreachable_server() {
    let (session, server) = signed_in_session("user");
    server.on_transport_error(HttpMethod::Get, "/wodss3/api/boards/b1/cards/", "refused");

    let err = session.get_cards("b1").await.unwrap_err();
    assert_eq!(err.to_string(), "could not load cards (no connection?)");
    assert_eq!(err.as_request().unwrap().kind, FailureKind::Transport);
}

#[tokio::test]
async fn board_lifecycle() {
    let (session, server) = signed_in_session("user");
    server
        .on_json(HttpMethod::Post, "/wodss3/api/boards/", 200, json!({ "id": "b1" }))
        .on_status(HttpMethod::Put, "/wodss3/api/boards/b1", 200)
        .on_status(HttpMethod::Put, "/wodss3/api/boards/b1/members", 200)
        .on_status(HttpMethod::Delete, "/wodss3/api/boards/b1/members/jane%20doe", 200)
        .on_status(HttpMethod::Put, "/wodss3/api/boards/b1/owner", 200)
        .on_status(HttpMethod::Delete, "/wodss3/api/boards/b1", 204);

    let created = session.create_board("Sprint").await.unwrap();
    assert_eq!(created.id, "b1");

    let update = BoardUpdate {
        name: "Sprint 2".into(),
        owner: Some(user("user")),
        members: vec![user("user"), user("jane")],
    };
    session.update_board("b1", &update).await.unwrap();
    assert_eq!(
        server.last_request().unwrap().body,
        RequestBody::Json(json!({
            "name": "Sprint 2",
            "owner": {"username": "user", "displayname": "user", "email": "user@example.com"},
            "members": [
                {"username": "user", "displayname": "user", "email": "user@example.com"},
                {"username": "jane", "displayname": "jane", "email": "jane@example.com"}
            ]
        }))
    );

    session.add_board_member("b1", "jane doe").await.unwrap();
    session.remove_board_member("b1", "jane doe").await.unwrap();
    session.change_board_owner("b1", "jane").await.unwrap();
    session.delete_board("b1").await.unwrap();

    let methods: Vec<HttpMethod> = server.requests().iter().map(|r| r.method).collect();
    assert_eq!(
        methods,
        vec![
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Put,
            HttpMethod::Delete,
            HttpMethod::Put,
            HttpMethod::Delete
        ]
    );
    assert!(session.status().is_idle());
}

#[tokio::test]
async fn board_with_null_card_fields_loads() {
    let (session, server) = signed_in_session("user");
    server.on_json(
        HttpMethod::Get,
        "/wodss3/api/boards/b1",
        200,
        json!({
            "id": "b1",
            "name": "Sprint",
            "createdby": {"username": "user", "displayname": "user", "email": null},
            "assigned": [],
            "tasks": [{"id": "c1", "name": "Task 1", "state": "TODO", "description": null}]
        }),
    );

    let board = session.get_board("b1").await.unwrap();
    assert_eq!(board.tasks[0].description, "");
    assert!(session.status().is_idle());
}

#[tokio::test]
async fn card_calls() {
    let (session, server) = signed_in_session("user");
    server
        .on_json(
            HttpMethod::Post,
            "/wodss3/api/boards/b1/cards",
            200,
            json!({ "id": "c1", "name": "Task 1", "state": "TODO", "boardId": "b1" }),
        )
        .on_status(HttpMethod::Put, "/wodss3/api/boards/b1/cards/c1/category", 200)
        .on_status(HttpMethod::Put, "/wodss3/api/boards/b1/cards/c1", 200)
        .on_json(
            HttpMethod::Get,
            "/wodss3/api/boards/b1/cards/c1",
            200,
            json!({ "id": "c1", "name": "Task 1", "state": "DONE" }),
        );

    let card = session
        .create_card("b1", &Card::new("Task 1").with_description("first"))
        .await
        .unwrap();
    assert_eq!(card.id.as_deref(), Some("c1"));
    assert_eq!(card.board_id.as_deref(), Some("b1"));

    session
        .update_card_category("b1", "c1", Category::Done)
        .await
        .unwrap();
    assert_eq!(
        server.last_request().unwrap().body,
        RequestBody::Json(json!({ "state": "DONE" }))
    );

    session.update_card("b1", &card).await.unwrap();
    let loaded = session.get_card("b1", "c1").await.unwrap();
    assert_eq!(loaded.state, Category::Done);
}

#[tokio::test]
async fn card_update_needs_an_id() {
    let (session, server) = signed_in_session("user");
    let err = session.update_card("b1", &Card::new("draft")).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn file_calls() {
    let (session, server) = signed_in_session("user");
    let files = "/wodss3/api/boards/b1/cards/c1/files";
    server
        .on_json(HttpMethod::Post, files, 200, json!({ "id": "f1" }))
        .on_json(
            HttpMethod::Get,
            files,
            200,
            json!([{ "id": "f1", "filename": "notes.txt" }]),
        )
        .on(
            HttpMethod::Get,
            "/wodss3/api/boards/b1/cards/c1/files/f1",
            HttpResponse::with_bytes(200, "text/plain", b"hello".to_vec()),
        )
        .on_status(HttpMethod::Delete, "/wodss3/api/boards/b1/cards/c1/files/f1", 200);

    let upload = FileUpload::new("notes.txt", b"hello".to_vec()).with_content_type("text/plain");
    let created = session.upload_file("b1", "c1", upload.clone()).await.unwrap();
    assert_eq!(created.id, "f1");
    assert_eq!(server.last_request().unwrap().body, RequestBody::Multipart(upload));

    let listed = session.get_files("b1", "c1").await.unwrap();
    assert_eq!(listed[0].name, "notes.txt");

    let content = session.get_file("b1", "c1", "f1").await.unwrap();
    assert_eq!(content.bytes, b"hello");
    assert_eq!(content.content_type.as_deref(), Some("text/plain"));

    session.delete_file("b1", "c1", "f1").await.unwrap();
}

#[tokio::test]
async fn profile_update_reissues_token() {
    let (session, server) = signed_in_session("user");
    let fresh = TokenBuilder::new("user")
        .language("EN")
        .expires_in(chrono::Duration::hours(1))
        .issue();
    server.on_json(HttpMethod::Put, "/wodss3/api/users/me", 200, json!({ "token": fresh }));

    let update = UserUpdate {
        displayname: "User".into(),
        language: "en".into(),
        old_password: "old".into(),
        password: String::new(),
    };
    let token = session.update_user_infos(&update).await.unwrap();
    assert!(session.save_token(&token).is_stored());
    assert_eq!(session.language().as_deref(), Some("EN"));

    let body = server.requests()[0].body.clone();
    let RequestBody::Json(body) = body else {
        panic!("expected a JSON body");
    };
    assert_eq!(body["oldPassword"], "old");
}

#[tokio::test]
async fn find_users_encodes_query() {
    let (session, server) = signed_in_session("user");
    server.on_json(
        HttpMethod::Get,
        "/wodss3/api/users/findusers/user%40example.com",
        200,
        json!([{ "username": "user", "displayname": "user", "email": "user@example.com" }]),
    );
    let users = session.find_users("user@example.com").await.unwrap();
    assert_eq!(users[0].username, "user");
}

#[tokio::test]
async fn status_events_are_published_in_order() {
    let (session, server) = signed_in_session("user");
    server.on_status(HttpMethod::Delete, "/wodss3/api/boards/b1/cards/c1", 200);
    let mut events = session.subscribe();

    session.delete_card("b1", "c1").await.unwrap();
    let _ = session.delete_card("b1", "c2").await;

    let phases: Vec<StatusPhase> = (0..4)
        .map(|_| events.try_recv().unwrap().phase)
        .collect();
    assert_eq!(
        phases,
        vec![
            StatusPhase::Started { description: "delete card".into() },
            StatusPhase::Succeeded,
            StatusPhase::Started { description: "delete card".into() },
            StatusPhase::Failed {
                message: "could not delete card (server path not valid)".into(),
                kind: FailureKind::NotFound,
            },
        ]
    );
}
