//! Unauthenticated routes, `/access-status` and `/health`

mod support;

use axum::http::{Method, StatusCode};
use chrono::{Duration, NaiveTime};
use serde_json::json;
use skoo_domain::{
    AccessProfile, ModelError, RevisionSession, SessionStatus, SubscriptionTier, ToolChoice,
};
use support::{alice, empty_request, fixed_now, json_request, TestApp, VALID_TOKEN};
use uuid::Uuid;

#[tokio::test]
async fn study_tools_return_the_forced_tool_arguments() {
    let app = TestApp::new();
    app.model.then_tool(
        "call_1",
        "generate_quiz",
        r#"{"title":"Quiz Révolution","questions":[{"question":"1789 ?","options":["a","b"],"correct":0}]}"#,
    );

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/ai-study-tools",
            None,
            &json!({ "type": "quiz", "subject": "Révolution française" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["title"], "Quiz Révolution");

    let request = &app.model.requests()[0];
    assert_eq!(request.tool_choice, Some(ToolChoice::Function("generate_quiz".into())));
    assert_eq!(request.tools.len(), 1);
}

#[tokio::test]
async fn study_tools_reject_unknown_types() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(Method::POST, "/ai-study-tools", None, &json!({ "type": "poem", "subject": "x" })))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Unknown type: poem" }));
    assert_eq!(app.model.calls(), 0);
}

#[tokio::test]
async fn study_tools_map_gateway_failures() {
    let app = TestApp::new();
    app.model.then_error(ModelError::RateLimited);

    let (status, _) = app
        .send(json_request(Method::POST, "/ai-study-tools", None, &json!({ "type": "fiche", "subject": "x" })))
        .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    app.model.then_error(ModelError::Network("connection reset".into()));
    let (status, body) = app
        .send(json_request(Method::POST, "/ai-study-tools", None, &json!({ "type": "fiche", "subject": "x" })))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "AI gateway error");
}

#[tokio::test]
async fn coach_trims_the_model_message() {
    let app = TestApp::new();
    app.model.then_text("  Tu gères, Alice !  ");

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/skoo-coach",
            None,
            &json!({ "context": { "firstName": "Alice" }, "messageType": "greeting" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Tu gères, Alice !" }));
}

#[tokio::test]
async fn coach_never_fails() {
    let app = TestApp::new();
    app.model.then_error(ModelError::QuotaExhausted);

    let (status, body) = app
        .send(json_request(Method::POST, "/skoo-coach", None, &json!("not an object")))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["message"].as_str().unwrap_or_default().is_empty());
}

#[tokio::test]
async fn session_reminder_sweep_reports_counts() {
    let app = TestApp::new();
    let start = NaiveTime::from_hms_opt(8, 15, 0).unwrap();
    app.study.add_session(RevisionSession {
        id: Uuid::new_v4(),
        user_id: alice(),
        subject_id: Uuid::new_v4(),
        subject_name: Some("Maths".into()),
        date: fixed_now().date_naive(),
        start_time: start,
        end_time: start + Duration::hours(1),
        notes: None,
        status: SessionStatus::Planned,
    });

    let (status, body) = app.send(empty_request(Method::POST, "/send-session-reminders", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "reminders_sent": 1, "sessions_checked": 1 }));

    // a second sweep in the same window does not notify again
    let (_, body) = app.send(empty_request(Method::POST, "/send-session-reminders", None)).await;
    assert_eq!(body, json!({ "success": true, "reminders_sent": 0, "sessions_checked": 1 }));
    assert_eq!(app.study.notifications().len(), 1);
}

#[tokio::test]
async fn session_reminder_failures_are_server_errors() {
    let app = TestApp::new();
    app.study.go_offline();

    let (status, body) = app.send(empty_request(Method::POST, "/send-session-reminders", None)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(body["details"].as_str().unwrap_or_default().contains("connection closed"));
}

#[tokio::test]
async fn exam_reminder_sweep_notifies_the_day_before() {
    let app = TestApp::new();
    let tomorrow = fixed_now().date_naive().succ_opt().unwrap();
    app.study.add_subject_with_exam(alice(), "Histoire", Some(tomorrow), Some("partiel"));

    let (status, body) = app.send(empty_request(Method::POST, "/send-exam-reminders", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "notifications_sent": 1 }));
    let inserted = app.study.notifications();
    assert_eq!(inserted[0].title, "⚠️ Examen demain !");
    assert_eq!(inserted[0].message, "Histoire (partiel) est demain. Courage !");
}

#[tokio::test]
async fn access_code_validation_statuses() {
    let app = TestApp::new();
    app.access_codes.add_code("LYCEE-2025");
    app.access_codes.expect_student("alice@example.fr", false);
    app.access_codes.expect_student("bob@example.fr", true);

    let cases = [
        (json!({ "code": " lycee-2025 ", "email": "Alice@Example.fr" }), StatusCode::OK, json!({ "ok": true })),
        (json!({ "code": "", "email": "alice@example.fr" }), StatusCode::BAD_REQUEST, json!({ "ok": false, "title": "Code invalide", "error": "Code école invalide" })),
        (json!({ "code": "LYCEE-2025", "email": "alice" }), StatusCode::BAD_REQUEST, json!({ "ok": false, "title": "Email invalide", "error": "Email invalide" })),
        (json!({ "code": "NOPE", "email": "alice@example.fr" }), StatusCode::OK, json!({ "ok": false, "title": "Code invalide", "error": "Code école invalide ou expiré" })),
    ];

    for (body, expected_status, expected_body) in cases {
        let (status, answer) =
            app.send(json_request(Method::POST, "/validate-access-code", None, &body)).await;
        assert_eq!(status, expected_status, "body: {body}");
        assert_eq!(answer, expected_body, "body: {body}");
    }

    let (status, answer) = app
        .send(json_request(
            Method::POST,
            "/validate-access-code",
            None,
            &json!({ "code": "LYCEE-2025", "email": "bob@example.fr" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(answer["title"], "Email déjà utilisé");
}

#[tokio::test]
async fn access_code_validation_rejects_other_methods_and_store_errors() {
    let app = TestApp::new();

    let (status, body) = app.send(empty_request(Method::GET, "/validate-access-code", None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({ "ok": false, "title": "Méthode invalide", "error": "Méthode non supportée" }));

    app.access_codes.fail();
    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/validate-access-code",
            None,
            &json!({ "code": "LYCEE-2025", "email": "alice@example.fr" }),
        ))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Impossible de valider le code pour le moment");
}

#[tokio::test]
async fn access_status_reports_the_effective_tier() {
    let app = TestApp::new();
    app.access.set_profile(AccessProfile {
        lifetime_tier: Some(SubscriptionTier::Major),
        ..AccessProfile::default()
    });

    let (status, body) = app.send(empty_request(Method::GET, "/access-status", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");

    let (status, body) =
        app.send(empty_request(Method::GET, "/access-status", Some(VALID_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subscribed"], true);
    assert_eq!(body["tier"], "major");
    assert_eq!(body["source"], "lifetime");
}

#[tokio::test]
async fn health_reflects_the_database() {
    let app = TestApp::new();

    let (status, body) = app.send(empty_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_healthy"], true);
    assert_eq!(body["components"][0]["name"], "database");

    app.database.go_down();
    let (status, body) = app.send(empty_request(Method::GET, "/health", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["components"][0]["is_healthy"], false);
    assert_eq!(body["message"], "degraded: database");
}
