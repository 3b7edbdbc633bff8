use crate::helpers::spawn_app;

// One grapheme, 18 bytes of UTF-8.
const FAMILY: &str = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";

#[actix_web::test]
async fn contact_valid_request_ret200_and_sends_one_email() {
    let app = spawn_app().await;

    let response = app
        .post_contact(serde_json::json!({
            "name": "Ana",
            "email": "ana@test.com",
            "message": "Salut"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({"message": "Mesajul a fost trimis cu succes!"})
    );

    let sent = app.mail_transport.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains("Ana"));
    assert_eq!(sent[0].reply_to.as_ref(), "ana@test.com");
    assert!(sent[0].text_body.contains("Salut"));
    assert!(sent[0].html_body.contains("Salut"));
}

#[actix_web::test]
async fn contact_longest_message_of_wide_graphemes_ret200() {
    let app = spawn_app().await;
    let message = FAMILY.repeat(5000);

    let response = app
        .post_contact(serde_json::json!({
            "name": "Ana",
            "email": "ana@test.com",
            "message": message
        }))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(app.mail_transport.sent().len(), 1);
}

#[actix_web::test]
async fn contact_overlong_message_of_wide_graphemes_ret400_too_long() {
    let app = spawn_app().await;
    let message = FAMILY.repeat(5001);

    let response = app
        .post_contact(serde_json::json!({
            "name": "Ana",
            "email": "ana@test.com",
            "message": message
        }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Mesajul este prea lung.");
    assert!(app.mail_transport.sent().is_empty());
}

#[actix_web::test]
async fn contact_incomplete_request_ret400_without_sending() {
    let test_cases = [
        (
            serde_json::json!({"email": "ana@test.com", "message": "Salut"}),
            "missing name",
        ),
        (
            serde_json::json!({"name": "Ana", "message": "Salut"}),
            "missing email",
        ),
        (
            serde_json::json!({"name": "Ana", "email": "ana@test.com"}),
            "missing message",
        ),
        (
            serde_json::json!({"name": "  ", "email": "ana@test.com", "message": "Salut"}),
            "whitespace name",
        ),
        (
            serde_json::json!({"name": "Ana", "email": "ana@test.com", "message": ""}),
            "empty message",
        ),
        (serde_json::json!({}), "missing all fields"),
    ];

    let app = spawn_app().await;
    for (body, case) in test_cases {
        let response = app.post_contact(body).await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The api did not fail with code 400 when payload was {}",
            case
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Toate câmpurile sunt obligatorii.");
    }

    assert!(app.mail_transport.sent().is_empty());
}

#[actix_web::test]
async fn contact_malformed_email_ret400_without_sending() {
    let app = spawn_app().await;

    for email in [
        "not-an-email",
        "ana@test",
        "ana @test.com",
        "@test.com",
        " ana@test.com",
        "ana@test.com ",
    ] {
        let response = app
            .post_contact(serde_json::json!({
                "name": "Ana",
                "email": email,
                "message": "Salut"
            }))
            .await;
        assert_eq!(
            response.status().as_u16(),
            400,
            "The api accepted the email {}",
            email
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Adresă de email invalidă.");
    }

    assert!(app.mail_transport.sent().is_empty());
}

#[actix_web::test]
async fn contact_malformed_json_ret400_with_json_error() {
    let app = spawn_app().await;

    let response = app.post_raw("/api/contact", "{\"name\": \"Ana\",").await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Toate câmpurile sunt obligatorii.");
}

#[actix_web::test]
async fn contact_transport_failure_ret500_without_leaking_details() {
    let app = spawn_app().await;
    app.mail_transport.fail_from_now_on();

    let response = app
        .post_contact(serde_json::json!({
            "name": "Ana",
            "email": "ana@test.com",
            "message": "Salut"
        }))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body = response.text().await.unwrap();
    assert!(!body.contains("smtp.internal"));
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"error": "A apărut o eroare la trimiterea mesajului."})
    );
}
