use std::time::Duration;

use lionfly_relay::form::{
    ContactFields, FormSession, FormState, NewsletterFields, RelayClient, SubmitRejected,
};
use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[actix_web::test]
async fn contact_form_round_trip_clears_inputs() {
    let app = spawn_app().await;
    let session = FormSession::<ContactFields>::new(
        RelayClient::new(app.address.clone()),
        Duration::from_millis(100),
    );
    session.edit(|f| {
        f.name = "Ana".into();
        f.email = "ana@test.com".into();
        f.message = "Salut".into();
    });

    session.submit().await.unwrap();

    assert_eq!(
        session.state(),
        FormState::Success("Mesajul a fost trimis cu succes!".into())
    );
    assert_eq!(session.fields(), ContactFields::default());
    assert_eq!(app.mail_transport.sent().len(), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(session.state(), FormState::Idle);
}

#[actix_web::test]
async fn newsletter_form_shows_upstream_message_and_keeps_input() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_json(serde_json::json!({"message": "Subscriber is unsubscribed."})),
        )
        .expect(1)
        .mount(&app.mailing_list_server)
        .await;

    let session = FormSession::<NewsletterFields>::new(
        RelayClient::new(app.address.clone()),
        Duration::from_secs(3),
    );
    session.edit(|f| f.email = "ana@test.com".into());

    session.submit().await.unwrap();

    assert_eq!(
        session.state(),
        FormState::Error("Subscriber is unsubscribed.".into())
    );
    assert_eq!(session.fields().email, "ana@test.com");
}

#[actix_web::test]
async fn newsletter_form_rejects_bad_email_locally() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.mailing_list_server)
        .await;

    let session = FormSession::<NewsletterFields>::new(
        RelayClient::new(app.address.clone()),
        Duration::from_secs(3),
    );
    session.edit(|f| f.email = "not-an-email".into());

    let rejected = session.submit().await.unwrap_err();

    assert!(matches!(rejected, SubmitRejected::Invalid { .. }));
    assert_eq!(
        session.state(),
        FormState::Error("Adresă de email invalidă.".into())
    );
}
