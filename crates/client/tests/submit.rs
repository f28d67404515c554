use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, http::StatusCode, routing::post};
use inscription_client::{ContactForm, Delivery, Submission, ValidationError};
use inscription_shared::InscriptionPayload;
use serde_json::{Value, json};

mod helpers;

fn valid_form() -> ContactForm {
    ContactForm::new("  Bob ", "bob@x.com", "hello world  ")
}

#[tokio::test]
async fn test_accepted() -> anyhow::Result<()> {
    let received = Arc::new(tokio::sync::Mutex::new(None));
    let captured = received.clone();
    let router = Router::new().route(
        "/inscription",
        post(move |Json(payload): Json<InscriptionPayload>| {
            let captured = captured.clone();
            async move {
                *captured.lock().await = Some(payload);
                Json(json!({"success": true, "message": "Thanks!"}))
            }
        }),
    );
    let endpoint = helpers::spawn_stub(router).await?;
    let handler = helpers::setup_handler(endpoint, valid_form());

    let delivery = handler.submit().await.delivery().await;
    assert_eq!(delivery, Some(Delivery::Accepted("Thanks!".to_owned())));

    let status = handler.status();
    let status = status.lock().await;
    assert_eq!(status.text, "✅ Thanks!");
    assert_eq!(status.class_name, "alert show ok");
    assert_eq!(*handler.form().lock().await, ContactForm::default());

    let payload = received.lock().await.clone().unwrap();
    assert_eq!(
        payload,
        InscriptionPayload {
            name: "Bob".to_owned(),
            email: "bob@x.com".to_owned(),
            message: "hello world".to_owned(),
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_rejected_ignores_status_code() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/inscription",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Duplicate email"})),
            )
        }),
    );
    let endpoint = helpers::spawn_stub(router).await?;
    let handler = helpers::setup_handler(endpoint, valid_form());

    let delivery = handler.submit().await.delivery().await;
    assert_eq!(
        delivery,
        Some(Delivery::Rejected("Duplicate email".to_owned()))
    );
    assert_eq!(handler.status().lock().await.text, "❌ Duplicate email");
    assert_eq!(*handler.form().lock().await, valid_form());

    Ok(())
}

#[tokio::test]
async fn test_success_on_error_status_still_counts() -> anyhow::Result<()> {
    let router = Router::new().route(
        "/inscription",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": 1, "message": "ok anyway"})),
            )
        }),
    );
    let endpoint = helpers::spawn_stub(router).await?;
    let handler = helpers::setup_handler(endpoint, valid_form());

    let delivery = handler.submit().await.delivery().await;
    assert_eq!(delivery, Some(Delivery::Accepted("ok anyway".to_owned())));

    Ok(())
}

#[tokio::test]
async fn test_unparsable_body() -> anyhow::Result<()> {
    let router = Router::new().route("/inscription", post(|| async { "<html>oops</html>" }));
    let endpoint = helpers::spawn_stub(router).await?;
    let handler = helpers::setup_handler(endpoint, valid_form());

    let delivery = handler.submit().await.delivery().await;
    assert_eq!(delivery, Some(Delivery::ConnectionFailed));

    let status = handler.status();
    let status = status.lock().await;
    assert_eq!(status.text, "❌ Erreur de connexion au serveur.");
    assert_eq!(status.class_name, "alert show err");

    Ok(())
}

#[tokio::test]
async fn test_non_object_body() -> anyhow::Result<()> {
    for body in [json!(null), json!([]), json!("success"), json!(1)] {
        let router = Router::new().route(
            "/inscription",
            post(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        );
        let endpoint = helpers::spawn_stub(router).await?;
        let handler = helpers::setup_handler(endpoint, valid_form());

        let delivery = handler.submit().await.delivery().await;
        assert_eq!(delivery, Some(Delivery::ConnectionFailed));

        let status = handler.status();
        let status = status.lock().await;
        assert_eq!(status.text, "❌ Erreur de connexion au serveur.");
        assert_eq!(status.class_name, "alert show err");
    }

    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint() -> anyhow::Result<()> {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let handler = helpers::setup_handler(format!("http://{addr}/inscription"), valid_form());

    let delivery = handler.submit().await.delivery().await;
    assert_eq!(delivery, Some(Delivery::ConnectionFailed));
    assert_eq!(
        handler.status().lock().await.text,
        "❌ Erreur de connexion au serveur."
    );
    assert_eq!(*handler.form().lock().await, valid_form());

    Ok(())
}

#[tokio::test]
async fn test_validation_blocks_network() -> anyhow::Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let router = Router::new().route(
        "/inscription",
        post(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Json(Value::Null) }
        }),
    );
    let endpoint = helpers::spawn_stub(router).await?;

    let cases = [
        (
            ContactForm::new("", "bob@x.com", "hello world"),
            ValidationError::EmptyField,
            "Veuillez remplir tous les champs.",
        ),
        (
            ContactForm::new("Bob", "bob@@x", "hello world"),
            ValidationError::InvalidEmail,
            "Adresse email invalide.",
        ),
        (
            ContactForm::new("Bob", "bob@x.com", "hi"),
            ValidationError::MessageTooShort,
            "Message trop court (minimum 10 caractères).",
        ),
    ];

    for (form, expected, text) in cases {
        let handler = helpers::setup_handler(endpoint.to_owned(), form);

        let Submission::Blocked(err) = handler.submit().await else {
            panic!("submission should have been blocked");
        };
        assert_eq!(err, expected);

        let status = handler.status();
        let status = status.lock().await;
        assert_eq!(status.text, text);
        assert_eq!(status.class_name, "alert show err");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);

    Ok(())
}
