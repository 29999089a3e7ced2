use crate::helpers::spawn_app;

#[tokio::test]
async fn login_with_the_right_password_returns_a_token_and_the_user() {
    // Arrange
    let app = spawn_app().await;
    app.register_jane().await;

    // Act
    let response = app
        .post_login(&serde_json::json!({
            "email": "Jane@X.com",
            "password": "secret123"
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["email"], "jane@x.com");
    assert!(body["user"].get("password").is_none());
    let claims = app
        .credentials
        .decode_token(body["token"].as_str().unwrap())
        .expect("The token did not verify.");
    assert_eq!(claims.user_id, body["user"]["_id"].as_str().unwrap());
}

#[tokio::test]
async fn login_with_a_wrong_password_returns_a_401() {
    // Arrange
    let app = spawn_app().await;
    app.register_jane().await;

    // Act
    let response = app
        .post_login(&serde_json::json!({
            "email": "jane@x.com",
            "password": "wrong"
        }))
        .await;

    // Assert
    assert_eq!(401, response.status().as_u16());
}

#[tokio::test]
async fn unknown_email_and_wrong_password_are_indistinguishable() {
    // Arrange
    let app = spawn_app().await;
    app.register_jane().await;

    // Act
    let wrong_password = app
        .post_login(&serde_json::json!({
            "email": "jane@x.com",
            "password": "not-the-password"
        }))
        .await;
    let unknown_email = app
        .post_login(&serde_json::json!({
            "email": "nobody@x.com",
            "password": "not-the-password"
        }))
        .await;

    // Assert
    assert_eq!(wrong_password.status(), unknown_email.status());
    assert_eq!(401, unknown_email.status().as_u16());
    let wrong_password_body: serde_json::Value =
        wrong_password.json().await.unwrap();
    let unknown_email_body: serde_json::Value =
        unknown_email.json().await.unwrap();
    assert_eq!(wrong_password_body, unknown_email_body);
}

#[tokio::test]
async fn login_returns_a_400_for_invalid_data() {
    // Arrange
    let app = spawn_app().await;
    let test_cases = vec![
        (
            serde_json::json!({ "password": "secret123" }),
            "missing email",
        ),
        (
            serde_json::json!({ "email": "jane@x.com" }),
            "missing password",
        ),
        (
            serde_json::json!({ "email": "jane", "password": "secret123" }),
            "invalid email",
        ),
    ];

    for (invalid_body, description) in test_cases {
        // Act
        let response = app.post_login(&invalid_body).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload had {}.",
            description
        );
    }
}
