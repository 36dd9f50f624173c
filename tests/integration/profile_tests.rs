use crate::common::{
    CSRF, PROFILE, SIGN_IN, client_for, full_profile_page, mock_profile, mock_sign_in, profile_page,
    sign_in_page, spawn_flaky_portal,
};
use misis_id::prelude::*;
use tracing::info;

#[tokio::test]
async fn test_full_flow_returns_student_info() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let profile = mock_profile(&mut server, full_profile_page()).await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let student = client.get_student_info().await.unwrap();
    client.close();

    assert_eq!(student.full_name(), "Иванов Иван Иванович");
    assert_eq!(student.group(), "БИВТ-21-1");
    assert_eq!(student.faculty(), "ИТКН");
    assert_eq!(student.record_book_number(), Some("12345678"));
    assert_eq!(student.course(), Some("3"));
    assert_eq!(student.study_form(), None);
    profile.assert_async().await;
}

#[tokio::test]
async fn test_profile_before_authentication_fails() {
    let mut server = mockito::Server::new_async().await;
    let profile = server
        .mock("GET", PROFILE)
        .expect(0)
        .create_async()
        .await;

    let mut client = client_for(&server);
    let err = client.get_student_info().await.unwrap_err();

    assert!(matches!(err, AppError::NotAuthenticated));
    assert_eq!(err.kind(), ErrorKind::Authentication);
    profile.assert_async().await;
}

#[tokio::test]
async fn test_profile_after_close_is_authentication_kind() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let profile = server
        .mock("GET", PROFILE)
        .expect(0)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    client.close();
    client.close();

    let err = client.get_student_info().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    profile.assert_async().await;
}

#[tokio::test]
async fn test_authenticate_after_close_opens_new_session() {
    let mut server = mockito::Server::new_async().await;
    let page = server
        .mock("GET", SIGN_IN)
        .with_status(200)
        .with_body(sign_in_page(CSRF))
        .expect(2)
        .create_async()
        .await;
    let post = server
        .mock("POST", SIGN_IN)
        .with_status(302)
        .with_header("location", "/ru/777/student")
        .expect(2)
        .create_async()
        .await;
    let _profile = mock_profile(&mut server, full_profile_page()).await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    client.close();
    client.authenticate("student", "secret").await.unwrap();

    assert!(client.get_student_info().await.is_ok());
    page.assert_async().await;
    post.assert_async().await;
}

#[tokio::test]
async fn test_redirect_to_sign_in_expires_session() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(302)
        .with_header("location", SIGN_IN)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert!(matches!(err, AppError::SessionExpired));
    assert!(!client.is_authenticated());

    let err = client.get_student_info().await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));
}

#[tokio::test]
async fn test_same_host_profile_redirect_is_followed() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(301)
        .with_header("location", "/ru/777/profile/")
        .create_async()
        .await;
    let canonical = server
        .mock("GET", "/ru/777/profile/")
        .with_status(200)
        .with_body(full_profile_page())
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let student = client.get_student_info().await.unwrap();

    assert_eq!(student.faculty(), "ИТКН");
    canonical.assert_async().await;
}

#[tokio::test]
async fn test_profile_redirect_is_followed_once() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(302)
        .with_header("location", "/ru/777/profile/")
        .create_async()
        .await;
    let _canonical = server
        .mock("GET", "/ru/777/profile/")
        .with_status(302)
        .with_header("location", "/ru/777/elsewhere")
        .expect(1)
        .create_async()
        .await;
    let elsewhere = server
        .mock("GET", "/ru/777/elsewhere")
        .expect(0)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parsing);
    assert!(err.to_string().contains("/ru/777/profile/"), "got: {err}");
    assert!(client.is_authenticated());
    elsewhere.assert_async().await;
}

#[tokio::test]
async fn test_profile_redirect_to_other_host_is_parsing_kind() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(302)
        .with_header("location", "https://portal.example/ru/777/profile")
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parsing);
}

#[tokio::test]
async fn test_unauthorized_profile_expires_session() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(401)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert!(client.session_info().is_none());
}

#[tokio::test]
async fn test_profile_server_error_keeps_session() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = server
        .mock("GET", PROFILE)
        .with_status(500)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_missing_group_label_is_parsing_kind() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = mock_profile(
        &mut server,
        profile_page("Иванов Иван Иванович", &[("Факультет", "ИТКН")]),
    )
    .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parsing);
}

#[tokio::test]
async fn test_empty_group_is_validation_kind() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = mock_profile(
        &mut server,
        profile_page(
            "Иванов Иван Иванович",
            &[("Факультет", "ИТКН"), ("Группа", "  ")],
        ),
    )
    .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_every_call_fetches_the_profile() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let profile = server
        .mock("GET", PROFILE)
        .with_status(200)
        .with_body(full_profile_page())
        .expect(2)
        .create_async()
        .await;

    let mut client = client_for(&server);
    client.authenticate("student", "secret").await.unwrap();
    let first = client.get_student_info().await.unwrap();
    let second = client.get_student_info().await.unwrap();

    assert_eq!(first, second);
    profile.assert_async().await;
}

#[tokio::test]
async fn test_connection_dropped_during_profile_is_network_kind() {
    setup_logger();
    let url = spawn_flaky_portal().await;
    let mut client = MisisClient::new(Config::with_base_url(&url)).unwrap();

    client.authenticate("student", "secret").await.unwrap();
    let err = client.get_student_info().await.unwrap_err();

    assert!(matches!(err, AppError::Network(_)), "got: {err:?}");
    assert!(client.is_authenticated());
}

#[tokio::test]
async fn test_scoped_runs_full_flow() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;
    let _profile = mock_profile(&mut server, full_profile_page()).await;

    let student = MisisClient::scoped(
        Config::with_base_url(&server.url()),
        async |client: &mut MisisClient| {
            client.authenticate("student", "secret").await?;
            client.get_student_info().await
        },
    )
    .await
    .unwrap();

    assert_eq!(student.group(), "БИВТ-21-1");
}

#[tokio::test]
async fn test_scoped_returns_closure_error() {
    let mut server = mockito::Server::new_async().await;
    let _sign_in = mock_sign_in(&mut server).await;

    let err = MisisClient::scoped(
        Config::with_base_url(&server.url()),
        async |client: &mut MisisClient| client.get_student_info().await,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotAuthenticated));
}

#[tokio::test]
#[ignore]
async fn test_live_portal() {
    setup_logger();
    let (Ok(login), Ok(password)) = (
        std::env::var("MISIS_LOGIN"),
        std::env::var("MISIS_PASSWORD"),
    ) else {
        info!("MISIS_LOGIN / MISIS_PASSWORD not set, skipping");
        return;
    };

    let mut client = MisisClient::new(Config::new()).unwrap();
    client.authenticate(&login, &password).await.unwrap();
    let student = client.get_student_info().await.unwrap();
    client.close();

    assert!(!student.full_name().is_empty());
    assert!(!student.group().is_empty());
    assert!(!student.faculty().is_empty());
    info!("Student info: {}", student);
}
