use std::net::SocketAddr;

use actix_web::{App, test, web};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::TcpListener,
};
use usuarios_config::ServerConfig;

/// Local upstream that answers every connection with the same status and
/// JSON body.
async fn spawn_upstream(status: u16, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };

            let mut buf = vec![0_u8; 4096];
            let _ = stream.read(&mut buf).await;

            let reason = if status == 200 { "OK" } else { "Forbidden" };
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );

            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    addr
}

const THREE_USERS: &str = r#"{"results": [
    {
        "name": {"first": "João", "last": "Silva"},
        "email": "joao.silva@example.com",
        "picture": {"large": "https://example.com/joao.jpg"},
        "location": {"city": "São Paulo", "state": "São Paulo", "country": "Brazil"},
        "phone": "(11) 5555-0199"
    },
    {
        "name": {"first": "Ana", "last": "Souza"},
        "email": "ana.souza@example.com",
        "picture": {"large": "https://example.com/ana.jpg"},
        "location": {"city": "Recife", "state": "Pernambuco", "country": "Brazil"}
    },
    {
        "name": {"first": "Maria", "last": "Silva"},
        "email": "maria.silva@example.com"
    }
]}"#;

fn config_for(addr: SocketAddr) -> ServerConfig {
    ServerConfig {
        api_url: format!("http://{addr}"),
        ..ServerConfig::default()
    }
}

macro_rules! init_app {
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($config))
                .service(usuarios_random_user::api::bind_services(web::scope("/api"))),
        )
        .await
    };
}

#[test_log::test(actix_web::test)]
async fn listing_returns_envelope_with_all_users() {
    let addr = spawn_upstream(200, THREE_USERS).await;
    let app = init_app!(config_for(addr));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/usuarios?results=5")
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());

    let body: Value = test::read_body_json(response).await;

    assert_eq!(body["total"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["total_pages"], 42);
    assert_eq!(body["usuarios"].as_array().unwrap().len(), 3);
    assert_eq!(body["usuarios"][0]["nome"], "João Silva");
    assert_eq!(body["usuarios"][0]["cidade"], "São Paulo");
    assert_eq!(body["usuarios"][2]["cidade"], Value::Null);
}

#[test_log::test(actix_web::test)]
async fn city_filter_is_accent_insensitive() {
    let addr = spawn_upstream(200, THREE_USERS).await;
    let app = init_app!(config_for(addr));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/usuarios?results=5&cidade=sao%20paulo")
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(response).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["per_page"], 5);
    assert_eq!(body["usuarios"][0]["nome"], "João Silva");
}

#[test_log::test(actix_web::test)]
async fn filters_combine_with_and_semantics() {
    let addr = spawn_upstream(200, THREE_USERS).await;
    let app = init_app!(config_for(addr));

    // "silva" matches two users but neither is in Recife
    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/usuarios?q=silva&cidade=recife")
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(response).await;

    assert_eq!(body["total"], 0);
    assert_eq!(body["usuarios"].as_array().unwrap().len(), 0);
}

#[test_log::test(actix_web::test)]
async fn free_text_filter_matches_email() {
    let addr = spawn_upstream(200, THREE_USERS).await;
    let app = init_app!(config_for(addr));

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/usuarios?q=ana.souza%40example.com")
            .to_request(),
    )
    .await;

    let body: Value = test::read_body_json(response).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["usuarios"][0]["nome"], "Ana Souza");
}

#[test_log::test(actix_web::test)]
async fn upstream_failure_maps_to_500_with_error_body() {
    let addr = spawn_upstream(403, "{}").await;
    let app = init_app!(config_for(addr));

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/usuarios").to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), 500);

    let body: Value = test::read_body_json(response).await;

    assert!(
        body["error"].as_str().unwrap().contains("Access denied"),
        "{body}"
    );
}
