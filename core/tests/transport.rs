//! Exercise `Client::execute` against purpose-built axum routers.
//!
//! # Design
//! Every router is nested under `/api-v2` and the client's base URL carries
//! that prefix, so a request that drops the base path lands on the fallback
//! and fails loudly instead of passing by accident.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::routing::get;
use axum::Router;
use e7_core::{Cancelled, Client, Context, Destination, Error};
use reqwest::Method;
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use url::Url;

const BASE_PATH: &str = "/api-v2";

#[derive(Debug, Default, PartialEq, Deserialize)]
struct Foo {
    #[serde(rename = "A")]
    a: String,
}

/// Serve `routes` under `BASE_PATH` on a random port.
async fn serve(routes: Router) -> SocketAddr {
    let app = Router::new().nest(BASE_PATH, routes).fallback(|| async {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "base URL path prefix is not preserved in the request URL",
        )
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await });
    addr
}

/// Answer every GET with `body` over plain keep-alive HTTP/1.1, counting the
/// connections accepted.
async fn serve_counting(body: Vec<u8>) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let body: Arc<[u8]> = body.into();

    let counter = accepted.clone();
    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else { return };
            counter.fetch_add(1, Ordering::SeqCst);
            let body = body.clone();
            tokio::spawn(async move {
                let (read, mut write) = stream.into_split();
                let mut read = BufReader::new(read);
                let head = format!("HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n", body.len());
                loop {
                    // Requests are bodiless GETs: skip lines up to the blank one.
                    let mut line = String::new();
                    loop {
                        line.clear();
                        match read.read_line(&mut line).await {
                            Ok(0) | Err(_) => return,
                            Ok(_) if line == "\r\n" => break,
                            Ok(_) => {}
                        }
                    }
                    if write.write_all(head.as_bytes()).await.is_err()
                        || write.write_all(&body).await.is_err()
                    {
                        return;
                    }
                }
            });
        }
    });
    (addr, accepted)
}

fn client(addr: SocketAddr) -> Client {
    let base = Url::parse(&format!("http://{addr}{BASE_PATH}/")).unwrap();
    Client::builder().base_url(base).build().unwrap()
}

#[tokio::test]
async fn decodes_json_into_value() {
    let addr = serve(Router::new().route("/foo", get(|| async { r#"{"A":"a"}"# }))).await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "foo").unwrap();
    let mut body = Foo::default();
    let resp = client
        .execute(Some(&Context::background()), req, Destination::Value(&mut body))
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(body, Foo { a: "a".to_string() });
}

#[tokio::test]
async fn missing_context_fails_before_io() {
    // Nothing listens here; reaching the network would be a transport error.
    let client = Client::builder()
        .base_url(Url::parse("http://127.0.0.1:9/").unwrap())
        .build()
        .unwrap();
    let req = client.build_request(Method::GET, "foo").unwrap();

    let err = client.execute(None, req, Destination::discard()).await.unwrap_err();
    assert!(matches!(err, Error::MissingContext));
}

#[tokio::test]
async fn cancelled_context_fails_before_io() {
    let client = Client::builder()
        .base_url(Url::parse("http://127.0.0.1:9/").unwrap())
        .build()
        .unwrap();
    let (ctx, cancel) = Context::background().with_cancel();
    cancel.cancel();

    let req = client.build_request(Method::GET, "foo").unwrap();
    let err = client.execute(Some(&ctx), req, Destination::discard()).await.unwrap_err();
    assert!(matches!(err, Error::Cancelled(Cancelled::Canceled)));
}

#[tokio::test]
async fn http_error_carries_envelope_and_body() {
    const BODY: &str = r#"{"error":"Invalid request.","stack":"at handler","meta":{"requestDate":"Sat Aug 22 00:54:50 UTC 2020","apiVersion":"2.1.0"}}"#;
    let addr = serve(Router::new().route(
        "/foo",
        get(|| async { (StatusCode::BAD_REQUEST, BODY) }),
    ))
    .await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "foo").unwrap();
    let mut body = Foo::default();
    let err = client
        .execute(Some(&Context::background()), req, Destination::Value(&mut body))
        .await
        .unwrap_err();

    let status = err.status().expect("expected a status error");
    assert_eq!(status.response.status, StatusCode::BAD_REQUEST);
    assert_eq!(status.response.method, Method::GET);
    assert_eq!(status.response.url.path(), "/api-v2/foo");
    assert_eq!(status.message, "Invalid request.");
    assert_eq!(status.stack, "at handler");
    assert_eq!(status.meta.request_date, "Sat Aug 22 00:54:50 UTC 2020");
    assert_eq!(status.meta.api_version, "2.1.0");
    assert_eq!(status.response.body, BODY);
    assert_eq!(body, Foo::default());
}

#[tokio::test]
async fn plain_text_error_is_still_a_status_error() {
    let addr = serve(Router::new().route(
        "/foo",
        get(|| async { (StatusCode::BAD_REQUEST, "Bad Request") }),
    ))
    .await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "foo").unwrap();
    let err = client
        .execute(Some(&Context::background()), req, Destination::discard())
        .await
        .unwrap_err();

    let status = err.status().unwrap();
    assert_eq!(status.response.status.as_u16(), 400);
    assert!(status.message.is_empty());
    assert_eq!(status.response.body, "Bad Request");
}

#[tokio::test]
async fn no_content_leaves_destination_untouched() {
    let addr = serve(Router::new().route("/foo", get(|| async { StatusCode::NO_CONTENT }))).await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "foo").unwrap();
    let mut body = Foo { a: "unchanged".to_string() };
    let resp = client
        .execute(Some(&Context::background()), req, Destination::Value(&mut body))
        .await
        .unwrap();

    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(body.a, "unchanged");
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let addr = serve(Router::new().route("/foo", get(|| async { "{not json" }))).await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "foo").unwrap();
    let mut body = Foo::default();
    let err = client
        .execute(Some(&Context::background()), req, Destination::Value(&mut body))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[tokio::test]
async fn writer_receives_raw_body() {
    let payload = "x".repeat(10_000);
    let served = payload.clone();
    let addr = serve(Router::new().route("/raw", get(move || async move { served }))).await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "raw").unwrap();
    let mut sink: Vec<u8> = Vec::new();
    let resp = client
        .execute(Some(&Context::background()), req, Destination::writer(&mut sink))
        .await
        .unwrap();

    assert_eq!(sink, payload.as_bytes());
    assert!(resp.body.is_empty());
}

#[tokio::test]
async fn discarded_bodies_do_not_break_the_client() {
    let addr = serve(
        Router::new()
            .route("/small", get(|| async { "small" }))
            .route("/large", get(|| async { "y".repeat(64 * 1024) })),
    )
    .await;
    let client = client(addr);
    let ctx = Context::background();

    for path in ["small", "large", "small", "large"] {
        let req = client.build_request(Method::GET, path).unwrap();
        let resp = client.execute(Some(&ctx), req, Destination::discard()).await.unwrap();
        assert_eq!(resp.status, StatusCode::OK);
    }
}

#[tokio::test]
async fn small_discarded_bodies_are_drained_for_reuse() {
    let (addr, accepted) = serve_counting(b"small".to_vec()).await;
    let client = client(addr);
    let ctx = Context::background();

    for _ in 0..4 {
        let req = client.build_request(Method::GET, "small").unwrap();
        let resp = client.execute(Some(&ctx), req, Destination::discard()).await.unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        // Let the drained connection return to the pool.
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn large_declared_bodies_are_not_drained() {
    let (addr, accepted) = serve_counting(vec![b'y'; 100_000]).await;
    let client = client(addr);
    let ctx = Context::background();

    for _ in 0..3 {
        let req = client.build_request(Method::GET, "large").unwrap();
        let resp = client.execute(Some(&ctx), req, Destination::discard()).await.unwrap();
        assert_eq!(resp.status, StatusCode::OK);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    // An unread body cannot go back to the pool, so every call dials again.
    assert_eq!(accepted.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn redirect_loop_is_a_transport_error() {
    let addr = serve(Router::new().route(
        "/loop",
        get(|| async { Redirect::to("/api-v2/loop").into_response() }),
    ))
    .await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "loop").unwrap();
    let err = client
        .execute(Some(&Context::background()), req, Destination::discard())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Transport(ref e) if e.is_redirect()), "{err:?}");
}

#[tokio::test]
async fn deadline_expiring_mid_request_is_reported() {
    let addr = serve(Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            r#"{"A":"late"}"#
        }),
    ))
    .await;
    let client = client(addr);
    let ctx = Context::background().with_timeout(Duration::from_millis(50));

    let req = client.build_request(Method::GET, "slow").unwrap();
    let mut body = Foo::default();
    let err = client
        .execute(Some(&ctx), req, Destination::Value(&mut body))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled(Cancelled::DeadlineExceeded)), "{err:?}");
    assert_eq!(body, Foo::default());
}

#[tokio::test]
async fn cancellation_unblocks_the_call() {
    let addr = serve(Router::new().route(
        "/slow",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    ))
    .await;
    let client = client(addr);
    let (ctx, cancel) = Context::background().with_cancel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let started = tokio::time::Instant::now();
    let req = client.build_request(Method::GET, "slow").unwrap();
    let err = client.execute(Some(&ctx), req, Destination::discard()).await.unwrap_err();

    assert!(matches!(err, Error::Cancelled(Cancelled::Canceled)), "{err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn absolute_path_escapes_base_prefix() {
    let addr = serve(Router::new().route("/foo", get(|| async { "{}" }))).await;
    let client = client(addr);

    let req = client.build_request(Method::GET, "/foo").unwrap();
    assert_eq!(req.url().path(), "/foo");
    let err = client
        .execute(Some(&Context::background()), req, Destination::discard())
        .await
        .unwrap_err();
    assert_eq!(err.status().unwrap().response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
