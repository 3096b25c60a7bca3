//! Tests for the streaming download primitive.

use indicatif::ProgressBar;
use mcprov::http::create_http_client;
use mcprov::transfer::{stream_download, CHUNK_SIZE};
use mcprov::Error;
use std::time::Duration;

mod common;
use common::helpers::*;
use common::stub_server::{StubResponse, StubServer};

#[tokio::test]
async fn test_download_reports_progress_against_content_length() {
    let server = StubServer::start().await;
    let payload = create_test_content(3 * CHUNK_SIZE + 100);
    server.route("/file.jar", StubResponse::bytes(payload.clone()));

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("file.jar");
    let pb = ProgressBar::hidden();

    let written = stream_download(&create_test_client(), &server.url("/file.jar"), &destination, &pb)
        .await
        .unwrap();

    assert_eq!(written, payload.len() as u64);
    assert_eq!(pb.length(), Some(payload.len() as u64));
    assert_eq!(pb.position(), payload.len() as u64);
    assert_file_content(&destination, &payload);
}

#[tokio::test]
async fn test_missing_content_length_is_not_an_error() {
    let server = StubServer::start().await;
    let payload = create_test_content(1000);
    server.route(
        "/file.jar",
        StubResponse::bytes(payload.clone()).without_content_length(),
    );

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("file.jar");
    let pb = ProgressBar::hidden();

    let written = stream_download(&create_test_client(), &server.url("/file.jar"), &destination, &pb)
        .await
        .unwrap();

    assert_eq!(written, 1000);
    assert_eq!(pb.length(), Some(0));
    assert_file_content(&destination, &payload);
}

#[tokio::test]
async fn test_repeated_download_overwrites() {
    let server = StubServer::start().await;
    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("sodium.jar");
    std::fs::write(&destination, create_test_content(50_000)).unwrap();

    server.route("/sodium.jar", StubResponse::bytes(b"short".to_vec()));
    let client = create_test_client();
    for _ in 0..2 {
        stream_download(&client, &server.url("/sodium.jar"), &destination, &ProgressBar::hidden())
            .await
            .unwrap();
    }

    assert_file_content(&destination, b"short");
    assert_eq!(count_files(temp_dir.path()), 1);
}

#[tokio::test]
async fn test_http_error_is_a_transport_failure() {
    let server = StubServer::start().await;
    server.route("/gone.jar", StubResponse::status(404));

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("gone.jar");
    let result = stream_download(
        &create_test_client(),
        &server.url("/gone.jar"),
        &destination,
        &ProgressBar::hidden(),
    )
    .await;

    assert!(matches!(result, Err(Error::Transport { .. })));
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_failure() {
    // Bind then drop a listener so the port is very likely closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let temp_dir = create_temp_dir();
    let result = stream_download(
        &create_test_client(),
        &format!("http://127.0.0.1:{}/x.jar", port),
        &temp_dir.path().join("x.jar"),
        &ProgressBar::hidden(),
    )
    .await;

    assert!(matches!(result, Err(Error::Transport { .. })));
}

#[tokio::test]
async fn test_missing_directory_is_an_io_failure() {
    let server = StubServer::start().await;
    server.route("/file.jar", StubResponse::bytes(b"data".to_vec()));

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("no").join("such").join("file.jar");
    let result = stream_download(
        &create_test_client(),
        &server.url("/file.jar"),
        &destination,
        &ProgressBar::hidden(),
    )
    .await;

    assert!(matches!(result, Err(Error::IOError { .. })));
}

#[tokio::test]
async fn test_malformed_url_is_rejected_before_any_request() {
    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("x.jar");
    let result = stream_download(
        &create_test_client(),
        "not a url",
        &destination,
        &ProgressBar::hidden(),
    )
    .await;

    assert!(matches!(result, Err(Error::InvalidUrl(_))));
    assert!(!destination.exists());
}

#[tokio::test]
async fn test_interrupted_body_keeps_partial_file() {
    let server = StubServer::start().await;
    let payload = create_test_content(100_000);
    server.route(
        "/big.jar",
        StubResponse::bytes(payload.clone()).cut_after(20_000),
    );

    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("big.jar");
    let pb = ProgressBar::hidden();
    let result = stream_download(&create_test_client(), &server.url("/big.jar"), &destination, &pb).await;

    assert!(matches!(result, Err(Error::Transport { .. })));
    assert_file_content(&destination, &payload[..20_000]);
    assert_eq!(pb.length(), Some(100_000));
    assert_eq!(pb.position(), 20_000);
}

#[tokio::test]
async fn test_slow_body_outlasting_the_timeout_completes() {
    let server = StubServer::start().await;
    let payload = create_test_content(4 * 1024);
    server.route(
        "/slow.jar",
        StubResponse::bytes(payload.clone()).drip(1024, Duration::from_millis(400)),
    );

    // Every pause is shorter than the timeout, the whole body is not.
    let client = create_http_client(create_test_http_config().with_timeout(Duration::from_secs(1))).unwrap();
    let temp_dir = create_temp_dir();
    let destination = temp_dir.path().join("slow.jar");
    let written = stream_download(&client, &server.url("/slow.jar"), &destination, &ProgressBar::hidden())
        .await
        .unwrap();

    assert_eq!(written, payload.len() as u64);
    assert_file_content(&destination, &payload);
}

#[tokio::test]
async fn test_stalled_body_times_out() {
    let server = StubServer::start().await;
    server.route(
        "/stalled.jar",
        StubResponse::bytes(create_test_content(2048)).drip(1024, Duration::from_secs(3)),
    );

    let client = create_http_client(create_test_http_config().with_timeout(Duration::from_millis(500))).unwrap();
    let temp_dir = create_temp_dir();
    let result = stream_download(
        &client,
        &server.url("/stalled.jar"),
        &temp_dir.path().join("stalled.jar"),
        &ProgressBar::hidden(),
    )
    .await;

    assert!(matches!(result, Err(Error::Transport { .. })));
}
