//! WikipediaClient against a one-shot local HTTP responder.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use wiki_client::{WikiError, WikipediaClient};

/// Serve one HTTP response and return the request line.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/w/api.php", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        // GET requests carry no body; the head is enough.
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let reply = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(reply.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let request = String::from_utf8_lossy(&buf).to_string();
        request.lines().next().unwrap_or_default().to_string()
    });

    (base_url, handle)
}

/// A base URL nothing is listening on.
async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/w/api.php")
}

fn client(base_url: &str) -> WikipediaClient {
    WikipediaClient::new().unwrap().with_base_url(base_url)
}

#[tokio::test]
async fn found_article_returns_extract() {
    let body = serde_json::json!({
        "batchcomplete": "",
        "query": {"pages": {"30057": {
            "pageid": 30057,
            "ns": 0,
            "title": "Tokyo",
            "extract": "Tokyo is the capital of Japan."
        }}}
    })
    .to_string();
    let (base_url, server) = serve_once("200 OK", body).await;

    let text = client(&base_url).fetch_extract("Tokyo, Japan").await.unwrap();

    assert_eq!(text.as_deref(), Some("Tokyo is the capital of Japan."));
    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /w/api.php?"));
    assert!(request_line.contains("prop=extracts"));
    assert!(request_line.contains("titles=Tokyo%2C+Japan"));
}

#[tokio::test]
async fn missing_article_is_none() {
    let body = serde_json::json!({
        "query": {"pages": {"-1": {"ns": 0, "title": "Underwater basket juggling", "missing": ""}}}
    })
    .to_string();
    let (base_url, _server) = serve_once("200 OK", body).await;

    let text = client(&base_url)
        .fetch_extract("Underwater basket juggling")
        .await
        .unwrap();

    assert!(text.is_none());
}

#[tokio::test]
async fn server_error_surfaces_status() {
    let (base_url, _server) =
        serve_once("500 Internal Server Error", "upstream timeout".to_string()).await;

    let err = client(&base_url).fetch_extract("Tokyo").await.unwrap_err();

    match err {
        WikiError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "upstream timeout");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    let base_url = closed_port_url().await;

    let err = client(&base_url).fetch_extract("Tokyo").await.unwrap_err();

    assert!(matches!(err, WikiError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_parse_error() {
    let (base_url, _server) = serve_once("200 OK", "<html>maintenance</html>".to_string()).await;

    let err = client(&base_url).fetch_extract("Tokyo").await.unwrap_err();

    assert!(matches!(err, WikiError::Parse(_)), "got {err:?}");
}
