use std::net::SocketAddr;
use std::time::Duration;

use batch_sorter::{BatchResponse, Server, ServerConfig};
use reqwest::{Client, StatusCode};
use serde_json::json;
use tokio::sync::oneshot;

const DELAY: Duration = Duration::from_millis(300);

struct TestServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let config = ServerConfig::default()
            .with_addr(([127, 0, 0, 1], 0).into())
            .with_delay(DELAY);
        let server = Server::bind(&config).await.unwrap();
        let addr = server.local_addr().unwrap();

        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            server
                .serve_until(async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });

        TestServer {
            addr,
            shutdown: Some(tx),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn post_batch(server: &TestServer, path: &str, body: serde_json::Value) -> BatchResponse {
    let resp = Client::new()
        .post(server.url(path))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    resp.json().await.unwrap()
}

fn elapsed(resp: &BatchResponse) -> Duration {
    let ns: u64 = resp.time_ns.parse().unwrap();
    Duration::from_nanos(ns)
}

#[tokio::test]
async fn test_process_single_sorts_sequentially() {
    let server = TestServer::start().await;
    let resp = post_batch(&server, "/process-single", json!({"to_sort": [[3, 1, 2], [5, 4]]})).await;

    assert_eq!(resp.sorted_arrays, vec![vec![1, 2, 3], vec![4, 5]]);
    assert!(elapsed(&resp) >= DELAY * 2, "took {:?}", elapsed(&resp));
}

#[tokio::test]
async fn test_process_concurrent_pays_one_delay() {
    let server = TestServer::start().await;
    let body = json!({"to_sort": [[3, 1, 2], [5, 4]]});

    let single = post_batch(&server, "/process-single", body.clone()).await;
    let concurrent = post_batch(&server, "/process-concurrent", body).await;

    assert_eq!(concurrent.sorted_arrays, single.sorted_arrays);
    assert!(elapsed(&concurrent) >= DELAY);
    assert!(elapsed(&concurrent) < DELAY * 2, "took {:?}", elapsed(&concurrent));
    assert!(elapsed(&concurrent) < elapsed(&single));
}

#[tokio::test]
async fn test_concurrent_time_is_independent_of_batch_size() {
    let server = TestServer::start().await;
    let batch: Vec<Vec<i64>> = (0..50).map(|i| vec![i, i - 100, 7]).collect();

    let resp = post_batch(&server, "/process-concurrent", json!({ "to_sort": batch })).await;

    assert_eq!(resp.sorted_arrays.len(), 50);
    for (i, arr) in resp.sorted_arrays.iter().enumerate() {
        let i = i as i64;
        let mut expected = vec![i, i - 100, 7];
        expected.sort();
        assert_eq!(arr, &expected);
    }
    assert!(elapsed(&resp) < DELAY * 3, "took {:?}", elapsed(&resp));
}

#[tokio::test]
async fn test_empty_batch_on_both_endpoints() {
    let server = TestServer::start().await;
    for path in ["/process-single", "/process-concurrent"] {
        let resp = post_batch(&server, path, json!({"to_sort": []})).await;
        assert!(resp.sorted_arrays.is_empty());
        assert!(elapsed(&resp) < DELAY, "{} took {:?}", path, elapsed(&resp));
    }
}

#[tokio::test]
async fn test_malformed_bodies_get_bad_request() {
    let server = TestServer::start().await;
    let client = Client::new();

    for body in [r#"{"to_sort": "not-an-array"}"#, "{not json", ""] {
        let resp = client
            .post(server.url("/process-concurrent"))
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let text = resp.text().await.unwrap();
        assert!(!text.contains("sorted_arrays"));
    }
}

#[tokio::test]
async fn test_unknown_route_and_wrong_method() {
    let server = TestServer::start().await;
    let client = Client::new();

    let resp = client.post(server.url("/nope")).body("{}").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.get(server.url("/process-single")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()["allow"], "POST");
}
