//! End-to-end lifecycle tests against a scripted transport with paused time.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use blessnode_client::config::{FilesConfig, ProxySelection};
use blessnode_client::{ClientConfig, NodeRunner};
use blessnode_transport::{Method, MockTransport, ProxyEndpoint, ProxyScheme};

const BASE: &str = "https://gateway.test/api/v1";
const IP_URL: &str = "https://ip.test";
const OK_PING: &str = r#"{"_id":"p1","nodeId":"n1","pings":[{"timestamp":"t1"}]}"#;

struct Node {
    _dir: tempfile::TempDir,
    config: ClientConfig,
    mock: Arc<MockTransport>,
}

fn node(proxies: &str) -> Node {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("id.txt"), "n1:h1\n").unwrap();
    std::fs::write(dir.path().join("user.txt"), "tok\n").unwrap();
    std::fs::write(dir.path().join("proxy.txt"), proxies).unwrap();

    let mut config = ClientConfig::default();
    config.api.base_url = BASE.to_string();
    config.api.ip_service_url = IP_URL.to_string();
    config.files = FilesConfig {
        identity_file: dir.path().join("id.txt"),
        token_file: dir.path().join("user.txt"),
        proxy_file: dir.path().join("proxy.txt"),
    };

    let mock = Arc::new(MockTransport::new());
    mock.on(Method::Get, IP_URL, 200, r#"{"ip":"198.51.100.4"}"#);
    mock.on(Method::Post, url(""), 200, r#"{"_id":"r1"}"#);
    mock.on(Method::Post, url("/start-session"), 200, r#"{"ok":true}"#);
    mock.on(Method::Post, url("/ping"), 200, OK_PING);

    Node { _dir: dir, config, mock }
}

fn url(suffix: &str) -> String {
    format!("{BASE}/nodes/n1{suffix}")
}

async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Lets `total` pass one second at a time, as a running clock would.
async fn elapse(total: Duration) {
    let step = Duration::from_secs(1);
    let mut left = total;
    while !left.is_zero() {
        let d = left.min(step);
        tokio::time::advance(d).await;
        settle().await;
        left -= d;
    }
}

async fn runner(node: &Node, use_proxy: bool) -> NodeRunner {
    NodeRunner::with_transport(&node.config, use_proxy, node.mock.clone())
        .await
        .unwrap()
}

/// Waits for ping tasks that read the proxy list on a blocking thread.
async fn until(cond: impl Fn() -> bool) {
    for _ in 0..1_000 {
        if cond() {
            return;
        }
        tokio::task::yield_now().await;
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn pings(node: &Node) -> usize {
    node.mock.count(Method::Post, &url("/ping"))
}

#[tokio::test(start_paused = true)]
async fn startup_sequence_is_exact() {
    let node = node("");
    let runner = runner(&node, false).await;
    let handle = runner.start().await.unwrap();

    let requests = node.mock.requests();
    let routes: Vec<_> = requests
        .iter()
        .map(|r| (r.request.method, r.request.url.clone()))
        .collect();
    assert_eq!(
        routes,
        vec![
            (Method::Get, IP_URL.to_string()),
            (Method::Post, url("")),
            (Method::Post, url("/start-session")),
            (Method::Post, url("/ping")),
        ]
    );

    assert_eq!(requests[0].request.header_value("Authorization"), None);
    for r in &requests[1..] {
        assert_eq!(r.request.header_value("Authorization"), Some("Bearer tok"));
        assert!(r.proxy.is_none());
    }
    assert_eq!(
        requests[1].request.body,
        Some(json!({ "ipAddress": "198.51.100.4", "hardwareId": "h1" }))
    );
    assert_eq!(requests[1].request.header_value("content-type"), Some("application/json"));
    assert!(requests[2].request.body.is_none());
    assert!(requests[3].request.body.is_none());

    runner.shutdown(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn next_ping_waits_a_full_interval() {
    let node = node("");
    let runner = runner(&node, false).await;
    let handle = runner.start().await.unwrap();
    assert_eq!(pings(&node), 1);

    tokio::time::advance(Duration::from_millis(59_999)).await;
    settle().await;
    assert_eq!(pings(&node), 1);

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(pings(&node), 2);

    runner.shutdown(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn two_steady_pings_in_just_under_three_minutes() {
    let node = node("");
    let runner = runner(&node, false).await;
    let handle = runner.start().await.unwrap();

    elapse(Duration::from_millis(179_999)).await;
    assert_eq!(pings(&node), 3);
    let stats = runner.shutdown(handle).await.unwrap();
    assert_eq!(stats.ticks, 2);
    assert_eq!(stats.succeeded, 2);
}

#[tokio::test(start_paused = true)]
async fn failing_pings_keep_ticking() {
    let node = node("");
    node.mock.fail(Method::Post, url("/ping"), "connection reset");
    let runner = runner(&node, false).await;
    let handle = runner.start().await.unwrap();

    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
    }

    assert_eq!(pings(&node), 4);
    let stats = runner.shutdown(handle).await.unwrap();
    assert_eq!(stats.failed, 3);
}

#[tokio::test(start_paused = true)]
async fn register_failure_aborts_before_session() {
    let node = node("");
    node.mock.on(Method::Get, IP_URL, 200, "not json");
    let runner = runner(&node, false).await;

    let err = runner.start().await.unwrap_err();
    assert!(err.is_parse_error());
    assert_eq!(err.response_body(), Some("not json"));
    assert_eq!(node.mock.count(Method::Post, &url("")), 0);
    assert_eq!(node.mock.count(Method::Post, &url("/start-session")), 0);
}

#[tokio::test(start_paused = true)]
async fn every_call_goes_through_the_proxy() {
    let node = node("http://10.0.0.1:8080\n");
    let runner = runner(&node, true).await;
    let handle = runner.start().await.unwrap();

    tokio::time::advance(Duration::from_secs(60)).await;
    until(|| node.mock.requests().len() == 5).await;

    let expected = ProxyEndpoint::new(ProxyScheme::Http, "10.0.0.1", 8080);
    let requests = node.mock.requests();
    assert_eq!(requests.len(), 5);
    assert!(requests.iter().all(|r| r.proxy.as_ref() == Some(&expected)));

    runner.shutdown(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn registration_shares_proxy_with_ip_lookup() {
    let node = node("http://10.0.0.1:8080\nhttp://10.0.0.2:8080\nsocks5://10.0.0.3:1080\n");
    let runner = runner(&node, true).await;
    let handle = runner.start().await.unwrap();

    let requests = node.mock.requests();
    assert_eq!(requests[0].proxy, requests[1].proxy);
    assert!(requests.iter().all(|r| r.proxy.is_some()));

    runner.shutdown(handle).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn per_run_selection_pins_one_proxy() {
    let mut node = node("http://10.0.0.1:8080\nhttp://10.0.0.2:8080\nhttp://10.0.0.3:8080\n");
    node.config.proxy.selection = ProxySelection::PerRun;
    let runner = runner(&node, true).await;
    let handle = runner.start().await.unwrap();

    for n in 2..=4 {
        tokio::time::advance(Duration::from_secs(60)).await;
        until(|| pings(&node) == n).await;
    }

    let requests = node.mock.requests();
    assert_eq!(pings(&node), 4);
    let first = requests[0].proxy.clone();
    assert!(first.is_some());
    assert!(requests.iter().all(|r| r.proxy == first));

    runner.shutdown(handle).await.unwrap();
}
