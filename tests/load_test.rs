//! Concurrency and load tests for the relay.

use axum::http::StatusCode;
use std::time::{Duration, Instant};

mod common;
use common::StubResponse;

#[tokio::test]
async fn test_concurrent_routes_do_not_interfere() {
    // A slow status feed must not hold up, or leak into, the vehicles response.
    let status_stub = common::start_stub_upstream(|_| {
        StubResponse::ok("text/xml", "<Server name=\"status\"/>").delayed(Duration::from_millis(300))
    })
    .await;
    let vehicles_stub =
        common::start_stub_upstream(|_| StubResponse::ok("text/xml", "<vehicles count=\"3\"/>")).await;

    let status_relay = common::start_relay(common::relay_config(status_stub.addr.port())).await;
    let vehicles_relay = common::start_relay(common::relay_config(vehicles_stub.addr.port())).await;
    let client = common::client();

    let status = client.get(status_relay.url("/status")).send();
    let vehicles = async {
        let start = Instant::now();
        let res = client.get(vehicles_relay.url("/vehicles")).send().await.unwrap();
        (start.elapsed(), res)
    };
    let (status, (vehicles_elapsed, vehicles)) = tokio::join!(status, vehicles);

    let status = status.unwrap();
    assert_eq!(status.status(), StatusCode::OK);
    assert_eq!(status.text().await.unwrap(), "<Server name=\"status\"/>");

    assert_eq!(vehicles.status(), StatusCode::OK);
    assert_eq!(vehicles.text().await.unwrap(), "<vehicles count=\"3\"/>");
    assert!(vehicles_elapsed < Duration::from_millis(300));

    status_relay.stop();
    vehicles_relay.stop();
}

#[tokio::test]
async fn test_concurrent_routes_on_one_relay() {
    let stub = common::start_stub_upstream(|target| {
        if target.contains("file=vehicles") {
            StubResponse::ok("text/xml", "<vehicles/>")
        } else {
            StubResponse::ok("text/xml", "<Server/>").delayed(Duration::from_millis(100))
        }
    })
    .await;
    let relay = common::start_relay(common::relay_config(stub.addr.port())).await;
    let client = common::client();

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let (path, expected) = if i % 2 == 0 {
            ("/status", "<Server/>")
        } else {
            ("/vehicles", "<vehicles/>")
        };
        let url = relay.url(path);
        handles.push(tokio::spawn(async move {
            let res = client.get(url).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(res.text().await.unwrap(), expected);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(stub.requests().len(), 20);
    relay.stop();
}

#[tokio::test]
async fn test_load_performance() {
    let stub = common::start_stub_upstream(|_| StubResponse::ok("text/xml", "<Server/>")).await;
    let relay = common::start_relay(common::relay_config(stub.addr.port())).await;

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = common::client();
    let start = Instant::now();
    let mut handles = Vec::new();

    for _ in 0..concurrency {
        let client = client.clone();
        let url = relay.url("/status");
        handles.push(tokio::spawn(async move {
            let mut ok = 0;
            for _ in 0..requests_per_task {
                if let Ok(res) = client.get(&url).send().await {
                    if res.status() == StatusCode::OK {
                        ok += 1;
                    }
                }
            }
            ok
        }));
    }

    let mut successes = 0;
    for handle in handles {
        successes += handle.await.unwrap();
    }
    let duration = start.elapsed();

    println!(
        "{} requests in {:?} ({:.0} req/s)",
        total_requests,
        duration,
        total_requests as f64 / duration.as_secs_f64()
    );
    assert_eq!(successes, total_requests);

    relay.stop();
}
