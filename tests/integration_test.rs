use expoflow_sync::lifecycle::{OrderTracker, TrackerConfig};
use expoflow_sync::model::{NotificationCategory, OrderStatus};
use expoflow_sync::store::SyncHealth;
use expoflow_sync::sync_actor::RefreshOutcome;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A throwaway backend answering each connection with the next scripted body.
struct FakeBackend {
    base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

async fn fake_backend(bodies: Vec<serde_json::Value>) -> FakeBackend {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();
    let mut bodies: VecDeque<String> = bodies.into_iter().map(|body| body.to_string()).collect();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = Vec::new();
            let mut buffer = [0u8; 2048];
            loop {
                let read = socket.read(&mut buffer).await.unwrap_or(0);
                request.extend_from_slice(&buffer[..read]);
                if read == 0 || request.windows(4).any(|window| window == b"\r\n\r\n") {
                    break;
                }
            }
            let head = String::from_utf8_lossy(&request);
            let request_line = head.lines().next().unwrap_or_default().to_string();
            recorded.lock().unwrap().push(request_line);

            let response = match bodies.pop_front() {
                Some(body) => format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                ),
                None => "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
            };
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    FakeBackend {
        base_url: format!("http://{address}/api"),
        requests,
    }
}

fn order(id: &str, item: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "booth_number": "A-245",
        "exhibitor_name": "TechFlow Innovations",
        "item": item,
        "description": format!("{item} for booth A-245"),
        "color": "White",
        "quantity": 2,
        "status": status,
        "order_date": "June 14, 2025",
        "section": "Section A"
    })
}

fn config(base_url: String) -> TrackerConfig {
    TrackerConfig {
        api_url: base_url,
        request_timeout: Duration::from_secs(5),
        ..TrackerConfig::default()
    }
}

/// Full end-to-end run over HTTP: first cycle, a manual refresh, shutdown.
#[tokio::test]
async fn test_tracker_follows_backend_over_http() {
    let backend = fake_backend(vec![
        json!({
            "exhibitor": "TechFlow Innovations",
            "orders": [
                order("ORD-2025-001", "Premium Booth Setup Package", "in-route"),
                order("ORD-2025-002", "Interactive Display System", "out-for-delivery"),
                order("ORD-2025-003", "Mystery Crate", "teleported"),
            ],
            "total_orders": 3,
            "delivered_orders": 0,
            "last_updated": "2025-06-14T09:30:00.000000"
        }),
        json!({
            "orders": [
                order("ORD-2025-001", "Premium Booth Setup Package", "out-for-delivery"),
                order("ORD-2025-002", "Interactive Display System", "delivered"),
            ],
            "last_updated": "2025-06-14T09:30:30Z"
        }),
    ])
    .await;

    let tracker = OrderTracker::new(config(backend.base_url.clone())).expect("Failed to start tracker");
    tracker
        .client
        .select_identity("tech-innovations")
        .await
        .expect("Failed to select identity");

    let first = tracker
        .client
        .wait_for_view(|view| !view.loading && view.revision > 0 && view.last_updated().is_some())
        .await
        .expect("No view published");

    // The record with an unknown status is dropped; the rest survive.
    assert_eq!(first.order_count(), 2);
    assert_eq!(first.health(), SyncHealth::Live);
    assert_eq!(first.pending_count(), 2);
    assert_eq!(first.notifications().len(), 1);
    assert_eq!(first.notifications()[0].message, "Interactive Display System is out for delivery!");
    assert_eq!(
        first.last_updated().unwrap().to_rfc3339(),
        "2025-06-14T09:30:00+00:00"
    );

    assert_eq!(tracker.client.refresh_now().await.unwrap(), RefreshOutcome::Started);
    let second = tracker
        .client
        .wait_for_view(|view| !view.loading && view.delivered_count() == 1)
        .await
        .expect("No second view published");

    let categories: Vec<_> = second
        .notifications()
        .iter()
        .map(|notification| (notification.order_id.0.as_str(), notification.category))
        .collect();
    assert_eq!(
        categories,
        vec![
            ("ORD-2025-001", NotificationCategory::Delivery),
            ("ORD-2025-002", NotificationCategory::Success),
            ("ORD-2025-002", NotificationCategory::Delivery),
        ]
    );
    assert_eq!(second.status_counts()[&OrderStatus::Delivered], 1);

    let requests = backend.requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert!(requests
        .iter()
        .all(|line| line == "GET /api/orders/exhibitor/TechFlow%20Innovations HTTP/1.1"));

    tracker.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_unreachable_backend_degrades_to_placeholder() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let tracker = OrderTracker::new(config(format!("http://{address}/api"))).expect("Failed to start tracker");
    tracker
        .client
        .select_identity("nano-systems")
        .await
        .expect("Failed to select identity");

    let view = tracker
        .client
        .wait_for_view(|view| !view.loading && view.order_count() > 0)
        .await
        .expect("No view published");

    assert!(view.is_placeholder());
    assert_eq!(view.health(), SyncHealth::Degraded);
    assert!(view.last_error.is_some());
    assert!(view.notifications().is_empty());

    tracker.client.logout().await.expect("Failed to log out");
    tracker.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_invalid_api_url_fails_to_start() {
    let result = OrderTracker::new(TrackerConfig {
        api_url: "::not a url::".to_string(),
        ..TrackerConfig::default()
    });
    assert!(result.is_err());
}
