//! Success paths of the typed endpoints, decoded from backend-shaped bodies

use saleorder_core::{DraftStore, MemoryStore, TokenStore};
use saleorder_http::types::{ChartKind, ExportFilter, OrderFilter};
use saleorder_http::{ApiClient, Session};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signed_in(server: &MockServer) -> Session {
    let client = ApiClient::new(format!("{}/api/v1", server.uri())).unwrap();
    let session = Session::new(
        client,
        TokenStore::new(Arc::new(MemoryStore::new())),
        DraftStore::new(Arc::new(MemoryStore::new())),
    );
    session.tokens().set_token("T");
    session
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn order_row(order_id: Value, dealer_name: Value) -> Value {
    json!({
        "order_id": order_id,
        "dealer_name": dealer_name,
        "city": "Pune",
        "username": "alice",
        "generated_at": "2026-10-16 09:30:00"
    })
}

#[tokio::test]
async fn test_dashboard_stats() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/dashboard/stats",
        json!({
            "success": true,
            "data": {
                "overview": {
                    "total_orders": 42,
                    "user_orders": 7,
                    "today_orders": 2,
                    "month_orders": 11,
                    "issued_ids": 5
                },
                "top_dealers": [
                    {"dealer_name": "Acme Traders", "city": "Pune", "order_count": 9},
                    {"dealer_name": null, "city": null, "order_count": 1}
                ],
                "top_cities": [{"city": null, "order_count": 3}],
                "monthly_orders": [{"month": "2026-10", "count": 11}, {"month": null, "count": 1}],
                "orders_by_user": [{"username": null, "count": 2}],
                "recent_orders": [order_row(json!(null), json!("Acme Traders"))]
            },
            "timestamp": "2026-10-16T09:30:00"
        }),
    )
    .await;

    let stats = signed_in(&mock_server).dashboard_stats().await.unwrap();
    assert_eq!(stats.overview.total_orders, 42);
    assert_eq!(stats.overview.month_orders, 11);
    assert_eq!(stats.top_dealers[0].dealer_name.as_deref(), Some("Acme Traders"));
    assert!(stats.top_dealers[1].dealer_name.is_none());
    assert!(stats.top_cities[0].city.is_none());
    assert_eq!(stats.monthly_orders[0].month.as_deref(), Some("2026-10"));
    assert!(stats.monthly_orders[1].month.is_none());
    assert!(stats.orders_by_user[0].username.is_none());
    assert!(stats.recent_orders[0].order_id.is_none());
}

#[tokio::test]
async fn test_chart_data_sends_type_and_reads_top_level_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/chart-data"))
        .and(query_param("type", "city"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "chart_type": "city",
            "labels": ["Pune", null, "Nashik"],
            "values": [12, 3, 4]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let chart = signed_in(&mock_server)
        .chart_data(ChartKind::City)
        .await
        .unwrap();
    assert_eq!(chart.chart_type, "city");
    assert_eq!(
        chart.labels,
        vec![Some("Pune".to_string()), None, Some("Nashik".to_string())]
    );
    assert_eq!(chart.values, vec![12, 3, 4]);
}

#[tokio::test]
async fn test_export_orders() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/orders/export"))
        .and(query_param("date_from", "2026-10-01"))
        .and(query_param("only_mine", "true"))
        .and(query_param_is_missing("date_to"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [
                order_row(json!("SO-0042"), json!("Acme Traders")),
                order_row(json!(null), json!(null))
            ],
            "count": 2,
            "exported_at": "2026-10-16T09:30:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = ExportFilter {
        date_from: Some("2026-10-01".to_string()),
        date_to: None,
        only_mine: true,
    };
    let export = signed_in(&mock_server)
        .export_orders(&filter)
        .await
        .unwrap();
    assert_eq!(export.count, 2);
    assert_eq!(export.exported_at.as_deref(), Some("2026-10-16T09:30:00"));
    assert_eq!(export.data[0].order_id.as_deref(), Some("SO-0042"));
    assert!(export.data[1].order_id.is_none());
    assert!(export.data[1].dealer_name.is_none());
}

#[tokio::test]
async fn test_order_by_id() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/orders/17",
        json!({
            "success": true,
            "data": {
                "id": 17,
                "username": "alice",
                "dealer_name": "Acme Traders",
                "city": "Pune",
                "order_id": null,
                "report_name": "Sale_Order_Acme.xlsx",
                "generated_at": "2026-10-16 09:30:00",
                "order_type": "additional"
            }
        }),
    )
    .await;

    let order = signed_in(&mock_server).order(17).await.unwrap();
    assert_eq!(order.id, Some(17));
    assert!(order.order_id.is_none());
    assert_eq!(order.report_name.as_deref(), Some("Sale_Order_Acme.xlsx"));
    assert_eq!(order.order_type.as_deref(), Some("additional"));
}

#[tokio::test]
async fn test_order_id_status_without_history() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/order-ids/status",
        json!({
            "success": true,
            "data": {
                "latest_id": null,
                "suggested_id": "SO-0001",
                "recent_orders": [{
                    "order_id": null,
                    "dealer_name": "Acme Traders",
                    "city": null,
                    "generated_at": "2026-10-16 09:30:00"
                }]
            }
        }),
    )
    .await;

    let status = signed_in(&mock_server).order_id_status().await.unwrap();
    assert!(status.latest_id.is_none());
    assert_eq!(status.suggested_id, "SO-0001");
    assert!(status.recent_orders[0].order_id.is_none());
    assert!(status.recent_orders[0].city.is_none());
}

#[tokio::test]
async fn test_issued_ids_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/issued-ids"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "issued_ids": [{
                    "id": 3,
                    "order_id": "SO-0007",
                    "given_to_name": "Ravi",
                    "dealer_name": null,
                    "city": null,
                    "given_by_user": "alice",
                    "given_at": "2026-10-15 17:05:00"
                }],
                "pagination": {"page": 2, "per_page": 10, "total": 11, "total_pages": 2}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = signed_in(&mock_server).issued_ids(2, 10).await.unwrap();
    assert_eq!(page.pagination.total, 11);
    assert_eq!(page.pagination.total_pages, 2);
    let record = &page.issued_ids[0];
    assert_eq!(record.order_id.as_deref(), Some("SO-0007"));
    assert_eq!(record.given_to_name.as_deref(), Some("Ravi"));
    assert!(record.dealer_name.is_none());
}

#[tokio::test]
async fn test_admin_overview() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/admin/overview",
        json!({
            "success": true,
            "data": {
                "stats": {
                    "total_orders": 42,
                    "today_orders": 2,
                    "issued_ids": 5,
                    "active_sessions": 3
                },
                "recent_orders": [order_row(json!(null), json!(null))],
                "sessions": [{
                    "username": "bob",
                    "session_id": "c0ffee",
                    "issued_at": "2026-10-16T08:00:00",
                    "ip": null,
                    "user_agent": null
                }]
            }
        }),
    )
    .await;

    let overview = signed_in(&mock_server).admin_overview().await.unwrap();
    assert_eq!(overview.stats.active_sessions, 3);
    assert!(overview.recent_orders[0].order_id.is_none());
    assert_eq!(overview.sessions[0].username, "bob");
    assert!(overview.sessions[0].ip.is_none());
}

#[tokio::test]
async fn test_admin_users() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/admin/users",
        json!({
            "success": true,
            "data": [
                {"username": "alice", "role": "admin"},
                {"username": "bob", "role": "user"}
            ]
        }),
    )
    .await;

    let users = signed_in(&mock_server).admin_users().await.unwrap();
    let roles: Vec<_> = users
        .iter()
        .map(|u| (u.username.as_str(), u.role.as_str()))
        .collect();
    assert_eq!(roles, vec![("alice", "admin"), ("bob", "user")]);
}

#[tokio::test]
async fn test_admin_orders_drops_only_mine() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/orders"))
        .and(query_param("username", "bob"))
        .and(query_param_is_missing("only_mine"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "orders": [{
                    "id": 9,
                    "username": "bob",
                    "dealer_name": null,
                    "city": "Nashik",
                    "order_id": null,
                    "report_name": "Sale_Order_Nashik.xlsx",
                    "generated_at": "2026-10-14 11:00:00",
                    "order_type": "new"
                }],
                "pagination": {"page": 1, "per_page": 20, "total": 1, "total_pages": 1}
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let filter = OrderFilter {
        username: Some("bob".to_string()),
        only_mine: true,
        ..OrderFilter::default()
    };
    let page = signed_in(&mock_server).admin_orders(&filter).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.orders[0].username.as_deref(), Some("bob"));
    assert!(page.orders[0].order_id.is_none());
    assert!(page.orders[0].dealer_name.is_none());
}

#[tokio::test]
async fn test_admin_sessions() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/api/v1/admin/sessions",
        json!({
            "success": true,
            "data": [{
                "username": "alice",
                "session_id": "abc123",
                "issued_at": "2026-10-16T08:00:00",
                "ip": "10.0.0.4",
                "user_agent": null
            }]
        }),
    )
    .await;

    let sessions = signed_in(&mock_server).admin_sessions().await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].session_id.as_deref(), Some("abc123"));
    assert_eq!(sessions[0].ip.as_deref(), Some("10.0.0.4"));
    assert!(sessions[0].user_agent.is_none());
}

#[tokio::test]
async fn test_revoke_all_sessions() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/admin/sessions/revoke-all"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    signed_in(&mock_server).revoke_all_sessions().await.unwrap();
}

#[tokio::test]
async fn test_admin_logs_sends_line_count() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/admin/logs"))
        .and(query_param("lines", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "file": "logs/app.log",
                "lines": ["2026-10-16 09:30:00 INFO started", "2026-10-16 09:31:00 INFO login alice"]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tail = signed_in(&mock_server).admin_logs(Some(50)).await.unwrap();
    assert_eq!(tail.file.as_deref(), Some("logs/app.log"));
    assert_eq!(tail.lines.len(), 2);
}
