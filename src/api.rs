use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use crate::engine::Poller;
use crate::models::Status;

#[derive(Clone)]
pub struct DashboardState {
    pub prod: Arc<Poller>,
    pub dev: Arc<Poller>,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceView {
    pub name: String,
    pub url: String,
    pub status: Status,
    pub label: &'static str,
    pub color: &'static str,
    pub latency_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub services: Vec<ServiceView>,
    pub up_count: usize,
    pub down_count: usize,
    pub total: usize,
    pub checked_at: Option<DateTime<Utc>>,
    pub countdown_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub poll_interval_ms: u64,
    pub prod: ColumnView,
    pub dev: ColumnView,
}

async fn column_view(poller: &Poller) -> ColumnView {
    let snapshot = poller.snapshot().await;
    let services = poller
        .endpoints()
        .iter()
        .zip(&snapshot.results)
        .map(|(endpoint, result)| ServiceView {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status: result.status,
            label: result.status.label(),
            color: result.status.color(),
            latency_ms: result.latency_ms,
        })
        .collect();

    ColumnView {
        services,
        up_count: snapshot.up_count,
        down_count: snapshot.down_count,
        total: snapshot.total,
        checked_at: snapshot.checked_at,
        countdown_secs: poller.countdown_secs(),
    }
}

pub async fn get_status(State(state): State<DashboardState>) -> Json<StatusView> {
    Json(StatusView {
        poll_interval_ms: state.poll_interval_ms,
        prod: column_view(&state.prod).await,
        dev: column_view(&state.dev).await,
    })
}

pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .fallback_service(ServeDir::new("public"))
        .with_state(state)
}

pub async fn start_server(port: u16, state: DashboardState) {
    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Dashboard: http://localhost:{}", addr.port());
    let listener = tokio::net::TcpListener::bind(addr).await.expect("Failed to bind API port");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Endpoint;
    use crate::probe::Prober;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    async fn serve_router(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn status_endpoint_reports_both_columns() {
        let ping = serve_router(Router::new().route("/ping", get(|| async { "pong" }))).await;

        let prober = Prober::new(Duration::from_millis(500));
        let prod = Arc::new(Poller::new(
            "prod",
            vec![Endpoint { name: "Core API".into(), url: format!("{}/ping", ping) }],
            prober.clone(),
            Duration::from_secs(5),
        ));
        let dev = Arc::new(Poller::new(
            "dev",
            vec![Endpoint { name: "Core API".into(), url: "http://localhost:1/ping".into() }],
            prober,
            Duration::from_secs(5),
        ));
        prod.run_cycle(&CancellationToken::new()).await;

        let state = DashboardState { prod, dev, poll_interval_ms: 5000 };
        let base = serve_router(create_router(state)).await;

        let body: serde_json::Value = reqwest::get(format!("{}/api/status", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(body["poll_interval_ms"], 5000);

        let prod_view = &body["prod"];
        assert_eq!(prod_view["services"][0]["name"], "Core API");
        assert_eq!(prod_view["services"][0]["status"], "up");
        assert_eq!(prod_view["services"][0]["label"], "ONLINE");
        assert!(prod_view["services"][0]["latency_ms"].is_u64());
        assert_eq!(prod_view["up_count"], 1);
        assert_eq!(prod_view["down_count"], 0);
        assert_eq!(prod_view["total"], 1);
        assert!(!prod_view["checked_at"].is_null());
        assert_eq!(prod_view["countdown_secs"], 5);

        let dev_view = &body["dev"];
        assert_eq!(dev_view["services"][0]["status"], "pending");
        assert_eq!(dev_view["services"][0]["label"], "CHECKING…");
        assert!(dev_view["services"][0]["latency_ms"].is_null());
        assert_eq!(dev_view["up_count"], 0);
        assert_eq!(dev_view["total"], 1);
        assert!(dev_view["checked_at"].is_null());
    }
}
