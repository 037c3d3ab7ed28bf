use std::time::{Duration, Instant};
use tracing::debug;

use crate::models::{ProbeResult, Status};

#[derive(Clone)]
pub struct Prober {
    client: reqwest::Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    pub async fn probe(&self, url: &str) -> ProbeResult {
        let start = Instant::now();
        let status = self.classify(url).await;
        let latency_ms = (start.elapsed().as_secs_f64() * 1000.0).round() as u64;
        debug!("probe {} -> {:?} in {}ms", url, status, latency_ms);
        ProbeResult { status, latency_ms: Some(latency_ms) }
    }

    async fn classify(&self, url: &str) -> Status {
        // The per-request timeout covers connect through body read.
        let response = match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(_) => return Status::Down,
        };
        if !response.status().is_success() {
            return Status::Down;
        }
        match response.text().await {
            Ok(body) if body.to_lowercase().contains("pong") => Status::Up,
            _ => Status::Down,
        }
    }
}
