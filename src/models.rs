use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Up,
    Down,
    Pending,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Up => "ONLINE",
            Status::Down => "OFFLINE",
            Status::Pending => "CHECKING…",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Status::Up => "#22c55e",
            Status::Down => "#ef4444",
            Status::Pending => "#eab308",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub status: Status,
    pub latency_ms: Option<u64>,
}

impl ProbeResult {
    pub fn pending() -> Self {
        Self { status: Status::Pending, latency_ms: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub results: Vec<ProbeResult>,
    pub checked_at: Option<DateTime<Utc>>,
    pub up_count: usize,
    pub down_count: usize,
    pub total: usize,
}

impl Snapshot {
    pub fn pending(len: usize) -> Self {
        Self {
            results: vec![ProbeResult::pending(); len],
            checked_at: None,
            up_count: 0,
            down_count: 0,
            total: len,
        }
    }

    pub fn from_results(results: Vec<ProbeResult>, checked_at: DateTime<Utc>) -> Self {
        let up_count = results.iter().filter(|r| r.status == Status::Up).count();
        let down_count = results.iter().filter(|r| r.status == Status::Down).count();
        let total = results.len();
        Self {
            results,
            checked_at: Some(checked_at),
            up_count,
            down_count,
            total,
        }
    }
}
