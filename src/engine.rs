use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::select;
use tokio::sync::Mutex;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::models::{Endpoint, ProbeResult, Snapshot};
use crate::probe::Prober;

pub struct Poller {
    label: String,
    endpoints: Vec<Endpoint>,
    prober: Prober,
    poll_interval: Duration,
    countdown_full: u64,
    snapshot: Mutex<Snapshot>,
    countdown_secs: AtomicU64,
}

impl Poller {
    pub fn new(
        label: impl Into<String>,
        endpoints: Vec<Endpoint>,
        prober: Prober,
        poll_interval: Duration,
    ) -> Self {
        let countdown_full = poll_interval.as_secs();
        Self {
            label: label.into(),
            snapshot: Mutex::new(Snapshot::pending(endpoints.len())),
            countdown_secs: AtomicU64::new(countdown_full),
            countdown_full,
            endpoints,
            prober,
            poll_interval,
        }
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    pub fn countdown_secs(&self) -> u64 {
        self.countdown_secs.load(Ordering::Relaxed)
    }

    pub async fn run(self: Arc<Self>, token: CancellationToken) {
        info!(
            "[{}] polling {} endpoints every {}s",
            self.label,
            self.endpoints.len(),
            self.poll_interval.as_secs_f64()
        );

        let countdown = tokio::spawn(Arc::clone(&self).run_countdown(token.clone()));

        let mut cycle = time::interval(self.poll_interval);
        loop {
            select! {
                _ = cycle.tick() => self.run_cycle(&token).await,
                _ = token.cancelled() => break,
            }
        }

        let _ = countdown.await;
        info!("[{}] poller stopped", self.label);
    }

    // The countdown wraps on its own one-second clock when it hits zero;
    // only a publishing cycle resets it to the full interval. The two
    // clocks may transiently skew under slow cycles.
    async fn run_countdown(self: Arc<Self>, token: CancellationToken) {
        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.tick().await;
        loop {
            select! {
                _ = ticker.tick() => {
                    let full = self.countdown_full;
                    let _ = self.countdown_secs.fetch_update(
                        Ordering::Relaxed,
                        Ordering::Relaxed,
                        |secs| Some(if secs <= 1 { full } else { secs - 1 }),
                    );
                }
                _ = token.cancelled() => return,
            }
        }
    }

    pub(crate) async fn run_cycle(&self, token: &CancellationToken) {
        let started = Instant::now();

        let mut tasks = FuturesUnordered::new();
        for (idx, endpoint) in self.endpoints.iter().enumerate() {
            let prober = self.prober.clone();
            let url = endpoint.url.clone();
            tasks.push(async move { (idx, prober.probe(&url).await) });
        }

        // Results land by endpoint index, not completion order.
        let mut results = vec![ProbeResult::pending(); self.endpoints.len()];
        loop {
            select! {
                next = tasks.next() => match next {
                    Some((idx, result)) => results[idx] = result,
                    None => break,
                },
                // Dropping the remaining probe futures aborts them; a
                // cancelled cycle publishes nothing.
                _ = token.cancelled() => return,
            }
        }

        let snapshot = Snapshot::from_results(results, Utc::now());
        info!(
            "[{}] cycle completed {} probes ({} up, {} down) in {:.2}s",
            self.label,
            snapshot.total,
            snapshot.up_count,
            snapshot.down_count,
            started.elapsed().as_secs_f64()
        );

        *self.snapshot.lock().await = snapshot;
        self.countdown_secs.store(self.countdown_full, Ordering::Relaxed);
    }
}
