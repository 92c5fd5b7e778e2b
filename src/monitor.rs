//! ==============================================================================
//! monitor.rs - terminal dashboard client
//! ==============================================================================
//!
//! purpose:
//!     the same client behavior the browser dashboard runs, as a tokio task:
//!     - poll `GET /data` on a fixed interval
//!     - keep the last CHART_WINDOW (time, temperature) samples
//!     - warn when occupancy exceeds CAPACITY_THRESHOLD
//!     - on a failed poll, log it and wait for the next tick
//!
//! relationships:
//!     - used by: main.rs (role = "monitor")
//!     - uses: reqwest (http client), dashboard.rs (shared constants)
//!
//! ==============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

use crate::dashboard::{display_value, CAPACITY_THRESHOLD, CHART_WINDOW};
use crate::domain::Reading;

// ==============================================================================
// rolling buffer
// ==============================================================================

/// fixed-capacity fifo; a push into a full buffer evicts the oldest entry
#[derive(Debug, Clone)]
pub struct RollingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "rolling buffer capacity must be non-zero");
        Self { items: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// oldest first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }
}

/// one chart point
#[derive(Debug, Clone)]
pub struct Sample {
    pub at: DateTime<Local>,
    pub temperature: Value,
}

impl Sample {
    /// time-of-day axis label
    pub fn label(&self) -> String {
        self.at.format("%H:%M:%S").to_string()
    }
}

/// true when the reading's occupancy is a number above CAPACITY_THRESHOLD
pub fn exceeds_capacity(reading: &Reading) -> bool {
    reading
        .people()
        .map(|people| people > f64::from(CAPACITY_THRESHOLD))
        .unwrap_or(false)
}

// ==============================================================================
// poller
// ==============================================================================

pub struct Monitor {
    client: reqwest::Client,
    data_url: String,
    interval: Duration,
    samples: RollingBuffer<Sample>,
}

impl Monitor {
    pub fn new(server_url: &str, interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            anyhow::bail!("monitor interval must be non-zero");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            client,
            data_url: format!("{}/data", server_url.trim_end_matches('/')),
            interval,
            samples: RollingBuffer::new(CHART_WINDOW),
        })
    }

    pub fn samples(&self) -> &RollingBuffer<Sample> {
        &self.samples
    }

    /// fetch the current reading and record its temperature sample
    pub async fn poll_once(&mut self) -> Result<Reading> {
        let reading: Reading = self
            .client
            .get(&self.data_url)
            .send()
            .await
            .with_context(|| format!("GET {} failed", self.data_url))?
            .error_for_status()
            .context("server returned an error status")?
            .json()
            .await
            .context("response was not a reading")?;

        self.samples.push(Sample {
            at: Local::now(),
            temperature: reading.temperature.clone(),
        });
        Ok(reading)
    }

    /// poll forever; a failed cycle is logged and skipped
    pub async fn run(mut self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(url = %self.data_url, interval = ?self.interval, "monitor started");

        loop {
            ticker.tick().await;
            match self.poll_once().await {
                Ok(reading) => self.report(&reading),
                Err(e) => tracing::warn!(error = %format!("{:#}", e), "poll failed, skipping cycle"),
            }
        }
    }

    fn report(&self, reading: &Reading) {
        let window = self
            .samples
            .iter()
            .map(|s| format!("{} {}", s.label(), display_value(&s.temperature)))
            .collect::<Vec<_>>()
            .join(" | ");

        println!(
            "[MONITOR] People: {} | Temp: {}°C | last {}: {}",
            display_value(&reading.people_count),
            display_value(&reading.temperature),
            self.samples.len(),
            window
        );

        if exceeds_capacity(reading) {
            tracing::warn!(
                people_count = %reading.people_count,
                threshold = CAPACITY_THRESHOLD,
                "room over capacity"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buffer_keeps_last_ten_in_arrival_order() {
        let mut buf = RollingBuffer::new(CHART_WINDOW);
        for t in 0..12 {
            buf.push(t);
        }
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), (2..12).collect::<Vec<_>>());
    }

    #[test]
    fn buffer_below_capacity_keeps_everything() {
        let mut buf = RollingBuffer::new(3);
        buf.push("a");
        buf.push("b");
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.capacity(), 3);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_rejected() {
        let _ = RollingBuffer::<u8>::new(0);
    }

    #[test]
    fn capacity_alert_is_strictly_greater_than_threshold() {
        let over = Reading { people_count: json!(6), temperature: json!(22.5) };
        let at = Reading { people_count: json!(5), temperature: json!(22.5) };
        assert!(exceeds_capacity(&over));
        assert!(!exceeds_capacity(&at));
        assert!(!exceeds_capacity(&Reading::zero()));
    }

    #[test]
    fn non_numeric_occupancy_never_alerts() {
        let reading = Reading { people_count: json!("lots"), temperature: json!(20) };
        assert!(!exceeds_capacity(&reading));
    }

    #[test]
    fn data_url_tolerates_trailing_slash() {
        let monitor = Monitor::new("http://127.0.0.1:3000/", Duration::from_secs(2)).unwrap();
        assert_eq!(monitor.data_url, "http://127.0.0.1:3000/data");
        assert!(monitor.samples().is_empty());
    }

    #[test]
    fn zero_interval_is_an_error() {
        let err = Monitor::new("http://127.0.0.1:3000", Duration::ZERO).err().unwrap();
        assert!(err.to_string().contains("non-zero"));
    }
}
