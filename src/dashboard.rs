//! ==============================================================================
//! dashboard.rs - html documents served at `/` and `/static`
//! ==============================================================================
//!
//! purpose:
//!     - live page: rendered once at startup into memory, then served as-is.
//!       the embedded script polls `/data`, updates the two text fields,
//!       keeps a rolling window of temperatures for the chart, and shows a
//!       banner while the room is over capacity.
//!     - static page: server-rendered snapshot of the current reading for
//!       browsers without javascript.
//!
//! relationships:
//!     - used by: handlers.rs (dashboard + snapshot routes), lib.rs (AppState)
//!     - reads: CAPACITY_THRESHOLD / CHART_WINDOW (shared with monitor.rs)
//!
//! ==============================================================================

use crate::domain::Reading;
use serde_json::Value;

/// occupancy above this raises the capacity alert
pub const CAPACITY_THRESHOLD: u32 = 5;

/// number of temperature samples kept for the chart
pub const CHART_WINDOW: usize = 10;

/// Render the live dashboard with the browser poll interval baked in.
pub fn render_live(poll_interval_ms: u64) -> String {
    LIVE_TEMPLATE
        .replace("__STYLE__", STYLE)
        .replace("__POLL_INTERVAL_MS__", &poll_interval_ms.to_string())
        .replace("__CAPACITY_THRESHOLD__", &CAPACITY_THRESHOLD.to_string())
        .replace("__CHART_WINDOW__", &CHART_WINDOW.to_string())
}

/// Render the no-script snapshot of `reading`.
pub fn render_static(reading: &Reading) -> String {
    STATIC_TEMPLATE
        .replace("__STYLE__", STYLE)
        .replace("__PEOPLE__", &html_escape(&display_value(&reading.people_count)))
        .replace("__TEMPERATURE__", &html_escape(&display_value(&reading.temperature)))
}

/// strings render bare, everything else as json text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// escape html special characters to prevent xss
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

const STYLE: &str = r#"
    body {
      font-family: Arial, sans-serif;
      margin: 0;
      padding: 0;
      background-color: #f4f4f9;
      color: #333;
    }
    .container {
      max-width: 600px;
      margin: 50px auto;
      padding: 20px;
      background: #fff;
      border-radius: 8px;
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.1);
    }
    h1 { text-align: center; color: #2c3e50; }
    .data { margin-top: 20px; font-size: 18px; }
    .data p {
      margin: 10px 0;
      padding: 10px;
      background: #ecf0f1;
      border-radius: 5px;
      text-align: center;
      font-weight: bold;
    }
    .data p strong { color: #2980b9; }
    .alert {
      display: none;
      margin-top: 20px;
      padding: 12px;
      border-radius: 5px;
      background: #e74c3c;
      color: #fff;
      text-align: center;
      font-weight: bold;
    }
    .alert.active { display: block; }
    .chart { margin-top: 20px; }
"#;

const STATIC_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Room Status</title>
  <style>__STYLE__</style>
</head>
<body>
  <div class="container">
    <h1>Room Status</h1>
    <div class="data">
      <p><strong>People in Room:</strong> __PEOPLE__</p>
      <p><strong>Temperature:</strong> __TEMPERATURE__ &#8451;</p>
    </div>
  </div>
</body>
</html>
"#;

const LIVE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Room Status</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js"></script>
  <style>__STYLE__</style>
</head>
<body>
  <div class="container">
    <h1>Room Status</h1>
    <noscript><p>JavaScript is disabled. <a href="/static">View the static snapshot</a>.</p></noscript>
    <div class="data">
      <p><strong>People in Room:</strong> <span id="peopleCount">-</span></p>
      <p><strong>Temperature:</strong> <span id="temperature">-</span> &#8451;</p>
    </div>
    <div id="capacityAlert" class="alert" role="alert"></div>
    <div class="chart"><canvas id="temperatureChart"></canvas></div>
  </div>
  <script>
    const POLL_INTERVAL_MS = __POLL_INTERVAL_MS__;
    const CAPACITY_THRESHOLD = __CAPACITY_THRESHOLD__;
    const CHART_WINDOW = __CHART_WINDOW__;

    const labels = [];
    const temperatures = [];

    const chart = window.Chart
      ? new Chart(document.getElementById('temperatureChart'), {
          type: 'line',
          data: {
            labels: labels,
            datasets: [{
              label: 'Temperature (°C)',
              data: temperatures,
              borderColor: '#2980b9',
              backgroundColor: 'rgba(41, 128, 185, 0.1)',
              tension: 0.3,
              fill: true,
            }],
          },
          options: {
            animation: false,
            scales: {
              x: { title: { display: true, text: 'Time' } },
              y: { title: { display: true, text: 'Temperature (°C)' } },
            },
          },
        })
      : null;

    // fixed-size fifo: drop the oldest sample once the window is full
    function pushSample(label, value) {
      if (labels.length >= CHART_WINDOW) {
        labels.shift();
        temperatures.shift();
      }
      labels.push(label);
      temperatures.push(value);
    }

    function showCapacity(peopleCount) {
      const banner = document.getElementById('capacityAlert');
      if (typeof peopleCount === 'number' && peopleCount > CAPACITY_THRESHOLD) {
        banner.textContent = 'Room over capacity: ' + peopleCount + ' people (limit ' + CAPACITY_THRESHOLD + ')';
        banner.classList.add('active');
      } else {
        banner.textContent = '';
        banner.classList.remove('active');
      }
    }

    async function poll() {
      const response = await fetch('/data', { cache: 'no-store' });
      if (!response.ok) {
        throw new Error('GET /data returned ' + response.status);
      }
      const data = await response.json();

      document.getElementById('peopleCount').textContent = data.peopleCount;
      document.getElementById('temperature').textContent = data.temperature;

      pushSample(new Date().toLocaleTimeString(), data.temperature);
      if (chart) {
        chart.update();
      }
      showCapacity(data.peopleCount);
    }

    function sleep(ms) {
      return new Promise((resolve) => setTimeout(resolve, ms));
    }

    async function pollLoop() {
      for (;;) {
        try {
          await poll();
        } catch (err) {
          console.error('dashboard poll failed:', err);
        }
        await sleep(POLL_INTERVAL_MS);
      }
    }

    pollLoop();
  </script>
</body>
</html>
"##;
