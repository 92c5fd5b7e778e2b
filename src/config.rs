//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `telemetry.toml`.
//!     loads configuration from file or falls back to defaults, then applies
//!     environment overrides (PORT, TELEMETRY_ROLE, TELEMETRY_SERVER_URL).
//!
//! structure:
//!     - role: which half of the system this process runs (server or monitor).
//!     - ServerConfig: listen address.
//!     - DashboardConfig: browser poll interval baked into the dashboard page.
//!     - MonitorConfig: where the terminal monitor polls and how often.
//!     - LoggingConfig: default filter and whether ingests log their values.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TelemetryConfig {
    pub role: Role,
    pub server: ServerConfig,
    pub dashboard: DashboardConfig,
    pub monitor: MonitorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// ingest api + dashboard
    #[default]
    Server,
    /// terminal client polling a running server
    Monitor,
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(Role::Server),
            "monitor" => Ok(Role::Monitor),
            other => Err(anyhow::anyhow!("unknown role '{}' (expected server or monitor)", other)),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub poll_interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonitorConfig {
    pub server_url: String,
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_readings: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: "0.0.0.0".to_string(), port: 3000 }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { poll_interval_ms: 2000 }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { server_url: "http://127.0.0.1:3000".to_string(), interval_ms: 2000 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), show_readings: true }
    }
}

impl TelemetryConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: TelemetryConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        Ok(config)
    }

    /// Load with default fallback, then apply environment overrides
    pub fn load_or_default() -> Self {
        let paths = [
            std::path::PathBuf::from("config").join("telemetry.toml"),
            std::path::PathBuf::from("..").join("config").join("telemetry.toml"),
        ];

        let mut config = None;
        for path in &paths {
            if path.exists() {
                match Self::load(path) {
                    Ok(c) => {
                        println!("[CONFIG] Loaded from {}", path.display());
                        config = Some(c);
                        break;
                    }
                    Err(e) => {
                        println!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        let mut config = config.unwrap_or_else(|| {
            println!("[CONFIG] No config file found - using defaults");
            Self::default()
        });
        config.apply_env(|key| std::env::var(key).ok());
        config.normalize();
        config
    }

    /// Replace zero poll intervals with the defaults; a zero period would
    /// spin the browser loop and panic the monitor's ticker.
    pub fn normalize(&mut self) {
        if self.dashboard.poll_interval_ms == 0 {
            let fallback = DashboardConfig::default().poll_interval_ms;
            println!("[CONFIG] Warning: dashboard.poll_interval_ms = 0, using {}ms", fallback);
            self.dashboard.poll_interval_ms = fallback;
        }
        if self.monitor.interval_ms == 0 {
            let fallback = MonitorConfig::default().interval_ms;
            println!("[CONFIG] Warning: monitor.interval_ms = 0, using {}ms", fallback);
            self.monitor.interval_ms = fallback;
        }
    }

    /// Overlay environment variables. The lookup is injected so tests
    /// don't have to touch the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").filter(|v| !v.trim().is_empty()) {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => println!("[CONFIG] Warning: ignoring invalid PORT '{}'", port),
            }
        }
        if let Some(role) = lookup("TELEMETRY_ROLE").filter(|v| !v.trim().is_empty()) {
            match role.parse::<Role>() {
                Ok(r) => self.role = r,
                Err(e) => println!("[CONFIG] Warning: {}", e),
            }
        }
        if let Some(url) = lookup("TELEMETRY_SERVER_URL").filter(|v| !v.trim().is_empty()) {
            self.monitor.server_url = url.trim().to_string();
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }

    /// Print configuration summary
    pub fn print_summary(&self) {
        println!("┌─────────────────────────────────────────┐");
        println!("│        TELEMETRY CONFIGURATION          │");
        println!("├─────────────────────────────────────────┤");
        println!("│ Role: {:?}", self.role);
        match self.role {
            Role::Server => {
                println!("│ Listen: {}", self.listen_addr());
                println!("│ Dashboard Poll: {}ms", self.dashboard.poll_interval_ms);
            }
            Role::Monitor => {
                println!("│ Server: {}", self.monitor.server_url);
                println!("│ Poll Interval: {}ms", self.monitor.interval_ms);
            }
        }
        println!("│ Log Level: {}", self.logging.level);
        println!("└─────────────────────────────────────────┘");
    }
}
