// ── Runtime client configuration ──
//
// Describes *how* to talk to the marketplace backend and how the pollers
// are paced. Never touches disk: the config crate or the CLI builds a
// `ClientConfig` and hands it in.

use std::time::Duration;

use url::Url;

/// Default cadence of payment status checks.
pub const DEFAULT_PAYMENT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Ceiling after which an unconfirmed payment is reported as failed.
pub const DEFAULT_PAYMENT_TIMEOUT: Duration = Duration::from_secs(180);
/// Default cadence of chat refreshes.
pub const DEFAULT_CHAT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (local development backends).
    DangerAcceptInvalid,
}

/// Payment poller pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollSettings {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_PAYMENT_POLL_INTERVAL,
            timeout: DEFAULT_PAYMENT_TIMEOUT,
        }
    }
}

/// Configuration for one marketplace backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., `https://hostelio.example/api/`).
    pub api_url: Url,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub payment_poll: PollSettings,
    pub chat_poll_interval: Duration,
}

impl ClientConfig {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            payment_poll: PollSettings::default(),
            chat_poll_interval: DEFAULT_CHAT_POLL_INTERVAL,
        }
    }

    pub(crate) fn transport(&self) -> hostelio_api::TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => hostelio_api::TlsMode::System,
            TlsVerification::CustomCa(path) => hostelio_api::TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => hostelio_api::TlsMode::DangerAcceptInvalid,
        };
        hostelio_api::TransportConfig {
            tls,
            timeout: self.timeout,
        }
    }
}
