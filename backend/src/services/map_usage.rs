//! Map quota gatekeeper.
//!
//! Decides whether the live map may be shown, based on the provider's
//! monthly map-load count. Every path yields a [`MapAvailability`]: missing
//! credentials and upstream failures fail open with a reason code, and the
//! caller falls back to the cached static image only when `allowed` is false.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::config::MapSettings;

/// Why a decision was produced without a successful usage lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityReason {
    MissingMapboxAdminToken,
    UsageFetchFailed,
}

/// Decision payload returned to map consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAvailability {
    pub allowed: bool,
    pub usage: u64,
    pub limit: u64,
    pub remaining: u64,
    pub threshold: f64,
    pub fallback_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<AvailabilityReason>,
}

impl MapAvailability {
    /// Permissive decision with default figures.
    pub fn fail_open(settings: &MapSettings, reason: AvailabilityReason) -> Self {
        Self {
            allowed: true,
            usage: 0,
            limit: settings.monthly_limit,
            remaining: settings.monthly_limit,
            threshold: settings.threshold,
            fallback_url: settings.fallback_url.clone(),
            reason: Some(reason),
        }
    }

    /// How long this decision may be reused before asking again.
    pub fn cache_ttl(&self) -> Duration {
        match self.reason {
            None => Duration::from_secs(180),
            Some(AvailabilityReason::MissingMapboxAdminToken) => Duration::from_secs(60),
            Some(AvailabilityReason::UsageFetchFailed) => Duration::from_secs(120),
        }
    }
}

/// Whether usage stays under the threshold ratio. A non-positive limit
/// counts as zero usage.
pub fn usage_allowed(usage: u64, limit: u64, threshold: f64) -> bool {
    let ratio = if limit > 0 {
        usage as f64 / limit as f64
    } else {
        0.0
    };
    ratio < threshold
}

// =============================================================================
// Usage source
// =============================================================================

/// Monthly map-load figures as reported by the provider. Either may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct MonthlyUsage {
    #[serde(default, deserialize_with = "load_count")]
    pub usage: Option<u64>,
    #[serde(default, deserialize_with = "load_count")]
    pub limit: Option<u64>,
}

/// Counts arrive as plain JSON numbers, integral or not. Rounded, with
/// negatives clamped to zero and non-finite values treated as absent.
fn load_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| v.is_finite())
        .map(|v| v.round().max(0.0) as u64))
}

/// Credentials for the usage API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCredentials {
    pub secret_token: String,
    pub usage_token_id: String,
}

impl UsageCredentials {
    /// Both values present and non-blank, or nothing.
    pub fn from_settings(settings: &MapSettings) -> Option<Self> {
        let secret_token = settings.secret_token.as_deref()?.trim();
        let usage_token_id = settings.usage_token_id.as_deref()?.trim();
        if secret_token.is_empty() || usage_token_id.is_empty() {
            return None;
        }
        Some(Self {
            secret_token: secret_token.to_string(),
            usage_token_id: usage_token_id.to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Usage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Usage request returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Invalid usage API base URL '{url}': {reason}")]
    BaseUrl { url: String, reason: String },
}

/// Anything able to report monthly map loads.
#[async_trait]
pub trait UsageSource: Send + Sync {
    async fn monthly_map_loads(
        &self,
        credentials: &UsageCredentials,
    ) -> Result<MonthlyUsage, UsageError>;
}

/// Retry schedule for upstream calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct UsagePayload {
    #[serde(default)]
    usages: Option<UsageSections>,
}

#[derive(Debug, Default, Deserialize)]
struct UsageSections {
    #[serde(default)]
    map_loads: Option<UsagePeriods>,
}

#[derive(Debug, Default, Deserialize)]
struct UsagePeriods {
    #[serde(default)]
    month: Option<MonthlyUsage>,
}

/// Client for the Mapbox token usage endpoint.
pub struct MapboxUsageClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl MapboxUsageClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, UsageError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UsageError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn usage_url(&self, usage_token_id: &str) -> Result<reqwest::Url, UsageError> {
        let invalid = |reason: String| UsageError::BaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["usage", "v2", "tokens", usage_token_id]);
        Ok(url)
    }

    async fn fetch_once(&self, credentials: &UsageCredentials) -> Result<MonthlyUsage, UsageError> {
        let response = self
            .client
            .get(self.usage_url(&credentials.usage_token_id)?)
            .query(&[("access_token", credentials.secret_token.as_str())])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<empty response>".to_string());
            return Err(UsageError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let payload: UsagePayload = response.json().await?;
        Ok(payload
            .usages
            .and_then(|u| u.map_loads)
            .and_then(|m| m.month)
            .unwrap_or_default())
    }
}

#[async_trait]
impl UsageSource for MapboxUsageClient {
    async fn monthly_map_loads(
        &self,
        credentials: &UsageCredentials,
    ) -> Result<MonthlyUsage, UsageError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.fetch_once(credentials).await {
                Ok(usage) => return Ok(usage),
                Err(e) if attempt < attempts => {
                    warn!(attempt, error = %e, "Map usage request failed, retrying");
                    tokio::time::sleep(self.retry.backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// =============================================================================
// Gatekeeper
// =============================================================================

/// Produces map availability decisions from settings and a usage source.
pub struct MapQuotaGatekeeper {
    settings: MapSettings,
    source: Arc<dyn UsageSource>,
}

impl MapQuotaGatekeeper {
    pub fn new(settings: MapSettings, source: Arc<dyn UsageSource>) -> Self {
        Self { settings, source }
    }

    /// Gatekeeper backed by the Mapbox usage API named in `settings`.
    pub fn from_settings(settings: MapSettings) -> Result<Self, UsageError> {
        let client = MapboxUsageClient::new(
            settings.api_base.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        )?;
        Ok(Self::new(settings, Arc::new(client)))
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    /// Decide whether the live map may be shown. Never fails.
    pub async fn check_availability(&self) -> MapAvailability {
        let Some(credentials) = UsageCredentials::from_settings(&self.settings) else {
            warn!("Mapbox admin credentials not configured, allowing map");
            return MapAvailability::fail_open(
                &self.settings,
                AvailabilityReason::MissingMapboxAdminToken,
            );
        };

        match self.source.monthly_map_loads(&credentials).await {
            Ok(monthly) => self.decide(monthly),
            Err(e) => {
                error!(error = %e, "[map-usage] failed to fetch usage");
                MapAvailability::fail_open(&self.settings, AvailabilityReason::UsageFetchFailed)
            }
        }
    }

    /// Apply the quota policy to reported figures.
    pub fn decide(&self, monthly: MonthlyUsage) -> MapAvailability {
        let usage = monthly
            .usage
            .or(self.settings.usage_override)
            .unwrap_or(0);
        let limit = monthly.limit.unwrap_or(self.settings.monthly_limit);
        let allowed = usage_allowed(usage, limit, self.settings.threshold);

        debug!(usage, limit, allowed, "Evaluated map usage");

        MapAvailability {
            allowed,
            usage,
            limit,
            remaining: limit.saturating_sub(usage),
            threshold: self.settings.threshold,
            fallback_url: self.settings.fallback_url.clone(),
            reason: None,
        }
    }
}
