//! Best-effort origin identification used to de-duplicate likes and own comments.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::RngExt;
use serde_json::Value;
use tokio::sync::OnceCell;

use crate::util::ss;

/// Public "what is my address" services, tried in order.
pub const DEFAULT_IDENTITY_SERVICES: [&str; 3] = [
    "https://api.ipify.org?format=json",
    "https://ipapi.co/json/",
    "https://httpbin.org/ip",
];

/// Per-service request timeout.
const SERVICE_TIMEOUT: Duration = Duration::from_secs(5);

/// What: Pull the origin out of a service response.
///
/// Output:
/// - `ip`, else `origin`, else `IPv4`, else `"127.0.0.1"`.
#[must_use]
pub fn extract_origin(body: &Value) -> String {
    ss(body, &["ip", "origin", "IPv4"]).unwrap_or_else(|| "127.0.0.1".to_string())
}

/// What: Build a synthetic identifier when every service failed.
///
/// Output:
/// - `user_<unix_millis>_<9 base36 chars>`.
#[must_use]
pub fn synthesize_origin() -> String {
    const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis());
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect();
    format!("user_{millis}_{suffix}")
}

/// Resolves the caller's origin once per session.
#[derive(Debug)]
pub struct IdentityResolver {
    client: reqwest::Client,
    services: Vec<String>,
    origin: OnceCell<String>,
}

impl IdentityResolver {
    /// Resolver that queries `services` in order on first use.
    #[must_use]
    pub fn new(services: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            services,
            origin: OnceCell::new(),
        }
    }

    /// Resolver that always answers `origin` (demo mode and tests).
    #[must_use]
    pub fn fixed(origin: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            services: Vec::new(),
            origin: OnceCell::from(origin.into()),
        }
    }

    /// What: Return the session origin, resolving it on first call.
    ///
    /// Details:
    /// - Concurrent first calls share one resolution.
    /// - Never fails: total failure yields a synthetic identifier.
    pub async fn resolve(&self) -> String {
        self.origin
            .get_or_init(|| async {
                for url in &self.services {
                    match self.query(url).await {
                        Ok(origin) => {
                            tracing::info!(service = %url, "origin resolved");
                            return origin;
                        }
                        Err(e) => tracing::warn!(service = %url, error = %e, "identity service failed"),
                    }
                }
                let synthetic = synthesize_origin();
                tracing::warn!(origin = %synthetic, "using synthetic origin");
                synthetic
            })
            .await
            .clone()
    }

    async fn query(&self, url: &str) -> Result<String, reqwest::Error> {
        let body: Value = self
            .client
            .get(url)
            .timeout(SERVICE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(extract_origin(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    /// What: Each service's response shape yields its address; unknown shapes use loopback.
    fn extract_origin_handles_known_shapes() {
        assert_eq!(extract_origin(&json!({"ip": "203.0.113.9"})), "203.0.113.9");
        assert_eq!(extract_origin(&json!({"origin": "198.51.100.1"})), "198.51.100.1");
        assert_eq!(extract_origin(&json!({"IPv4": "192.0.2.3"})), "192.0.2.3");
        assert_eq!(extract_origin(&json!({"city": "Seoul"})), "127.0.0.1");
    }

    #[test]
    /// What: Synthetic origins follow `user_<millis>_<9 base36>`.
    fn synthetic_origin_shape() {
        let id = synthesize_origin();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "user");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[tokio::test]
    /// What: Fixed resolvers answer without any network access; empty service lists synthesize.
    async fn resolver_fixed_and_fallback() {
        assert_eq!(IdentityResolver::fixed("10.1.2.3").resolve().await, "10.1.2.3");
        let r = IdentityResolver::new(Vec::new());
        let first = r.resolve().await;
        assert!(first.starts_with("user_"));
        assert_eq!(r.resolve().await, first);
    }
}
