use std::net::SocketAddr;

use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use rand::RngCore;
use tracing::warn;

use bcilab_api::session::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// | Env Var                    | Default              |
/// |----------------------------|----------------------|
/// | `BCILAB_HOST`              | `0.0.0.0`            |
/// | `BCILAB_PORT`              | `5000`               |
/// | `BCILAB_SESSION_SECRET`    | random per process   |
/// | `BCILAB_SESSION_TTL_HOURS` | `168`                |
/// | `BCILAB_SECURE_COOKIES`    | `false`              |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub session: SessionConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("BCILAB_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("BCILAB_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .context("BCILAB_PORT must be a valid port number")?;

        let secret = match std::env::var("BCILAB_SESSION_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("BCILAB_SESSION_SECRET unset; sessions will not survive a restart");
                random_secret()
            }
        };

        let ttl_hours: i64 = std::env::var("BCILAB_SESSION_TTL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .context("BCILAB_SESSION_TTL_HOURS must be an integer")?;
        let ttl = session_ttl(ttl_hours)?;

        let secure_cookies = std::env::var("BCILAB_SECURE_COOKIES")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port,
            session: SessionConfig {
                secret,
                ttl,
                secure_cookies,
            },
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

/// Session lifetime from `BCILAB_SESSION_TTL_HOURS`. Rejects values that are
/// not positive or whose expiry would fall outside chrono's date range.
fn session_ttl(hours: i64) -> anyhow::Result<chrono::Duration> {
    if hours <= 0 {
        anyhow::bail!("BCILAB_SESSION_TTL_HOURS must be positive");
    }
    let ttl = chrono::Duration::try_hours(hours)
        .with_context(|| format!("BCILAB_SESSION_TTL_HOURS={hours} is out of range"))?;
    if chrono::Utc::now().checked_add_signed(ttl).is_none() {
        anyhow::bail!("BCILAB_SESSION_TTL_HOURS={hours} puts session expiry out of range");
    }
    Ok(ttl)
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    B64.encode(bytes)
}
