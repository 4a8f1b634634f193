use std::env;
use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};

#[derive(Clone)]
pub struct Config {
    /// TCP port to listen on
    pub port: u16,
    /// Directory holding one snapshot file per entity type
    pub data_dir: PathBuf,
    /// Clinic time zone as a fixed UTC offset
    pub clinic_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            clinic_offset: env::var("CLINIC_UTC_OFFSET")
                .map(|raw| {
                    parse_offset(&raw).unwrap_or_else(|| {
                        tracing::warn!("Invalid CLINIC_UTC_OFFSET '{}', using UTC", raw);
                        Utc.fix()
                    })
                })
                .unwrap_or_else(|_| Utc.fix()),
        }
    }
}

/// Parse `+HH:MM`, `-HHMM`, `Z` or `UTC`
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return Some(Utc.fix());
    }
    raw.parse().ok()
}
