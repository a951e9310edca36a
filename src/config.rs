//! Runtime configuration
//!
//! Read once at startup from the environment (and a `.env` file, if any).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_OLLAMA_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_MODEL: &str = "codellama";

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Base address of the generative service.
    pub ollama_url: String,
    /// Model used when a request does not name one.
    pub default_model: String,
    /// Upper bound on a generative round trip, in seconds.
    pub timeout_secs: u64,
    pub strip_narration: bool,
    /// Where `OutputStore` writes converted files.
    pub output_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            timeout_secs: 120,
            strip_narration: true,
            output_dir: PathBuf::from("converted_tests"),
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load `.env` (if present) and overlay `SEL2PW_*` variables on the defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            ollama_url: get("SEL2PW_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            default_model: get("SEL2PW_MODEL").unwrap_or(defaults.default_model),
            timeout_secs: parse_or("SEL2PW_TIMEOUT_SECS", get("SEL2PW_TIMEOUT_SECS"), defaults.timeout_secs),
            strip_narration: get("SEL2PW_STRIP_NARRATION")
                .map(|v| parse_flag("SEL2PW_STRIP_NARRATION", &v, defaults.strip_narration))
                .unwrap_or(defaults.strip_narration),
            output_dir: get("SEL2PW_OUTPUT_DIR").map(PathBuf::from).unwrap_or(defaults.output_dir),
            bind_addr: get("SEL2PW_BIND").unwrap_or(defaults.bind_addr),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        self.request_timeout().min(Duration::from_secs(10))
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}='{}', using {}", key, v, default);
            default
        }),
    }
}

fn parse_flag(key: &str, raw: &str, default: bool) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
            warn!("Ignoring invalid {}='{}', using {}", key, raw, default);
            default
        }
    }
}
