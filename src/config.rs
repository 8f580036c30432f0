use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_MODEL_ID: &str = "gemini-2.5-flash-preview-05-20";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MAX_INPUT_CHARS: usize = 8000;
/// Request body ceiling, in line with common serverless platform limits.
pub const DEFAULT_MAX_BODY_BYTES: usize = 4_500_000;
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Please provide a concise and well-structured summary of the following text:";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Missing key is reported per request, not at startup.
    pub api_key: Option<String>,
    pub model_id: String,
    pub api_base_url: String,
    pub strict_method_check: bool,
    pub max_input_chars: usize,
    pub max_body_bytes: usize,
    pub prompt_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            api_key: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            strict_method_check: true,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key/value source. `load` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let api_key = non_blank(lookup("GEMINI_API_KEY"));

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = lookup("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        let max_input_chars = parse_positive(&lookup, "MAX_INPUT_CHARS", defaults.max_input_chars)?;
        let max_body_bytes = parse_positive(&lookup, "MAX_BODY_BYTES", defaults.max_body_bytes)?;

        let strict_method_check = match lookup("STRICT_METHOD_CHECK") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| AppError::ConfigError(format!("Invalid STRICT_METHOD_CHECK: {}", raw)))?,
            None => defaults.strict_method_check,
        };

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            api_key,
            model_id: non_blank(lookup("GEMINI_MODEL")).unwrap_or(defaults.model_id),
            api_base_url: lookup("GEMINI_API_BASE")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            strict_method_check,
            max_input_chars,
            max_body_bytes,
            prompt_template: non_blank(lookup("PROMPT_TEMPLATE")).unwrap_or(defaults.prompt_template),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| AppError::ConfigError(format!("Invalid {}: {}", key, raw))),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
