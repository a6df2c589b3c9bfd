use std::env;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub llm: LlmSettings,
}

/// Connection settings for the completion backend.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            llm: LlmSettings::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Local .env is optional
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_, e.g. APP__LLM__MODEL)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let bind_addr = settings
            .get_string("server.bind_addr")
            .or_else(|_| env::var("BIND_ADDR"))
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let base_url = settings
            .get_string("llm.base_url")
            .or_else(|_| env::var("LLM_BASE_URL"))
            .unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());

        let api_key = settings
            .get_string("llm.api_key")
            .or_else(|_| env::var("LLM_API_KEY"))
            .unwrap_or_else(|_| {
                if env == "prod" {
                    tracing::warn!("LLM_API_KEY is not set; completion calls will be unauthenticated");
                }
                String::new()
            });

        let model = settings
            .get_string("llm.model")
            .or_else(|_| env::var("LLM_MODEL"))
            .unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

        let temperature = settings
            .get_float("llm.temperature")
            .ok()
            .map(|value| value as f32)
            .or_else(|| parse_env("LLM_TEMPERATURE"))
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = settings
            .get_int("llm.max_tokens")
            .ok()
            .and_then(|value| u32::try_from(value).ok())
            .or_else(|| parse_env("LLM_MAX_TOKENS"))
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let timeout_secs = settings
            .get_int("llm.timeout_secs")
            .ok()
            .and_then(|value| u64::try_from(value).ok())
            .or_else(|| parse_env("LLM_TIMEOUT_SECS"))
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Config {
            bind_addr,
            llm: LlmSettings {
                base_url,
                api_key,
                model,
                temperature,
                max_tokens,
                timeout_secs,
            },
        })
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
