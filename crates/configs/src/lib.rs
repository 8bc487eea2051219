use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/astroannotate.db?mode=rwc";
/// Idle/lifetime limit of the in-memory pool (~10 years): a recycled
/// `sqlite::memory:` connection would come back without the schema.
pub const IN_MEMORY_NO_EXPIRY_SECS: u64 = 10 * 365 * 24 * 60 * 60;
pub const DEFAULT_LABELING_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LABELING_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LABELING_PROMPT: &str = "Describe the object in this image in one sentence.";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub labeling: LabelingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 0 leaves the sqlx default (10 min).
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    /// 0 leaves the sqlx default (30 min).
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 5 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Settings for the labeling service: its own listener plus the vision model it calls.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelingConfig {
    #[serde(default = "default_labeler_host")]
    pub host: String,
    #[serde(default = "default_labeler_port")]
    pub port: u16,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_labeling_base_url")]
    pub base_url: String,
    #[serde(default = "default_labeling_model")]
    pub model: String,
    #[serde(default = "default_labeling_prompt")]
    pub prompt: String,
    #[serde(default = "default_max_completion_tokens")]
    pub max_completion_tokens: u32,
    #[serde(default = "default_labeling_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_image_root")]
    pub image_root: String,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            host: default_labeler_host(),
            port: default_labeler_port(),
            api_key: String::new(),
            base_url: default_labeling_base_url(),
            model: default_labeling_model(),
            prompt: default_labeling_prompt(),
            max_completion_tokens: default_max_completion_tokens(),
            timeout_secs: default_labeling_timeout(),
            image_root: default_image_root(),
        }
    }
}

fn default_labeler_host() -> String { "127.0.0.1".into() }
fn default_labeler_port() -> u16 { 5001 }
fn default_labeling_base_url() -> String { DEFAULT_LABELING_BASE_URL.into() }
fn default_labeling_model() -> String { DEFAULT_LABELING_MODEL.into() }
fn default_labeling_prompt() -> String { DEFAULT_LABELING_PROMPT.into() }
fn default_max_completion_tokens() -> u32 { 10 }
fn default_labeling_timeout() -> u64 { 30 }
fn default_image_root() -> String { ".".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load and validate `config.toml`; a missing file falls back to defaults + env.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => Self::from_env(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") { cfg.server.host = host; }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(host) = std::env::var("LABELER_HOST") { cfg.labeling.host = host; }
        if let Some(port) = std::env::var("LABELER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.labeling.port = port;
        }
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") { cfg.labeling.base_url = url; }
        if let Ok(model) = std::env::var("LABELING_MODEL") { cfg.labeling.model = model; }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        self.labeling.normalize_from_env();
        self.labeling.validate()?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Config for a private in-memory database. A single pooled connection keeps
    /// the schema alive for the lifetime of the pool.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            idle_timeout_secs: IN_MEMORY_NO_EXPIRY_SECS,
            max_lifetime_secs: IN_MEMORY_NO_EXPIRY_SECS,
            ..Self::default()
        }
    }

    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充，最后回退到本地文件
        if self.url.trim().is_empty() {
            self.url = std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url 为空；请在 config.toml 或环境变量 DATABASE_URL 中提供"));
        }
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url 必须以 sqlite: 开头"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections 必须 >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections 必须 >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database 超时配置必须为正整数秒"));
        }
        Ok(())
    }

    /// Filesystem path of the database file, if the URL names one.
    pub fn file_path(&self) -> Option<&str> {
        let rest = self.url.strip_prefix("sqlite://").or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or(rest);
        if path.is_empty() || path == ":memory:" {
            return None;
        }
        Some(path)
    }
}

impl LabelingConfig {
    pub fn normalize_from_env(&mut self) {
        if self.api_key.trim().is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY").or_else(|_| std::env::var("API_KEY")) {
                self.api_key = key;
            }
        }
        self.base_url = self.base_url.trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("labeling.port 必须在 1..=65535 范围内"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("labeling.base_url 必须以 http:// 或 https:// 开头"));
        }
        if self.model.trim().is_empty() {
            return Err(anyhow!("labeling.model 不能为空"));
        }
        if self.max_completion_tokens == 0 {
            return Err(anyhow!("labeling.max_completion_tokens 必须 >= 1"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("labeling.timeout_secs 必须为正整数秒"));
        }
        Ok(())
    }

    /// The API key is only required by the labeler process, not by the store.
    pub fn require_api_key(&self) -> Result<&str> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!("labeling.api_key 为空；请在 config.toml 或环境变量 OPENAI_API_KEY 中提供"));
        }
        Ok(&self.api_key)
    }
}
