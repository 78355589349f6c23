//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 存储后端选择。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// 内存存储：本地演示/测试，进程退出即丢失。
    Memory,
    /// PostgreSQL：生产环境，需要 NETBI_DATABASE_URL。
    Postgres,
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub store_backend: StoreBackend,
    /// Postgres 连接串；memory 后端下可缺省。
    pub database_url: Option<String>,
    /// 去重值缓存 TTL（秒）。
    pub distinct_cache_ttl_seconds: u64,
    /// 去重值查询上限。
    pub distinct_value_limit: u64,
    /// 列表默认每页条数。
    pub page_size: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_addr =
            env::var("NETBI_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let store_backend = read_backend("NETBI_STORE")?;
        let database_url = read_optional("NETBI_DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("NETBI_DATABASE_URL".to_string()));
        }
        let distinct_cache_ttl_seconds =
            read_u64_with_default("NETBI_DISTINCT_CACHE_TTL_SECONDS", 300)?;
        let distinct_value_limit = read_u64_with_default("NETBI_DISTINCT_VALUE_LIMIT", 100)?;
        let page_size = read_u64_with_default("NETBI_PAGE_SIZE", 10)?;
        if page_size == 0 {
            return Err(ConfigError::Invalid(
                "NETBI_PAGE_SIZE".to_string(),
                "0".to_string(),
            ));
        }

        Ok(Self {
            http_addr,
            store_backend,
            database_url,
            distinct_cache_ttl_seconds,
            distinct_value_limit,
            page_size,
        })
    }
}

/// 读取存储后端选择，缺省 postgres。
fn read_backend(key: &str) -> Result<StoreBackend, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(StoreBackend::Postgres),
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "postgres" => Ok(StoreBackend::Postgres),
        "memory" => Ok(StoreBackend::Memory),
        _ => Err(ConfigError::Invalid(key.to_string(), value)),
    }
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
