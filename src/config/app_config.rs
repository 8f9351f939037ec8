// ==========================================
// 库存快照系统 - 应用配置
// ==========================================
// 职责: 数据源列表、默认阈值、缓存时效、导出文件名
// 存储: JSON 文件（缺失时使用默认值）
// 查找顺序: 命令行参数 → 环境变量 → 用户配置目录
// ==========================================

use crate::domain::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::engine::DEFAULT_EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 配置键与默认值
// ==========================================
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "SMART_INVENTORY_CONFIG";
    /// 用户配置目录下的子目录名
    pub const CONFIG_DIR_NAME: &str = "smart-inventory";
    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.json";
    /// 默认缓存时效（秒）
    pub const DEFAULT_CACHE_TTL_SECS: u64 = 600;
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("数据源不存在: {0}")]
    UnknownSource(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// SourceEntry - 命名数据源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    /// 显示名称（如门店名）
    pub name: String,
    /// 本地文件路径或 http(s) 地址
    pub location: String,
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sources: Vec<SourceEntry>,
    pub low_stock_threshold: f64,
    pub cache_ttl_secs: u64,
    pub export_file_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            cache_ttl_secs: config_keys::DEFAULT_CACHE_TTL_SECS,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl AppConfig {
    /// 解析配置文件路径
    ///
    /// # 返回
    /// - Some(PathBuf): 显式路径 / 环境变量 / 用户配置目录
    /// - None: 无法确定用户配置目录
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CONFIG_FILE_NAME)
        })
    }

    /// 加载配置（文件不存在时返回默认配置）
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            info!(path = %path.display(), "配置文件不存在,使用默认配置");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&raw).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path.display(), sources = config.sources.len(), "配置加载完成");
        Ok(config)
    }

    /// 从 JSON 文本解析并校验
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置值
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.low_stock_threshold.is_finite() || self.low_stock_threshold < 0.0 {
            return Err(ConfigError::ValueError {
                key: "low_stock_threshold".to_string(),
                value: self.low_stock_threshold.to_string(),
                message: "必须为非负有限数".to_string(),
            });
        }
        if let Some(entry) = self
            .sources
            .iter()
            .find(|s| s.name.trim().is_empty() || s.location.trim().is_empty())
        {
            return Err(ConfigError::ValueError {
                key: "sources".to_string(),
                value: format!("{}={}", entry.name, entry.location),
                message: "数据源名称与地址不能为空".to_string(),
            });
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::ValueError {
                key: "export_file_name".to_string(),
                value: self.export_file_name.clone(),
                message: "导出文件名不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 按名称查找数据源（大小写不敏感）
    pub fn find_source(&self, name: &str) -> ConfigResult<&SourceEntry> {
        self.sources
            .iter()
            .find(|s| s.name.trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownSource(name.to_string()))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
