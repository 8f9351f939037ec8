// ==========================================
// 库存快照系统 - 配置层
// ==========================================
// 职责: 应用配置加载与校验
// 存储: JSON 文件
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{config_keys, AppConfig, ConfigError, ConfigResult, SourceEntry};
