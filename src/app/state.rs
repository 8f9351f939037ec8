// ==========================================
// 库存快照系统 - 应用状态
// ==========================================
// 职责: 组装配置、加载器、导入器、缓存与查询引擎
// ==========================================

use crate::app::cache::DatasetCache;
use crate::app::error::AppResult;
use crate::config::AppConfig;
use crate::domain::{FilterCriteria, ImportReport};
use crate::engine::QueryEngine;
use crate::importer::{InventoryImporter, InventoryImporterImpl, SourceLoader};
use std::sync::Arc;
use tracing::info;

/// 应用状态
///
/// 包含所有共享组件; 会话数据由调用方的 Session 持有
pub struct AppState {
    /// 应用配置
    pub config: AppConfig,

    /// 数据源加载器
    pub loader: SourceLoader,

    /// 库存导入器
    pub importer: InventoryImporterImpl,

    /// 数据集缓存（按数据源位置）
    pub cache: DatasetCache,

    /// 查询引擎
    pub engine: QueryEngine,
}

impl AppState {
    /// 创建新的 AppState 实例
    pub fn new(config: AppConfig) -> Self {
        info!(
            sources = config.sources.len(),
            cache_ttl_secs = config.cache_ttl_secs,
            "初始化AppState"
        );
        let cache = DatasetCache::new(config.cache_ttl());
        Self {
            config,
            loader: SourceLoader::default(),
            importer: InventoryImporterImpl::new(),
            cache,
            engine: QueryEngine::new(),
        }
    }

    /// 按位置加载并导入（带缓存,键 = 标识 + 位置）
    pub fn load_location(&self, label: &str, location: &str) -> AppResult<Arc<ImportReport>> {
        let key = cache_key(label, location);
        let report = self.cache.get_or_load(&key, || {
            let table = self.loader.load(location)?;
            self.importer.import_table(label, &table)
        })?;
        Ok(report)
    }

    /// 按配置中的数据源名称加载
    pub fn load_named_source(&self, name: &str) -> AppResult<Arc<ImportReport>> {
        let entry = self.config.find_source(name)?;
        self.load_location(&entry.name, &entry.location)
    }

    /// 使用配置默认阈值构造默认过滤条件
    pub fn default_criteria(&self, report: &ImportReport) -> Option<FilterCriteria> {
        self.engine
            .default_criteria(&report.dataset, self.config.low_stock_threshold)
    }
}

// 报告中记录标识,同一位置不同标识分别缓存
fn cache_key(label: &str, location: &str) -> String {
    format!("{}\u{1f}{}", label.trim(), location.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::error::AppError;
    use crate::config::{ConfigError, SourceEntry};
    use std::io::Write;

    #[test]
    fn test_load_named_source_uses_cache() {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Item,Opening Stock,2026-01-01").unwrap();
        writeln!(temp_file, "Tea,4,3").unwrap();
        temp_file.flush().unwrap();

        let config = AppConfig {
            sources: vec![SourceEntry {
                name: "Nayakka".to_string(),
                location: temp_file.path().to_string_lossy().to_string(),
            }],
            ..AppConfig::default()
        };
        let state = AppState::new(config);

        let first = state.load_named_source("Nayakka").unwrap();
        let second = state.load_named_source("nayakka").unwrap();

        assert_eq!(first.dataset.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));

        let criteria = state.default_criteria(&first).unwrap();
        assert_eq!(criteria.low_stock_threshold, 10.0);
    }

    #[test]
    fn test_same_location_under_two_labels() {
        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Date,Item,Stock").unwrap();
        writeln!(temp_file, "2026-01-01,Tea,3").unwrap();
        temp_file.flush().unwrap();
        let location = temp_file.path().to_string_lossy().to_string();

        let state = AppState::new(AppConfig::default());
        let first = state.load_location("门店A", &location).unwrap();
        let second = state.load_location("门店B", &location).unwrap();
        let again = state.load_location("门店A", &location).unwrap();

        assert_eq!(first.source_label, "门店A");
        assert_eq!(second.source_label, "门店B");
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(state.cache.len(), 2);
    }

    #[test]
    fn test_unknown_source_is_config_error() {
        let state = AppState::new(AppConfig::default());
        let result = state.load_named_source("missing");
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::UnknownSource(_)))
        ));
    }
}
