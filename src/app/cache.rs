// ==========================================
// 库存快照系统 - 数据集缓存
// ==========================================
// 键: 数据源标识; 条目在固定时效后过期
// 加载在锁外执行,同一键的并发加载无需协调（重算幂等）
// 加载失败不缓存
// ==========================================

use crate::domain::ImportReport;
use crate::importer::ImportResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tracing::debug;

struct CacheEntry {
    loaded_at: Instant,
    report: Arc<ImportReport>,
}

pub struct DatasetCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl DatasetCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 命中未过期条目则直接返回,否则调用 load 并写入缓存
    pub fn get_or_load<F>(&self, key: &str, load: F) -> ImportResult<Arc<ImportReport>>
    where
        F: FnOnce() -> ImportResult<ImportReport>,
    {
        self.get_or_load_at(key, Instant::now(), load)
    }

    /// 以指定时刻判定过期（测试注入时钟）
    pub fn get_or_load_at<F>(
        &self,
        key: &str,
        now: Instant,
        load: F,
    ) -> ImportResult<Arc<ImportReport>>
    where
        F: FnOnce() -> ImportResult<ImportReport>,
    {
        if let Some(entry) = self.lock().get(key) {
            if now.saturating_duration_since(entry.loaded_at) < self.ttl {
                debug!(key, "缓存命中");
                return Ok(Arc::clone(&entry.report));
            }
        }

        debug!(key, "缓存未命中或已过期,重新加载");
        let report = Arc::new(load()?);
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                loaded_at: now,
                report: Arc::clone(&report),
            },
        );
        Ok(report)
    }

    pub fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // 缓存内容可整体重算,锁中毒时沿用内部数据
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DropSummary, NormalizedDataset, TableFormat};
    use crate::importer::{ImportError, SchemaError};
    use std::cell::Cell;

    fn report(label: &str) -> ImportReport {
        ImportReport {
            batch_id: format!("batch-{}", label),
            source_label: label.to_string(),
            format: TableFormat::Long,
            total_rows: 0,
            draft_count: 0,
            dropped: DropSummary::default(),
            dataset: NormalizedDataset::default(),
        }
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = DatasetCache::new(Duration::from_secs(600));
        let start = Instant::now();
        let loads = Cell::new(0);

        for offset in [0, 10, 599] {
            let got = cache
                .get_or_load_at("cafe", start + Duration::from_secs(offset), || {
                    loads.set(loads.get() + 1);
                    Ok(report("cafe"))
                })
                .unwrap();
            assert_eq!(got.source_label, "cafe");
        }

        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_reload_after_expiry() {
        let cache = DatasetCache::new(Duration::from_secs(600));
        let start = Instant::now();
        let loads = Cell::new(0);
        let load = || {
            loads.set(loads.get() + 1);
            Ok(report("cafe"))
        };

        cache.get_or_load_at("cafe", start, load).unwrap();
        cache
            .get_or_load_at("cafe", start + Duration::from_secs(600), load)
            .unwrap();

        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_keys_are_independent() {
        let cache = DatasetCache::new(Duration::from_secs(60));
        cache.get_or_load("a", || Ok(report("a"))).unwrap();
        let b = cache.get_or_load("b", || Ok(report("b"))).unwrap();

        assert_eq!(b.source_label, "b");
        assert_eq!(cache.len(), 2);

        cache.invalidate("a");
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_failed_load_not_cached() {
        let cache = DatasetCache::new(Duration::from_secs(60));
        let result = cache.get_or_load("bad", || {
            Err(ImportError::Schema(SchemaError::NoItemColumn))
        });

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
