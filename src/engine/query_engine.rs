// ==========================================
// 库存快照系统 - 查询引擎
// ==========================================
// 职责: 日期过滤 → 物品过滤 → 低库存过滤 → 排序 → 指标
// 红线: 纯函数,不修改输入数据集,不保留跨调用状态
// ==========================================

use crate::domain::{
    AggregateMetrics, CanonicalRecord, FilterCriteria, NormalizedDataset, QueryOutcome, QueryView,
};
use crate::engine::error::{QueryError, QueryResult};
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

// ==========================================
// QueryEngine - 查询引擎
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryEngine {
    // 无状态引擎,不需要注入依赖
}

impl QueryEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 主入口
    // ==========================================

    /// 执行完整查询
    ///
    /// # 组合顺序（不可调换）
    /// 1) 日期过滤
    /// 2) 物品过滤
    /// 3) 低库存过滤（可选）
    /// 4) 按库存升序稳定排序
    /// 5) 基于同一视图计算指标
    ///
    /// # 返回
    /// - Ok(QueryOutcome::NoData): 数据集为空
    /// - Ok(QueryOutcome::View): 过滤视图 + 指标
    /// - Err(QueryError): 阈值非法
    pub fn run(
        &self,
        dataset: &NormalizedDataset,
        criteria: &FilterCriteria,
    ) -> QueryResult<QueryOutcome> {
        validate_threshold(criteria.low_stock_threshold)?;

        if dataset.is_empty() {
            debug!("数据集为空,返回 NoData");
            return Ok(QueryOutcome::NoData);
        }

        let view = self.filter_by_date(dataset.records(), criteria.selected_date);
        let view = self.filter_by_items(&view, &criteria.selected_items);
        let view = self.apply_low_stock_filter(
            &view,
            criteria.low_stock_threshold,
            criteria.show_low_stock_only,
        );
        let view = self.sort_by_stock(view);
        let metrics = self.aggregate(&view, criteria.low_stock_threshold);

        debug!(
            dataset = dataset.len(),
            view = view.len(),
            total_items = metrics.total_items,
            low_stock = metrics.low_stock_count,
            "查询完成"
        );

        Ok(QueryOutcome::View(QueryView {
            criteria: criteria.clone(),
            records: view,
            metrics,
        }))
    }

    // ==========================================
    // 过滤阶段
    // ==========================================

    /// 按日期过滤（None 时不过滤）
    pub fn filter_by_date(
        &self,
        records: &[CanonicalRecord],
        date: Option<NaiveDate>,
    ) -> Vec<CanonicalRecord> {
        match date {
            None => records.to_vec(),
            Some(date) => records.iter().filter(|r| r.date == date).cloned().collect(),
        }
    }

    /// 按物品过滤（空集合 = 全部物品）
    pub fn filter_by_items(
        &self,
        records: &[CanonicalRecord],
        items: &BTreeSet<String>,
    ) -> Vec<CanonicalRecord> {
        if items.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| items.contains(&r.item))
            .cloned()
            .collect()
    }

    /// 低库存判定（严格小于,等于阈值不算低库存）
    pub fn classify_low_stock(&self, record: &CanonicalRecord, threshold: f64) -> bool {
        record.stock < threshold
    }

    /// 低库存过滤（enabled = false 时不过滤）
    pub fn apply_low_stock_filter(
        &self,
        records: &[CanonicalRecord],
        threshold: f64,
        enabled: bool,
    ) -> Vec<CanonicalRecord> {
        if !enabled {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|r| self.classify_low_stock(r, threshold))
            .cloned()
            .collect()
    }

    /// 按库存升序稳定排序（库存相同保持输入相对顺序）
    pub fn sort_by_stock(&self, mut records: Vec<CanonicalRecord>) -> Vec<CanonicalRecord> {
        // 库存均为有限数; 0.0 与 -0.0 视为相等
        records.sort_by(|a, b| a.stock.partial_cmp(&b.stock).unwrap_or(Ordering::Equal));
        records
    }

    // ==========================================
    // 指标
    // ==========================================

    /// 计算聚合指标（基于传入视图,不是原始数据集）
    pub fn aggregate(&self, records: &[CanonicalRecord], threshold: f64) -> AggregateMetrics {
        let distinct: HashSet<&str> = records.iter().map(|r| r.item.as_str()).collect();

        AggregateMetrics {
            total_items: distinct.len(),
            total_stock: records.iter().map(|r| r.stock).sum(),
            low_stock_count: records
                .iter()
                .filter(|r| self.classify_low_stock(r, threshold))
                .count(),
        }
    }

    // ==========================================
    // 选择器辅助
    // ==========================================

    /// 可选日期（升序去重）
    pub fn available_dates(&self, dataset: &NormalizedDataset) -> Vec<NaiveDate> {
        dataset
            .iter()
            .map(|r| r.date)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 最新可用日期（数据集为空时为 None）
    pub fn latest_available_date(&self, dataset: &NormalizedDataset) -> Option<NaiveDate> {
        dataset.iter().map(|r| r.date).max()
    }

    /// 视图内可选物品（升序去重）
    pub fn available_items(&self, records: &[CanonicalRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.item.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 默认过滤条件: 日期取最新可用日期
    ///
    /// # 返回
    /// - Some(FilterCriteria): 数据集非空
    /// - None: 无可用日期
    pub fn default_criteria(
        &self,
        dataset: &NormalizedDataset,
        threshold: f64,
    ) -> Option<FilterCriteria> {
        self.latest_available_date(dataset).map(|date| {
            FilterCriteria::default()
                .with_date(date)
                .with_threshold(threshold)
        })
    }
}

fn validate_threshold(threshold: f64) -> QueryResult<()> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(QueryError::InvalidThreshold(threshold));
    }
    Ok(())
}
