// ==========================================
// 库存快照系统 - 查询模型
// ==========================================
// 职责: 过滤条件、聚合指标、查询视图
// 生命周期: 每次查询临时构造,不持久化
// ==========================================

use crate::domain::record::CanonicalRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 默认低库存阈值
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 10.0;

// ==========================================
// FilterCriteria - 过滤条件
// ==========================================
// selected_items 为空 = 全部物品（不是"无物品"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub selected_date: Option<NaiveDate>,
    pub selected_items: BTreeSet<String>,
    pub low_stock_threshold: f64,
    pub show_low_stock_only: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            selected_date: None,
            selected_items: BTreeSet::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            show_low_stock_only: false,
        }
    }
}

impl FilterCriteria {
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_items = items.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    pub fn low_stock_only(mut self, enabled: bool) -> Self {
        self.show_low_stock_only = enabled;
        self
    }
}

// ==========================================
// AggregateMetrics - 聚合指标
// ==========================================
// 基于过滤后视图计算,不是原始数据集
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub total_items: usize,     // 视图内不同物品数
    pub total_stock: f64,       // 视图内库存合计（不去重）
    pub low_stock_count: usize, // 视图内低库存记录数
}

// ==========================================
// QueryView - 查询视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryView {
    pub criteria: FilterCriteria,
    pub records: Vec<CanonicalRecord>, // 过滤并按库存升序稳定排序
    pub metrics: AggregateMetrics,
}

// ==========================================
// QueryOutcome - 查询结果
// ==========================================
// 数据集为空时返回 NoData,不抛错
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryOutcome {
    NoData,
    View(QueryView),
}

impl QueryOutcome {
    pub fn view(&self) -> Option<&QueryView> {
        match self {
            QueryOutcome::NoData => None,
            QueryOutcome::View(view) => Some(view),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, QueryOutcome::NoData)
    }
}
