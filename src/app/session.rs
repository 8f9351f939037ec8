// ==========================================
// 库存快照系统 - 会话状态
// ==========================================
// 职责: 持有当前数据集与数据源标识（调用方所有,无全局状态）
// 红线: 导入失败时保留上一次成功导入的数据集
// ==========================================

use crate::domain::{FilterCriteria, ImportReport, NormalizedDataset, QueryOutcome};
use crate::engine::{QueryEngine, QueryResult};
use crate::importer::ImportResult;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Default, Clone)]
pub struct Session {
    current: Option<Arc<ImportReport>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前导入结果
    pub fn current(&self) -> Option<&ImportReport> {
        self.current.as_deref()
    }

    /// 当前数据源标识
    pub fn source_label(&self) -> Option<&str> {
        self.current().map(|r| r.source_label.as_str())
    }

    /// 当前数据集
    pub fn dataset(&self) -> Option<&NormalizedDataset> {
        self.current().map(|r| &r.dataset)
    }

    /// 执行导入并替换当前数据集
    ///
    /// # 返回
    /// - Ok: 新的导入结果（已成为当前数据集）
    /// - Err: 导入失败,当前数据集保持不变
    pub fn replace_with<F>(&mut self, load: F) -> ImportResult<&ImportReport>
    where
        F: FnOnce() -> ImportResult<Arc<ImportReport>>,
    {
        let report = load().map_err(|e| {
            warn!(
                error = %e,
                kept = ?self.source_label(),
                "导入失败,保留上一次数据集"
            );
            e
        })?;
        Ok(&**self.current.insert(report))
    }

    /// 在当前数据集上查询（未导入时返回 NoData）
    pub fn query(
        &self,
        engine: &QueryEngine,
        criteria: &FilterCriteria,
    ) -> QueryResult<QueryOutcome> {
        match self.dataset() {
            Some(dataset) => engine.run(dataset, criteria),
            None => engine.run(&NormalizedDataset::default(), criteria),
        }
    }
}
