// ==========================================
// 库存快照系统 - 应用层错误类型
// ==========================================
// 职责: 汇总配置/导入/查询/导出错误,供入口统一展示
// ==========================================

use crate::config::ConfigError;
use crate::engine::{ExportError, QueryError};
use crate::importer::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("查询失败: {0}")]
    Query(#[from] QueryError),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),
}

pub type AppResult<T> = Result<T, AppError>;
