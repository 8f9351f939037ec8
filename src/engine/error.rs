// ==========================================
// 库存快照系统 - 引擎层错误类型
// ==========================================

use thiserror::Error;

/// 查询错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("低库存阈值非法: {0}（必须为非负有限数）")]
    InvalidThreshold(f64),
}

/// 导出错误
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV 写入失败: {0}")]
    CsvWriteError(String),

    #[error("导出文件写入失败: {0}")]
    FileWriteError(String),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
pub type ExportResult<T> = Result<T, ExportError>;
