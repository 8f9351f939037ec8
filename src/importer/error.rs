// ==========================================
// 库存快照系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 单元格级解析失败不属于错误（静默丢弃,见 record_validator）
// ==========================================

use thiserror::Error;

/// 表格形态判定错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("未找到日期列,也不满足 Date/Item/Stock 长表格式")]
    NoDateOrRequiredColumns,

    #[error("未找到物品列（表头需包含 \"item\"）")]
    NoItemColumn,
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据源错误 =====
    #[error("数据源地址无效: {0}")]
    InvalidSourceUrl(String),

    #[error("远程数据获取失败 ({url}): {message}")]
    RemoteFetchError { url: String, message: String },

    // ===== 形态判定错误 =====
    #[error(transparent)]
    Schema(#[from] SchemaError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<url::ParseError>
impl From<url::ParseError> for ImportError {
    fn from(err: url::ParseError) -> Self {
        ImportError::InvalidSourceUrl(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_is_transparent() {
        let err: ImportError = SchemaError::NoItemColumn.into();
        assert_eq!(err.to_string(), SchemaError::NoItemColumn.to_string());
        assert!(matches!(err, ImportError::Schema(SchemaError::NoItemColumn)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "磁盘故障");
        let err: ImportError = io.into();
        assert!(matches!(err, ImportError::FileReadError(_)));
        assert!(err.to_string().contains("磁盘故障"));
    }
}
