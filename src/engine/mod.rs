// ==========================================
// 库存快照系统 - 引擎层
// ==========================================
// 职责: 规范数据集上的查询、聚合与导出
// 红线: 纯函数,不修改数据集
// ==========================================

pub mod error;
pub mod export;
pub mod query_engine;

// 重导出核心引擎
pub use error::{ExportError, ExportResult, QueryError, QueryResult};
pub use export::{export_csv, export_csv_to_path, format_stock, DEFAULT_EXPORT_FILE_NAME};
pub use query_engine::QueryEngine;
