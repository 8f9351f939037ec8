// ==========================================
// 库存快照系统 - 领域模型层
// ==========================================
// 职责: 定义原始表格、库存记录、查询模型
// 红线: 不含解析逻辑,不含查询逻辑
// ==========================================

pub mod query;
pub mod record;
pub mod table;
pub mod types;

// 重导出核心类型
pub use query::{
    AggregateMetrics, FilterCriteria, QueryOutcome, QueryView, DEFAULT_LOW_STOCK_THRESHOLD,
};
pub use record::{CanonicalRecord, DropSummary, ImportReport, NormalizedDataset};
pub use table::{CellValue, RawTable};
pub use types::{FormatDecision, TableFormat};
