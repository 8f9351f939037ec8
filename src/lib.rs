// ==========================================
// 库存快照系统 - 核心库
// ==========================================
// 职责: 多形态库存表格 → 规范数据集 → 过滤/聚合/导出
// 系统定位: 库存看板的数据内核（无 UI,无全局状态）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 表格与记录
pub mod domain;

// 导入层 - 形态判定 / 归一 / 校验
pub mod importer;

// 引擎层 - 查询与导出
pub mod engine;

// 配置层 - 应用配置
pub mod config;

// 日志系统
pub mod logging;

// 应用层 - 状态组装 / 会话 / 缓存
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregateMetrics, CanonicalRecord, CellValue, DropSummary, FilterCriteria, FormatDecision,
    ImportReport, NormalizedDataset, QueryOutcome, QueryView, RawTable, TableFormat,
};

// 导入
pub use importer::{
    ImportError, ImportResult, InventoryImporter, InventoryImporterImpl, SchemaError,
};

// 引擎
pub use engine::{export_csv, QueryEngine, QueryError};

// 应用
pub use app::{AppError, AppState, Session};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存快照系统";
