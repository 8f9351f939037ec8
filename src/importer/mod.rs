// ==========================================
// 库存快照系统 - 导入层
// ==========================================
// 职责: 外部表格 → 规范库存数据集
// 支持: CSV, Excel, 粘贴文本, 在线表格
// ==========================================

// 模块声明
pub mod date_grammar;
pub mod error;
pub mod file_parser;
pub mod format_normalizer;
pub mod importer_trait;
pub mod inventory_importer_impl;
pub mod record_validator;
pub mod schema_detector;
pub mod sheet_url;
pub mod source_loader;

// 重导出核心类型
pub use date_grammar::{is_date_header, parse_calendar_date};
pub use error::{ImportError, ImportResult, SchemaError};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use format_normalizer::FormatNormalizer;
pub use inventory_importer_impl::InventoryImporterImpl;
pub use record_validator::{parse_stock_text, RecordValidator};
pub use schema_detector::SchemaDetector;
pub use sheet_url::rewrite_sheet_url;
pub use source_loader::SourceLoader;

// 重导出 Trait 接口
pub use importer_trait::{FileParser, InventoryImporter};
