// ==========================================
// 库存快照系统 - 导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::{ImportReport, RawTable};
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// InventoryImporter Trait
// ==========================================
// 用途: 库存快照导入主接口
// 实现者: InventoryImporterImpl
pub trait InventoryImporter: Send + Sync {
    /// 导入已加载的原始表格
    ///
    /// # 参数
    /// - source_label: 数据源标识（写入报告）
    /// - table: 原始表格（只读）
    ///
    /// # 返回
    /// - Ok(ImportReport): 规范数据集 + 丢弃统计
    /// - Err: 形态判定失败
    ///
    /// # 导入流程（3个阶段）
    /// 1. 形态判定（LONG / WIDE）
    /// 2. 形态归一（WIDE 展开,期初列门控）
    /// 3. 记录校验（非法记录静默丢弃）
    fn import_table(&self, source_label: &str, table: &RawTable) -> ImportResult<ImportReport>;

    /// 从文件导入（.csv/.xlsx/.xls）
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport>;

    /// 从 CSV 文本导入（粘贴内容）
    fn import_csv_text(&self, source_label: &str, text: &str) -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}
