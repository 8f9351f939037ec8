// ==========================================
// 库存快照系统 - 导出契约
// ==========================================
// 格式: UTF-8 CSV,表头 Date,Item,Stock
// Date: YYYY-MM-DD; Stock: 0 位小数（仅文本层,内部数值不取整）
// 行顺序 = 视图顺序
// ==========================================

use crate::domain::CanonicalRecord;
use crate::engine::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use std::path::Path;
use tracing::info;

pub const EXPORT_HEADERS: [&str; 3] = ["Date", "Item", "Stock"];
pub const DEFAULT_EXPORT_FILE_NAME: &str = "inventory_snapshot.csv";

/// 库存显示格式（0 位小数）
pub fn format_stock(stock: f64) -> String {
    format!("{:.0}", stock)
}

/// 视图 → CSV 文本
pub fn export_csv(records: &[CanonicalRecord]) -> ExportResult<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;

    for record in records {
        let date = record.date.format("%Y-%m-%d").to_string();
        let stock = format_stock(record.stock);
        writer.write_record([date.as_str(), record.item.as_str(), stock.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::CsvWriteError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::CsvWriteError(e.to_string()))
}

/// 视图 → CSV 文件
pub fn export_csv_to_path(records: &[CanonicalRecord], path: &Path) -> ExportResult<()> {
    let text = export_csv(records)?;
    std::fs::write(path, text)?;
    info!(path = %path.display(), rows = records.len(), "导出完成");
    Ok(())
}
