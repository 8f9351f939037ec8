// ==========================================
// 库存快照系统 - 库存导入器实现
// ==========================================
// 职责: 整合导入流程,从原始表格到规范数据集
// 流程: 形态判定 → 形态归一 → 记录校验
// ==========================================

use crate::domain::{ImportReport, RawTable};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::{CsvParser, UniversalFileParser};
use crate::importer::format_normalizer::FormatNormalizer;
use crate::importer::importer_trait::InventoryImporter;
use crate::importer::record_validator::RecordValidator;
use crate::importer::schema_detector::SchemaDetector;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// InventoryImporterImpl - 库存导入器实现
// ==========================================
// 无状态: 同一输入重复导入得到相同数据集
#[derive(Debug, Default, Clone, Copy)]
pub struct InventoryImporterImpl;

impl InventoryImporterImpl {
    pub fn new() -> Self {
        Self
    }
}

impl InventoryImporter for InventoryImporterImpl {
    #[instrument(skip(self, table), fields(batch_id))]
    fn import_table(&self, source_label: &str, table: &RawTable) -> ImportResult<ImportReport> {
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());
        info!(
            source = %source_label,
            columns = table.headers.len(),
            rows = table.row_count(),
            "开始导入库存快照"
        );

        // === 步骤 1: 形态判定 ===
        debug!("步骤 1: 形态判定");
        let decision = SchemaDetector.detect(table).map_err(|e| {
            error!(error = %e, headers = ?table.headers, "形态判定失败");
            e
        })?;
        let format = decision.format();
        info!(format = %format, "形态判定完成");

        // === 步骤 2: 形态归一 ===
        debug!("步骤 2: 形态归一");
        let drafts = FormatNormalizer.normalize(table, &decision);
        let draft_count = drafts.len();

        // === 步骤 3: 记录校验 ===
        debug!("步骤 3: 记录校验");
        let (dataset, dropped) = RecordValidator.validate(drafts);

        if dropped.total() > 0 {
            warn!(
                dropped = dropped.total(),
                invalid_date = dropped.invalid_date,
                invalid_stock = dropped.invalid_stock,
                empty_item = dropped.empty_item,
                "部分记录未通过校验,已丢弃"
            );
        }
        info!(
            drafts = draft_count,
            records = dataset.len(),
            "库存快照导入完成"
        );

        Ok(ImportReport {
            batch_id,
            source_label: source_label.to_string(),
            format,
            total_rows: table.row_count(),
            draft_count,
            dropped,
            dataset,
        })
    }

    fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let table = UniversalFileParser.parse(file_path)?;
        let label = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());
        self.import_table(&label, &table)
    }

    fn import_csv_text(&self, source_label: &str, text: &str) -> ImportResult<ImportReport> {
        let table = CsvParser.parse_str(text)?;
        self.import_table(source_label, &table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CanonicalRecord, DropSummary, TableFormat};
    use crate::importer::error::{ImportError, SchemaError};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_import_wide_csv_text() {
        let report = InventoryImporterImpl
            .import_csv_text("粘贴数据", "Item,2026-01-01,2026-01-02\nTea,5,\nCoffee,,8\n")
            .unwrap();

        assert_eq!(report.format, TableFormat::Wide);
        assert_eq!(report.source_label, "粘贴数据");
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.draft_count, 4);
        assert_eq!(report.dataset.len(), 2);
        assert_eq!(
            report.dropped,
            DropSummary {
                invalid_date: 0,
                invalid_stock: 2,
                empty_item: 0,
            }
        );
        assert_eq!(
            report.dataset.records(),
            &[
                CanonicalRecord::new(date(2026, 1, 1), "Tea", 5.0).unwrap(),
                CanonicalRecord::new(date(2026, 1, 2), "Coffee", 8.0).unwrap(),
            ]
        );
    }

    #[test]
    fn test_import_schema_error_surfaces() {
        let result = InventoryImporterImpl.import_csv_text("坏数据", "Foo,Bar\n1,2\n");
        assert!(matches!(
            result,
            Err(ImportError::Schema(SchemaError::NoDateOrRequiredColumns))
        ));
    }

    #[test]
    fn test_batch_ids_are_unique() {
        let text = "Date,Item,Stock\n2026-01-01,Tea,5\n";
        let a = InventoryImporterImpl.import_csv_text("a", text).unwrap();
        let b = InventoryImporterImpl.import_csv_text("a", text).unwrap();

        assert_ne!(a.batch_id, b.batch_id);
        assert_eq!(a.dataset, b.dataset);
    }
}
