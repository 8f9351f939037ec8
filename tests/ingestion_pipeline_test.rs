// ==========================================
// 导入流水线集成测试
// ==========================================
// 测试目标: 文件/文本 → 形态判定 → 归一 → 校验 → 规范数据集
// ==========================================


use smart_inventory::importer::{
    CsvParser, FileParser, ImportError, InventoryImporter, InventoryImporterImpl, SchemaError,
    SourceLoader, UniversalFileParser,
};
use smart_inventory::logging;
use smart_inventory::{DropSummary, TableFormat};
use test_helpers::{date, record, write_temp_csv, write_temp_file, LONG_CSV, WIDE_CSV};

// ==========================================
// LONG 形态
// ==========================================

#[test]
fn test_long_import_trims_items_and_drops_invalid_rows() {
    logging::init_test();

    let report = InventoryImporterImpl
        .import_csv_text("粘贴数据", LONG_CSV)
        .unwrap();

    assert_eq!(report.format, TableFormat::Long);
    assert_eq!(report.total_rows, 7);
    assert_eq!(report.draft_count, 7);
    assert_eq!(
        report.dropped,
        DropSummary {
            invalid_date: 1,
            invalid_stock: 1,
            empty_item: 1,
        }
    );
    assert_eq!(
        report.dataset.records(),
        &[
            record(date(2026, 1, 1), "Tea", 5.0),
            record(date(2026, 1, 1), "Coffee", 12.0),
            record(date(2026, 1, 2), "Tea", 9.999),
            record(date(2026, 1, 2), "Coffee", 10.0),
        ]
    );
}

#[test]
fn test_long_headers_match_case_insensitively() {
    let report = InventoryImporterImpl
        .import_csv_text("t", " DATE ,item,Stock\n2026-03-04,Tea,1,200\n")
        .unwrap();

    // 逗号在 CSV 中拆分列,多余列不影响 LONG 判定
    assert_eq!(report.format, TableFormat::Long);
    assert_eq!(report.dataset.len(), 1);
    assert_eq!(report.dataset.records()[0].stock, 1.0);
}

#[test]
fn test_thousands_separator_in_quoted_stock() {
    let report = InventoryImporterImpl
        .import_csv_text("t", "Date,Item,Stock\n2026-03-04,Tea,\"1,200\"\n")
        .unwrap();

    assert_eq!(report.dataset.records()[0].stock, 1200.0);
}

// ==========================================
// WIDE 形态
// ==========================================

#[test]
fn test_wide_import_applies_gating_and_row_major_order() {
    logging::init_test();

    let report = InventoryImporterImpl
        .import_csv_text("粘贴数据", WIDE_CSV)
        .unwrap();

    assert_eq!(report.format, TableFormat::Wide);
    assert_eq!(report.total_rows, 3);
    // Coffee 期初为空,整行不展开
    assert_eq!(report.draft_count, 4);
    assert_eq!(report.dropped.invalid_stock, 2);
    assert_eq!(
        report.dataset.records(),
        &[
            record(date(2026, 1, 1), "Tea", 5.0),
            record(date(2026, 1, 2), "Sugar", 3.0),
        ]
    );
}

#[test]
fn test_wide_without_gating_column_expands_every_row() {
    let report = InventoryImporterImpl
        .import_csv_text("t", "Item Name,2026-01-01,2026-01-02\nTea,1,2\nCoffee,3,4\n")
        .unwrap();

    assert_eq!(report.format, TableFormat::Wide);
    let items: Vec<&str> = report
        .dataset
        .iter()
        .map(|r| r.item.as_str())
        .collect();
    assert_eq!(items, vec!["Tea", "Tea", "Coffee", "Coffee"]);
}

// ==========================================
// 形态判定失败
// ==========================================

#[test]
fn test_unrecognized_headers_fail_schema_detection() {
    let result = InventoryImporterImpl.import_csv_text("t", "Foo,Bar\n1,2\n");
    assert!(matches!(
        result,
        Err(ImportError::Schema(SchemaError::NoDateOrRequiredColumns))
    ));
}

#[test]
fn test_date_columns_without_item_column_fail() {
    let result = InventoryImporterImpl.import_csv_text("t", "Name,2026-01-01\nTea,5\n");
    assert!(matches!(
        result,
        Err(ImportError::Schema(SchemaError::NoItemColumn))
    ));
}

// ==========================================
// 幂等性
// ==========================================

#[test]
fn test_repeated_import_yields_same_dataset() {
    let first = InventoryImporterImpl.import_csv_text("t", WIDE_CSV).unwrap();
    let second = InventoryImporterImpl.import_csv_text("t", WIDE_CSV).unwrap();

    assert_eq!(first.dataset, second.dataset);
    assert_eq!(first.dropped, second.dropped);
    assert_ne!(first.batch_id, second.batch_id);
}

// ==========================================
// 文件路径
// ==========================================

#[test]
fn test_import_file_matches_text_import() {
    let temp_file = write_temp_csv(LONG_CSV).unwrap();

    let from_file = InventoryImporterImpl.import_file(temp_file.path()).unwrap();
    let from_text = InventoryImporterImpl.import_csv_text("t", LONG_CSV).unwrap();

    assert_eq!(from_file.dataset, from_text.dataset);
    assert!(from_file.source_label.ends_with(".csv"));
}

#[test]
fn test_csv_parser_and_universal_parser_agree() {
    let temp_file = write_temp_csv(WIDE_CSV).unwrap();

    let direct = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();
    let dispatched = UniversalFileParser.parse(temp_file.path()).unwrap();

    assert_eq!(direct.headers, dispatched.headers);
    assert_eq!(direct.row_count(), 3);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let temp_file = write_temp_file("Date,Item,Stock\n", ".txt").unwrap();
    let result = InventoryImporterImpl.import_file(temp_file.path());
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_missing_file_is_rejected() {
    let result = InventoryImporterImpl.import_file(std::path::Path::new("/no/such/stock.csv"));
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_source_loader_reads_local_csv() {
    let temp_file = write_temp_csv(WIDE_CSV).unwrap();
    let location = temp_file.path().to_string_lossy().to_string();

    let table = SourceLoader::default().load(&location).unwrap();
    let report = InventoryImporterImpl.import_table("本地", &table).unwrap();

    assert_eq!(report.dataset.len(), 2);
}

#[test]
fn test_short_year_headers_are_not_date_columns() {
    let result =
        InventoryImporterImpl.import_csv_text("t", "Item,01-Jan-26,1-1-1\nTea,5,6\n");
    assert!(matches!(
        result,
        Err(ImportError::Schema(SchemaError::NoDateOrRequiredColumns))
    ));
}
