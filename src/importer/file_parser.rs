// ==========================================
// 库存快照系统 - 文件解析器实现
// ==========================================
// 职责: 文件/文本 → RawTable
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// ==========================================

use crate::domain::{CellValue, RawTable};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析 CSV（首行为表头）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers = normalize_headers(reader.headers()?.iter().map(|h| h.to_string()));
        let mut table = RawTable::new(headers);

        // 读取所有行
        for result in reader.records() {
            let record = result?;
            let row: HashMap<String, CellValue> = table
                .headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.clone(), CellValue::from_text(value)))
                .collect();

            // 跳过完全空白的行
            if row.values().all(CellValue::is_empty) {
                continue;
            }

            table.rows.push(row);
        }

        debug!(
            columns = table.headers.len(),
            rows = table.rows.len(),
            "CSV 解析完成"
        );
        Ok(table)
    }

    /// 从 CSV 文本解析（粘贴的表格内容）
    pub fn parse_str(&self, text: &str) -> ImportResult<RawTable> {
        self.parse_reader(text.as_bytes())
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        self.parse_reader(file)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers = normalize_headers(header_row.iter().map(|cell| excel_cell(cell).to_string()));
        let mut table = RawTable::new(headers);

        // 读取数据行
        for data_row in rows {
            let row: HashMap<String, CellValue> = table
                .headers
                .iter()
                .zip(data_row.iter())
                .map(|(header, cell)| (header.clone(), excel_cell(cell)))
                .collect();

            // 跳过完全空白的行
            if row.values().all(CellValue::is_empty) {
                continue;
            }

            table.rows.push(row);
        }

        debug!(
            sheet = %sheet_name,
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Excel 解析完成"
        );
        Ok(table)
    }
}

/// Excel 单元格 → CellValue（日期单元格转为 ISO 文本）
fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from_text(s),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if ndt.time() == chrono::NaiveTime::MIN => {
                CellValue::Text(ndt.date().format("%Y-%m-%d").to_string())
            }
            Some(ndt) => CellValue::Text(ndt.format("%Y-%m-%d %H:%M:%S").to_string()),
            None => CellValue::Empty,
        },
        Data::Error(_) => CellValue::Empty,
    }
}

/// 表头规范化
///
/// - 去除首尾空白
/// - 空表头命名为 "Unnamed: {列号}"
/// - 重复表头追加 ".1"、".2" 后缀
pub fn normalize_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers = Vec::new();

    for (idx, header) in raw.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            trimmed.to_string()
        };

        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{}.{}", base, count)
        };
        *count += 1;
        headers.push(name);
    }

    headers
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
