// ==========================================
// 库存快照系统 - 记录校验器
// ==========================================
// 职责: 草稿记录 → 规范记录（日期/库存/物品三项校验）
// 策略: 任一项失败即整条丢弃,不修补,不填默认值
// ==========================================

use crate::domain::record::DraftRecord;
use crate::domain::{CanonicalRecord, CellValue, DropSummary, NormalizedDataset};
use crate::importer::date_grammar::parse_calendar_date;
use chrono::NaiveDate;
use tracing::{debug, trace};

pub struct RecordValidator;

impl RecordValidator {
    /// 校验草稿记录
    ///
    /// # 返回
    /// - NormalizedDataset: 通过校验的记录（保持相对顺序）
    /// - DropSummary: 按首个失败原因统计的丢弃数
    pub(crate) fn validate(&self, drafts: Vec<DraftRecord>) -> (NormalizedDataset, DropSummary) {
        let mut summary = DropSummary::default();
        let mut records = Vec::with_capacity(drafts.len());

        for draft in drafts {
            let Some(date) = parse_date_cell(&draft.date) else {
                trace!(row = draft.row_number, value = %draft.date, "日期无法解析,丢弃");
                summary.invalid_date += 1;
                continue;
            };
            let Some(stock) = parse_stock_cell(&draft.stock) else {
                trace!(row = draft.row_number, value = %draft.stock, "库存无法解析,丢弃");
                summary.invalid_stock += 1;
                continue;
            };
            let Some(item) = draft.item.as_trimmed_text() else {
                trace!(row = draft.row_number, "物品为空,丢弃");
                summary.empty_item += 1;
                continue;
            };

            records.push(CanonicalRecord { date, item, stock });
        }

        debug!(
            kept = records.len(),
            dropped = summary.total(),
            invalid_date = summary.invalid_date,
            invalid_stock = summary.invalid_stock,
            empty_item = summary.empty_item,
            "记录校验完成"
        );

        (NormalizedDataset::from_records(records), summary)
    }
}

/// 日期单元格（仅文本,数值不视为日期）
fn parse_date_cell(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Text(s) => parse_calendar_date(s),
        CellValue::Number(_) | CellValue::Empty => None,
    }
}

/// 库存单元格
fn parse_stock_cell(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Number(_) | CellValue::Empty => None,
        CellValue::Text(s) => parse_stock_text(s),
    }
}

/// 解析库存文本
///
/// 接受首尾空白与千分位逗号（整数部分按 3 位分组）; 结果必须为有限数
pub fn parse_stock_text(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    let cleaned = if value.contains(',') {
        strip_thousands_separators(value)?
    } else {
        value.to_string()
    };

    // f64::from_str 接受 "inf"/"NaN",需排除
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn strip_thousands_separators(value: &str) -> Option<String> {
    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value.strip_prefix('+').unwrap_or(value)),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let groups: Vec<&str> = int_part.split(',').collect();
    let head_ok = matches!(groups.first(), Some(g) if (1..=3).contains(&g.len()));
    let tail_ok = groups[1..].iter().all(|g| g.len() == 3);
    let digits_ok = groups.iter().all(|g| g.bytes().all(|b| b.is_ascii_digit()));
    if !head_ok || !tail_ok || !digits_ok {
        return None;
    }

    let mut out = format!("{}{}", sign, groups.concat());
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(date: CellValue, item: CellValue, stock: CellValue) -> DraftRecord {
        DraftRecord {
            date,
            item,
            stock,
            row_number: 1,
        }
    }

    #[test]
    fn test_valid_record_trimmed() {
        let (dataset, summary) = RecordValidator.validate(vec![draft(
            "2026-01-01".into(),
            " Tea ".into(),
            "5".into(),
        )]);

        assert_eq!(summary.total(), 0);
        assert_eq!(dataset.len(), 1);
        let record = &dataset.records()[0];
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(record.item, "Tea");
        assert_eq!(record.stock, 5.0);
    }

    #[test]
    fn test_drop_reasons_counted_by_first_failure() {
        let drafts = vec![
            draft("not a date".into(), CellValue::Empty, CellValue::Empty),
            draft("2026-01-01".into(), "Tea".into(), "abc".into()),
            draft("2026-01-01".into(), "   ".into(), "4".into()),
            draft("2026-01-01".into(), "Milk".into(), CellValue::Number(2.5)),
        ];

        let (dataset, summary) = RecordValidator.validate(drafts);

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records()[0].item, "Milk");
        assert_eq!(
            summary,
            DropSummary {
                invalid_date: 1,
                invalid_stock: 1,
                empty_item: 1,
            }
        );
    }

    #[test]
    fn test_numeric_date_cell_rejected() {
        let (dataset, summary) = RecordValidator.validate(vec![draft(
            CellValue::Number(20260101.0),
            "Tea".into(),
            "1".into(),
        )]);
        assert!(dataset.is_empty());
        assert_eq!(summary.invalid_date, 1);
    }

    #[test]
    fn test_numeric_item_rendered() {
        let (dataset, _) = RecordValidator.validate(vec![draft(
            "2026-01-01".into(),
            CellValue::Number(1001.0),
            "1".into(),
        )]);
        assert_eq!(dataset.records()[0].item, "1001");
    }

    #[test]
    fn test_parse_stock_text() {
        assert_eq!(parse_stock_text(" 12 "), Some(12.0));
        assert_eq!(parse_stock_text("-3.25"), Some(-3.25));
        assert_eq!(parse_stock_text("1,234.5"), Some(1234.5));
        assert_eq!(parse_stock_text("-12,000"), Some(-12000.0));
        assert_eq!(parse_stock_text("0"), Some(0.0));
        assert_eq!(parse_stock_text("1,2"), None);
        assert_eq!(parse_stock_text("12,34,567"), None);
        assert_eq!(parse_stock_text("inf"), None);
        assert_eq!(parse_stock_text("NaN"), None);
        assert_eq!(parse_stock_text("5 kg"), None);
        assert_eq!(parse_stock_text(""), None);
    }

    #[test]
    fn test_non_finite_number_cell_rejected() {
        let (dataset, summary) = RecordValidator.validate(vec![draft(
            "2026-01-01".into(),
            "Tea".into(),
            CellValue::Number(f64::NAN),
        )]);
        assert!(dataset.is_empty());
        assert_eq!(summary.invalid_stock, 1);
    }
}
