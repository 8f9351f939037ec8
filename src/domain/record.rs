// ==========================================
// 库存快照系统 - 库存记录模型
// ==========================================
// 用途: 导入层写入,查询层只读
// 红线: NormalizedDataset 内每条记录满足规范记录不变量
// ==========================================

use crate::domain::table::CellValue;
use crate::domain::types::TableFormat;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// DraftRecord - 导入中间结构体
// ==========================================
// 生命周期: 仅在 形态归一 → 记录校验 之间
// 三个字段均未解析,可能为 Empty
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DraftRecord {
    pub date: CellValue,
    pub item: CellValue,
    pub stock: CellValue,
    pub row_number: usize, // 源表行号（1 起,不含表头）
}

// ==========================================
// CanonicalRecord - 规范库存记录
// ==========================================
// 不变量: date 为合法日历日期; item 去空白后非空; stock 为有限数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub date: NaiveDate,
    pub item: String,
    pub stock: f64,
}

impl CanonicalRecord {
    /// 构造并校验不变量
    ///
    /// # 返回
    /// - Some: 满足不变量
    /// - None: 物品为空或库存非有限数
    pub fn new(date: NaiveDate, item: &str, stock: f64) -> Option<Self> {
        let item = item.trim();
        if item.is_empty() || !stock.is_finite() {
            return None;
        }
        Some(Self {
            date,
            item: item.to_string(),
            stock,
        })
    }
}

// ==========================================
// NormalizedDataset - 规范数据集
// ==========================================
// 顺序: 归一器稳定输出顺序; 构造后不可变,无更新操作
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedDataset {
    records: Vec<CanonicalRecord>,
}

impl NormalizedDataset {
    pub(crate) fn from_records(records: Vec<CanonicalRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalRecord> {
        self.records.iter()
    }
}

impl FromIterator<CanonicalRecord> for NormalizedDataset {
    fn from_iter<T: IntoIterator<Item = CanonicalRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a NormalizedDataset {
    type Item = &'a CanonicalRecord;
    type IntoIter = std::slice::Iter<'a, CanonicalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ==========================================
// DropSummary - 丢弃统计
// ==========================================
// 按首个失败原因归类: 日期 → 库存 → 物品
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropSummary {
    pub invalid_date: usize,
    pub invalid_stock: usize,
    pub empty_item: usize,
}

impl DropSummary {
    pub fn total(&self) -> usize {
        self.invalid_date + self.invalid_stock + self.empty_item
    }
}

// ==========================================
// ImportReport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,       // 导入批次 ID（UUID v4）
    pub source_label: String,   // 数据源标识
    pub format: TableFormat,    // 判定的表格形态
    pub total_rows: usize,      // 源表行数
    pub draft_count: usize,     // 归一后草稿记录数
    pub dropped: DropSummary,   // 校验丢弃统计
    pub dataset: NormalizedDataset,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_canonical_record_trims_item() {
        let record = CanonicalRecord::new(date(2026, 1, 1), "  Tea ", 5.0).unwrap();
        assert_eq!(record.item, "Tea");
    }

    #[test]
    fn test_canonical_record_rejects_invalid() {
        assert!(CanonicalRecord::new(date(2026, 1, 1), "   ", 5.0).is_none());
        assert!(CanonicalRecord::new(date(2026, 1, 1), "Tea", f64::NAN).is_none());
        assert!(CanonicalRecord::new(date(2026, 1, 1), "Tea", f64::INFINITY).is_none());
        assert!(CanonicalRecord::new(date(2026, 1, 1), "Tea", -3.5).is_some());
    }

    #[test]
    fn test_drop_summary_total() {
        let summary = DropSummary {
            invalid_date: 1,
            invalid_stock: 2,
            empty_item: 3,
        };
        assert_eq!(summary.total(), 6);
    }
}
