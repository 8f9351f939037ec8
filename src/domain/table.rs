// ==========================================
// 库存快照系统 - 原始表格模型
// ==========================================
// 用途: 外部加载器产出,导入管道只读
// 单元格: 文本 / 数值 / 空 三态,类型判定全部推迟到校验阶段
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// 从原始文本构造（空白文本视为 Empty）
    pub fn from_text(raw: &str) -> Self {
        if raw.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    /// 是否为空（Empty 或纯空白文本）
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 去除首尾空白后的文本表示
    ///
    /// # 返回
    /// - Some(String): 非空文本（数值按最短形式渲染,整数不带小数部分）
    /// - None: 空值
    pub fn as_trimmed_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => Some(render_number(*n)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", render_number(*n)),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from_text(&value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

fn render_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// RawTable - 原始表格
// ==========================================
// 表头保持原始顺序; 行为 表头 → 单元格 映射
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, CellValue>>,
}

impl RawTable {
    /// 创建空表
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// 按表头顺序追加一行（多余的单元格被忽略,缺少的视为缺失）
    pub fn push_row<I, V>(&mut self, cells: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let mut row = HashMap::with_capacity(self.headers.len());
        for (header, cell) in self.headers.iter().zip(cells) {
            row.entry(header.clone()).or_insert_with(|| cell.into());
        }
        self.rows.push(row);
    }

    /// 读取单元格（缺失列与 Empty 等价）
    pub fn cell<'a>(row: &'a HashMap<String, CellValue>, header: &str) -> &'a CellValue {
        row.get(header).unwrap_or(&CellValue::Empty)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_blank_is_empty() {
        assert_eq!(CellValue::from_text("   "), CellValue::Empty);
        assert_eq!(CellValue::from_text(""), CellValue::Empty);
        assert_eq!(
            CellValue::from_text(" Tea "),
            CellValue::Text(" Tea ".to_string())
        );
    }

    #[test]
    fn test_as_trimmed_text() {
        assert_eq!(
            CellValue::Text("  Coffee ".to_string()).as_trimmed_text(),
            Some("Coffee".to_string())
        );
        assert_eq!(CellValue::Number(12.0).as_trimmed_text(), Some("12".to_string()));
        assert_eq!(CellValue::Number(1.5).as_trimmed_text(), Some("1.5".to_string()));
        assert_eq!(CellValue::Empty.as_trimmed_text(), None);
    }

    #[test]
    fn test_push_row_pads_missing_cells() {
        let mut table = RawTable::new(vec!["Item".to_string(), "2026-01-01".to_string()]);
        table.push_row(vec!["Tea"]);

        assert_eq!(table.row_count(), 1);
        assert_eq!(RawTable::cell(&table.rows[0], "2026-01-01"), &CellValue::Empty);
        assert_eq!(
            RawTable::cell(&table.rows[0], "Item"),
            &CellValue::Text("Tea".to_string())
        );
    }
}
