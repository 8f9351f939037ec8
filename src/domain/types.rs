// ==========================================
// 库存快照系统 - 领域类型定义
// ==========================================
// 职责: 表格形态枚举与形态判定结果
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 表格形态 (Table Format)
// ==========================================
// LONG: 每行一条 (日期, 物品) 观测
// WIDE: 每行一个物品,每个日期一列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFormat {
    Long,
    Wide,
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Long => write!(f, "LONG"),
            TableFormat::Wide => write!(f, "WIDE"),
        }
    }
}

// ==========================================
// FormatDecision - 形态判定结果
// ==========================================
// 红线: WIDE 至少一个日期列且恰好一个物品列,否则判定失败
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatDecision {
    Long {
        date_header: String,  // 匹配 "date" 的原始表头
        item_header: String,  // 匹配 "item" 的原始表头
        stock_header: String, // 匹配 "stock" 的原始表头
    },
    Wide {
        date_headers: Vec<String>,       // 日期列（原始列顺序）
        item_header: String,             // 最左侧含 "item" 的表头
        gating_header: Option<String>,   // 最左侧含 "opening" 的表头（期初库存标记）
        identifier_headers: Vec<String>, // 非日期列
    },
}

impl FormatDecision {
    /// 判定的形态标签
    pub fn format(&self) -> TableFormat {
        match self {
            FormatDecision::Long { .. } => TableFormat::Long,
            FormatDecision::Wide { .. } => TableFormat::Wide,
        }
    }

    /// 物品列表头
    pub fn item_header(&self) -> &str {
        match self {
            FormatDecision::Long { item_header, .. } => item_header,
            FormatDecision::Wide { item_header, .. } => item_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_display() {
        assert_eq!(TableFormat::Long.to_string(), "LONG");
        assert_eq!(TableFormat::Wide.to_string(), "WIDE");
    }

    #[test]
    fn test_decision_accessors() {
        let decision = FormatDecision::Wide {
            date_headers: vec!["2026-01-01".to_string()],
            item_header: "Item Name".to_string(),
            gating_header: None,
            identifier_headers: vec!["Item Name".to_string()],
        };

        assert_eq!(decision.format(), TableFormat::Wide);
        assert_eq!(decision.item_header(), "Item Name");
    }
}
