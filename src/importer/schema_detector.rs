// ==========================================
// 库存快照系统 - 表格形态判定器
// ==========================================
// 职责: 判定 LONG / WIDE 形态,定位日期/物品/库存/期初列
// 规则: 表头统一按字符串、大小写不敏感比较
// ==========================================

use crate::domain::{FormatDecision, RawTable};
use crate::importer::date_grammar::is_date_header;
use crate::importer::error::SchemaError;
use tracing::debug;

const LONG_DATE: &str = "date";
const LONG_ITEM: &str = "item";
const LONG_STOCK: &str = "stock";

const ITEM_MARKER: &str = "item";
const GATING_MARKER: &str = "opening";

pub struct SchemaDetector;

impl SchemaDetector {
    /// 判定表格形态
    ///
    /// # 返回
    /// - Ok(FormatDecision::Long): 表头同时含 date/item/stock
    /// - Ok(FormatDecision::Wide): 至少一个日期列且存在物品列
    /// - Err(SchemaError): 两种形态都无法成立
    pub fn detect(&self, table: &RawTable) -> Result<FormatDecision, SchemaError> {
        let headers = &table.headers;

        // ---------- LONG ----------
        let date_header = find_exact(headers, LONG_DATE);
        let item_header = find_exact(headers, LONG_ITEM);
        let stock_header = find_exact(headers, LONG_STOCK);

        if let (Some(date_header), Some(item_header), Some(stock_header)) =
            (date_header, item_header, stock_header)
        {
            debug!(%date_header, %item_header, %stock_header, "判定为 LONG 形态");
            return Ok(FormatDecision::Long {
                date_header,
                item_header,
                stock_header,
            });
        }

        // ---------- WIDE ----------
        let date_headers: Vec<String> = headers
            .iter()
            .filter(|h| is_date_header(h))
            .cloned()
            .collect();
        if date_headers.is_empty() {
            return Err(SchemaError::NoDateOrRequiredColumns);
        }

        let item_header =
            find_containing(headers, ITEM_MARKER).ok_or(SchemaError::NoItemColumn)?;
        let gating_header = find_containing(headers, GATING_MARKER);

        let identifier_headers: Vec<String> = headers
            .iter()
            .filter(|h| !date_headers.contains(h))
            .cloned()
            .collect();

        debug!(
            date_columns = date_headers.len(),
            %item_header,
            gating = ?gating_header,
            "判定为 WIDE 形态"
        );

        Ok(FormatDecision::Wide {
            date_headers,
            item_header,
            gating_header,
            identifier_headers,
        })
    }
}

/// 首个（去空白后）与 name 大小写不敏感相等的表头
fn find_exact(headers: &[String], name: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.trim().eq_ignore_ascii_case(name))
        .cloned()
}

/// 最左侧包含 marker（大小写不敏感）的表头
fn find_containing(headers: &[String], marker: &str) -> Option<String> {
    headers
        .iter()
        .find(|h| h.to_lowercase().contains(marker))
        .cloned()
}
