// ==========================================
// 库存快照系统 - 形态归一器
// ==========================================
// 职责: WIDE → LONG 草稿记录; LONG 按列名直通
// 红线: 不做类型转换,不丢弃记录（期初列门控除外）
// ==========================================

use crate::domain::record::DraftRecord;
use crate::domain::{CellValue, FormatDecision, RawTable};
use tracing::debug;

pub struct FormatNormalizer;

impl FormatNormalizer {
    /// 归一为草稿记录序列
    ///
    /// # 输出顺序
    /// - LONG: 原始行顺序
    /// - WIDE: 外层行、内层日期列（完整笛卡尔积）
    pub(crate) fn normalize(&self, table: &RawTable, decision: &FormatDecision) -> Vec<DraftRecord> {
        match decision {
            FormatDecision::Long {
                date_header,
                item_header,
                stock_header,
            } => table
                .rows
                .iter()
                .enumerate()
                .map(|(idx, row)| DraftRecord {
                    date: RawTable::cell(row, date_header).clone(),
                    item: RawTable::cell(row, item_header).clone(),
                    stock: RawTable::cell(row, stock_header).clone(),
                    row_number: idx + 1,
                })
                .collect(),

            FormatDecision::Wide {
                date_headers,
                item_header,
                gating_header,
                ..
            } => {
                let mut drafts = Vec::with_capacity(table.rows.len() * date_headers.len());
                let mut gated_rows = 0usize;

                for (idx, row) in table.rows.iter().enumerate() {
                    // 期初列为空的行是分类标题等非数据行
                    if let Some(gating) = gating_header {
                        if RawTable::cell(row, gating).is_empty() {
                            gated_rows += 1;
                            continue;
                        }
                    }

                    let item = RawTable::cell(row, item_header);
                    for date_header in date_headers {
                        drafts.push(DraftRecord {
                            date: CellValue::Text(date_header.clone()),
                            item: item.clone(),
                            stock: RawTable::cell(row, date_header).clone(),
                            row_number: idx + 1,
                        });
                    }
                }

                debug!(
                    rows = table.rows.len(),
                    gated_rows,
                    drafts = drafts.len(),
                    "WIDE 展开完成"
                );
                drafts
            }
        }
    }
}
