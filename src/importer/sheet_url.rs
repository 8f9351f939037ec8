// ==========================================
// 库存快照系统 - 在线表格地址改写
// ==========================================
// 规则: .../d/{id}/...#gid={gid} → .../d/{id}/gviz/tq?tqx=out:csv&gid={gid}
// gid 缺省为 "0"; 非在线表格地址原样返回
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use url::Url;

const SHEET_HOST: &str = "docs.google.com";
const DEFAULT_GID: &str = "0";

/// 是否为在线表格查看地址
pub fn is_sheet_url(url: &Url) -> bool {
    url.host_str().is_some_and(|h| h.ends_with(SHEET_HOST))
        && url.path().contains("/spreadsheets/")
}

/// 改写为 CSV 导出地址
///
/// # 返回
/// - Ok(String): 导出地址（非在线表格地址原样返回）
/// - Err: 地址无法解析,或缺少表格 ID
pub fn rewrite_sheet_url(raw: &str) -> ImportResult<String> {
    let url = Url::parse(raw.trim())?;
    if !is_sheet_url(&url) {
        return Ok(raw.trim().to_string());
    }

    let segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
    let d_pos = segments
        .iter()
        .position(|s| *s == "d")
        .ok_or_else(|| ImportError::InvalidSourceUrl(format!("缺少 /d/ 段: {}", raw)))?;
    let sheet_id = segments
        .get(d_pos + 1)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ImportError::InvalidSourceUrl(format!("缺少表格 ID: {}", raw)))?;

    let gid = find_gid(&url).unwrap_or_else(|| DEFAULT_GID.to_string());

    let mut path_segments: Vec<&str> = segments[..=d_pos].to_vec();
    path_segments.extend([*sheet_id, "gviz", "tq"]);

    let mut export = url.clone();
    export.set_path(&format!("/{}", path_segments.join("/")));
    export.set_query(Some(&format!("tqx=out:csv&gid={}", gid)));
    export.set_fragment(None);

    Ok(export.to_string())
}

/// 依次从 fragment 与 query 中查找 gid
fn find_gid(url: &Url) -> Option<String> {
    let from_fragment = url.fragment().and_then(|frag| {
        frag.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == "gid")
            .map(|(_, v)| v.to_string())
    });

    from_fragment
        .or_else(|| {
            url.query_pairs()
                .find(|(k, _)| k == "gid")
                .map(|(_, v)| v.into_owned())
        })
        .filter(|gid| !gid.is_empty())
}
