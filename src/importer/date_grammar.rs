// ==========================================
// 库存快照系统 - 日历日期文法
// ==========================================
// 职责: 表头日期判定 与 单元格日期解析 共用的唯一文法
// 规则: 整串匹配; 部分匹配或歧义一律拒绝,不猜测
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveDateTime};

// ISO 及其分隔符变体
const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// 带时间部分,按日截断
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

// 月份名称格式（大小写不敏感）
const MONTH_NAME_FORMATS: &[&str] = &[
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// 按固定文法解析日历日期
///
/// # 参数
/// - raw: 原始文本（首尾空白忽略）
///
/// # 返回
/// - Some(NaiveDate): 唯一解释
/// - None: 无法解析或存在歧义
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() || !value.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Some(date) = parse_compact(value) {
        return Some(date);
    }

    for fmt in ISO_DATE_FORMATS {
        let parsed = NaiveDate::parse_from_str(value, fmt).ok();
        if let Some(date) = parsed.and_then(|d| with_full_year(value, d)) {
            return Some(date);
        }
    }

    for fmt in ISO_DATETIME_FORMATS {
        let parsed = NaiveDateTime::parse_from_str(value, fmt).ok();
        if let Some(date) = parsed.and_then(|dt| with_full_year(value, dt.date())) {
            return Some(date);
        }
    }

    for fmt in MONTH_NAME_FORMATS {
        let parsed = NaiveDate::parse_from_str(value, fmt).ok();
        if let Some(date) = parsed.and_then(|d| with_full_year(value, d)) {
            return Some(date);
        }
    }

    parse_day_month(value)
}

/// 是否为日期表头
pub fn is_date_header(header: &str) -> bool {
    parse_calendar_date(header).is_some()
}

/// %Y 接受 1~3 位年份,要求原文含恰好 4 位的年份段
fn with_full_year(value: &str, date: NaiveDate) -> Option<NaiveDate> {
    let year = format!("{:04}", date.year());
    value
        .split(|c: char| !c.is_ascii_digit())
        .any(|token| token == year)
        .then_some(date)
}

/// YYYYMMDD（必须恰好 8 位数字）
fn parse_compact(value: &str) -> Option<NaiveDate> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

/// DD/MM/YYYY 与 MM/DD/YYYY（也接受 '-' 分隔）
///
/// 仅当只有一种解释合法,或两种解释得到同一日期时接受
fn parse_day_month(value: &str) -> Option<NaiveDate> {
    let sep = if value.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = value.split(sep).collect();
    if parts.len() != 3 {
        return None;
    }

    let (first, second, year) = (parts[0], parts[1], parts[2]);
    let short = |p: &str| !p.is_empty() && p.len() <= 2 && p.bytes().all(|b| b.is_ascii_digit());
    if !short(first) || !short(second) || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let a: u32 = first.parse().ok()?;
    let b: u32 = second.parse().ok()?;
    let y: i32 = year.parse().ok()?;

    let day_first = NaiveDate::from_ymd_opt(y, b, a);
    let month_first = NaiveDate::from_ymd_opt(y, a, b);

    match (day_first, month_first) {
        (Some(d1), Some(d2)) if d1 == d2 => Some(d1),
        (Some(_), Some(_)) => None,
        (Some(d), None) | (None, Some(d)) => Some(d),
        (None, None) => None,
    }
}
