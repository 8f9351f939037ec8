// ==========================================
// 库存快照系统 - 数据源加载器
// ==========================================
// 职责: 数据源位置 → RawTable
// 支持: 本地文件路径 / http(s) 地址（在线表格自动改写为 CSV 导出）
// ==========================================

use crate::domain::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, UniversalFileParser};
use crate::importer::sheet_url::rewrite_sheet_url;
use std::time::Duration;
use tracing::{info, instrument};

const FETCH_TIMEOUT_SECS: u64 = 30;

pub struct SourceLoader {
    timeout: Duration,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
        }
    }
}

impl SourceLoader {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// 是否为远程地址
    pub fn is_remote(location: &str) -> bool {
        let lower = location.trim().to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }

    /// 加载数据源
    #[instrument(skip(self))]
    pub fn load(&self, location: &str) -> ImportResult<RawTable> {
        if Self::is_remote(location) {
            self.fetch_remote_csv(location)
        } else {
            UniversalFileParser.parse(location.trim())
        }
    }

    fn fetch_remote_csv(&self, location: &str) -> ImportResult<RawTable> {
        let url = rewrite_sheet_url(location)?;
        info!(url = %url, "获取远程 CSV");

        let fetch_error = |e: reqwest::Error| ImportError::RemoteFetchError {
            url: url.clone(),
            message: e.to_string(),
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(fetch_error)?;
        let body = client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(fetch_error)?;

        CsvParser.parse_str(&body)
    }
}
