// ==========================================
// 库存快照系统 - 命令行入口
// ==========================================
// 流程: 加载数据源 → 导入 → 查询 → 输出指标与 CSV
// ==========================================

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use smart_inventory::app::{AppState, Session};
use smart_inventory::config::AppConfig;
use smart_inventory::domain::{FilterCriteria, QueryOutcome};
use smart_inventory::engine::{export_csv, export_csv_to_path, format_stock};
use smart_inventory::importer::parse_calendar_date;
use smart_inventory::logging;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "smart-inventory", version, about = "库存快照: 多形态表格导入、过滤与导出")]
struct Cli {
    /// 本地文件（.csv/.xlsx/.xls）或 http(s) 地址
    #[arg(long, conflicts_with = "source")]
    file: Option<String>,

    /// 配置文件中的数据源名称
    #[arg(long)]
    source: Option<String>,

    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,

    /// 查询日期（省略时取最新可用日期）
    #[arg(long, value_parser = parse_date_arg, conflicts_with = "all_dates")]
    date: Option<NaiveDate>,

    /// 不按日期过滤
    #[arg(long)]
    all_dates: bool,

    /// 物品过滤（可重复; 省略表示全部物品）
    #[arg(long = "item")]
    items: Vec<String>,

    /// 低库存阈值（省略时使用配置值）
    #[arg(long)]
    threshold: Option<f64>,

    /// 仅显示低库存
    #[arg(long)]
    low_only: bool,

    /// 导出 CSV 路径（省略时输出到 stdout）
    #[arg(long)]
    output: Option<PathBuf>,

    /// 以 JSON 输出查询视图
    #[arg(long)]
    json: bool,

    /// JSON 格式日志
    #[arg(long)]
    log_json: bool,
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate, String> {
    parse_calendar_date(raw).ok_or_else(|| format!("无法解析日期: {}", raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    info!("库存快照系统 v{}", smart_inventory::VERSION);

    let config_path = AppConfig::resolve_path(cli.config.as_deref());
    let config = match &config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let state = AppState::new(config);

    // ---------- 导入 ----------
    let mut session = Session::new();
    session.replace_with(|| -> smart_inventory::ImportResult<Arc<_>> {
        match (&cli.file, &cli.source) {
            (Some(location), _) => state
                .load_location(location, location)
                .map_err(into_import_error),
            (None, Some(name)) => state.load_named_source(name).map_err(into_import_error),
            (None, None) => Err(anyhow::anyhow!("需要指定 --file 或 --source").into()),
        }
    })?;
    let report = session.current().context("会话中没有数据集")?;

    eprintln!(
        "数据源: {} | 形态: {} | 记录: {} | 丢弃: {}",
        report.source_label,
        report.format,
        report.dataset.len(),
        report.dropped.total()
    );

    // ---------- 过滤条件 ----------
    let threshold = cli.threshold.unwrap_or(state.config.low_stock_threshold);
    let selected_date = if cli.all_dates {
        None
    } else {
        cli.date
            .or_else(|| state.engine.latest_available_date(&report.dataset))
    };
    let mut criteria = FilterCriteria::default()
        .with_items(cli.items.iter().map(|s| s.trim().to_string()))
        .with_threshold(threshold)
        .low_stock_only(cli.low_only);
    criteria.selected_date = selected_date;

    // ---------- 查询 ----------
    let outcome = session.query(&state.engine, &criteria)?;
    let view = match &outcome {
        QueryOutcome::NoData => {
            eprintln!("无可用数据");
            return Ok(());
        }
        QueryOutcome::View(view) => view,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(view)?);
        return Ok(());
    }

    eprintln!(
        "物品数: {} | 库存合计: {} | 低库存: {}",
        view.metrics.total_items,
        format_stock(view.metrics.total_stock),
        view.metrics.low_stock_count
    );

    // ---------- 导出 ----------
    match &cli.output {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(&state.config.export_file_name)
            } else {
                path.clone()
            };
            export_csv_to_path(&view.records, &path)
                .with_context(|| format!("导出到 {} 失败", path.display()))?;
        }
        None => print!("{}", export_csv(&view.records)?),
    }

    Ok(())
}

fn into_import_error(err: smart_inventory::AppError) -> smart_inventory::ImportError {
    match err {
        smart_inventory::AppError::Import(e) => e,
        other => anyhow::Error::new(other).into(),
    }
}
