//! 日志工具模块
//!
//! 初始化 tracing 订阅者，并提供日志格式化和输出的辅助函数

use anyhow::Result;
use std::fs;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::runtime::ExamReport;

/// 初始化日志
///
/// 日志输出到 stderr，stdout 留给考试界面。设置了 `RUST_LOG` 时以它为准。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
/// - `exam_path`: 本次考试文件
pub fn init_log_file(log_file_path: &str, exam_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n考试会话日志 - {}\n考试文件: {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        exam_path,
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向日志文件追加成绩统计
pub fn append_final_stats(log_file_path: &str, report: &ExamReport) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] 得分 {}/{} ({:.1}%), 已作答 {}, 已揭晓 {}, 答案无法解析 {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        report.score,
        report.total,
        report.percentage,
        report.answered,
        report.revealed,
        report.unresolved_ids().len()
    )?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 RoofVault 考试程序启动");
    info!("📄 考试文件: {}", config.exam_path);
    info!("🔒 作答策略: {:?}", config.selection_policy);
    info!("{}", "=".repeat(60));
}

/// 记录考试加载信息
///
/// # 参数
/// - `total`: 题目总数
/// - `unresolved`: 答案无法解析的题目数
/// - `first_prompt`: 第一题题干（用于预览）
pub fn log_exam_loaded(total: usize, unresolved: usize, first_prompt: Option<&str>) {
    if total == 0 {
        info!("⚠️ 考试中没有可用的题目");
        return;
    }
    info!("✓ 共 {} 道题目", total);
    if unresolved > 0 {
        info!("⚠️ {} 道单选题答案无法解析，已默认第一个选项", unresolved);
    }
    if let Some(prompt) = first_prompt {
        info!("第一题: {}", truncate_text(prompt, 80));
    }
}

/// 打印最终统计信息
pub fn print_final_stats(report: &ExamReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 考试结束统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 得分: {}/{} ({:.1}%)", report.score, report.total, report.percentage);
    info!("✏️ 已作答: {}", report.answered);
    info!("👀 已揭晓: {}", report.revealed);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
