use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::error::{AppError, AppResult, ConfigError};
use crate::runtime::SelectionPolicy;

/// 程序配置
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 考试文件路径（`.json` 为结构化题目，其余按考试文本处理）
    pub exam_path: String,
    /// 单选题/判断题作答策略
    pub selection_policy: SelectionPolicy,
    /// JSON 成绩报告输出路径，不设置则不输出
    pub report_path: Option<String>,
    /// 答案无法解析的题目写入的文件
    pub warn_file_path: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 会话日志文件，不设置则不写
    pub output_log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_path: "exam.txt".to_string(),
            selection_policy: SelectionPolicy::LockOnFirstPick,
            report_path: None,
            warn_file_path: "warn.txt".to_string(),
            verbose_logging: false,
            output_log_file: None,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，未设置的项使用默认值
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        Ok(Self {
            exam_path: std::env::var("EXAM_PATH").unwrap_or(default.exam_path),
            selection_policy: parse_env("SELECTION_POLICY", "selection policy")?
                .unwrap_or(default.selection_policy),
            report_path: std::env::var("REPORT_PATH").ok().or(default.report_path),
            warn_file_path: std::env::var("WARN_FILE_PATH").unwrap_or(default.warn_file_path),
            verbose_logging: parse_env("VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE")
                .ok()
                .or(default.output_log_file),
        })
    }

    /// 从 TOML 文件读取配置
    pub async fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, path: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            })
        })
    }
}

fn parse_env<T: std::str::FromStr>(var_name: &str, expected_type: &str) -> AppResult<Option<T>> {
    match std::env::var(var_name) {
        Ok(value) => value.trim().parse().map(Some).map_err(|_| {
            AppError::Config(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            })
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_partial_config_uses_defaults() {
        let config = Config::from_toml_str(
            r#"
exam_path = "rrc-practice.txt"
selection_policy = "allow_change"
report_path = "report.json"
"#,
            "roofvault.toml",
        )
        .unwrap();

        assert_eq!(config.exam_path, "rrc-practice.txt");
        assert_eq!(config.selection_policy, SelectionPolicy::AllowChange);
        assert_eq!(config.report_path.as_deref(), Some("report.json"));
        assert_eq!(config.warn_file_path, "warn.txt");
        assert!(!config.verbose_logging);
    }

    #[test]
    fn test_toml_invalid_config() {
        let err = Config::from_toml_str("selection_policy = \"sometimes\"", "bad.toml").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[test]
    fn test_from_toml_file() {
        let path = std::env::temp_dir().join(format!("roofvault-config-{}.toml", std::process::id()));
        std::fs::write(&path, "verbose_logging = true\n").unwrap();
        let config = tokio_test::block_on(Config::from_toml_file(&path)).unwrap();
        assert!(config.verbose_logging);
        std::fs::remove_file(path).unwrap();
    }
}
