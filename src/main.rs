use anyhow::Result;
use roofvault_exam::utils::logging;
use roofvault_exam::{App, Config};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：ROOFVAULT_CONFIG 指向 TOML 文件时优先使用，否则读取环境变量
    let mut config = match std::env::var("ROOFVAULT_CONFIG") {
        Ok(path) => Config::from_toml_file(Path::new(&path)).await?,
        Err(_) => Config::from_env()?,
    };

    // 命令行第一个参数覆盖考试文件路径
    if let Some(exam_path) = std::env::args().nth(1) {
        config.exam_path = exam_path;
    }

    // 初始化日志
    logging::init(config.verbose_logging);

    // 运行考试
    App::new(config).run().await?;

    Ok(())
}
