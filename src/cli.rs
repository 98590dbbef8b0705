use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use restwatch::app::App;
use restwatch::config::{ConfigLoader, Settings};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 请求脚本文件
    pub file: PathBuf,

    /// 输出调试日志，执行前打印请求
    #[arg(long)]
    pub debug: bool,

    /// 请求超时（秒）
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 配置文件路径（默认查找 restwatch.toml）
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 关闭彩色输出
    #[arg(long)]
    pub no_color: bool,

    /// 列出所有请求后退出
    #[arg(long, conflicts_with = "run")]
    pub list: bool,

    /// 执行指定序号的请求后退出
    #[arg(long, value_name = "INDEX")]
    pub run: Option<usize>,
}

impl Cli {
    /// 配置文件加上命令行覆盖（命令行优先）
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => ConfigLoader::load_from_path(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ConfigLoader::find_and_load().unwrap_or_default(),
        };

        if self.debug {
            settings.debug = true;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if self.no_color {
            settings.color = false;
        }
        Ok(settings)
    }
}

pub async fn run(cli: Cli, settings: Settings) -> Result<()> {
    let app = App::new(&cli.file, settings)?;

    if cli.list {
        let document = app.load()?;
        println!("{}", App::format_list(&document));
        return Ok(());
    }

    if let Some(index) = cli.run {
        let document = app.load()?;
        println!("{}", app.run_request(&document, index).await?);
        return Ok(());
    }

    app.interactive().await?;
    Ok(())
}
