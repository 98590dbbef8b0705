mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    // 初始化日志系统
    restwatch::logger::init_logger(settings.debug);

    cli::run(cli, settings).await
}
