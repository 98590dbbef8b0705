use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::http::Client;
use crate::menu::{self, Action, MainChoice};
use crate::parser::{self, ParsedDocument, RequestDescriptor};
use crate::utils::Formatter;
use crate::watcher::FileWatcher;
use crate::{Result, RestwatchError};

/// 围绕一个请求脚本文件的应用：加载、选择、查看和执行
pub struct App {
    path: PathBuf,
    settings: Settings,
    client: Client,
    formatter: Formatter,
}

impl App {
    pub fn new(path: impl Into<PathBuf>, settings: Settings) -> Result<Self> {
        Ok(Self {
            path: path.into(),
            client: Client::new(settings.timeout())?,
            formatter: Formatter::new(settings.color),
            settings,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取并解析脚本文件，每次调用都重新构建全部状态
    pub fn load(&self) -> Result<ParsedDocument> {
        let data = std::fs::read(&self.path)?;
        Ok(parser::parse(&data)?)
    }

    /// 每行一个请求：`序号 METHOD URL`
    pub fn format_list(document: &ParsedDocument) -> String {
        document
            .requests
            .iter()
            .enumerate()
            .map(|(index, request)| format!("{} {}", index, request.label()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// 执行指定序号的请求并返回格式化后的响应
    pub async fn run_request(&self, document: &ParsedDocument, index: usize) -> Result<String> {
        let request = document.requests.get(index).ok_or_else(|| {
            RestwatchError::Other(format!(
                "No request at index {} ({} requests in {})",
                index,
                document.requests.len(),
                self.path.display()
            ))
        })?;
        let response = self.client.execute(request).await?;
        Ok(self.formatter.format_response(&response))
    }

    /// 交互模式：每次回到主菜单时重新加载文件
    pub async fn interactive(&self) -> Result<()> {
        let mut changes = FileWatcher::new(&self.path)?.spawn(self.settings.poll_interval());

        loop {
            if drain(&mut changes) {
                info!(path = %self.path.display(), "Reloading request script");
            }

            let document = match self.load() {
                Ok(document) => document,
                Err(RestwatchError::DocumentError(err)) => {
                    eprintln!("{}", err);
                    if let Some(text) = err.segment_text() {
                        eprintln!("\n{}", text.trim_end());
                    }
                    if menu::confirm_reload()? {
                        continue;
                    }
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            match menu::choose_main(&document)? {
                MainChoice::Quit => return Ok(()),
                MainChoice::Variables => {
                    println!("{}", self.formatter.format_variables(&document.variables));
                    menu::pause()?;
                }
                MainChoice::Request(index) => {
                    if let Some(request) = document.requests.get(index) {
                        self.request_menu(request).await?;
                    }
                }
            }
        }
    }

    async fn request_menu(&self, request: &RequestDescriptor) -> Result<()> {
        loop {
            match menu::choose_action(request)? {
                Action::Back => return Ok(()),
                Action::View => println!("{}", self.formatter.format_request(request)),
                Action::Source => println!("{}", request.source_text.trim_end()),
                Action::Execute => {
                    if self.settings.debug {
                        println!("{}\n", self.formatter.format_request(request));
                    }
                    match self.client.execute(request).await {
                        Ok(response) => println!("{}", self.formatter.format_response(&response)),
                        Err(e) => {
                            warn!(url = %request.url, error = %e, "Request failed");
                            eprintln!("Request failed: {}", e);
                        }
                    }
                }
            }
            menu::pause()?;
        }
    }
}

/// 清空通知通道，返回期间是否收到过变更通知
fn drain(changes: &mut mpsc::Receiver<()>) -> bool {
    let mut changed = false;
    while changes.try_recv().is_ok() {
        changed = true;
    }
    changed
}
