use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::Result;

/// 文件快照：大小和修改时间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    size: u64,
    modified: Option<SystemTime>,
}

impl Snapshot {
    fn take(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        Ok(Self {
            size: metadata.len(),
            modified: metadata.modified().ok(),
        })
    }
}

/// 轮询式文件监视器，比较文件大小和修改时间
pub struct FileWatcher {
    path: PathBuf,
    last: Snapshot,
}

impl FileWatcher {
    /// 记录初始状态；文件不存在时返回错误
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let last = Snapshot::take(&path)?;
        Ok(Self { path, last })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 检查文件是否变化；无法读取文件状态时也视为变化
    pub fn poll(&mut self) -> bool {
        match Snapshot::take(&self.path) {
            Ok(current) if current == self.last => false,
            Ok(current) => {
                info!(path = %self.path.display(), "File changed");
                self.last = current;
                true
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to stat watched file");
                true
            }
        }
    }

    /// 在后台任务中按固定间隔轮询，变化时发送通知
    ///
    /// 接收端被丢弃后任务退出。通知不会堆积：接收方尚未处理上一条时新的变化被合并。
    pub fn spawn(mut self, interval: Duration) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if tx.is_closed() {
                    break;
                }
                if self.poll() {
                    // 通道已满说明还有未处理的通知
                    let _ = tx.try_send(());
                }
            }
        });
        rx
    }
}
