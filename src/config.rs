use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::Result;

/// 运行配置（restwatch.toml）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 请求超时（秒）
    pub timeout_secs: u64,

    /// 文件变更轮询间隔（毫秒）
    pub poll_interval_ms: u64,

    /// 是否彩色输出
    pub color: bool,

    /// 是否输出调试日志
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            poll_interval_ms: 500,
            color: true,
            debug: false,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "restwatch.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/restwatch/
    pub fn find_and_load() -> Option<Settings> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    fn try_load_from_current_dir() -> Option<Settings> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_logged(&config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Settings> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("restwatch")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_logged(&config_path)
        } else {
            None
        }
    }

    fn load_logged(path: &Path) -> Option<Settings> {
        match Self::load_from_path(path) {
            Ok(settings) => {
                tracing::debug!(path = %path.display(), "Loaded config file");
                Some(settings)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                None
            }
        }
    }
}
