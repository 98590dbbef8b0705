use thiserror::Error;

use crate::parser::DocumentError;

#[derive(Error, Debug)]
pub enum RestwatchError {
    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("脚本解析失败: {0}")]
    DocumentError(#[from] DocumentError),

    #[error("无效的 Header: {0}")]
    InvalidHeader(String),

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("配置文件错误: {0}")]
    ConfigError(#[from] toml::de::Error),

    #[error("交互失败: {0}")]
    PromptError(String),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for RestwatchError {
    fn from(err: anyhow::Error) -> Self {
        RestwatchError::Other(err.to_string())
    }
}

impl From<inquire::InquireError> for RestwatchError {
    fn from(err: inquire::InquireError) -> Self {
        RestwatchError::PromptError(err.to_string())
    }
}

/// Result type for restwatch crate
pub type Result<T> = std::result::Result<T, RestwatchError>;
