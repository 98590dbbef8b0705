use std::borrow::Cow;
use std::collections::BTreeMap;

use url::Url;

use crate::http::types::Method;
use crate::variable::VariableContext;

/// Header 映射：名称按书写原样保存（大小写敏感），每个名称对应一组值
///
/// 同名 Header 重复出现时后写入者覆盖先写入者。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, Vec<String>>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个 Header，覆盖已有的同名项
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// 获取 Header 的第一个值
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(|s| s.as_str())
    }

    /// 获取 Header 的全部值
    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(|values| values.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 按名称排序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// 单个请求块解析出的请求描述
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP 方法，缺少请求行时为 GET
    pub method: Method,

    /// 拼接后重新解析得到的完整 URL
    pub url: Url,

    /// 变量替换后的 Headers
    pub headers: Headers,

    /// 请求体，原样保留；可以多次读取
    pub body: Vec<u8>,

    /// 请求块的原始文本，用于展示和调试
    pub source_text: String,
}

impl RequestDescriptor {
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// 以文本形式读取请求体（非 UTF-8 字节会被替换）
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// 菜单中显示的标签，如 `GET http://example.com/home`
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

/// 整个请求脚本的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    /// 所有请求描述，按出现顺序排列
    pub requests: Vec<RequestDescriptor>,

    /// 所有非空的原始分段（包含全局变量块）
    pub segments: Vec<String>,

    /// 全局变量块解析出的共享上下文，没有全局块时为空
    pub variables: VariableContext,
}

/// 解析错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// 期望 `VERB path` 形式的请求行，但该行没有空格分隔
    #[error("Invalid request: expected 'VERB path', got '{line}'")]
    InvalidRequest { line: String },

    /// Header 块中的行缺少 `:` 分隔符
    #[error("Invalid parameter: expected 'name: value', got '{line}'")]
    InvalidParameter {
        line: String,
        /// 出错前已经解析出的 Headers
        partial: Headers,
    },

    /// 显式 URL 行无法解析
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// 拼接并替换变量后的 URL 无法重新解析
    #[error("Invalid request URL '{url}': {source}")]
    UrlReparse {
        url: String,
        source: url::ParseError,
    },
}

/// 解析结果类型别名
pub type ParseResult<T> = Result<T, ParseError>;

/// 文档级解析错误，附带诊断所需的部分状态
#[derive(Debug, thiserror::Error)]
#[error("segment {}: {source}", .segment + 1)]
pub struct DocumentError {
    pub source: ParseError,

    /// 出错分段在 `segments` 中的下标
    pub segment: usize,

    /// 所有非空的原始分段
    pub segments: Vec<String>,

    /// 出错前构建好的变量上下文
    pub variables: VariableContext,
}

impl DocumentError {
    /// 出错分段的原始文本
    pub fn segment_text(&self) -> Option<&str> {
        self.segments.get(self.segment).map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_last_write_wins() {
        let mut headers = Headers::new();
        headers.insert("token", vec!["first".to_string()]);
        headers.insert("token", vec!["second".to_string()]);

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("token"), Some("second"));
    }

    #[test]
    fn test_headers_case_sensitive() {
        let mut headers = Headers::new();
        headers.insert("Token", vec!["upper".to_string()]);

        assert_eq!(headers.get("Token"), Some("upper"));
        assert_eq!(headers.get("token"), None);
        assert!(!headers.contains("token"));
    }

    #[test]
    fn test_headers_multi_value() {
        let mut headers = Headers::new();
        headers.insert("accept", vec!["text/html".to_string(), "*/*".to_string()]);

        assert_eq!(headers.get("accept"), Some("text/html"));
        assert_eq!(headers.get_all("accept").map(|v| v.len()), Some(2));
    }

    #[test]
    fn test_descriptor_body_is_reusable() {
        let request = RequestDescriptor {
            method: Method::Post,
            url: Url::parse("http://example.com/users").unwrap(),
            headers: Headers::new(),
            body: b"{\"name\": \"test\"}".to_vec(),
            source_text: String::new(),
        };

        assert!(request.has_body());
        assert_eq!(request.body_text(), request.body_text());
        assert_eq!(request.label(), "POST http://example.com/users");
    }

    #[test]
    fn test_document_error_display() {
        let err = DocumentError {
            source: ParseError::InvalidRequest {
                line: "health".to_string(),
            },
            segment: 1,
            segments: vec!["a".to_string(), "health\n".to_string()],
            variables: VariableContext::default(),
        };

        assert_eq!(
            err.to_string(),
            "segment 2: Invalid request: expected 'VERB path', got 'health'"
        );
        assert_eq!(err.segment_text(), Some("health\n"));
    }
}
