use url::Url;

use crate::parser::Headers;

/// 变量上下文，由全局变量块构建
///
/// 一次解析内只构建一次，之后以只读引用的方式传给每个请求块的解析过程。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableContext {
    /// 全局块中声明的基础 URL
    base_url: Option<Url>,

    /// 全局块中声明的 Headers，同时作为 `:name` 变量表
    headers: Headers,
}

impl VariableContext {
    pub fn new(base_url: Option<Url>, headers: Headers) -> Self {
        Self { base_url, headers }
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// 获取变量值（对应 Header 的第一个值）
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// 既没有基础 URL 也没有变量
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.headers.is_empty()
    }
}
