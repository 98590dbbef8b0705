pub mod document;
pub mod headers;
pub mod request;
pub mod text;
pub mod types;

// Re-export commonly used types
pub use document::ScriptParser;
pub use types::{
    DocumentError, Headers, ParseError, ParseResult, ParsedDocument, RequestDescriptor,
};

/// 解析请求脚本的原始字节
pub fn parse(data: &[u8]) -> Result<ParsedDocument, DocumentError> {
    ScriptParser::parse_bytes(data)
}

/// 从字符串内容解析请求脚本
pub fn parse_content(content: &str) -> Result<ParsedDocument, DocumentError> {
    ScriptParser::parse_content(content)
}
