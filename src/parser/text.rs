//! 行分类谓词与空行/注释跳过

use crate::http::types::Method;

/// 注释行：去掉首尾空白后以 `#` 开头
pub fn is_comment(line: &str) -> bool {
    line.trim().starts_with('#')
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// 分段分隔行 `--`
pub fn is_separator(line: &str) -> bool {
    line.trim() == "--"
}

/// 显式 URL 行：以 `http:` 或 `https:` 开头
pub fn is_url_line(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("http:") || line.starts_with("https:")
}

/// 按第一个空格拆分请求行，得到 (方法候选, 路径)
pub fn split_request_line(line: &str) -> Option<(&str, &str)> {
    line.trim().split_once(' ')
}

/// 请求行：`VERB path`，VERB 为可识别的方法（大小写不敏感）
pub fn is_request_line(line: &str) -> bool {
    split_request_line(line).is_some_and(|(verb, _)| Method::is_verb(verb))
}

/// Header 名称字符（RFC 7230 token）
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

/// 形如 `name: value` 且名称是合法 token 的行
///
/// 用于区分请求行之后的 Headers 和请求体，例如 JSON 中的 `"name": "x"` 不算。
pub fn is_header_line(line: &str) -> bool {
    line.split_once(':').is_some_and(|(name, _)| {
        let name = name.trim();
        !name.is_empty() && name.chars().all(is_token_char)
    })
}

/// 跳过开头的空行和注释行，返回从第一个有效行开始的剩余部分
///
/// 只处理开头；中间的空行和注释由调用方在每个提取步骤之后再次调用本函数跳过。
pub fn skip_boilerplate<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
    match lines
        .iter()
        .position(|line| !is_blank(line) && !is_comment(line))
    {
        Some(start) => &lines[start..],
        None => &[],
    }
}
