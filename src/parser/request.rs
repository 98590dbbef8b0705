use tracing::debug;
use url::Url;

use crate::http::types::Method;
use crate::parser::headers::{HeaderBlock, extract_headers, extract_trailing_headers};
use crate::parser::text::{is_url_line, skip_boilerplate, split_request_line};
use crate::parser::types::{Headers, ParseError, ParseResult};
use crate::variable::{VariableContext, VariableResolver};

/// 请求行和 URL 的提取结果
#[derive(Debug)]
pub struct ExtractedRequest<'a> {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,

    /// 请求行之后的剩余行（请求体）
    pub remaining: &'a [&'a str],
}

/// 拼接最终 URL 所需的各个部分
#[derive(Debug, Clone, PartialEq)]
struct Target {
    scheme: String,
    credentials: String,
    host: String,
    port: String,
    path: String,
}

impl Default for Target {
    /// 既没有显式 URL 也没有基础 URL 时的默认值
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            credentials: String::new(),
            host: String::new(),
            port: ":80".to_string(),
            path: String::new(),
        }
    }
}

impl Target {
    /// 显式 URL 行：取 scheme、host、port 和用户信息，路径由请求行决定
    fn explicit(url: &Url) -> Self {
        Self {
            scheme: url.scheme().to_string(),
            credentials: credentials(url),
            host: url.host_str().unwrap_or_default().to_string(),
            port: port(url),
            path: String::new(),
        }
    }

    /// 继承基础 URL，路径直接覆盖，不做 URL join
    fn inherit(base: &Url) -> Self {
        Self {
            path: base.path().to_string(),
            ..Self::explicit(base)
        }
    }

    fn render(&self, context: &VariableContext) -> String {
        format!(
            "{}://{}{}{}{}",
            self.scheme,
            self.credentials,
            self.host,
            self.port,
            VariableResolver::substitute(&self.path, context)
        )
    }
}

/// 用户信息，渲染为 `user:pass@`
pub(crate) fn credentials(url: &Url) -> String {
    match (url.username(), url.password()) {
        ("", None) => String::new(),
        (user, None) => format!("{user}@"),
        (user, Some(password)) => format!("{user}:{password}@"),
    }
}

pub(crate) fn port(url: &Url) -> String {
    url.port().map(|p| format!(":{p}")).unwrap_or_default()
}

/// 提取 URL 行之后的 Headers
///
/// 既没有 `:` 也没有空格的行处在请求行的位置上，报告为 [`ParseError::InvalidRequest`]。
pub fn extract_header_block<'a>(
    context: &VariableContext,
    lines: &'a [&'a str],
) -> ParseResult<HeaderBlock<'a>> {
    match extract_headers(context, lines) {
        Err(ParseError::InvalidParameter { line, .. }) if !line.contains(' ') => {
            Err(ParseError::InvalidRequest { line })
        }
        result => result,
    }
}

/// 从请求块中提取 URL、Headers 和请求行
///
/// 1. 第一行是 `http(s):` 开头的 URL 时，使用它的 scheme/host/port/用户信息；
///    否则继承上下文中的基础 URL（包括路径）；都没有时使用 `http` 和 `:80`。
/// 2. 提取 Headers。
/// 3. 剩余的第一行按第一个空格拆分，方法可识别时作为请求行消费，否则保留为请求体。
///    请求行之后紧跟的 `name: value` 行同样作为 Headers。
/// 4. 拼接 `scheme://credentials host port path` 并重新解析。
pub fn extract_request<'a>(
    context: &VariableContext,
    lines: &'a [&'a str],
) -> ParseResult<ExtractedRequest<'a>> {
    let mut remaining = skip_boilerplate(lines);

    let mut target = match remaining.first() {
        Some(&line) if is_url_line(line) => {
            let raw = line.trim();
            let url = Url::parse(raw).map_err(|source| ParseError::InvalidUrl {
                url: raw.to_string(),
                source,
            })?;
            remaining = skip_boilerplate(&remaining[1..]);
            Target::explicit(&url)
        }
        _ => context.base_url().map(Target::inherit).unwrap_or_default(),
    };

    let block = extract_header_block(context, remaining)?;

    let mut method = Method::default();
    let mut headers = block.headers;
    let mut remaining = block.remaining;
    if let Some(&line) = remaining.first() {
        let (verb, path) =
            split_request_line(line).ok_or_else(|| ParseError::InvalidRequest {
                line: line.trim().to_string(),
            })?;
        if let Ok(verb) = verb.parse::<Method>() {
            method = verb;
            target.path = path.trim().to_string();
            remaining = extract_trailing_headers(context, &mut headers, &remaining[1..]);
        }
    }

    let raw = target.render(context);
    debug!(method = %method, url = %raw, "Resolved request line");
    let url = Url::parse(&raw).map_err(|source| ParseError::UrlReparse { url: raw, source })?;

    Ok(ExtractedRequest {
        method,
        url,
        headers,
        remaining,
    })
}
