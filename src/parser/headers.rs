use tracing::trace;

use crate::parser::text::{is_header_line, is_request_line, skip_boilerplate};
use crate::parser::types::{Headers, ParseError, ParseResult};
use crate::variable::{VariableContext, VariableResolver};

/// Header 块的提取结果
#[derive(Debug)]
pub struct HeaderBlock<'a> {
    pub headers: Headers,

    /// 从请求行（如果有）开始的剩余行
    pub remaining: &'a [&'a str],
}

/// 逐行读取 `name: value`，直到遇到请求行或输入结束
///
/// 值先做变量替换，再按 `;` 拆分为多个值。缺少 `:` 的行返回
/// [`ParseError::InvalidParameter`]，错误中带有已经解析出的部分 Headers。
pub fn extract_headers<'a>(
    context: &VariableContext,
    lines: &'a [&'a str],
) -> ParseResult<HeaderBlock<'a>> {
    let mut headers = Headers::new();
    let mut remaining = skip_boilerplate(lines);

    while let Some(&line) = remaining.first() {
        if is_request_line(line) {
            break;
        }

        let Some((name, value)) = line.split_once(':') else {
            return Err(ParseError::InvalidParameter {
                line: line.trim().to_string(),
                partial: headers,
            });
        };

        let value = VariableResolver::substitute(value.trim(), context);
        trace!(header = name.trim(), value = %value, "Parsed header");
        headers.insert(name.trim(), value.split(';').map(str::to_string).collect());

        remaining = skip_boilerplate(&remaining[1..]);
    }

    Ok(HeaderBlock { headers, remaining })
}

/// 读取请求行之后紧跟的 Headers，写入 `headers`
///
/// 遇到第一个不像 Header 的行（见 [`is_header_line`]）即停止，返回从该行开始的请求体。
pub fn extract_trailing_headers<'a>(
    context: &VariableContext,
    headers: &mut Headers,
    lines: &'a [&'a str],
) -> &'a [&'a str] {
    let mut remaining = skip_boilerplate(lines);

    while let Some(&line) = remaining.first() {
        let Some((name, value)) = line.split_once(':').filter(|_| is_header_line(line)) else {
            break;
        };

        let value = VariableResolver::substitute(value.trim(), context);
        trace!(header = name.trim(), value = %value, "Parsed trailing header");
        headers.insert(name.trim(), value.split(';').map(str::to_string).collect());

        remaining = skip_boilerplate(&remaining[1..]);
    }

    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headers_with_blank_lines() {
        let lines = [
            "authorization: BEARER token",
            "",
            "user-agent: Chrome",
            "",
            "content-type: application/json",
            "",
            "",
        ];
        let block = extract_headers(&VariableContext::default(), &lines).unwrap();

        assert_eq!(block.headers.len(), 3);
        assert_eq!(block.headers.get("authorization"), Some("BEARER token"));
        assert_eq!(block.headers.get("user-agent"), Some("Chrome"));
        assert_eq!(block.headers.get("content-type"), Some("application/json"));
        assert!(block.remaining.is_empty());
    }

    #[test]
    fn test_extract_headers_stops_at_request_line() {
        let lines = ["accept: */*", "# comment", "POST /users", "{", "}"];
        let block = extract_headers(&VariableContext::default(), &lines).unwrap();

        assert_eq!(block.headers.len(), 1);
        assert_eq!(block.remaining, &["POST /users", "{", "}"]);
    }

    #[test]
    fn test_extract_headers_splits_values() {
        let lines = ["accept: text/html;application/json"];
        let block = extract_headers(&VariableContext::default(), &lines).unwrap();

        assert_eq!(
            block.headers.get_all("accept"),
            Some(&["text/html".to_string(), "application/json".to_string()][..])
        );
    }

    #[test]
    fn test_extract_headers_keeps_extra_colons_in_value() {
        let lines = ["X-Forwarded-Host: example.com:8080"];
        let block = extract_headers(&VariableContext::default(), &lines).unwrap();

        assert_eq!(block.headers.get("X-Forwarded-Host"), Some("example.com:8080"));
    }

    #[test]
    fn test_extract_headers_interpolates_values() {
        let mut vars = Headers::new();
        vars.insert("token", vec!["xyz".to_string()]);
        let ctx = VariableContext::new(None, vars);

        let lines = ["authorization: BEARER :token", "x-trace: :missing"];
        let block = extract_headers(&ctx, &lines).unwrap();

        assert_eq!(block.headers.get("authorization"), Some("BEARER xyz"));
        assert_eq!(block.headers.get("x-trace"), Some(":missing"));
    }

    #[test]
    fn test_extract_headers_last_write_wins() {
        let lines = ["token: first", "token: second", "Token: other"];
        let block = extract_headers(&VariableContext::default(), &lines).unwrap();

        assert_eq!(block.headers.len(), 2);
        assert_eq!(block.headers.get("token"), Some("second"));
        assert_eq!(block.headers.get("Token"), Some("other"));
    }

    #[test]
    fn test_extract_trailing_headers_stop_at_body() {
        let mut vars = Headers::new();
        vars.insert("token", vec!["xyz".to_string()]);
        let ctx = VariableContext::new(None, vars);

        let lines = [
            "",
            "authorization: BEARER :token",
            "",
            "{",
            "    \"username\": \"test\"",
            "}",
        ];
        let mut headers = Headers::new();
        let body = extract_trailing_headers(&ctx, &mut headers, &lines);

        assert_eq!(headers.get("authorization"), Some("BEARER xyz"));
        assert_eq!(body, &["{", "    \"username\": \"test\"", "}"]);
    }

    #[test]
    fn test_extract_trailing_headers_json_body_only() {
        let lines = ["{\"name\": \"x\"}"];
        let mut headers = Headers::new();
        let body = extract_trailing_headers(&VariableContext::default(), &mut headers, &lines);

        assert!(headers.is_empty());
        assert_eq!(body, &lines);
    }

    #[test]
    fn test_extract_headers_invalid_parameter() {
        let lines = ["accept: */*", "not a header"];
        let err = extract_headers(&VariableContext::default(), &lines).unwrap_err();

        match err {
            ParseError::InvalidParameter { line, partial } => {
                assert_eq!(line, "not a header");
                assert_eq!(partial.get("accept"), Some("*/*"));
            }
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }
}
