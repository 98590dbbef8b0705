use tracing::debug;

use crate::parser::request::{extract_header_block, extract_request};
use crate::parser::text::{is_separator, is_url_line, skip_boilerplate};
use crate::parser::types::{
    DocumentError, ParseError, ParseResult, ParsedDocument, RequestDescriptor,
};
use crate::variable::VariableContext;

/// 请求脚本解析器
pub struct ScriptParser;

impl ScriptParser {
    /// 从原始字节解析（非 UTF-8 字节会被替换）
    pub fn parse_bytes(data: &[u8]) -> Result<ParsedDocument, DocumentError> {
        Self::parse_content(&String::from_utf8_lossy(data))
    }

    /// 从字符串内容解析
    ///
    /// 多于一个分段时，第一个分段作为全局变量块；其余每个分段生成一个请求描述，
    /// 只包含空行和注释的分段被跳过。任何错误都会终止整个解析。
    pub fn parse_content(content: &str) -> Result<ParsedDocument, DocumentError> {
        let segments = Self::split_segments(content);

        let mut variables = VariableContext::default();
        let mut first_request = 0;
        if segments.len() > 1 {
            let lines: Vec<&str> = segments[0].lines().collect();
            match Self::extract_variables(&lines) {
                Ok(ctx) => variables = ctx,
                Err(source) => {
                    return Err(DocumentError {
                        source,
                        segment: 0,
                        segments,
                        variables,
                    });
                }
            }
            first_request = 1;
        }

        match Self::parse_requests(&variables, &segments[first_request..]) {
            Ok(requests) => {
                debug!(
                    requests = requests.len(),
                    segments = segments.len(),
                    "Parsed request script"
                );
                Ok(ParsedDocument {
                    requests,
                    segments,
                    variables,
                })
            }
            Err((index, source)) => Err(DocumentError {
                source,
                segment: first_request + index,
                segments,
                variables,
            }),
        }
    }

    /// 按 `--` 分隔行切分文档，丢弃空分段
    pub fn split_segments(content: &str) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = String::new();

        for line in content.split_inclusive('\n') {
            if is_separator(line) {
                Self::push_segment(&mut segments, &mut current);
            } else {
                current.push_str(line);
            }
        }
        Self::push_segment(&mut segments, &mut current);

        segments
    }

    fn push_segment(segments: &mut Vec<String>, current: &mut String) {
        if current.trim().is_empty() {
            current.clear();
        } else {
            segments.push(std::mem::take(current));
        }
    }

    /// 解析全局变量块：可选的基础 URL 加上 Headers
    ///
    /// 只有出现 URL 行时才会有基础 URL。
    pub fn extract_variables(lines: &[&str]) -> ParseResult<VariableContext> {
        let lines = skip_boilerplate(lines);
        let empty = VariableContext::default();

        match lines.first() {
            None => Ok(empty),
            Some(&line) if is_url_line(line) => {
                let extracted = extract_request(&empty, lines)?;
                Ok(VariableContext::new(Some(extracted.url), extracted.headers))
            }
            Some(_) => {
                let block = extract_header_block(&empty, lines)?;
                Ok(VariableContext::new(None, block.headers))
            }
        }
    }

    fn parse_requests(
        variables: &VariableContext,
        segments: &[String],
    ) -> Result<Vec<RequestDescriptor>, (usize, ParseError)> {
        let mut requests = Vec::new();

        for (index, segment) in segments.iter().enumerate() {
            let lines: Vec<&str> = segment.lines().collect();
            let lines = skip_boilerplate(&lines);
            if lines.is_empty() {
                debug!(segment = index, "Skipping empty segment");
                continue;
            }

            let request =
                Self::parse_request(variables, segment, lines).map_err(|err| (index, err))?;
            requests.push(request);
        }

        Ok(requests)
    }

    fn parse_request(
        variables: &VariableContext,
        source: &str,
        lines: &[&str],
    ) -> ParseResult<RequestDescriptor> {
        let extracted = extract_request(variables, lines)?;

        Ok(RequestDescriptor {
            method: extracted.method,
            url: extracted.url,
            headers: extracted.headers,
            body: Self::extract_body(extracted.remaining),
            source_text: source.to_string(),
        })
    }

    /// 请求体：跳过开头空行和注释后，剩余行按换行原样拼接
    pub fn extract_body(lines: &[&str]) -> Vec<u8> {
        skip_boilerplate(lines).join("\n").into_bytes()
    }
}
