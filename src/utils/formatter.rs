use crate::http::Response;
use crate::parser::request::{credentials, port};
use crate::parser::{Headers, RequestDescriptor};
use crate::variable::VariableContext;
use colored::*;

/// 终端输出格式化：请求描述、变量上下文和响应
pub struct Formatter {
    color: bool,
    show_timing: bool,
}

impl Formatter {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            show_timing: true,
        }
    }

    pub fn with_timing(mut self, show_timing: bool) -> Self {
        self.show_timing = show_timing;
        self
    }

    fn paint(&self, text: String, style: impl FnOnce(&str) -> ColoredString) -> String {
        if self.color {
            style(&text).to_string()
        } else {
            text
        }
    }

    /// URL、Headers、请求体，之间以空行分隔
    pub fn format_request(&self, request: &RequestDescriptor) -> String {
        let mut output = Vec::new();
        output.push(self.paint(request.label(), |s| s.cyan().bold()));
        output.push(String::new());
        output.extend(self.format_headers(&request.headers));
        if request.has_body() {
            output.push(String::new());
            output.push(request.body_text().into_owned());
        }
        output.join("\n")
    }

    /// 基础 URL（不含路径）和全局 Headers
    pub fn format_variables(&self, variables: &VariableContext) -> String {
        let mut output = Vec::new();
        let base = match variables.base_url() {
            Some(url) => format!(
                "{}://{}{}{}",
                url.scheme(),
                credentials(url),
                url.host_str().unwrap_or_default(),
                port(url)
            ),
            None => "(no base URL)".to_string(),
        };
        output.push(self.paint(base, |s| s.cyan().bold()));
        output.push(String::new());
        output.extend(self.format_headers(variables.headers()));
        output.join("\n")
    }

    fn format_headers(&self, headers: &Headers) -> Vec<String> {
        headers
            .iter()
            .map(|(name, values)| {
                self.paint(format!("{}: {}", name, values.join(";")), |s| s.blue())
            })
            .collect()
    }

    /// 状态行、耗时、响应头和响应体（JSON 会被格式化）
    pub fn format_response(&self, response: &Response) -> String {
        let mut output = Vec::new();
        let status_line = format!(
            "HTTP {} {}",
            response.status.code(),
            response.status.reason_phrase()
        );
        output.push(self.paint(status_line, |s| {
            if response.is_success() {
                s.green().bold()
            } else if response.is_client_error() {
                s.yellow().bold()
            } else {
                s.red().bold()
            }
        }));

        if self.show_timing {
            let timing = format!("Time: {}ms", response.duration.as_millis());
            output.push(self.paint(timing, |s| s.cyan()));
        }

        output.push(String::new());
        for (key, value) in response.sorted_headers() {
            output.push(self.paint(format!("{}: {}", key, value), |s| s.blue()));
        }

        if !response.body.is_empty() {
            output.push(String::new());
            // 尝试格式化 JSON，失败则显示原始内容
            let formatted_body = self
                .try_format_json(&response.body)
                .unwrap_or_else(|_| response.body.clone());
            output.push(formatted_body);
        }

        output.join("\n")
    }

    /// 尝试将 body 格式化为漂亮的 JSON
    fn try_format_json(&self, body: &str) -> serde_json::Result<String> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        serde_json::to_string_pretty(&value)
    }
}
