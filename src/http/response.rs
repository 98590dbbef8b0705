use crate::Result;
use crate::http::types::Status;
use reqwest::header::HeaderMap as Headers;
use std::time::Duration;

#[derive(Debug)]
pub struct Response {
    pub status: Status,
    pub headers: Headers,
    pub body: String,
    pub duration: Duration,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: String, duration: Duration) -> Result<Self> {
        Ok(Self {
            status: Status::new(status)?,
            headers,
            body,
            duration,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_redirect(&self) -> bool {
        self.status.is_redirect()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }

    /// 响应头，按名称排序，多个值用 `;` 连接
    pub fn sorted_headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .headers
            .keys()
            .map(|name| {
                let values: Vec<&str> = self
                    .headers
                    .get_all(name)
                    .iter()
                    .map(|v| v.to_str().unwrap_or("<invalid utf-8>"))
                    .collect();
                (name.to_string(), values.join(";"))
            })
            .collect();
        headers.sort();
        headers
    }
}
