use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, info};

use crate::http::response::Response;
use crate::parser::{Headers, RequestDescriptor};
use crate::{Result, RestwatchError};

/// 执行请求描述的 HTTP 客户端
#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    /// 执行一个请求描述
    ///
    /// 描述以引用传入，请求体被复制进请求，同一个描述可以反复查看和执行。
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<Response> {
        let headers = to_header_map(&request.headers)?;
        let mut req = self
            .inner
            .request(request.method.into(), request.url.clone())
            .headers(headers);

        if request.has_body() {
            req = req.body(request.body.clone());
        }

        info!(method = %request.method, url = %request.url, "Executing request");
        let start = Instant::now();
        let response = req.send().await?;
        let duration = start.elapsed();

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        debug!(status, elapsed_ms = duration.as_millis() as u64, "Received response");

        Response::new(status, headers, body, duration)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }
}

/// 把脚本中的 Headers 转换为 reqwest 的 HeaderMap，多个值逐个追加
fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, values) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| RestwatchError::InvalidHeader(format!("{name}: {e}")))?;
        for value in values {
            let header_value = HeaderValue::from_str(value.trim())
                .map_err(|e| RestwatchError::InvalidHeader(format!("{name}: {e}")))?;
            map.append(header_name.clone(), header_value);
        }
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_header_map_appends_values() {
        let mut headers = Headers::new();
        headers.insert("Accept", vec!["text/html".to_string(), " */*".to_string()]);
        headers.insert("authorization", vec!["BEARER xyz".to_string()]);

        let map = to_header_map(&headers).unwrap();
        let accept: Vec<_> = map.get_all("accept").iter().collect();
        assert_eq!(accept.len(), 2);
        assert_eq!(accept[1], "*/*");
        assert_eq!(map.get("authorization").unwrap(), "BEARER xyz");
    }

    #[test]
    fn test_to_header_map_rejects_invalid_name() {
        let mut headers = Headers::new();
        headers.insert("bad header", vec!["x".to_string()]);

        let err = to_header_map(&headers).unwrap_err();
        assert!(matches!(err, RestwatchError::InvalidHeader(_)));
    }

    #[test]
    fn test_client_new() {
        assert!(Client::new(Client::DEFAULT_TIMEOUT).is_ok());
    }
}
