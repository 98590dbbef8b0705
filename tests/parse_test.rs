use restwatch::http::Method;
use restwatch::parser::parse_content;
use restwatch::{ParseError, parse};

const SCRIPT: &str = r#"# Global Variable
http://example.com

token: xyz
user_id: 123
post_id: abcde12345
--

GET /home

authorization: :token
--

http://example1.com

PUT /users/:user_id/posts/:post_id

authorization: BEARER :token

{
    "username": "test",
    "password": "topsecret"
}

--

http://example2.com

POST /users/register

{
    "username": "test",
    "password": "topsecret"
}"#;

/// 完整脚本：全局变量块加三个请求
#[test]
fn test_parse_full_script() {
    let doc = parse(SCRIPT.as_bytes()).unwrap();

    assert_eq!(doc.segments.len(), 4);
    assert_eq!(doc.requests.len(), 3);

    let home = &doc.requests[0];
    assert_eq!(home.method, Method::Get);
    assert_eq!(home.url.as_str(), "http://example.com/home");
    assert_eq!(home.headers.get("authorization"), Some("xyz"));
    assert!(!home.has_body());

    let update = &doc.requests[1];
    assert_eq!(update.method, Method::Put);
    assert_eq!(
        update.url.as_str(),
        "http://example1.com/users/123/posts/abcde12345"
    );
    assert_eq!(update.headers.get("authorization"), Some("BEARER xyz"));
    assert_eq!(
        update.body_text(),
        "{\n    \"username\": \"test\",\n    \"password\": \"topsecret\"\n}\n"
    );

    let register = &doc.requests[2];
    assert_eq!(register.method, Method::Post);
    assert_eq!(register.url.as_str(), "http://example2.com/users/register");
    assert!(register.headers.is_empty());
    assert!(register.body_text().starts_with('{'));
    assert!(register.body_text().ends_with('}'));
}

#[test]
fn test_parse_global_variables() {
    let doc = parse_content(SCRIPT).unwrap();

    assert_eq!(
        doc.variables.base_url().map(|u| u.as_str()),
        Some("http://example.com/")
    );
    assert_eq!(doc.variables.get("token"), Some("xyz"));
    assert_eq!(doc.variables.get("user_id"), Some("123"));
    assert_eq!(doc.variables.get("post_id"), Some("abcde12345"));
}

/// 同一份内容解析两次，结果一致
#[test]
fn test_parse_is_idempotent() {
    let first = parse_content(SCRIPT).unwrap();
    let second = parse_content(SCRIPT).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parse_indented_script() {
    let indented: String = SCRIPT
        .lines()
        .map(|line| format!("\t\t{line}\n"))
        .collect();
    let doc = parse_content(&indented).unwrap();

    assert_eq!(doc.requests.len(), 3);
    assert_eq!(doc.requests[0].url.as_str(), "http://example.com/home");
    assert_eq!(doc.requests[1].headers.get("authorization"), Some("BEARER xyz"));
    assert_eq!(
        doc.requests[2].url.as_str(),
        "http://example2.com/users/register"
    );
}

#[test]
fn test_source_text_is_segment() {
    let doc = parse_content(SCRIPT).unwrap();

    assert_eq!(doc.requests[0].source_text, doc.segments[1]);
    assert!(doc.requests[1].source_text.contains("PUT /users/:user_id/posts/:post_id"));
}

#[test]
fn test_separator_only_document() {
    let doc = parse_content("--\n--\n\n--").unwrap();
    assert!(doc.requests.is_empty());
    assert!(doc.segments.is_empty());
    assert!(doc.variables.is_empty());
}

#[test]
fn test_single_segment_has_no_global_block() {
    let err = parse_content("token: xyz\n").unwrap_err();
    // 唯一的分段被当作请求；没有主机，重新解析失败
    assert!(matches!(err.source, ParseError::UrlReparse { .. }));
    assert_eq!(err.segment, 0);
}

#[test]
fn test_unresolved_variable_passes_through() {
    let content = "http://example.com\n--\nx-trace: :missing\nGET /users/:id\n";
    let doc = parse_content(content).unwrap();

    assert_eq!(doc.requests[0].headers.get("x-trace"), Some(":missing"));
    assert_eq!(doc.requests[0].url.path(), "/users/:id");
}

#[test]
fn test_descriptor_can_be_read_repeatedly() {
    let doc = parse_content(SCRIPT).unwrap();
    let request = doc.requests[1].clone();

    assert_eq!(request.body, doc.requests[1].body);
    assert_eq!(request.body_text(), doc.requests[1].body_text());
}

/// 第二个请求出错时，整个文档解析失败并指出分段
#[test]
fn test_error_aborts_whole_document() {
    let content = "http://example.com\n--\nGET /ok\n--\naccept */*\nGET /x\n--\nGET /later\n";
    let err = parse_content(content).unwrap_err();

    assert_eq!(err.segment, 2);
    assert_eq!(err.segments.len(), 4);
    assert!(matches!(err.source, ParseError::InvalidParameter { .. }));
    assert_eq!(err.to_string(), format!("segment 3: {}", err.source));
}

#[test]
fn test_invalid_request_line() {
    let content = "http://example.com\n--\nhealth\n";
    let err = parse_content(content).unwrap_err();
    assert_eq!(
        err.source,
        ParseError::InvalidRequest {
            line: "health".to_string()
        }
    );
}

#[test]
fn test_invalid_explicit_url() {
    let content = "http://example.com\n--\nhttp://exa mple.com\nGET /\n";
    let err = parse_content(content).unwrap_err();
    assert!(matches!(err.source, ParseError::InvalidUrl { .. }));
}
