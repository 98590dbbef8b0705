use crate::variable::types::VariableContext;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// 变量替换器
pub struct VariableResolver;

impl VariableResolver {
    /// 替换文本中所有 `:name` 形式的变量
    ///
    /// 找不到的变量原样保留（包括冒号）；替换结果不会再次扫描。
    pub fn substitute(text: &str, context: &VariableContext) -> String {
        static VAR_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = VAR_REGEX.get_or_init(|| Regex::new(r":([a-zA-Z0-9_-]+)").unwrap());

        re.replace_all(text, |caps: &Captures| {
            let var_name = &caps[1];
            context.get(var_name).unwrap_or(&caps[0]).to_string()
        })
        .to_string()
    }
}
