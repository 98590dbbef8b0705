use std::fmt;

use inquire::{Confirm, InquireError, Select, Text};

use crate::Result;
use crate::parser::{ParsedDocument, RequestDescriptor};

/// 主菜单的选择结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Variables,
    Request(usize),
    Quit,
}

/// 请求菜单中的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Execute,
    Source,
    Back,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Execute, Action::Source, Action::Back];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::View => "View",
            Action::Execute => "Execute",
            Action::Source => "Source",
            Action::Back => "Back",
        };
        f.write_str(label)
    }
}

/// 菜单项：显示文本加上对应的选择
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub label: String,
    pub choice: MainChoice,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// 主菜单项：变量、每个请求（`METHOD URL`）、退出
pub fn main_items(document: &ParsedDocument) -> Vec<MenuItem> {
    let mut items = Vec::with_capacity(document.requests.len() + 2);
    items.push(MenuItem {
        label: "Variable".to_string(),
        choice: MainChoice::Variables,
    });
    items.extend(
        document
            .requests
            .iter()
            .enumerate()
            .map(|(index, request)| MenuItem {
                label: request.label(),
                choice: MainChoice::Request(index),
            }),
    );
    items.push(MenuItem {
        label: "Quit".to_string(),
        choice: MainChoice::Quit,
    });
    items
}

/// 取消（Esc / Ctrl-C）时返回 fallback
fn or_cancel<T>(result: std::result::Result<T, InquireError>, fallback: T) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(fallback),
        Err(e) => Err(e.into()),
    }
}

pub fn choose_main(document: &ParsedDocument) -> Result<MainChoice> {
    let selected = Select::new("Choose endpoint", main_items(document))
        .with_page_size(15)
        .with_help_message("Enter to select, type to filter, Esc to quit")
        .prompt()
        .map(|item| item.choice);
    or_cancel(selected, MainChoice::Quit)
}

pub fn choose_action(request: &RequestDescriptor) -> Result<Action> {
    let message = format!("Endpoint {}", request.label());
    let selected = Select::new(&message, Action::ALL.to_vec()).prompt();
    or_cancel(selected, Action::Back)
}

/// 解析失败后询问是否重新加载
pub fn confirm_reload() -> Result<bool> {
    let answer = Confirm::new("Reload the file?").with_default(true).prompt();
    or_cancel(answer, false)
}

pub fn pause() -> Result<()> {
    let answer = Text::new("Press enter to continue").prompt_skippable();
    or_cancel(answer.map(|_| ()), ())
}
