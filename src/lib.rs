pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod menu;
pub mod parser;
pub mod utils;
pub mod variable;
pub mod watcher;

// Re-export commonly used types
pub use error::{Result, RestwatchError};
pub use parser::{DocumentError, ParseError, ParsedDocument, RequestDescriptor, parse};
pub use variable::VariableContext;
