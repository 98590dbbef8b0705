pub mod resolver;
pub mod types;

pub use resolver::VariableResolver;
pub use types::VariableContext;
