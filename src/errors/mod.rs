pub mod types;

pub use types::CopilotError;
