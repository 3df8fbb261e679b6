mod central_panel;
mod files_panel;
mod header;
mod text_prompt;
mod tools_panel;

pub use central_panel::central_panel;
pub use files_panel::files_panel;
pub use header::header;
pub use text_prompt::text_prompt;
pub use tools_panel::tools_panel;
