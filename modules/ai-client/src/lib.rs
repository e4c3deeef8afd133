pub mod error;
pub mod gemini;
pub mod traits;
pub mod util;

pub use error::{AiError, JsonExtractError, Result};
pub use gemini::{Gemini, GeminiOutputBuilder, GeminiPromptBuilder, StructuredOutput};
pub use traits::{OutputBuilder, PromptBuilder};
pub use util::{extract_json, strip_code_blocks, truncate_to_char_boundary};
