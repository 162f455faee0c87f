//! AI writing assistance.
//!
//! Defines the assistant request/reply types, the prompt construction shared
//! by every action, and the [`Generator`] trait that abstracts the model
//! backend so tests can substitute a fake.

pub mod gemini;

use std::fmt;

pub use gemini::GeminiClient;

/// How the assistant's output is merged into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiAction {
    /// Overwrite the whole document with the result.
    Replace,
    /// Add the result after the existing content.
    Append,
    /// Show the result in the sidebar without touching the document.
    Analyze,
}

impl fmt::Display for AiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Replace => "replace",
            Self::Append => "append",
            Self::Analyze => "analyze",
        };
        f.write_str(s)
    }
}

/// A completed assistant request, delivered back to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub action: AiAction,
    pub result: Result<String, GenerateError>,
}

/// Errors from a generation backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Gemini API key is missing; set GEMINI_API_KEY")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(String),
    #[error("Gemini API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// A text generation backend.
///
/// Implementations run synchronously; the caller is expected to invoke
/// them from a worker thread.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Maximum number of document characters included in the prompt context.
pub const CONTEXT_LIMIT: usize = 20_000;

/// Build the full prompt sent to the model.
///
/// Wraps the document (truncated to [`CONTEXT_LIMIT`] characters) and the
/// user's instruction in a fixed template that constrains the output to
/// bare markdown.
pub fn build_prompt(instruction: &str, content: &str) -> String {
    let context: String = content.chars().take(CONTEXT_LIMIT).collect();
    format!(
        "You are an expert writing assistant embedded in a Markdown editor.\n\
         \n\
         CONTEXT (The current document content):\n\
         \"\"\"\n\
         {context}\n\
         \"\"\"\n\
         \n\
         INSTRUCTION:\n\
         {instruction}\n\
         \n\
         OUTPUT RULES:\n\
         1. Return ONLY the requested markdown text.\n\
         2. Do not include \"Here is the text\" or conversational filler.\n\
         3. If asking to fix/replace, return the full corrected segment or the whole text if appropriate.\n\
         4. If asking to summarize, return a bulleted list."
    )
}

/// A canned assistant task offered in the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub instruction: &'static str,
    pub action: AiAction,
}

/// The sidebar's built-in tasks, in display order.
pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Fix Grammar",
        instruction: "Proofread the following markdown text, fixing grammar and spelling errors. \
                      Keep the same markdown structure.",
        action: AiAction::Replace,
    },
    QuickAction {
        label: "Continue Writing",
        instruction: "Continue writing the following markdown text creatively. \
                      Maintain the tone and style.",
        action: AiAction::Append,
    },
    QuickAction {
        label: "Summarize",
        instruction: "Summarize the following markdown content into a bulleted list.",
        action: AiAction::Analyze,
    },
];
