//! Supported model catalog
//!
//! All models are served by the same Groq endpoint; the id is passed through
//! on each request.

/// Model id used when a request doesn't name one
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";

const MODELS: &[&str] = &[DEFAULT_MODEL, "llama-3.1-70b", "gemma2-9b-it"];

/// All supported model ids, in display order
pub fn all_models() -> &'static [&'static str] {
    MODELS
}

/// Look up a catalog model by id
pub fn find_model(id: &str) -> Option<&'static str> {
    MODELS.iter().copied().find(|m| *m == id)
}
