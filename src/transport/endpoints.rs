//! Endpoint paths for the Gemini API.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Constructs a path for a specific model.
///
/// # Example
///
/// ```
/// use gemini_prompt::transport::endpoints;
///
/// assert_eq!(endpoints::model("gemini-2.5-flash"), "/models/gemini-2.5-flash");
/// ```
pub fn model(name: &str) -> String {
    format!("{MODELS}/{name}")
}

/// Constructs a path for the generateContent endpoint.
///
/// # Example
///
/// ```
/// use gemini_prompt::transport::endpoints;
///
/// let path = endpoints::generate_content("gemini-2.5-flash");
/// assert_eq!(path, "/models/gemini-2.5-flash:generateContent");
/// ```
pub fn generate_content(model: &str) -> String {
    format!("{}:generateContent", self::model(model))
}
