use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct WriteFileArgs {
    /// Bare filename, no directories
    pub filename: String,
    pub content: String,
}
