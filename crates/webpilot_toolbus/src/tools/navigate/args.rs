use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NavigateArgs {
    /// Absolute URL to load
    pub url: String,
}
