use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TypeTextArgs {
    pub text: String,

    /// Press Enter after typing
    #[serde(default)]
    pub submit: bool,
}
