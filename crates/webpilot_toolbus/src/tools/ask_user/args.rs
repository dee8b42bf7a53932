use serde::Deserialize;

const DEFAULT_QUESTION: &str = "What would you like to do next?";

#[derive(Debug, Deserialize)]
pub struct AskUserArgs {
    #[serde(default = "default_question")]
    pub question: String,
}

fn default_question() -> String {
    DEFAULT_QUESTION.to_string()
}
