//! Prompt text sent to the model.

pub const SYSTEM_PROMPT: &str = "You are a web navigation assistant with vision capabilities.
When you don't know something DO NOT stop or make assumptions, ASK the user for feedback so we can continue.
When you see a screenshot, analyze it carefully to identify elements and their positions.
First click on elements like form fields, then use the type tool to enter text. You can submit forms by setting submit=true when typing.
You can scroll up or down to see more content on the page.
After completing your search, use the write_file tool to save your findings in markdown format.
Think step by step and take screenshots between each step to ensure you are doing what you think you are doing.
";

pub const INITIAL_PROMPT: &str = "Search the price of AAA Amazon Basics batteries";

pub const SUMMARY_INSTRUCTIONS: &str = "Please summarize the following conversation while preserving key information, decisions, and context.
Focus on the steps we went through and what we've accomplished so far. Include any important findings or decisions made.
Provide a concise but comprehensive summary that will help continue the conversation effectively:

";

/// Placeholder left where stripped media used to be
pub const MEDIA_REMOVED: &str = "media removed";

/// Shown when the model or the effector host cannot be reached
pub const OPERATOR_HINT: &str =
    "verify the effector host is running and model credentials are configured";
