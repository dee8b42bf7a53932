use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ClickArgs {
    /// X coordinate in CSS pixels
    pub x: f64,

    /// Y coordinate in CSS pixels
    pub y: f64,
}
