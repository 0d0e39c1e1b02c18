use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use anyhow::{Context, Result};
use serde::Deserialize;
use crate::plot::FigureStyle;
/// Largest exported figure side in pixels.
pub const MAX_FIGURE_SIDE: u32 = 16384;
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}
impl Default for FigureSize {
    fn default() -> Self {
        FigureSize {
            width: 1200,
            height: 800,
        }
    }
}
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Mirror value-window edits around the data midpoint, keeping a
    /// diverging scale centred.
    pub linked_color: bool,
    /// Page multiplier used by the jump buttons.
    pub jump_step: u32,
    /// Size of exported figures in pixels.
    pub figure: FigureSize,
}
impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            linked_color: false,
            jump_step: 1,
            figure: FigureSize::default(),
        }
    }
}
impl ViewerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open config {}", path.display()))?;
        let config: ViewerConfig = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("cannot parse config {}", path.display()))?;
        Ok(config.sanitized())
    }
    /// A zero jump step would disable the jump buttons entirely.
    pub fn sanitized(mut self) -> Self {
        self.jump_step = self.jump_step.max(1);
        self.figure.width = self.figure.width.min(MAX_FIGURE_SIDE);
        self.figure.height = self.figure.height.min(MAX_FIGURE_SIDE);
        self
    }
    pub fn figure_style(&self) -> FigureStyle {
        FigureStyle {
            width: self.figure.width,
            height: self.figure.height,
            annotate: true,
        }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ViewerConfig = serde_json::from_str(r#"{"linked_color": true}"#).unwrap();
        assert!(config.linked_color);
        assert_eq!(config.jump_step, 1);
        assert_eq!(config.figure, FigureSize::default());
        let config: ViewerConfig =
            serde_json::from_str(r#"{"figure": {"height": 300}}"#).unwrap();
        assert_eq!(config.figure.width, 1200);
        assert_eq!(config.figure.height, 300);
    }
    #[test]
    fn zero_jump_step_is_raised() {
        let config: ViewerConfig = serde_json::from_str(r#"{"jump_step": 0}"#).unwrap();
        assert_eq!(config.sanitized().jump_step, 1);
    }
    #[test]
    fn oversized_figures_are_capped() {
        let config: ViewerConfig =
            serde_json::from_str(r#"{"figure": {"width": 100000, "height": 4000000000}}"#)
                .unwrap();
        let figure = config.sanitized().figure;
        assert_eq!(figure.width, MAX_FIGURE_SIDE);
        assert_eq!(figure.height, MAX_FIGURE_SIDE);
    }
    #[test]
    fn from_file_reports_path() {
        let err = ViewerConfig::from_file(Path::new("/nonexistent/viewer.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/viewer.json"));
    }
}
