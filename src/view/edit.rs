//! Text entry for the window bounds.
//!
//! Bound editors are typed into one character at a time, so most intermediate
//! states are unparsable or crossed. Those never reach the user as errors: the
//! edit is dropped and the last valid window stays on screen.
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;
use crate::view::controller::WindowedMatrixView;
use crate::view::window::{IndexWindow, ValueWindow};
#[derive(Debug, Error, PartialEq)]
pub enum TransientEditError {
    #[error("bound {0:?} is not a number")]
    Unparsable(String),
    #[error("lower bound is above upper bound")]
    Crossed,
}
fn parse_bound<T: FromStr>(text: &str) -> Result<T, TransientEditError> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| TransientEditError::Unparsable(trimmed.to_owned()))
}
/// Parses a lower/upper pair, rejecting crossed bounds.
pub fn parse_bounds<T>(lower: &str, upper: &str) -> Result<(T, T), TransientEditError>
where
    T: FromStr + PartialOrd,
{
    let lower: T = parse_bound(lower)?;
    let upper: T = parse_bound(upper)?;
    if lower > upper {
        return Err(TransientEditError::Crossed);
    }
    Ok((lower, upper))
}
/// Text backing a pair of bound fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundsText {
    pub lower: String,
    pub upper: String,
}
impl BoundsText {
    pub fn show<T: Display>(&mut self, lower: T, upper: T) {
        self.lower = lower.to_string();
        self.upper = upper.to_string();
    }
    pub fn show_rows(&mut self, rows: IndexWindow) {
        self.show(rows.min, rows.max);
    }
    pub fn show_values(&mut self, values: ValueWindow) {
        self.show(values.low, values.high);
    }
    /// Pushes the typed row bounds into the view. Half-typed input is ignored.
    pub fn apply_rows(&self, view: &mut WindowedMatrixView) -> bool {
        match parse_bounds::<i64>(&self.lower, &self.upper) {
            Ok((min, max)) => view.set_index_window(min, max),
            Err(_) => false,
        }
    }
    /// Pushes the typed value bounds into the view. Half-typed input is ignored.
    pub fn apply_values(&self, view: &mut WindowedMatrixView) -> bool {
        match parse_bounds::<f64>(&self.lower, &self.upper) {
            Ok((low, high)) => view.set_value_window(low, high),
            Err(_) => false,
        }
    }
}
