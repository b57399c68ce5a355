//! Line-oriented stand-in for the touch surface.

use anyhow::{anyhow, bail, Context, Result};
use shared::domain::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadInput {
    Touch(Point),
    Layout { width: f32, height: f32 },
    Quit,
}

/// Parses `x y`, `x,y`, `layout <w> <h>` or `quit`. Blank lines and
/// `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<PadInput>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
        return Ok(Some(PadInput::Quit));
    }
    if let Some(rest) = line.strip_prefix("layout") {
        let (width, height) = parse_pair(rest).context("layout expects <width> <height>")?;
        return Ok(Some(PadInput::Layout { width, height }));
    }

    let (x, y) = parse_pair(line).context("touch expects <x> <y>")?;
    Ok(Some(PadInput::Touch(Point::new(x, y))))
}

fn parse_pair(raw: &str) -> Result<(f32, f32)> {
    let mut parts = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let first = parts.next().ok_or_else(|| anyhow!("missing first value"))?;
    let second = parts.next().ok_or_else(|| anyhow!("missing second value"))?;
    if parts.next().is_some() {
        bail!("too many values");
    }
    let first = first
        .parse::<f32>()
        .with_context(|| format!("not a number: {first}"))?;
    let second = second
        .parse::<f32>()
        .with_context(|| format!("not a number: {second}"))?;
    Ok((first, second))
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
