//! JSON lines output for an external audio process

use super::Renderer;
use crate::engine::RegionUpdate;
use anyhow::Result;
use std::io::Write;

/// Writes every update as one line of JSON
pub struct JsonLinesRenderer<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonLinesRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Renderer for JsonLinesRenderer<W> {
    fn apply(&mut self, updates: &[RegionUpdate]) -> Result<()> {
        for update in updates {
            serde_json::to_writer(&mut self.writer, update)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Position, RegionCoordinate};

    #[test]
    fn test_one_line_per_update() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        renderer
            .apply(&[
                RegionUpdate::mute(RegionCoordinate::new(0, 0)),
                RegionUpdate::unmute(RegionCoordinate::new(1, 0), 280.0, Position::new(0.0, 1.0, 2.0)),
            ])
            .unwrap();

        let output = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(value["on"], true);
        assert_eq!(value["frequency_hz"], 280.0);
        assert_eq!(value["region"]["column"], 1);
    }

    #[test]
    fn test_empty_frame_writes_nothing() {
        let mut renderer = JsonLinesRenderer::new(Vec::new());
        renderer.apply(&[]).unwrap();
        assert!(renderer.into_inner().is_empty());
    }
}
