//! The detector input boundary.
//!
//! The core does not care how detections are produced (model, backend,
//! camera) — only that each frame arrives as a [`FrameRecord`] whose labels
//! match the configured threshold table and whose coordinates share the
//! reference zone's pixel space.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use inspect_types::Detection;

use crate::InputError;

/// One frame's worth of detector output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Monotonically increasing frame identifier from the producer.
    pub frame_id: u64,
    /// Raw detections for this frame; may be empty.
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// The frame acquisition boundary.
///
/// `Ok(None)` signals a clean end of stream (operator stop); an error is an
/// acquisition failure. Both end the loop gracefully — the caller still runs
/// the shutdown clear.
pub trait FrameSource {
    /// Blocks for the next frame, if any.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when the underlying stream fails or produces
    /// an unparsable record.
    fn next_frame(&mut self) -> Result<Option<FrameRecord>, InputError>;
}

/// Reads frame records as JSON Lines from any buffered reader.
///
/// Blank lines are skipped; any other unparsable line is an acquisition
/// failure carrying the line number.
///
/// # Example
///
/// ```
/// use inspect_core::{FrameSource, JsonlSource};
///
/// let data = "{\"frame_id\":1,\"detections\":[]}\n\n{\"frame_id\":2}\n";
/// let mut source = JsonlSource::new(data.as_bytes());
///
/// assert_eq!(source.next_frame().unwrap().unwrap().frame_id, 1);
/// assert_eq!(source.next_frame().unwrap().unwrap().frame_id, 2);
/// assert!(source.next_frame().unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct JsonlSource<R> {
    reader: R,
    line: u64,
}

impl<R: BufRead> JsonlSource<R> {
    /// Wraps a buffered reader as a frame source.
    pub const fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> FrameSource for JsonlSource<R> {
    fn next_frame(&mut self) -> Result<Option<FrameRecord>, InputError> {
        let mut buf = String::new();
        loop {
            buf.clear();
            let read = self.reader.read_line(&mut buf)?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = buf.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed)
                .map(Some)
                .map_err(|err| InputError::Parse {
                    line: self.line,
                    reason: err.to_string(),
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inspect_types::BoundingBox;

    #[test]
    fn reads_frames_in_order() {
        let data = concat!(
            "{\"frame_id\":1,\"detections\":[{\"label\":\"stirrup\",\"confidence\":0.9,\"bbox\":[230,550,510,590]}]}\n",
            "{\"frame_id\":2,\"detections\":[]}\n",
        );
        let mut source = JsonlSource::new(data.as_bytes());

        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.frame_id, 1);
        assert_eq!(first.detections.len(), 1);
        assert_eq!(
            first.detections[0].bbox,
            BoundingBox::new(230.0, 550.0, 510.0, 590.0)
        );

        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.frame_id, 2);
        assert!(second.detections.is_empty());

        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn skips_blank_lines() {
        let data = "\n\n{\"frame_id\":5}\n";
        let mut source = JsonlSource::new(data.as_bytes());
        assert_eq!(source.next_frame().unwrap().unwrap().frame_id, 5);
    }

    #[test]
    fn reports_parse_failure_with_line_number() {
        let data = "{\"frame_id\":1}\nnot json\n";
        let mut source = JsonlSource::new(data.as_bytes());
        source.next_frame().unwrap();

        match source.next_frame() {
            Err(InputError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_detections_field_defaults_empty() {
        let mut source = JsonlSource::new("{\"frame_id\":9}\n".as_bytes());
        let frame = source.next_frame().unwrap().unwrap();
        assert!(frame.detections.is_empty());
    }
}
