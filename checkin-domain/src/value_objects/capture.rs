// Frame capture value object

/// Result of asking a frame source for one capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// A QR symbol was found and decoded to text.
    Decoded(String),
    /// Nothing decodable in this frame.
    Empty,
    /// The source will not produce any more frames.
    Closed,
}
