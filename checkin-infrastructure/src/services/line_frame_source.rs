use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use checkin_domain::{Capture, FrameSource};

/// Frame source fed by a line-oriented reader, one decoded payload per line.
///
/// USB and Bluetooth badge scanners act as keyboards and terminate each code
/// with a newline, so stdin is the usual reader.
pub struct LineFrameSource<R> {
    lines: Mutex<Lines<BufReader<R>>>,
}

impl<R: AsyncRead + Unpin + Send> LineFrameSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(BufReader::new(reader).lines()),
        }
    }
}

impl LineFrameSource<Stdin> {
    pub fn stdin() -> Self {
        Self::new(tokio::io::stdin())
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> FrameSource for LineFrameSource<R> {
    async fn capture(&self) -> anyhow::Result<Capture> {
        let mut lines = self.lines.lock().await;
        Ok(match lines.next_line().await? {
            Some(line) if line.trim().is_empty() => Capture::Empty,
            Some(line) => Capture::Decoded(line.trim().to_string()),
            None => Capture::Closed,
        })
    }
}
