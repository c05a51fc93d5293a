use std::string::FromUtf8Error;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::AppResult;

use super::protocol::{BridgeResponse, PROTOCOL_VERSION};

#[derive(Debug)]
pub enum Line {
    Blank,
    Text(String),
    NotUtf8(FromUtf8Error),
}

pub struct NdjsonIo<R, W> {
    reader: R,
    writer: W,
}

impl<R, W> NdjsonIo<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// `None` at EOF. Invalid UTF-8 is reported per line instead of failing the stream.
    pub async fn read_line(&mut self) -> AppResult<Option<Line>> {
        let mut buf = Vec::new();
        let n = self.reader.read_until(b'\n', &mut buf).await?;
        if n == 0 {
            return Ok(None);
        }
        let line = match String::from_utf8(buf) {
            Ok(s) => s,
            Err(e) => return Ok(Some(Line::NotUtf8(e))),
        };
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        if line.trim().is_empty() {
            return Ok(Some(Line::Blank));
        }
        Ok(Some(Line::Text(line.to_string())))
    }

    pub async fn write_json_line<T: serde::Serialize>(&mut self, v: &T) -> AppResult<()> {
        let mut buf = serde_json::to_vec(v)?;
        buf.push(b'\n');
        self.writer.write_all(&buf).await?;
        self.writer.flush().await?;
        Ok(())
    }

    pub async fn protocol_error(&mut self, id: String, code: &'static str, msg: String) -> AppResult<()> {
        let resp = BridgeResponse::<()>::err(PROTOCOL_VERSION, id, code, msg);
        self.write_json_line(&resp).await
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}
