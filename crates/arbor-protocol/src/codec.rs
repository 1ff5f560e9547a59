use bytes::{Buf, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::error::ProtocolError;
use crate::frame::ProtocolMessage;

/// Frames larger than this are rejected rather than buffered without bound.
const MAX_FRAME_LEN: u32 = 1024 * 1024;
const READ_BUF_SIZE: usize = 4096;

/// Reads one length-prefixed JSON-encoded [`ProtocolMessage`] per call.
///
/// The wire shape is a `u32` big-endian length prefix followed by that many
/// bytes of `serde_json`-encoded body. This is the core's only framing
/// concern; it knows nothing about TCP beyond the owned read half it wraps.
pub struct FrameReader {
    stream: OwnedReadHalf,
    buf: BytesMut,
}

impl FrameReader {
    pub fn new(stream: OwnedReadHalf) -> Self {
        Self {
            stream,
            buf: BytesMut::with_capacity(READ_BUF_SIZE),
        }
    }

    /// Reads the next frame, returning `Ok(None)` on a clean EOF between
    /// frames and `Err` on any other read or decode failure.
    pub async fn read_frame(&mut self) -> Result<Option<ProtocolMessage>, ProtocolError> {
        let len = match self.read_u32().await? {
            Some(len) => len,
            None => return Ok(None),
        };
        if len > MAX_FRAME_LEN {
            return Err(ProtocolError::FrameTooLarge {
                len,
                limit: MAX_FRAME_LEN,
            });
        }
        let body = self.read_exact(len as usize).await?;
        let msg = serde_json::from_slice(&body)?;
        Ok(Some(msg))
    }

    async fn read_u32(&mut self) -> Result<Option<u32>, ProtocolError> {
        while self.buf.len() < 4 {
            if !self.fill_buf().await? {
                if self.buf.is_empty() {
                    return Ok(None);
                }
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
        }
        Ok(Some(self.buf.get_u32()))
    }

    async fn read_exact(&mut self, n: usize) -> Result<BytesMut, ProtocolError> {
        while self.buf.len() < n {
            if !self.fill_buf().await? {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
            }
        }
        Ok(self.buf.split_to(n))
    }

    /// Returns `false` on EOF.
    async fn fill_buf(&mut self) -> Result<bool, ProtocolError> {
        self.buf.reserve(READ_BUF_SIZE);
        let n = self.stream.read_buf(&mut self.buf).await?;
        Ok(n != 0)
    }
}

/// Writes length-prefixed JSON-encoded [`ProtocolMessage`]s.
pub struct FrameWriter {
    stream: OwnedWriteHalf,
}

impl FrameWriter {
    pub fn new(stream: OwnedWriteHalf) -> Self {
        Self { stream }
    }

    pub async fn write_frame(&mut self, msg: &ProtocolMessage) -> Result<(), ProtocolError> {
        let body = serde_json::to_vec(msg)?;
        let len = u32::try_from(body.len()).map_err(|_| ProtocolError::FrameTooLarge {
            len: u32::MAX,
            limit: MAX_FRAME_LEN,
        })?;
        self.stream.write_all(&len.to_be_bytes()).await?;
        self.stream.write_all(&body).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChatMessage;

    #[tokio::test]
    async fn frame_round_trips_over_a_loopback_socket() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (server_stream, _) = listener.accept().await.unwrap();

        let (_client_r, client_w) = client.into_split();
        let (server_r, _server_w) = server_stream.into_split();

        let mut writer = FrameWriter::new(client_w);
        let mut reader = FrameReader::new(server_r);

        let sent = ProtocolMessage::new_message(ChatMessage::new("alice", "hi", ""));
        writer.write_frame(&sent).await.unwrap();

        let received = reader.read_frame().await.unwrap().unwrap();
        assert_eq!(received.chat.unwrap().content, "hi");
    }

    #[tokio::test]
    async fn read_frame_returns_none_on_clean_eof() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let client = tokio::net::TcpStream::connect(addr).await.unwrap();
        let (server_stream, _) = listener.accept().await.unwrap();
        drop(client);

        let (server_r, _server_w) = server_stream.into_split();
        let mut reader = FrameReader::new(server_r);

        assert!(reader.read_frame().await.unwrap().is_none());
    }
}
