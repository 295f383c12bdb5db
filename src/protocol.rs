//! Messages published by opponent movers and the frame codec used to carry
//! them across the worker-process pipe.
//!
//! A frame is a big-endian `u32` payload length followed by the bincode
//! encoding of one [`OpponentUpdate`].

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::Position;

/// Upper bound on a frame payload. Real updates are a handful of bytes.
pub const MAX_FRAME_SIZE: u32 = 1024;

/// New position of one opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentUpdate {
    pub id: u8,
    pub pos: Position,
}

/// Serialize an update into a complete frame.
pub fn encode_frame(update: &OpponentUpdate) -> anyhow::Result<Vec<u8>> {
    let data = bincode::serialize(update)
        .map_err(|e| anyhow::anyhow!("Serialization error: {}", e))?;
    if data.len() as u32 > MAX_FRAME_SIZE {
        return Err(anyhow::anyhow!(
            "Frame too large: {} bytes (max: {})",
            data.len(),
            MAX_FRAME_SIZE
        ));
    }
    let mut frame = Vec::with_capacity(4 + data.len());
    frame.extend_from_slice(&(data.len() as u32).to_be_bytes());
    frame.extend_from_slice(&data);
    Ok(frame)
}

/// Write one frame and flush it so the reader sees it immediately.
pub fn write_frame<W: Write>(out: &mut W, update: &OpponentUpdate) -> anyhow::Result<()> {
    let frame = encode_frame(update)?;
    out.write_all(&frame).map_err(|e| {
        if e.kind() == io::ErrorKind::BrokenPipe {
            anyhow::anyhow!("Pipe closed by reader")
        } else {
            anyhow::anyhow!("Write error: {}", e)
        }
    })?;
    out.flush()
        .map_err(|e| anyhow::anyhow!("Flush error: {}", e))?;
    Ok(())
}

/// Read one frame. Returns `Ok(None)` when the stream ends cleanly between frames.
pub async fn read_frame<R: AsyncRead + Unpin>(input: &mut R) -> anyhow::Result<Option<OpponentUpdate>> {
    let mut len_buf = [0u8; 4];
    match input.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(anyhow::anyhow!("Read error: {}", e)),
    }

    let len = u32::from_be_bytes(len_buf);
    if len > MAX_FRAME_SIZE {
        return Err(anyhow::anyhow!(
            "Frame too large: {} bytes (max: {})",
            len,
            MAX_FRAME_SIZE
        ));
    }
    if len == 0 {
        return Err(anyhow::anyhow!("Invalid frame length: 0"));
    }

    let mut buf = vec![0u8; len as usize];
    input.read_exact(&mut buf).await.map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            anyhow::anyhow!("Stream ended mid-frame")
        } else {
            anyhow::anyhow!("Read error: {}", e)
        }
    })?;

    let update = bincode::deserialize(&buf)
        .map_err(|e| anyhow::anyhow!("Deserialization error: {}", e))?;
    Ok(Some(update))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_back_written_frames() {
        let updates = [
            OpponentUpdate { id: 0, pos: Position::new(1, 2) },
            OpponentUpdate { id: 2, pos: Position::new(9, 0) },
        ];
        let mut buf = Vec::new();
        for u in &updates {
            write_frame(&mut buf, u).unwrap();
        }

        let mut input = &buf[..];
        assert_eq!(read_frame(&mut input).await.unwrap(), Some(updates[0]));
        assert_eq!(read_frame(&mut input).await.unwrap(), Some(updates[1]));
        assert_eq!(read_frame(&mut input).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_zero_length() {
        let buf = 0u32.to_be_bytes();
        let mut input = &buf[..];
        assert!(read_frame(&mut input).await.is_err());
    }
}
