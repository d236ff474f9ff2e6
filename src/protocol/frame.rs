//! Length-Prefixed Frame Codec
//!
//! Every field on the wire is either a bare 32-bit signed length (the file
//! count) or a length followed by exactly that many payload bytes.
//!
//! ## Wire Format
//!
//! ```text
//! ┌────────────────────┬──────────────────────────────┐
//! │ length: i32 (LE)   │ payload: [u8; length]        │
//! └────────────────────┴──────────────────────────────┘
//! ```
//!
//! TCP has no message boundaries, so a single `read()` may return fewer
//! bytes than requested. All readers in this module loop until the requested
//! number of bytes has been collected, and report a [`FrameError::TruncatedStream`]
//! if the peer closes the connection first.
//!
//! ## Byte Order
//!
//! Integers are little-endian on every platform. Sender and receiver must
//! agree on this; it is part of the protocol, not a host detail.

use bytes::{BufMut, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Size of an encoded length prefix in bytes
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Errors that can occur while reading or writing frames.
#[derive(Debug, Error)]
pub enum FrameError {
    /// A length prefix was zero or negative
    #[error("invalid length prefix: {0}")]
    InvalidLength(i32),

    /// A frame is larger than the reader allows, or than an i32 can describe
    #[error("frame too large: {size} bytes (max: {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The stream ended before a declared length was satisfied
    #[error("stream ended after {received} of {expected} bytes")]
    TruncatedStream { expected: usize, received: usize },

    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for frame operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Encodes `payload` as a length-prefixed frame.
pub fn encode_length_prefixed(payload: &[u8]) -> FrameResult<BytesMut> {
    let len = prefix_for(payload.len())?;
    let mut buf = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    buf.put_i32_le(len);
    buf.put_slice(payload);
    Ok(buf)
}

/// Converts a payload size into a length prefix.
pub fn prefix_for(size: usize) -> FrameResult<i32> {
    i32::try_from(size).map_err(|_| FrameError::FrameTooLarge {
        size,
        max: i32::MAX as usize,
    })
}

/// Writes a bare 32-bit length prefix.
pub async fn write_i32<W>(writer: &mut W, value: i32) -> FrameResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&value.to_le_bytes()).await?;
    Ok(())
}

/// Writes `payload` preceded by its length.
///
/// Callers sharing one stream between several writers must synchronize
/// externally; the prefix and payload are two separate writes.
pub async fn write_length_prefixed<W>(writer: &mut W, payload: &[u8]) -> FrameResult<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode_length_prefixed(payload)?;
    writer.write_all(&frame).await?;
    Ok(())
}

/// Reads exactly `n` bytes, looping over partial reads.
pub async fn read_exact<R>(reader: &mut R, n: usize) -> FrameResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; n];
    fill(reader, &mut buf).await?;
    Ok(buf)
}

/// Reads a little-endian i32.
pub async fn read_i32<R>(reader: &mut R) -> FrameResult<i32>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; LENGTH_PREFIX_SIZE];
    fill(reader, &mut buf).await?;
    Ok(i32::from_le_bytes(buf))
}

/// Reads a length prefix followed by that many bytes.
///
/// The prefix is validated before anything is allocated: non-positive
/// lengths are rejected with [`FrameError::InvalidLength`] and lengths above
/// `max` with [`FrameError::FrameTooLarge`].
pub async fn read_length_prefixed<R>(reader: &mut R, max: usize) -> FrameResult<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let len = read_positive_length(reader).await?;
    if len > max {
        return Err(FrameError::FrameTooLarge { size: len, max });
    }
    read_exact(reader, len).await
}

/// Reads a length prefix and rejects zero or negative values.
pub async fn read_positive_length<R>(reader: &mut R) -> FrameResult<usize>
where
    R: AsyncRead + Unpin,
{
    let len = read_i32(reader).await?;
    if len <= 0 {
        return Err(FrameError::InvalidLength(len));
    }
    Ok(len as usize)
}

/// Fills `buf` completely or fails with `TruncatedStream`.
async fn fill<R>(reader: &mut R, buf: &mut [u8]) -> FrameResult<()>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            return Err(FrameError::TruncatedStream {
                expected: buf.len(),
                received: filled,
            });
        }
        filled += n;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[test]
    fn test_encode_length_prefixed() {
        let frame = encode_length_prefixed(b"a.txt").unwrap();
        assert_eq!(&frame[..4], &[5, 0, 0, 0]);
        assert_eq!(&frame[4..], b"a.txt");
    }

    #[test]
    fn test_prefix_for_rejects_oversized_payload() {
        let too_big = i32::MAX as usize + 1;
        assert!(matches!(
            prefix_for(too_big),
            Err(FrameError::FrameTooLarge { size, .. }) if size == too_big
        ));
    }

    #[tokio::test]
    async fn test_write_then_read_length_prefixed() {
        let mut wire = Vec::new();
        write_i32(&mut wire, 2).await.unwrap();
        write_length_prefixed(&mut wire, "файл.txt".as_bytes())
            .await
            .unwrap();

        let mut reader = &wire[..];
        assert_eq!(read_i32(&mut reader).await.unwrap(), 2);
        let name = read_length_prefixed(&mut reader, 1024).await.unwrap();
        assert_eq!(String::from_utf8(name).unwrap(), "файл.txt");
        assert!(reader.is_empty());
    }

    #[tokio::test]
    async fn test_read_i32_is_little_endian() {
        let mut reader = Builder::new().read(&[0x01, 0x02, 0x00, 0x00]).build();
        assert_eq!(read_i32(&mut reader).await.unwrap(), 0x0201);
    }

    #[tokio::test]
    async fn test_read_i32_negative() {
        let mut reader = Builder::new().read(&(-7i32).to_le_bytes()).build();
        assert_eq!(read_i32(&mut reader).await.unwrap(), -7);
    }

    #[tokio::test]
    async fn test_read_exact_across_partial_reads() {
        let mut reader = Builder::new()
            .read(b"He")
            .read(b"l")
            .read(b"lo wor")
            .read(b"ld")
            .build();
        let data = read_exact(&mut reader, 11).await.unwrap();
        assert_eq!(data, b"Hello world");
    }

    #[tokio::test]
    async fn test_read_i32_split_prefix() {
        let bytes = 1234i32.to_le_bytes();
        let mut reader = Builder::new()
            .read(&bytes[..1])
            .read(&bytes[1..3])
            .read(&bytes[3..])
            .build();
        assert_eq!(read_i32(&mut reader).await.unwrap(), 1234);
    }

    #[tokio::test]
    async fn test_read_exact_truncated() {
        let mut reader = Builder::new().read(b"abc").build();
        let err = read_exact(&mut reader, 5).await.unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedStream {
                expected: 5,
                received: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_read_i32_on_empty_stream() {
        let mut reader: &[u8] = &[];
        let err = read_i32(&mut reader).await.unwrap_err();
        assert!(matches!(
            err,
            FrameError::TruncatedStream {
                expected: 4,
                received: 0
            }
        ));
    }

    #[tokio::test]
    async fn test_zero_length_is_rejected_without_reading_payload() {
        // Nothing follows the prefix; a read attempt would hit the mock's end.
        let mut reader = Builder::new().read(&0i32.to_le_bytes()).build();
        let err = read_length_prefixed(&mut reader, 1024).await.unwrap_err();
        assert!(matches!(err, FrameError::InvalidLength(0)));
    }

    #[tokio::test]
    async fn test_negative_length_is_rejected() {
        let mut reader = Builder::new().read(&(-1i32).to_le_bytes()).build();
        let err = read_length_prefixed(&mut reader, 1024).await.unwrap_err();
        assert!(matches!(err, FrameError::InvalidLength(-1)));
    }

    #[tokio::test]
    async fn test_length_above_max_is_rejected() {
        let mut reader = Builder::new().read(&100i32.to_le_bytes()).build();
        let err = read_length_prefixed(&mut reader, 10).await.unwrap_err();
        assert!(matches!(
            err,
            FrameError::FrameTooLarge { size: 100, max: 10 }
        ));
    }
}
