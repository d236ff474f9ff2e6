//! Wire Protocol
//!
//! filestat speaks a small binary protocol over a plain TCP stream.
//!
//! ## Overview
//!
//! ```text
//! Request  := fileCount:i32 File*
//! File     := nameLen:i32 nameBytes:utf8[nameLen]
//!             contentLen:i32 contentBytes[contentLen]
//! Response := resultText:utf8[until the server closes the stream]
//! ```
//!
//! All integers are 4-byte signed little-endian. The response has no length
//! prefix; the server signals its end by closing the connection.
//!
//! ## Example
//!
//! ```ignore
//! use filestat::protocol::{read_i32, read_length_prefixed, write_i32, write_length_prefixed};
//!
//! write_i32(&mut stream, 1).await?;
//! write_length_prefixed(&mut stream, b"notes.txt").await?;
//!
//! let count = read_i32(&mut stream).await?;
//! let name = read_length_prefixed(&mut stream, 4096).await?;
//! ```

pub mod frame;

// Re-export commonly used items for convenience
pub use frame::{
    encode_length_prefixed, prefix_for, read_exact, read_i32, read_length_prefixed,
    read_positive_length, write_i32, write_length_prefixed, FrameError, FrameResult,
    LENGTH_PREFIX_SIZE,
};
