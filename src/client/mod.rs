//! Client Module
//!
//! Uploads local files to a filestat server and returns its report. Used by
//! the `filestat-send` binary.

pub mod sender;

pub use sender::{read_response, write_request, SendError, Sender};
