//! Library side of the `prepaid` command: logging setup and the
//! file-to-file conversion pipeline.

pub mod logging;
pub mod pipeline;
