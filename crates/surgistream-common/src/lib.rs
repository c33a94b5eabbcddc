//! Surgistream-Common: shared error type and media path utilities.
//!
//! - **Error Handling**: [`Error`] carries enough context for the HTTP layer
//!   to derive a status code via [`Error::http_status`]
//! - **Path Utilities**: video extension checks and content-type detection
//!
//! # Examples
//!
//! ```
//! use surgistream_common::paths::{content_type_for, is_video_file};
//! use surgistream_common::{Error, Result};
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("Compressed_cam1.mp4")));
//! assert_eq!(content_type_for(Path::new("clip.webm")), "video/webm");
//!
//! fn example() -> Result<()> {
//!     Err(Error::invalid_path("../secret.mp4", "parent directory segment"))
//! }
//! assert_eq!(example().unwrap_err().http_status(), 400);
//! ```

pub mod error;
pub mod paths;

pub use error::{Error, Result};
