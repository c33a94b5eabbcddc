//! Range-aware media serving.
//!
//! - [`resolver`]: identifier to file across the ordered storage roots
//! - [`range`]: single `bytes=` range parsing
//! - [`serve`]: blocking reads of the full file or one slice
//! - [`library`]: read-only listing and resolution checks
//!
//! Multi-range requests are a known limitation and are answered with 416.

pub mod library;
pub mod range;
pub mod resolver;
pub mod serve;

pub use library::{check_identifiers, list_videos, ResolutionOutcome, ResolutionReport, VideoEntry};
pub use range::{parse_range_header, ByteRange};
pub use resolver::{PathResolver, ResolvedFile};
pub use serve::{fetch, MediaPayload, MediaRequest, PayloadKind};
