// Warn on unused dependencies to catch stack drift early
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

//! MTP responder object database.
//!
//! Answers the object-property side of an MTP session (`GetObjectInfo`,
//! `GetObjectPropList`, `GetObjectReferences`, `GetObjectFilePath`, and the
//! property value read/write pair) from two sources: a direct read path
//! against the device's content index (SQLite), and a managed delegate that
//! owns the authoritative media database. The direct path is an
//! optimization; when it cannot answer, the request falls through to the
//! delegate and the caller cannot tell the difference, down to the packet
//! bytes.
//!
//! # Modules
//!
//! - [`protocol`]: wire constants, the dataset packet buffer, and the typed
//!   value codec
//! - [`catalog`]: per-format property sets and property descriptors
//! - [`database`]: the adapter itself: fast-path store, delegate contract,
//!   fallback logic
//! - [`metadata`]: EXIF/RAW thumbnail metadata extraction

pub mod catalog;
pub mod database;
pub mod metadata;
pub mod protocol;

pub use database::delegate::{DatabaseDelegate, ObjectInfoRecord};
pub use database::store::QueryOutcome;
pub use database::{
    DEFAULT_STORE_PATH, MtpObjectDatabase, ObjectInfo, PathInfo, PropertyEntry, StoreConfig,
};
pub use metadata::{NoRawPreviews, RawPreviewExtractor, ThumbnailInfo};
pub use protocol::ResponseCode;
pub use protocol::packet::{CodecError, DataPacket, Value};
