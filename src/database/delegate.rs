//! Slow-path delegate contract.
//!
//! The managed layer answers the same queries the fast path does, at the
//! cost of a round trip through the runtime. The adapter only calls it when
//! the fast path reports the index unavailable (or a direct-handle lookup
//! missed). The delegate has no liveness state: it is always worth calling,
//! and whatever failure it reports is surfaced verbatim.

use super::{PathInfo, PropertyEntry};
use crate::protocol::ResponseCode;
use crate::protocol::packet::Value;

/// Object metadata as resolved by the delegate.
///
/// Mirrors the index row shape; the creation-date substitution and any
/// date-string formatting already happened on the delegate's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfoRecord {
    pub storage_id: u32,
    pub format: u16,
    pub parent: u32,
    pub date_created: i64,
    pub date_modified: i64,
    pub name: String,
}

/// The managed-layer query interface.
///
/// Every call blocks until the other side answers. Errors are protocol
/// response codes, not exceptions; `object_property_list` returns entries
/// carrying already-tagged values (dates as formatted strings), so both
/// resolution paths feed the same wire encoder.
pub trait DatabaseDelegate {
    fn object_file_path(&mut self, handle: u32) -> Result<PathInfo, ResponseCode>;

    fn object_info(&mut self, handle: u32) -> Result<ObjectInfoRecord, ResponseCode>;

    fn object_references(&mut self, handle: u32) -> Result<Vec<u32>, ResponseCode>;

    fn object_property_list(
        &mut self,
        handle: u32,
        format: u16,
        property: u32,
        group_code: u32,
        depth: u32,
    ) -> Result<Vec<PropertyEntry>, ResponseCode>;

    fn set_object_property(&mut self, handle: u32, property: u16, value: Value) -> ResponseCode;
}
