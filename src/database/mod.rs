//! The object database adapter: dual-path query resolution.
//!
//! Every request tries the content index first ([`store`]); when the index
//! is unavailable, or a direct-handle lookup misses (the index may be
//! stale), the request transparently retries through the managed
//! [`delegate`]. Both paths produce the same entry shapes and feed one wire
//! encoder, so the packet bytes do not depend on which path answered.
//!
//! One adapter instance serves one MTP session, on that session's thread.
//! Requests run to completion one at a time; nothing here is re-entrant.

pub mod columns;
pub mod delegate;
pub mod store;


use std::path::Path;

use crate::catalog::{self, PropertyDescriptor};
use crate::metadata::{self, RawPreviewExtractor};
use crate::protocol::{self, ResponseCode};
use crate::protocol::packet::{DataPacket, Value};

use delegate::DatabaseDelegate;
use store::{IndexStore, QueryOutcome, RowFilter};

pub use store::{DEFAULT_STORE_PATH, StoreConfig};

// ── Result shapes ────────────────────────────────────────────────────

/// Resolved file location of an object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathInfo {
    pub path: String,
    pub format: u16,
    /// On-disk size in bytes (from a filesystem stat, not the index).
    pub length: u64,
}

/// One element of a property-list dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub handle: u32,
    pub code: u16,
    pub value: Value,
}

/// Object metadata as reported to `GetObjectInfo`. Built fresh per query,
/// never cached.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInfo {
    pub storage_id: u32,
    pub format: u16,
    pub parent: u32,
    pub date_created: i64,
    pub date_modified: i64,
    pub name: String,
    pub compressed_size: u32,
    pub association_type: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<metadata::ThumbnailInfo>,
}

// ── Adapter ──────────────────────────────────────────────────────────

/// Object database for one MTP session.
///
/// Owns the index store handle (opened here, closed on drop), the managed
/// delegate, and the RAW preview collaborator.
pub struct MtpObjectDatabase<D: DatabaseDelegate> {
    store: IndexStore,
    delegate: D,
    raw_previews: Box<dyn RawPreviewExtractor>,
}

impl<D: DatabaseDelegate> MtpObjectDatabase<D> {
    pub fn new(config: &StoreConfig, delegate: D) -> Self {
        Self::with_raw_previews(config, delegate, Box::new(metadata::NoRawPreviews))
    }

    pub fn with_raw_previews(
        config: &StoreConfig,
        delegate: D,
        raw_previews: Box<dyn RawPreviewExtractor>,
    ) -> Self {
        Self {
            store: IndexStore::open(config),
            delegate,
            raw_previews,
        }
    }

    /// Whether the fast path is still usable (diagnostic only).
    pub fn fast_path_alive(&self) -> bool {
        self.store.is_alive()
    }

    // ── GetObjectFilePath ────────────────────────────────────────────

    pub fn object_file_path(&mut self, handle: u32) -> Result<PathInfo, ResponseCode> {
        match self.store.file_entry(handle) {
            QueryOutcome::Found(info) => Ok(info),
            outcome => {
                log::debug!("object_file_path({handle}): fast path {outcome:?}, using delegate");
                self.delegate.object_file_path(handle)
            }
        }
    }

    // ── GetObjectInfo ────────────────────────────────────────────────

    pub fn object_info(&mut self, handle: u32) -> Result<ObjectInfo, ResponseCode> {
        if let QueryOutcome::Found(path_info) = self.store.file_entry(handle) {
            if let QueryOutcome::Found(row) = self.store.object_info_row(handle) {
                let thumbnail =
                    metadata::extract(Path::new(&row.path), row.format, self.raw_previews.as_ref());
                return Ok(ObjectInfo {
                    storage_id: row.storage_id,
                    format: row.format,
                    parent: row.parent,
                    date_created: row.date_created,
                    date_modified: row.date_modified,
                    name: store::path_leaf(&row.path).to_string(),
                    compressed_size: clamp_size(path_info.length),
                    association_type: protocol::ASSOCIATION_TYPE_UNDEFINED,
                    thumbnail,
                });
            }
        }

        log::debug!("object_info({handle}): using delegate");
        let path_info = self.object_file_path(handle)?;
        let record = self.delegate.object_info(handle)?;
        let thumbnail = metadata::extract(
            Path::new(&path_info.path),
            record.format,
            self.raw_previews.as_ref(),
        );
        Ok(ObjectInfo {
            storage_id: record.storage_id,
            format: record.format,
            parent: record.parent,
            date_created: record.date_created,
            date_modified: record.date_modified,
            name: record.name,
            compressed_size: clamp_size(path_info.length),
            association_type: protocol::ASSOCIATION_TYPE_UNDEFINED,
            thumbnail,
        })
    }

    // ── GetObjectReferences ──────────────────────────────────────────

    /// An empty list from a reachable index is a final answer (non-playlist
    /// objects structurally have no references); only an unavailable index
    /// reroutes to the delegate.
    pub fn object_references(&mut self, handle: u32) -> Result<Vec<u32>, ResponseCode> {
        match self.store.object_references(handle) {
            QueryOutcome::Found(list) => Ok(list),
            QueryOutcome::NotFound => Ok(Vec::new()),
            QueryOutcome::Unavailable => {
                log::debug!("object_references({handle}): using delegate");
                self.delegate.object_references(handle)
            }
        }
    }

    // ── GetObjectPropList ────────────────────────────────────────────

    pub fn object_property_list(
        &mut self,
        handle: u32,
        format: u16,
        property: u32,
        group_code: u32,
        depth: u32,
        packet: &mut DataPacket,
    ) -> ResponseCode {
        // protocol-level gates, checked before either path is consulted
        if group_code != 0 {
            log::warn!("property list: group code {group_code} not supported");
            packet.put_u32(0);
            return protocol::RESPONSE_GROUP_NOT_SUPPORTED;
        }
        if depth > 1 {
            log::warn!("property list: depth {depth} not supported");
            packet.put_u32(0);
            return protocol::RESPONSE_SPECIFICATION_BY_GROUP_UNSUPPORTED;
        }
        if property != protocol::PROP_ALL && catalog::descriptor(property as u16).is_none() {
            return protocol::RESPONSE_OBJECT_PROP_NOT_SUPPORTED;
        }

        let entries = match self.fast_property_list(handle, format, property, depth) {
            QueryOutcome::Found(entries) => entries,
            outcome => {
                log::debug!("property list({handle}): fast path {outcome:?}, using delegate");
                match self
                    .delegate
                    .object_property_list(handle, format, property, group_code, depth)
                {
                    Ok(entries) => entries,
                    Err(code) => return code,
                }
            }
        };
        encode_property_list(&entries, packet);
        protocol::RESPONSE_OK
    }

    fn fast_property_list(
        &mut self,
        handle: u32,
        format: u16,
        property: u32,
        depth: u32,
    ) -> QueryOutcome<Vec<PropertyEntry>> {
        let properties: Vec<u16> = if property == protocol::PROP_ALL {
            // the applicable set depends on the object's own format when the
            // request does not name one
            let mut set_format = format;
            if format == 0 && handle != 0 && handle != protocol::HANDLE_ALL {
                match self.store.object_format(handle) {
                    QueryOutcome::Found(f) => set_format = f,
                    QueryOutcome::NotFound => return QueryOutcome::NotFound,
                    QueryOutcome::Unavailable => return QueryOutcome::Unavailable,
                }
            }
            catalog::property_set(catalog::FormatClass::of(set_format)).to_vec()
        } else {
            vec![property as u16]
        };

        let filter = if format == 0 {
            if handle == protocol::HANDLE_ALL {
                RowFilter::All
            } else if depth == 1 {
                RowFilter::ChildrenOf(handle)
            } else {
                RowFilter::Object(handle)
            }
        } else if handle == protocol::HANDLE_ALL {
            RowFilter::AllWithFormat(format)
        } else if depth == 1 {
            RowFilter::ChildrenWithFormat(handle, format)
        } else {
            RowFilter::ObjectWithFormat(handle, format)
        };

        self.store.property_entries(filter, &properties)
    }

    // ── GetObjectPropValue ───────────────────────────────────────────

    pub fn object_property_value(
        &mut self,
        handle: u32,
        property: u16,
        packet: &mut DataPacket,
    ) -> ResponseCode {
        if catalog::descriptor(property).is_none() {
            return protocol::RESPONSE_OBJECT_PROP_NOT_SUPPORTED;
        }
        let entries = match self.fast_property_list(handle, 0, u32::from(property), 0) {
            QueryOutcome::Found(entries) => entries,
            _ => match self
                .delegate
                .object_property_list(handle, 0, u32::from(property), 0, 0)
            {
                Ok(entries) => entries,
                Err(code) => return code,
            },
        };
        // the value dataset carries exactly the one requested value
        let [entry] = entries.as_slice() else {
            log::error!(
                "property value({handle}, {property:#06x}): expected one entry, got {}",
                entries.len()
            );
            return protocol::RESPONSE_GENERAL_ERROR;
        };
        packet.put_value(&entry.value);
        protocol::RESPONSE_OK
    }

    // ── SetObjectPropValue ───────────────────────────────────────────

    pub fn set_object_property_value(
        &mut self,
        handle: u32,
        property: u16,
        packet: &mut DataPacket,
    ) -> ResponseCode {
        let Some(descriptor) = catalog::descriptor(property) else {
            return protocol::RESPONSE_OBJECT_PROP_NOT_SUPPORTED;
        };
        let value = match packet.read_value(descriptor.data_type) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("malformed value for property {property:#06x}: {e}");
                return protocol::RESPONSE_INVALID_OBJECT_PROP_FORMAT;
            }
        };
        self.delegate.set_object_property(handle, property, value)
    }

    // ── GetThumb ─────────────────────────────────────────────────────

    /// Thumbnail payload for the object, or `None` when it has none.
    pub fn thumbnail(&mut self, handle: u32) -> Option<Vec<u8>> {
        let info = self.object_file_path(handle).ok()?;
        metadata::thumbnail_bytes(Path::new(&info.path), info.format, self.raw_previews.as_ref())
    }

    // ── Catalog-served queries ───────────────────────────────────────

    pub fn supported_object_properties(&self, format: u16) -> &'static [u16] {
        catalog::property_set(catalog::FormatClass::of(format))
    }

    pub fn object_property_desc(&self, property: u16) -> Option<&'static PropertyDescriptor> {
        catalog::descriptor(property)
    }
}

// ── Wire encoding ────────────────────────────────────────────────────

/// Encodes a property-list dataset: one element count, then per element the
/// object handle, property code, type code, and value. Shared by both
/// resolution paths.
pub(crate) fn encode_property_list(entries: &[PropertyEntry], packet: &mut DataPacket) {
    packet.put_u32(entries.len() as u32);
    for entry in entries {
        packet.put_u32(entry.handle);
        packet.put_u16(entry.code);
        packet.put_u16(entry.value.data_type().code());
        packet.put_value(&entry.value);
    }
}

fn clamp_size(length: u64) -> u32 {
    length.min(u64::from(u32::MAX)) as u32
}
