//! MTP protocol constants and core wire types.
//!
//! Only the subset of the MTP/PTP code space this subsystem touches:
//! object formats, object property codes, dataset element types, and the
//! response codes the object-property operations can produce. The packet
//! buffer and the typed value codec live in [`packet`].

pub mod packet;

// ── Object format codes ──────────────────────────────────────────────

pub const FORMAT_UNDEFINED: u16 = 0x3000;
pub const FORMAT_ASSOCIATION: u16 = 0x3001;
pub const FORMAT_WAV: u16 = 0x3008;
pub const FORMAT_MP3: u16 = 0x3009;
pub const FORMAT_MPEG: u16 = 0x300B;
/// Vendor-defined image format; some RAW containers (e.g. RAF) report this.
pub const FORMAT_DEFINED: u16 = 0x3800;
pub const FORMAT_EXIF_JPEG: u16 = 0x3801;
pub const FORMAT_TIFF_EP: u16 = 0x3802;
pub const FORMAT_BMP: u16 = 0x3804;
pub const FORMAT_GIF: u16 = 0x3807;
pub const FORMAT_JFIF: u16 = 0x3808;
pub const FORMAT_PNG: u16 = 0x380B;
pub const FORMAT_TIFF: u16 = 0x380D;
pub const FORMAT_DNG: u16 = 0x3811;
pub const FORMAT_HEIF: u16 = 0x3812;
pub const FORMAT_WMA: u16 = 0xB901;
pub const FORMAT_OGG: u16 = 0xB902;
pub const FORMAT_AAC: u16 = 0xB903;
pub const FORMAT_WMV: u16 = 0xB981;
pub const FORMAT_3GP_CONTAINER: u16 = 0xB984;

// ── Object property codes ────────────────────────────────────────────

pub const PROP_STORAGE_ID: u16 = 0xDC01;
pub const PROP_OBJECT_FORMAT: u16 = 0xDC02;
pub const PROP_PROTECTION_STATUS: u16 = 0xDC03;
pub const PROP_OBJECT_SIZE: u16 = 0xDC04;
pub const PROP_OBJECT_FILE_NAME: u16 = 0xDC07;
pub const PROP_DATE_MODIFIED: u16 = 0xDC09;
pub const PROP_PARENT_OBJECT: u16 = 0xDC0B;
pub const PROP_PERSISTENT_UID: u16 = 0xDC41;
pub const PROP_NAME: u16 = 0xDC44;
pub const PROP_ARTIST: u16 = 0xDC46;
pub const PROP_DESCRIPTION: u16 = 0xDC48;
pub const PROP_DATE_ADDED: u16 = 0xDC4E;
pub const PROP_DURATION: u16 = 0xDC89;
pub const PROP_TRACK: u16 = 0xDC8B;
pub const PROP_GENRE: u16 = 0xDC8C;
pub const PROP_COMPOSER: u16 = 0xDC96;
pub const PROP_ORIGINAL_RELEASE_DATE: u16 = 0xDC99;
pub const PROP_ALBUM_NAME: u16 = 0xDC9A;
pub const PROP_ALBUM_ARTIST: u16 = 0xDC9B;
pub const PROP_DISPLAY_NAME: u16 = 0xDCE0;
pub const PROP_SAMPLE_RATE: u16 = 0xDE93;
pub const PROP_NUMBER_OF_CHANNELS: u16 = 0xDE94;
pub const PROP_AUDIO_WAVE_CODEC: u16 = 0xDE99;
pub const PROP_AUDIO_BITRATE: u16 = 0xDE9A;
pub const PROP_BITRATE_TYPE: u16 = 0xDE9E;

/// Wildcard in `GetObjectPropList` requests: all properties of the object.
pub const PROP_ALL: u32 = 0xFFFF_FFFF;

/// Wildcard object handle: every object (optionally format-filtered).
pub const HANDLE_ALL: u32 = 0xFFFF_FFFF;

// ── Response codes ───────────────────────────────────────────────────

pub type ResponseCode = u16;

pub const RESPONSE_OK: ResponseCode = 0x2001;
pub const RESPONSE_GENERAL_ERROR: ResponseCode = 0x2002;
pub const RESPONSE_INVALID_OBJECT_HANDLE: ResponseCode = 0x2009;
pub const RESPONSE_INVALID_OBJECT_PROP_FORMAT: ResponseCode = 0xA802;
pub const RESPONSE_GROUP_NOT_SUPPORTED: ResponseCode = 0xA805;
pub const RESPONSE_SPECIFICATION_BY_GROUP_UNSUPPORTED: ResponseCode = 0xA807;
pub const RESPONSE_OBJECT_PROP_NOT_SUPPORTED: ResponseCode = 0xA80A;

// ── Association types ────────────────────────────────────────────────

pub const ASSOCIATION_TYPE_UNDEFINED: u16 = 0x0000;

// ── Index store media-type classification ────────────────────────────
// Values of the `media_type` column in the content index.

pub const MEDIA_TYPE_NONE: i64 = 0;
pub const MEDIA_TYPE_IMAGE: i64 = 1;
pub const MEDIA_TYPE_AUDIO: i64 = 2;
pub const MEDIA_TYPE_VIDEO: i64 = 3;
pub const MEDIA_TYPE_PLAYLIST: i64 = 4;

// ── Dataset element types ────────────────────────────────────────────

/// MTP dataset element type. Closed over the simple scalar types and the
/// string type; array types are not used by this subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Int128,
    Uint128,
    Str,
}

impl DataType {
    /// The on-wire type code.
    pub fn code(self) -> u16 {
        match self {
            DataType::Int8 => 0x0001,
            DataType::Uint8 => 0x0002,
            DataType::Int16 => 0x0003,
            DataType::Uint16 => 0x0004,
            DataType::Int32 => 0x0005,
            DataType::Uint32 => 0x0006,
            DataType::Int64 => 0x0007,
            DataType::Uint64 => 0x0008,
            DataType::Int128 => 0x0009,
            DataType::Uint128 => 0x000A,
            DataType::Str => 0xFFFF,
        }
    }

    pub fn from_code(code: u16) -> Option<DataType> {
        Some(match code {
            0x0001 => DataType::Int8,
            0x0002 => DataType::Uint8,
            0x0003 => DataType::Int16,
            0x0004 => DataType::Uint16,
            0x0005 => DataType::Int32,
            0x0006 => DataType::Uint32,
            0x0007 => DataType::Int64,
            0x0008 => DataType::Uint64,
            0x0009 => DataType::Int128,
            0x000A => DataType::Uint128,
            0xFFFF => DataType::Str,
            _ => return None,
        })
    }
}
