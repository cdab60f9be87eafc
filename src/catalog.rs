//! Static property catalog.
//!
//! Maps container formats to a format class, each class to its ordered
//! property set, and each property code to its descriptor (wire type,
//! mutability, form). The tables are closed: supporting a new container
//! format means adding it to [`FormatClass::of`], nothing is inferred.

use crate::protocol::{self, DataType};

// ── Format classification ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatClass {
    Generic,
    Audio,
    Video,
    Image,
}

impl FormatClass {
    pub fn of(format: u16) -> FormatClass {
        match format {
            protocol::FORMAT_MP3
            | protocol::FORMAT_WAV
            | protocol::FORMAT_WMA
            | protocol::FORMAT_OGG
            | protocol::FORMAT_AAC => FormatClass::Audio,
            protocol::FORMAT_MPEG | protocol::FORMAT_3GP_CONTAINER | protocol::FORMAT_WMV => {
                FormatClass::Video
            }
            protocol::FORMAT_EXIF_JPEG
            | protocol::FORMAT_GIF
            | protocol::FORMAT_PNG
            | protocol::FORMAT_BMP
            | protocol::FORMAT_DNG
            | protocol::FORMAT_HEIF => FormatClass::Image,
            _ => FormatClass::Generic,
        }
    }
}

// ── Property sets ────────────────────────────────────────────────────

// NOTE: the audio/video/image sets must begin with FILE_PROPERTIES, in the
// same order. Some consumers rely on that positionally; `tests::
// media_sets_start_with_the_file_set` enforces it.
static FILE_PROPERTIES: [u16; 11] = [
    protocol::PROP_STORAGE_ID,
    protocol::PROP_OBJECT_FORMAT,
    protocol::PROP_PROTECTION_STATUS,
    protocol::PROP_OBJECT_SIZE,
    protocol::PROP_OBJECT_FILE_NAME,
    protocol::PROP_DATE_MODIFIED,
    protocol::PROP_PARENT_OBJECT,
    protocol::PROP_PERSISTENT_UID,
    protocol::PROP_NAME,
    protocol::PROP_DISPLAY_NAME,
    protocol::PROP_DATE_ADDED,
];

static AUDIO_PROPERTIES: [u16; 24] = [
    protocol::PROP_STORAGE_ID,
    protocol::PROP_OBJECT_FORMAT,
    protocol::PROP_PROTECTION_STATUS,
    protocol::PROP_OBJECT_SIZE,
    protocol::PROP_OBJECT_FILE_NAME,
    protocol::PROP_DATE_MODIFIED,
    protocol::PROP_PARENT_OBJECT,
    protocol::PROP_PERSISTENT_UID,
    protocol::PROP_NAME,
    protocol::PROP_DISPLAY_NAME,
    protocol::PROP_DATE_ADDED,
    // audio specific
    protocol::PROP_ARTIST,
    protocol::PROP_ALBUM_NAME,
    protocol::PROP_ALBUM_ARTIST,
    protocol::PROP_TRACK,
    protocol::PROP_ORIGINAL_RELEASE_DATE,
    protocol::PROP_DURATION,
    protocol::PROP_GENRE,
    protocol::PROP_COMPOSER,
    protocol::PROP_AUDIO_WAVE_CODEC,
    protocol::PROP_BITRATE_TYPE,
    protocol::PROP_AUDIO_BITRATE,
    protocol::PROP_NUMBER_OF_CHANNELS,
    protocol::PROP_SAMPLE_RATE,
];

static VIDEO_PROPERTIES: [u16; 15] = [
    protocol::PROP_STORAGE_ID,
    protocol::PROP_OBJECT_FORMAT,
    protocol::PROP_PROTECTION_STATUS,
    protocol::PROP_OBJECT_SIZE,
    protocol::PROP_OBJECT_FILE_NAME,
    protocol::PROP_DATE_MODIFIED,
    protocol::PROP_PARENT_OBJECT,
    protocol::PROP_PERSISTENT_UID,
    protocol::PROP_NAME,
    protocol::PROP_DISPLAY_NAME,
    protocol::PROP_DATE_ADDED,
    // video specific
    protocol::PROP_ARTIST,
    protocol::PROP_ALBUM_NAME,
    protocol::PROP_DURATION,
    protocol::PROP_DESCRIPTION,
];

static IMAGE_PROPERTIES: [u16; 12] = [
    protocol::PROP_STORAGE_ID,
    protocol::PROP_OBJECT_FORMAT,
    protocol::PROP_PROTECTION_STATUS,
    protocol::PROP_OBJECT_SIZE,
    protocol::PROP_OBJECT_FILE_NAME,
    protocol::PROP_DATE_MODIFIED,
    protocol::PROP_PARENT_OBJECT,
    protocol::PROP_PERSISTENT_UID,
    protocol::PROP_NAME,
    protocol::PROP_DISPLAY_NAME,
    protocol::PROP_DATE_ADDED,
    // image specific
    protocol::PROP_DESCRIPTION,
];

/// Ordered property codes applicable to a format class.
pub fn property_set(class: FormatClass) -> &'static [u16] {
    match class {
        FormatClass::Generic => &FILE_PROPERTIES,
        FormatClass::Audio => &AUDIO_PROPERTIES,
        FormatClass::Video => &VIDEO_PROPERTIES,
        FormatClass::Image => &IMAGE_PROPERTIES,
    }
}

// ── Descriptors ──────────────────────────────────────────────────────

/// The form of a property's value space, reported in property descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    None,
    DateTime,
    Range { min: u32, max: u32, step: u32 },
    Enum(&'static [u16]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub code: u16,
    pub data_type: DataType,
    pub writable: bool,
    pub form: Form,
}

const fn desc(code: u16, data_type: DataType) -> PropertyDescriptor {
    PropertyDescriptor {
        code,
        data_type,
        writable: false,
        form: Form::None,
    }
}

static CHANNEL_ENUM: [u16; 9] = [
    1, // mono
    2, // stereo
    3, // 2.1
    4, // 3
    5, // 3.1
    6, // 4
    7, // 4.1
    8, // 5
    9, // 5.1
];

static BITRATE_TYPE_ENUM: [u16; 2] = [
    1, // fixed rate
    2, // variable rate
];

static DESCRIPTORS: [PropertyDescriptor; 25] = [
    desc(protocol::PROP_STORAGE_ID, DataType::Uint32),
    desc(protocol::PROP_OBJECT_FORMAT, DataType::Uint16),
    desc(protocol::PROP_PROTECTION_STATUS, DataType::Uint16),
    desc(protocol::PROP_OBJECT_SIZE, DataType::Uint64),
    // renaming files and folders is allowed
    PropertyDescriptor {
        code: protocol::PROP_OBJECT_FILE_NAME,
        data_type: DataType::Str,
        writable: true,
        form: Form::None,
    },
    PropertyDescriptor {
        code: protocol::PROP_DATE_MODIFIED,
        data_type: DataType::Str,
        writable: false,
        form: Form::DateTime,
    },
    desc(protocol::PROP_PARENT_OBJECT, DataType::Uint32),
    desc(protocol::PROP_PERSISTENT_UID, DataType::Uint128),
    desc(protocol::PROP_NAME, DataType::Str),
    desc(protocol::PROP_DISPLAY_NAME, DataType::Str),
    PropertyDescriptor {
        code: protocol::PROP_DATE_ADDED,
        data_type: DataType::Str,
        writable: false,
        form: Form::DateTime,
    },
    desc(protocol::PROP_ARTIST, DataType::Str),
    desc(protocol::PROP_ALBUM_NAME, DataType::Str),
    desc(protocol::PROP_ALBUM_ARTIST, DataType::Str),
    desc(protocol::PROP_TRACK, DataType::Uint16),
    PropertyDescriptor {
        code: protocol::PROP_ORIGINAL_RELEASE_DATE,
        data_type: DataType::Str,
        writable: false,
        form: Form::DateTime,
    },
    desc(protocol::PROP_GENRE, DataType::Str),
    desc(protocol::PROP_COMPOSER, DataType::Str),
    desc(protocol::PROP_DURATION, DataType::Uint32),
    desc(protocol::PROP_DESCRIPTION, DataType::Str),
    desc(protocol::PROP_AUDIO_WAVE_CODEC, DataType::Uint32),
    PropertyDescriptor {
        code: protocol::PROP_BITRATE_TYPE,
        data_type: DataType::Uint16,
        writable: false,
        form: Form::Enum(&BITRATE_TYPE_ENUM),
    },
    PropertyDescriptor {
        code: protocol::PROP_AUDIO_BITRATE,
        data_type: DataType::Uint32,
        writable: false,
        form: Form::Range {
            min: 1,
            max: 1_536_000,
            step: 1,
        },
    },
    PropertyDescriptor {
        code: protocol::PROP_NUMBER_OF_CHANNELS,
        data_type: DataType::Uint16,
        writable: false,
        form: Form::Enum(&CHANNEL_ENUM),
    },
    PropertyDescriptor {
        code: protocol::PROP_SAMPLE_RATE,
        data_type: DataType::Uint32,
        writable: false,
        form: Form::Range {
            min: 8_000,
            max: 48_000,
            step: 1,
        },
    },
];

/// Looks up the descriptor for a property code.
pub fn descriptor(code: u16) -> Option<&'static PropertyDescriptor> {
    DESCRIPTORS.iter().find(|d| d.code == code)
}

// ── Tests ────────────────────────────────────────────────────────────
