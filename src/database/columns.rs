//! Property-code → index column resolution.
//!
//! Column names of the external content index. A property resolves to
//! `None` when its value cannot come from a single column read: it is
//! synthesized (persistent UID, protection status) or not tracked at all
//! (the technical audio fields).

use crate::protocol;

pub(crate) const COLUMN_ID: &str = "_id";
pub(crate) const COLUMN_STORAGE_ID: &str = "storage_id";
pub(crate) const COLUMN_FORMAT: &str = "format";
pub(crate) const COLUMN_SIZE: &str = "_size";
pub(crate) const COLUMN_DATA: &str = "_data";
pub(crate) const COLUMN_DATE_MODIFIED: &str = "date_modified";
pub(crate) const COLUMN_DATE_ADDED: &str = "date_added";
pub(crate) const COLUMN_PARENT: &str = "parent";
pub(crate) const COLUMN_TITLE: &str = "title";
pub(crate) const COLUMN_DISPLAY_NAME: &str = "_display_name";
pub(crate) const COLUMN_ARTIST: &str = "artist";
pub(crate) const COLUMN_ALBUM: &str = "album";
pub(crate) const COLUMN_ALBUM_ARTIST: &str = "album_artist";
pub(crate) const COLUMN_TRACK: &str = "track";
pub(crate) const COLUMN_YEAR: &str = "year";
pub(crate) const COLUMN_COMPOSER: &str = "composer";
pub(crate) const COLUMN_DURATION: &str = "duration";
pub(crate) const COLUMN_DESCRIPTION: &str = "description";
pub(crate) const COLUMN_MEDIA_TYPE: &str = "media_type";

/// Resolves a property code to the column its value is read from.
pub(crate) fn column_for(code: u16) -> Option<&'static str> {
    match code {
        protocol::PROP_STORAGE_ID => Some(COLUMN_STORAGE_ID),
        protocol::PROP_OBJECT_FORMAT => Some(COLUMN_FORMAT),
        // protection status is always 0
        protocol::PROP_PROTECTION_STATUS => None,
        protocol::PROP_OBJECT_SIZE => Some(COLUMN_SIZE),
        protocol::PROP_OBJECT_FILE_NAME => Some(COLUMN_DATA),
        protocol::PROP_NAME => Some(COLUMN_TITLE),
        protocol::PROP_DATE_MODIFIED => Some(COLUMN_DATE_MODIFIED),
        protocol::PROP_DATE_ADDED => Some(COLUMN_DATE_ADDED),
        protocol::PROP_ORIGINAL_RELEASE_DATE => Some(COLUMN_YEAR),
        protocol::PROP_PARENT_OBJECT => Some(COLUMN_PARENT),
        // PUID is a concatenation of storage id and object handle; the
        // column carries the storage id half
        protocol::PROP_PERSISTENT_UID => Some(COLUMN_STORAGE_ID),
        protocol::PROP_DURATION => Some(COLUMN_DURATION),
        protocol::PROP_TRACK => Some(COLUMN_TRACK),
        protocol::PROP_DISPLAY_NAME => Some(COLUMN_DISPLAY_NAME),
        protocol::PROP_ARTIST => Some(COLUMN_ARTIST),
        protocol::PROP_ALBUM_NAME => Some(COLUMN_ALBUM),
        protocol::PROP_ALBUM_ARTIST => Some(COLUMN_ALBUM_ARTIST),
        // genre would need a join against the genre tables; the title
        // column is a known approximation
        protocol::PROP_GENRE => Some(COLUMN_TITLE),
        protocol::PROP_COMPOSER => Some(COLUMN_COMPOSER),
        protocol::PROP_DESCRIPTION => Some(COLUMN_DESCRIPTION),
        // not tracked by the index; synthesized as zero
        protocol::PROP_AUDIO_WAVE_CODEC
        | protocol::PROP_AUDIO_BITRATE
        | protocol::PROP_SAMPLE_RATE
        | protocol::PROP_BITRATE_TYPE
        | protocol::PROP_NUMBER_OF_CHANNELS => None,
        _ => {
            log::debug!("no column mapping for property {code:#06x}");
            None
        }
    }
}
