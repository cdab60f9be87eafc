//! Image metadata extraction for object info and thumbnails.
//!
//! Dispatches on the object format: EXIF-bearing containers are parsed
//! in-process with the `exif` crate; RAW containers go through a
//! [`RawPreviewExtractor`] collaborator that understands the vendor preview
//! blocks. Every failure here is "no metadata", never an error: objects
//! without extractable metadata simply report zeroed thumbnail fields.

use std::io::BufReader;
use std::path::Path;

use exif::{In, Reader, Tag};

use crate::protocol;

/// Thumbnail metadata reported in object info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailInfo {
    /// Format of the thumbnail payload (always EXIF-JPEG here).
    pub format: u16,
    /// Payload length in bytes; zero when no payload is embedded.
    pub compressed_size: u32,
    pub pix_width: u32,
    pub pix_height: u32,
}

/// Preview metadata parsed out of a RAW container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawPreviewData {
    pub full_width: u32,
    pub full_height: u32,
    pub preview: Option<PreviewRegion>,
}

/// Location of an embedded preview inside the RAW file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewRegion {
    pub offset: u64,
    pub length: u32,
    pub jpeg_compressed: bool,
}

/// Parser for vendor RAW preview blocks.
///
/// `parse` is cheap metadata extraction; the preview bytes themselves are
/// only read on demand through `read_bytes`, keyed by the region `parse`
/// reported.
pub trait RawPreviewExtractor {
    fn parse(&self, path: &Path) -> Option<RawPreviewData>;

    fn read_bytes(&self, path: &Path, offset: u64, length: u32) -> std::io::Result<Vec<u8>>;
}

/// No-op extractor for deployments without RAW support: RAW objects then
/// report no metadata, which is not an error.
pub struct NoRawPreviews;

impl RawPreviewExtractor for NoRawPreviews {
    fn parse(&self, _path: &Path) -> Option<RawPreviewData> {
        None
    }

    fn read_bytes(&self, _path: &Path, _offset: u64, _length: u32) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::from(std::io::ErrorKind::Unsupported))
    }
}

fn is_exif_format(format: u16) -> bool {
    matches!(
        format,
        protocol::FORMAT_EXIF_JPEG | protocol::FORMAT_HEIF | protocol::FORMAT_JFIF
    )
}

// Except DNG, the supported RAW formats have no code of their own; most are
// TIFF or TIFF/EP based, and custom containers (e.g. RAF) arrive as the
// vendor-defined format.
fn is_raw_format(format: u16) -> bool {
    matches!(
        format,
        protocol::FORMAT_DNG
            | protocol::FORMAT_TIFF
            | protocol::FORMAT_TIFF_EP
            | protocol::FORMAT_DEFINED
    )
}

/// Extracts thumbnail metadata for the given object, or `None` when the
/// format carries none (not an error).
pub fn extract(path: &Path, format: u16, raw: &dyn RawPreviewExtractor) -> Option<ThumbnailInfo> {
    if is_exif_format(format) {
        return read_exif_info(path);
    }
    if is_raw_format(format) {
        let data = raw.parse(path)?;
        let compressed_size = data
            .preview
            .filter(|region| region.jpeg_compressed)
            .map(|region| region.length)
            .unwrap_or(0);
        return Some(ThumbnailInfo {
            format: protocol::FORMAT_EXIF_JPEG,
            compressed_size,
            pix_width: data.full_width,
            pix_height: data.full_height,
        });
    }
    None
}

/// Reads the thumbnail payload for the given object.
///
/// For RAW containers the preview bytes are read on demand; a failed read
/// reports an absent thumbnail, not an error.
pub fn thumbnail_bytes(path: &Path, format: u16, raw: &dyn RawPreviewExtractor) -> Option<Vec<u8>> {
    if is_exif_format(format) {
        let exif = read_exif(path)?;
        if !has_thumbnail(&exif) {
            return None;
        }
        return Some(exif.buf().to_vec());
    }
    if is_raw_format(format) {
        let data = raw.parse(path)?;
        let region = data
            .preview
            .filter(|region| region.jpeg_compressed && region.length > 0)?;
        return match raw.read_bytes(path, region.offset, region.length) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::debug!("preview read failed for {}: {e}", path.display());
                None
            }
        };
    }
    None
}

fn read_exif(path: &Path) -> Option<exif::Exif> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) => {
            log::debug!("cannot open {} for metadata: {e}", path.display());
            return None;
        }
    };
    Reader::new().read_from_container(&mut BufReader::new(file)).ok()
}

fn has_thumbnail(exif: &exif::Exif) -> bool {
    exif.fields().any(|field| field.ifd_num == In::THUMBNAIL)
}

fn read_exif_info(path: &Path) -> Option<ThumbnailInfo> {
    let exif = read_exif(path)?;
    let dimension = |tag: Tag| -> u32 {
        exif.get_field(tag, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .unwrap_or(0)
    };
    // the whole EXIF block is the payload when a thumbnail IFD exists
    let compressed_size = if has_thumbnail(&exif) {
        exif.buf().len() as u32
    } else {
        0
    };
    Some(ThumbnailInfo {
        format: protocol::FORMAT_EXIF_JPEG,
        compressed_size,
        pix_width: dimension(Tag::PixelXDimension),
        pix_height: dimension(Tag::PixelYDimension),
    })
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FORMAT_DNG, FORMAT_EXIF_JPEG, FORMAT_MP3, FORMAT_PNG};

    /// Scripted RAW extractor double.
    struct StubRaw {
        data: Option<RawPreviewData>,
        bytes: Option<Vec<u8>>,
    }

    impl RawPreviewExtractor for StubRaw {
        fn parse(&self, _path: &Path) -> Option<RawPreviewData> {
            self.data
        }

        fn read_bytes(&self, _path: &Path, offset: u64, length: u32) -> std::io::Result<Vec<u8>> {
            assert_eq!((offset, length), (1024, 3));
            self.bytes
                .clone()
                .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::UnexpectedEof))
        }
    }

    #[test]
    fn non_image_formats_have_no_metadata() {
        assert_eq!(extract(Path::new("/music/a.mp3"), FORMAT_MP3, &NoRawPreviews), None);
        // PNG is an image class format but carries no EXIF/RAW container
        assert_eq!(extract(Path::new("/pics/a.png"), FORMAT_PNG, &NoRawPreviews), None);
    }

    #[test]
    fn exif_parse_failure_is_absent_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not-a-jpeg.jpg");
        std::fs::write(&bogus, b"plain text, no EXIF here").unwrap();
        assert_eq!(extract(&bogus, FORMAT_EXIF_JPEG, &NoRawPreviews), None);
        assert_eq!(thumbnail_bytes(&bogus, FORMAT_EXIF_JPEG, &NoRawPreviews), None);
    }

    #[test]
    fn raw_dispatch_reports_declared_dimensions() {
        let stub = StubRaw {
            data: Some(RawPreviewData {
                full_width: 6000,
                full_height: 4000,
                preview: Some(PreviewRegion {
                    offset: 1024,
                    length: 3,
                    jpeg_compressed: true,
                }),
            }),
            bytes: Some(vec![0xFF, 0xD8, 0xFF]),
        };
        let info = extract(Path::new("/pics/shot.dng"), FORMAT_DNG, &stub).unwrap();
        assert_eq!(info.format, FORMAT_EXIF_JPEG);
        assert_eq!((info.pix_width, info.pix_height), (6000, 4000));
        assert_eq!(info.compressed_size, 3);
    }

    #[test]
    fn raw_without_jpeg_preview_reports_zero_size() {
        let stub = StubRaw {
            data: Some(RawPreviewData {
                full_width: 6000,
                full_height: 4000,
                preview: Some(PreviewRegion {
                    offset: 1024,
                    length: 3,
                    jpeg_compressed: false,
                }),
            }),
            bytes: None,
        };
        let info = extract(Path::new("/pics/shot.dng"), FORMAT_DNG, &stub).unwrap();
        assert_eq!(info.compressed_size, 0);
        // no JPEG preview, so no thumbnail payload either
        assert_eq!(thumbnail_bytes(Path::new("/pics/shot.dng"), FORMAT_DNG, &stub), None);
    }

    #[test]
    fn raw_preview_bytes_are_read_on_demand() {
        let stub = StubRaw {
            data: Some(RawPreviewData {
                full_width: 6000,
                full_height: 4000,
                preview: Some(PreviewRegion {
                    offset: 1024,
                    length: 3,
                    jpeg_compressed: true,
                }),
            }),
            bytes: Some(vec![0xFF, 0xD8, 0xFF]),
        };
        assert_eq!(
            thumbnail_bytes(Path::new("/pics/shot.dng"), FORMAT_DNG, &stub),
            Some(vec![0xFF, 0xD8, 0xFF])
        );
    }

    #[test]
    fn raw_preview_read_failure_is_absent_thumbnail() {
        let stub = StubRaw {
            data: Some(RawPreviewData {
                full_width: 6000,
                full_height: 4000,
                preview: Some(PreviewRegion {
                    offset: 1024,
                    length: 3,
                    jpeg_compressed: true,
                }),
            }),
            bytes: None,
        };
        assert_eq!(thumbnail_bytes(Path::new("/pics/shot.dng"), FORMAT_DNG, &stub), None);
    }
}
