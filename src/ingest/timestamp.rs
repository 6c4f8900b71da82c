//! Timestamp-based file naming.
//!
//! Images are named after their EXIF `DateTimeOriginal` capture time. Files
//! without a usable capture time fall back to their modification time, so
//! naming never fails.

use crate::constants::TIMESTAMP_FORMAT;
use crate::ingest::ImageFile;
use chrono::{DateTime, Local, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// EXIF date-time layout, e.g. `2023:06:15 14:30:05`.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Derive the canonical `YYYYMMDD_HHMMSS.<ext>` file name for an image.
pub fn derive_timestamp_name(image: &ImageFile) -> String {
    let timestamp = capture_time(&image.path).unwrap_or_else(|| {
        warn!(
            "No EXIF timestamp found, using file modification time on {}",
            image.path.display()
        );
        modified_time(&image.path)
    });

    format!(
        "{}.{}",
        timestamp.format(TIMESTAMP_FORMAT),
        image.extension
    )
}

/// Read the EXIF `DateTimeOriginal` of an image, if present and valid.
pub fn capture_time(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let exif = Reader::new()
        .read_from_container(&mut BufReader::new(file))
        .ok()?;
    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;

    match field.value {
        Value::Ascii(ref parts) => parts.first().and_then(|raw| parse_exif_datetime(raw)),
        _ => None,
    }
}

/// Parse an EXIF ASCII date-time.
///
/// Trailing NULs and whitespace are ignored. Zeroed or otherwise impossible
/// dates yield `None`.
pub fn parse_exif_datetime(raw: &[u8]) -> Option<NaiveDateTime> {
    let text = std::str::from_utf8(raw).ok()?;
    let text = text.trim_end_matches('\0').trim();
    NaiveDateTime::parse_from_str(text, EXIF_DATETIME_FORMAT).ok()
}

/// Local modification time of a file, or the Unix epoch if unavailable.
fn modified_time(path: &Path) -> NaiveDateTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_or_else(
            |_| DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
            |t| DateTime::<Local>::from(t).naive_local(),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    /// Build a minimal JPEG whose only segment is an EXIF block carrying
    /// `DateTimeOriginal`.
    pub(crate) fn jpeg_with_capture_time(datetime: &str) -> Vec<u8> {
        let mut value = datetime.as_bytes().to_vec();
        value.push(0);
        #[allow(clippy::cast_possible_truncation)]
        let count = value.len() as u32;

        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II\x2a\x00");
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0: one entry pointing at the Exif IFD
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x8769u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&26u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        // Exif IFD: DateTimeOriginal
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x9003u16.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&count.to_le_bytes());
        tiff.extend_from_slice(&44u32.to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        tiff.extend_from_slice(&value);

        let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
        #[allow(clippy::cast_possible_truncation)]
        let segment_len = (2 + 6 + tiff.len()) as u16;
        jpeg.extend_from_slice(&segment_len.to_be_bytes());
        jpeg.extend_from_slice(b"Exif\0\0");
        jpeg.extend_from_slice(&tiff);
        jpeg.extend_from_slice(&[0xFF, 0xD9]);
        jpeg
    }

    fn image_at(path: PathBuf) -> ImageFile {
        ImageFile::from_path(path).unwrap()
    }

    #[test]
    fn test_parse_exif_datetime() {
        let parsed = parse_exif_datetime(b"2023:06:15 14:30:05\0").unwrap();
        assert_eq!(
            parsed.format(TIMESTAMP_FORMAT).to_string(),
            "20230615_143005"
        );
    }

    #[test]
    fn test_parse_exif_datetime_rejects_garbage() {
        assert!(parse_exif_datetime(b"0000:00:00 00:00:00").is_none());
        assert!(parse_exif_datetime(b"    :  :     :  :  ").is_none());
        assert!(parse_exif_datetime(b"yesterday").is_none());
        assert!(parse_exif_datetime(&[0xFF, 0xFE]).is_none());
    }

    #[test]
    fn test_name_from_exif() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("IMG_0042.JPG");
        std::fs::write(&path, jpeg_with_capture_time("2023:06:15 14:30:05")).unwrap();

        assert_eq!(
            derive_timestamp_name(&image_at(path)),
            "20230615_143005.jpg"
        );
    }

    #[test]
    fn test_name_falls_back_to_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no_exif.PNG");
        std::fs::write(&path, b"not really a png").unwrap();

        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();

        let expected = format!(
            "{}.png",
            DateTime::<Local>::from(mtime).format(TIMESTAMP_FORMAT)
        );
        assert_eq!(derive_timestamp_name(&image_at(path)), expected);
    }

    #[test]
    fn test_fallback_name_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpeg");
        std::fs::write(&path, b"").unwrap();

        let name = derive_timestamp_name(&image_at(path));
        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(ext, "jpeg");
        assert!(NaiveDateTime::parse_from_str(stem, TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn test_missing_file_uses_epoch() {
        let image = image_at(PathBuf::from("/nonexistent/vanished.jpg"));
        let expected = format!(
            "{}.jpg",
            DateTime::<Utc>::UNIX_EPOCH.naive_utc().format(TIMESTAMP_FORMAT)
        );
        assert_eq!(derive_timestamp_name(&image), expected);
    }
}
