//! Picture payload handling shared by every content feature.
//!
//! Pictures arrive as base64 strings (optionally as `data:` URLs), are stored as
//! raw bytes, and leave the API only as fetch-by-id URLs.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::core::error::{AppError, Result};

/// Decode a base64 picture, accepting both bare payloads and `data:<mime>;base64,` URLs.
pub fn decode_base64_image(encoded: &str) -> Result<Vec<u8>> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => encoded,
    };

    // Clients frequently wrap long base64 payloads
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.is_empty() {
        return Err(AppError::Validation("Picture content is empty".to_string()));
    }

    BASE64
        .decode(compact.as_bytes())
        .map_err(|e| AppError::Validation(format!("Invalid base64 picture: {}", e)))
}

/// Decode an optional list of pictures, skipping `null` entries.
pub fn decode_pictures(pictures: &[Option<String>]) -> Result<Vec<Vec<u8>>> {
    pictures
        .iter()
        .flatten()
        .map(|p| decode_base64_image(p))
        .collect()
}

/// Best-effort content type from the leading magic bytes.
pub fn sniff_content_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'B', b'M', ..] => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Builds public URLs for stored pictures: `<public base url><base path>/<id>`.
#[derive(Debug, Clone, Default)]
pub struct ImageUrls {
    public_base_url: String,
}

impl ImageUrls {
    pub fn new(public_base_url: impl Into<String>) -> Self {
        Self {
            public_base_url: public_base_url.into(),
        }
    }

    pub fn url(&self, base_path: &str, id: i64) -> String {
        format!("{}{}/{}", self.public_base_url, base_path, id)
    }

    pub fn urls(&self, base_path: &str, ids: &[i64]) -> Vec<String> {
        ids.iter().map(|id| self.url(base_path, *id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_decode_bare_base64() {
        let encoded = BASE64.encode(PNG_HEADER);
        assert_eq!(decode_base64_image(&encoded).unwrap(), PNG_HEADER.to_vec());
    }

    #[test]
    fn test_decode_data_url() {
        let encoded = format!("data:image/png;base64,{}", BASE64.encode(PNG_HEADER));
        assert_eq!(decode_base64_image(&encoded).unwrap(), PNG_HEADER.to_vec());
    }

    #[test]
    fn test_decode_ignores_line_breaks() {
        let encoded = BASE64.encode(b"hello world, this is a picture");
        let wrapped = format!("{}\n{}", &encoded[..8], &encoded[8..]);
        assert_eq!(
            decode_base64_image(&wrapped).unwrap(),
            b"hello world, this is a picture".to_vec()
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = decode_base64_image("not base64 at all!").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(
            decode_base64_image("data:image/png;base64,"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_decode_pictures_skips_nulls() {
        let pictures = vec![None, Some(BASE64.encode(b"a")), None, Some(BASE64.encode(b"b"))];
        let decoded = decode_pictures(&pictures).unwrap();
        assert_eq!(decoded, vec![b"a".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn test_sniff_content_type() {
        assert_eq!(sniff_content_type(&PNG_HEADER), "image/png");
        assert_eq!(sniff_content_type(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_content_type(b"GIF89a"), "image/gif");
        assert_eq!(sniff_content_type(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(sniff_content_type(b"plain"), "application/octet-stream");
    }

    #[test]
    fn test_image_urls() {
        let urls = ImageUrls::new("https://api.tas.lk");
        assert_eq!(
            urls.url("/image/location", 7),
            "https://api.tas.lk/image/location/7"
        );
        assert_eq!(
            ImageUrls::default().urls("/image/activity", &[1, 2]),
            vec!["/image/activity/1", "/image/activity/2"]
        );
    }
}
