//! Resolving image references to validated bytes.

use anyhow::{Context as _, Result as AnyResult, anyhow, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::ImageReader;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use url::Url;

/// Encoded image bytes with their decoded size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    /// File extension of the sniffed format, e.g. `png`.
    pub format: Option<&'static str>,
}

impl LoadedImage {
    /// Sniff the format and read the dimensions of encoded bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes are empty or not a supported image.
    pub fn from_bytes(bytes: Vec<u8>) -> AnyResult<Self> {
        if bytes.is_empty() {
            bail!("image data is empty");
        }
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .context("reading image header")?;
        let format = reader
            .format()
            .and_then(|found| found.extensions_str().first().copied());
        let (width_px, height_px) = reader
            .into_dimensions()
            .context("decoding image dimensions")?;
        Ok(Self {
            bytes,
            width_px,
            height_px,
            format,
        })
    }
}

/// Source of image bytes for the compositor.
pub trait ImageLoader {
    /// # Errors
    /// Returns an error if `source` cannot be fetched or decoded.
    fn load(&self, source: &str) -> AnyResult<LoadedImage>;
}

/// Loads `data:` URIs, `file://` URLs and filesystem paths. Relative paths
/// resolve against `base_dir` when set. Network schemes are refused.
#[derive(Debug, Clone, Default)]
pub struct LocalImageLoader {
    base_dir: Option<PathBuf>,
}

impl LocalImageLoader {
    #[must_use]
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn read_path(&self, path: &Path) -> AnyResult<Vec<u8>> {
        let resolved = self.resolve(path);
        fs::read(&resolved).with_context(|| format!("reading image {}", resolved.display()))
    }
}

impl ImageLoader for LocalImageLoader {
    fn load(&self, source: &str) -> AnyResult<LoadedImage> {
        let source = source.trim();
        let bytes = if source.starts_with("data:") {
            decode_data_uri(source)?
        } else {
            match Url::parse(source) {
                Ok(url) if url.scheme() == "file" => {
                    let path = url
                        .to_file_path()
                        .map_err(|()| anyhow!("Invalid file path for file url: {url}"))?;
                    self.read_path(&path)?
                }
                // Single-letter schemes are drive letters of Windows paths.
                Ok(url) if url.scheme().len() > 1 => {
                    bail!("Unsupported url scheme {}", url.scheme())
                }
                _ => self.read_path(Path::new(source))?,
            }
        };
        LoadedImage::from_bytes(bytes)
    }
}

/// Payload of a `data:` URI, base64 or percent-encoded.
///
/// # Errors
/// Returns an error if the URI has no payload or the base64 is invalid.
pub fn decode_data_uri(uri: &str) -> AnyResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| anyhow!("not a data uri"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| anyhow!("data uri without payload"))?;
    if header
        .split(';')
        .any(|param| param.trim().eq_ignore_ascii_case("base64"))
    {
        let compact: String = payload
            .chars()
            .filter(|character| !character.is_ascii_whitespace())
            .collect();
        return BASE64_STANDARD
            .decode(compact.as_bytes())
            .context("decoding base64 image data");
    }
    Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_payloads() {
        assert_eq!(decode_data_uri("data:text/plain;base64,aGk=").unwrap(), b"hi");
        assert_eq!(decode_data_uri("data:,a%20b").unwrap(), b"a b");
        assert!(decode_data_uri("data:image/png;base64").is_err());
        assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn network_and_garbage_sources_fail() {
        let loader = LocalImageLoader::default();
        assert!(loader.load("https://example.com/logo.png").is_err());
        assert!(loader.load("data:text/plain;base64,aGk=").is_err());
        assert!(loader.load("/definitely/not/here.png").is_err());
    }
}
