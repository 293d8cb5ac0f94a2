//! Evidence capture
//!
//! Screenshots are the harness's evidence artifacts: written to
//! deterministic paths, overwritten on each run, and consumed only by
//! humans.

use crate::browser::PageHandle;
use crate::error::{CaptureError, Result};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Image format for captured evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    /// PNG screenshot
    #[default]
    Png,
    /// JPEG screenshot
    Jpeg,
}

/// Options for capture operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Capture format
    #[serde(default)]
    pub format: CaptureFormat,
    /// JPEG quality (0-100)
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Capture the full page rather than just the viewport
    #[serde(default)]
    pub full_page: bool,
}

fn default_quality() -> u8 {
    85
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: CaptureFormat::Png,
            quality: 85,
            full_page: false,
        }
    }
}

impl CaptureOptions {
    /// Options for a PNG viewport screenshot
    pub fn png() -> Self {
        Self {
            format: CaptureFormat::Png,
            ..Default::default()
        }
    }

    /// Options for a JPEG viewport screenshot
    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: CaptureFormat::Jpeg,
            quality,
            ..Default::default()
        }
    }
}

/// Result of a capture operation
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// The captured image bytes
    pub data: Vec<u8>,
    /// The format of the capture
    pub format: CaptureFormat,
    /// Size in bytes
    pub size: usize,
}

impl CaptureResult {
    /// Get appropriate MIME type
    pub fn mime_type(&self) -> &'static str {
        match self.format {
            CaptureFormat::Png => "image/png",
            CaptureFormat::Jpeg => "image/jpeg",
        }
    }

    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self.format {
            CaptureFormat::Png => "png",
            CaptureFormat::Jpeg => "jpg",
        }
    }

    /// Write the capture to disk, replacing any previous evidence at the
    /// same path.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        tokio::fs::write(path, &self.data)
            .await
            .map_err(|e| CaptureError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        debug!("Evidence written: {} ({} bytes)", path.display(), self.size);
        Ok(())
    }
}

/// Page screenshot functionality
pub struct PageCapture;

impl PageCapture {
    /// Take a screenshot of the page
    #[instrument(skip(page))]
    pub async fn screenshot(page: &PageHandle, options: &CaptureOptions) -> Result<CaptureResult> {
        info!("Capturing screenshot");

        let format = match options.format {
            CaptureFormat::Png => CaptureScreenshotFormat::Png,
            CaptureFormat::Jpeg => CaptureScreenshotFormat::Jpeg,
        };

        let mut params_builder = ScreenshotParams::builder()
            .format(format)
            .from_surface(true)
            .capture_beyond_viewport(options.full_page);

        if matches!(options.format, CaptureFormat::Jpeg) {
            params_builder = params_builder.quality(options.quality as i64);
        }

        let params = params_builder.build();

        let data = page
            .page
            .screenshot(params)
            .await
            .map_err(|e| CaptureError::ScreenshotFailed(e.to_string()))?;

        let size = data.len();
        debug!("Screenshot captured: {} bytes", size);

        Ok(CaptureResult {
            data,
            format: options.format,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_options_default() {
        let opts = CaptureOptions::default();
        assert_eq!(opts.format, CaptureFormat::Png);
        assert_eq!(opts.quality, 85);
        assert!(!opts.full_page);
    }

    #[test]
    fn test_capture_format_factories() {
        let png = CaptureOptions::png();
        assert_eq!(png.format, CaptureFormat::Png);

        let jpeg = CaptureOptions::jpeg(90);
        assert_eq!(jpeg.format, CaptureFormat::Jpeg);
        assert_eq!(jpeg.quality, 90);
    }

    #[test]
    fn test_capture_format_serialization() {
        assert_eq!(
            serde_json::to_string(&CaptureFormat::Png).unwrap(),
            "\"png\""
        );
        assert_eq!(
            serde_json::to_string(&CaptureFormat::Jpeg).unwrap(),
            "\"jpeg\""
        );
    }

    #[test]
    fn test_capture_result_mime_type() {
        let result = CaptureResult {
            data: vec![],
            format: CaptureFormat::Png,
            size: 0,
        };
        assert_eq!(result.mime_type(), "image/png");
        assert_eq!(result.extension(), "png");
    }

    #[tokio::test]
    async fn test_save_to_overwrites() {
        let dir = std::env::temp_dir().join("uiproof-capture-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("evidence.png");

        let first = CaptureResult {
            data: b"first".to_vec(),
            format: CaptureFormat::Png,
            size: 5,
        };
        first.save_to(&path).await.unwrap();

        let second = CaptureResult {
            data: b"second".to_vec(),
            format: CaptureFormat::Png,
            size: 6,
        };
        second.save_to(&path).await.unwrap();

        let on_disk = tokio::fs::read(&path).await.unwrap();
        assert_eq!(on_disk, b"second");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
