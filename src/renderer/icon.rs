//! Window icon shared between the title bar painter and the OS window.

use crate::utils::error::{ChromeError, IntoChromeError, Result};
use image::RgbaImage;
use std::path::Path;
use std::sync::Arc;

/// An RGBA icon. Cloning is cheap; the pixels are shared.
///
/// The default icon is empty, which is what the chrome reports before an
/// icon has been set.
#[derive(Debug, Clone, Default)]
pub struct Icon {
    image: Option<Arc<RgbaImage>>,
}

impl Icon {
    /// An icon with no pixels
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load an icon from a PNG, ICO or BMP file
    pub fn from_path(path: &Path) -> Result<Self> {
        let image = image::open(path)
            .icon_err(&format!("Failed to load icon {}", path.display()))?
            .into_rgba8();
        Ok(Self::from_image(image))
    }

    /// Wrap an already decoded image
    pub fn from_image(image: RgbaImage) -> Self {
        if image.width() == 0 || image.height() == 0 {
            return Self::empty();
        }
        Self {
            image: Some(Arc::new(image)),
        }
    }

    /// Build an icon from raw RGBA8 pixels
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let image = RgbaImage::from_raw(width, height, rgba).ok_or_else(|| {
            ChromeError::Icon(format!("Pixel buffer does not match {}x{} RGBA", width, height))
        })?;
        Ok(Self::from_image(image))
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_none()
    }

    pub fn width(&self) -> u32 {
        self.image.as_ref().map_or(0, |image| image.width())
    }

    pub fn height(&self) -> u32 {
        self.image.as_ref().map_or(0, |image| image.height())
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_deref()
    }

    /// Convert into a winit window icon, `None` for an empty icon
    pub fn to_window_icon(&self) -> Result<Option<winit::window::Icon>> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        winit::window::Icon::from_rgba(image.as_raw().clone(), image.width(), image.height())
            .map(Some)
            .icon_err("Failed to convert window icon")
    }
}

impl PartialEq for Icon {
    fn eq(&self, other: &Self) -> bool {
        match (&self.image, &other.image) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.as_raw() == b.as_raw(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_icon() {
        let icon = Icon::empty();
        assert!(icon.is_empty());
        assert_eq!(icon.width(), 0);
        assert!(icon.to_window_icon().unwrap().is_none());
    }

    #[test]
    fn test_from_rgba() {
        let icon = Icon::from_rgba(2, 2, vec![255; 16]).unwrap();
        assert!(!icon.is_empty());
        assert_eq!((icon.width(), icon.height()), (2, 2));
        assert!(Icon::from_rgba(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let icon = Icon::from_path(&path).unwrap();
        assert_eq!(icon.width(), 4);
        assert!(Icon::from_path(&dir.path().join("missing.png")).is_err());
    }
}
