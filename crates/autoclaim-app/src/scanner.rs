//! Image scanning and validation

use std::path::{Path, PathBuf};

use image::ImageReader;
use walkdir::WalkDir;

use autoclaim_types::{Error, Result};

/// Supported image extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp"];

/// Check if a path is a supported image file
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate an image file exists and can be decoded
///
/// The decoder is picked from the file content, so a photo saved under
/// the wrong extension still passes.
pub fn validate_image(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(Error::InvalidImageFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if !is_supported_image(path) {
        return Err(Error::InvalidImageFormat(format!(
            "Unsupported image format: {}",
            path.display()
        )));
    }

    ImageReader::open(path)?.with_guessed_format()?.decode()?;

    Ok(())
}

/// Images directly inside `dir` (subfolders are not searched), sorted by name
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(Error::FileNotFound(dir.display().to_string()));
    }

    if !dir.is_dir() {
        return Err(Error::InvalidImageFormat(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();

    // Sort by filename for consistent ordering
    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// Like `scan_directory`, but an empty folder is an error
pub fn find_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let images = scan_directory(dir)?;
    if images.is_empty() {
        return Err(Error::NoImages(dir.display().to_string()));
    }
    Ok(images)
}
