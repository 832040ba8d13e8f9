use crate::error::DenoiseError;
use ab_glyph::FontVec;
use std::fs;
use std::path::Path;

/// Fonts tried when no explicit font is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// DejaVu Sans, see `assets/DejaVuSans-LICENSE`
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Find a caption font: the configured one first, then common system fonts,
/// then the copy compiled into the binary.
pub fn load_font(configured: Option<&Path>) -> Result<FontVec, DenoiseError> {
    if let Some(path) = configured {
        match read_font(path) {
            Ok(font) => return Ok(font),
            Err(e) => tracing::warn!("Ignoring configured font: {}", e),
        }
    }

    for candidate in SYSTEM_FONTS {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match read_font(path) {
            Ok(font) => {
                tracing::debug!("Using caption font {}", path.display());
                return Ok(font);
            }
            Err(e) => tracing::debug!("Skipping font: {}", e),
        }
    }

    tracing::debug!("No system font found, using bundled DejaVu Sans");
    bundled_font()
}

fn bundled_font() -> Result<FontVec, DenoiseError> {
    FontVec::try_from_vec(BUNDLED_FONT.to_vec())
        .map_err(|e| DenoiseError::Render(format!("invalid bundled font: {}", e)))
}

fn read_font(path: &Path) -> Result<FontVec, DenoiseError> {
    let data = fs::read(path).map_err(|source| DenoiseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    FontVec::try_from_vec(data)
        .map_err(|e| DenoiseError::Render(format!("invalid font {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_glyph::Font;

    #[test]
    fn test_garbage_font_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        fs::write(&path, b"definitely not a font").unwrap();

        assert!(matches!(read_font(&path), Err(DenoiseError::Render(_))));
    }

    #[test]
    fn test_missing_font_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            read_font(&dir.path().join("missing.ttf")),
            Err(DenoiseError::Io { .. })
        ));
    }

    #[test]
    fn test_bundled_font_has_caption_glyphs() {
        let font = bundled_font().unwrap();
        for c in "PSNR: 28.41 σ".chars() {
            assert_ne!(font.glyph_id(c).0, 0, "no glyph for {:?}", c);
        }
    }

    #[test]
    fn test_bad_configured_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ttf");
        fs::write(&path, b"nope").unwrap();

        let font = load_font(Some(&path)).unwrap();
        assert_ne!(font.glyph_id('P').0, 0);
    }
}
