//! Font resolution with a built-in fallback face.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;

/// File name of the preferred monospace face.
pub const PREFERRED_FONT: &str = "DejaVuSansMono.ttf";

/// System locations searched for the preferred face.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu-sans-mono-fonts/DejaVuSansMono.ttf",
    "/usr/local/share/fonts/DejaVuSansMono.ttf",
    "/Library/Fonts/DejaVuSansMono.ttf",
    "C:\\Windows\\Fonts\\DejaVuSansMono.ttf",
];

/// A resolved typeface.
pub enum Face {
    /// Outline font loaded from disk
    TrueType { font: FontVec, path: PathBuf },
    /// 8x8 bitmap glyphs compiled into the binary
    Builtin,
}

impl Face {
    /// Resolve a face, trying `preferred` first, then the user font
    /// directory and well-known system paths. Never fails: when nothing
    /// loads, the built-in face is returned.
    pub fn resolve(preferred: Option<&Path>) -> Self {
        for path in candidates(preferred) {
            match Self::from_path(&path) {
                Ok(face) => {
                    tracing::debug!("using font {}", path.display());
                    return face;
                }
                Err(e) if preferred == Some(path.as_path()) => {
                    tracing::warn!("font {} could not be loaded: {e}", path.display())
                }
                Err(e) => tracing::trace!("font {} unavailable: {e}", path.display()),
            }
        }

        tracing::info!("{PREFERRED_FONT} not found, using built-in face");

        Face::Builtin
    }

    /// Load an outline font from a file.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let bytes = fs::read(path).map_err(|e| e.to_string())?;
        let font = FontVec::try_from_vec(bytes).map_err(|e| e.to_string())?;

        Ok(Face::TrueType {
            font,
            path: path.to_path_buf(),
        })
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Builtin)
    }

    /// Human-readable name for logs.
    pub fn describe(&self) -> String {
        match self {
            Face::TrueType { path, .. } => path.display().to_string(),
            Face::Builtin => "built-in 8x8".to_string(),
        }
    }
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Face({})", self.describe())
    }
}

fn candidates(preferred: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = preferred.map(Path::to_path_buf).into_iter().collect();

    if let Some(dir) = dirs::font_dir() {
        paths.push(dir.join(PREFERRED_FONT));
    }

    paths.extend(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));
    paths
}
