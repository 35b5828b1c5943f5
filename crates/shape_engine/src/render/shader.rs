//! Shader text loading
//!
//! Only GLSL source text is handled here; compilation belongs to the backend.
//! A copy of the default shaders is compiled into the crate so a missing
//! `shaders/` directory degrades to the built-in program instead of a black
//! window.

use crate::config::ShaderConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_VERTEX: &str = include_str!("../../shaders/primitive.vert");
const BUILTIN_FRAGMENT: &str = include_str!("../../shaders/primitive.frag");

/// Shader loading errors
#[derive(Error, Debug)]
pub enum ShaderError {
    /// Shader file could not be read
    #[error("Failed to read shader {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Shader file exists but holds no code
    #[error("Shader file {0} is empty")]
    Empty(PathBuf),
}

/// Vertex and fragment GLSL text for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex stage source
    pub vertex: String,
    /// Fragment stage source
    pub fragment: String,
}

impl ShaderSource {
    /// Create from in-memory text
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// The shaders shipped inside the crate
    pub fn builtin() -> Self {
        Self::new(BUILTIN_VERTEX, BUILTIN_FRAGMENT)
    }

    /// Read both stages from the configured paths
    pub fn load(config: &ShaderConfig) -> Result<Self, ShaderError> {
        Ok(Self {
            vertex: read_stage(Path::new(&config.vertex_shader_path))?,
            fragment: read_stage(Path::new(&config.fragment_shader_path))?,
        })
    }

    /// Read from disk, falling back to the built-in shaders on failure
    pub fn load_or_builtin(config: &ShaderConfig) -> Self {
        match Self::load(config) {
            Ok(source) => {
                log::info!(
                    "Loaded shaders from {} and {}",
                    config.vertex_shader_path,
                    config.fragment_shader_path
                );
                source
            }
            Err(e) => {
                log::warn!("{e}; using built-in shaders");
                Self::builtin()
            }
        }
    }
}

fn read_stage(path: &Path) -> Result<String, ShaderError> {
    let text = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Err(ShaderError::Empty(path.to_path_buf()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_declares_expected_interface() {
        let source = ShaderSource::builtin();
        assert!(source.vertex.starts_with("#version 330 core"));
        for uniform in ["u_model", "u_view", "u_projection"] {
            assert!(source.vertex.contains(uniform), "missing {uniform}");
        }
        for uniform in ["u_light_dir", "u_light_color", "u_ambient", "u_view_pos", "u_unlit"] {
            assert!(source.fragment.contains(uniform), "missing {uniform}");
        }
    }

    #[test]
    fn test_missing_files_fall_back() {
        let config = ShaderConfig::new("no/such/file.vert", "no/such/file.frag");
        assert!(matches!(ShaderSource::load(&config), Err(ShaderError::Io { .. })));
        assert_eq!(ShaderSource::load_or_builtin(&config), ShaderSource::builtin());
    }

    #[test]
    fn test_empty_file_rejected() {
        let path = std::env::temp_dir().join(format!("shape_engine_empty_{}.vert", std::process::id()));
        std::fs::write(&path, "  \n").unwrap();
        let result = read_stage(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ShaderError::Empty(_))));
    }
}
