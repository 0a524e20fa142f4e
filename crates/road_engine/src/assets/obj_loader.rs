//! OBJ file loader for 3D models
//!
//! Only geometry is read: `v` positions and `f` faces. Normals, texture
//! coordinates, groups and materials are skipped since the rasterizer shades
//! each triangle from its own face normal.

use crate::assets::AssetError;
use crate::foundation::math::Vec3;
use crate::render::Mesh;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Errors produced while reading an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A line could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The file parsed but is not a usable mesh
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Wavefront OBJ mesh loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file and return a mesh
    ///
    /// A missing file is reported as [`AssetError::NotFound`].
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Mesh, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mesh = Self::parse_obj(BufReader::new(file))?;
        log::debug!(
            "Loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.positions().len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ data from any buffered reader
    pub fn parse_obj<R: BufRead>(reader: R) -> Result<Mesh, ObjError> {
        let mut positions = Vec::new();
        let mut indices = Vec::new();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => {
                    let coords: Vec<&str> = parts.take(3).collect();
                    if coords.len() < 3 {
                        return Err(ObjError::ParseError(format!(
                            "line {}: vertex needs three coordinates",
                            line_number + 1
                        )));
                    }
                    let mut xyz = [0.0_f32; 3];
                    for (slot, text) in xyz.iter_mut().zip(coords) {
                        *slot = text.parse().map_err(|_| {
                            ObjError::ParseError(format!("line {}: invalid coordinate '{text}'", line_number + 1))
                        })?;
                    }
                    positions.push(Vec3::new(xyz[0], xyz[1], xyz[2]));
                }
                Some("f") => {
                    let face = parts
                        .map(|vertex| Self::parse_face_vertex(vertex, positions.len(), line_number + 1))
                        .collect::<Result<Vec<u32>, ObjError>>()?;

                    if face.len() < 3 {
                        return Err(ObjError::InvalidFormat(format!(
                            "line {}: face needs at least three vertices",
                            line_number + 1
                        )));
                    }

                    // Fan triangulation
                    for i in 1..(face.len() - 1) {
                        indices.extend_from_slice(&[face[0], face[i], face[i + 1]]);
                    }
                }
                _ => {
                    // Ignore other commands
                }
            }
        }

        if positions.is_empty() {
            return Err(ObjError::InvalidFormat("No vertices found in OBJ file".to_string()));
        }

        Ok(Mesh::new(positions, indices))
    }

    /// Resolve one `f` entry (`p`, `p/t`, `p//n` or `p/t/n`) to a 0-based position index
    fn parse_face_vertex(vertex: &str, position_count: usize, line_number: usize) -> Result<u32, ObjError> {
        let position = vertex.split('/').next().unwrap_or_default();
        let index: i64 = position.parse().map_err(|_| {
            ObjError::ParseError(format!("line {line_number}: invalid position index '{position}'"))
        })?;

        // Negative indices count back from the most recent vertex
        let resolved = match index {
            i if i > 0 => i - 1,
            i if i < 0 => position_count as i64 + i,
            _ => -1,
        };

        if resolved < 0 || resolved >= position_count as i64 {
            return Err(ObjError::InvalidFormat(format!(
                "line {line_number}: position index {index} out of bounds"
            )));
        }

        u32::try_from(resolved)
            .map_err(|_| ObjError::InvalidFormat(format!("line {line_number}: index {index} too large")))
    }
}
