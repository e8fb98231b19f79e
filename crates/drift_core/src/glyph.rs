//! Stroke-built letter geometry.
//!
//! Letters are described as a handful of straight strokes in em units
//! (cap height 1.0, baseline at y = 0). A [`GlyphShape`] scales and centres
//! them, then extrudes every stroke into a box:
//!
//! - `mesh()` gives a flat-shaded render mesh
//! - `half_extents()` gives the cuboid collider for the rigid body
//!
//! Supported letters: `A`, `K`, `Q` (case-insensitive).

use bevy::asset::RenderAssetUsages;
use bevy::math::Rect;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Default stroke width in em units.
const STROKE_WIDTH: f32 = 0.16;

/// Segments used to approximate the bowl of `Q`.
const RING_SEGMENTS: usize = 14;

/// Errors raised when asking for a letter with no outline.
#[derive(Debug, Clone, PartialEq)]
pub enum GlyphError {
    Unsupported(char),
}

impl std::fmt::Display for GlyphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GlyphError::Unsupported(c) => write!(f, "No outline for glyph {:?}", c),
        }
    }
}

impl std::error::Error for GlyphError {}

/// Marker for a letter body in the scene.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct GlyphBody {
    pub letter: char,
    /// Index of the letter group this body belongs to.
    pub group: usize,
}

/// A straight stroke between two points with a given width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
}

impl Stroke {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            width: STROKE_WIDTH,
        }
    }

    /// Length along the stroke including square caps.
    pub fn length(&self) -> f32 {
        self.from.distance(self.to) + self.width
    }

    pub fn center(&self) -> Vec2 {
        (self.from + self.to) * 0.5
    }

    /// Rotation of the stroke axis about +Z.
    pub fn angle(&self) -> f32 {
        let d = self.to - self.from;
        d.y.atan2(d.x)
    }

    /// The four corners of the stroke rectangle.
    fn corners(&self) -> [Vec2; 4] {
        let dir = Vec2::from_angle(self.angle());
        let along = dir * self.length() * 0.5;
        let across = dir.perp() * self.width * 0.5;
        let c = self.center();
        [
            c - along - across,
            c + along - across,
            c + along + across,
            c - along + across,
        ]
    }

    fn scaled(&self, scale: f32, offset: Vec2) -> Self {
        Self {
            from: (self.from - offset) * scale,
            to: (self.to - offset) * scale,
            width: self.width * scale,
        }
    }
}

/// Raw strokes of a letter in em units.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphOutline {
    pub letter: char,
    pub strokes: Vec<Stroke>,
}

impl GlyphOutline {
    /// Axis-aligned bounds of all stroke rectangles.
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect {
            min: Vec2::splat(f32::MAX),
            max: Vec2::splat(f32::MIN),
        };
        for corner in self.strokes.iter().flat_map(|s| s.corners()) {
            rect.min = rect.min.min(corner);
            rect.max = rect.max.max(corner);
        }
        rect
    }
}

/// Outline for `letter`.
pub fn glyph_outline(letter: char) -> Result<GlyphOutline, GlyphError> {
    let v = Vec2::new;
    let strokes = match letter.to_ascii_uppercase() {
        'A' => vec![
            Stroke::new(v(0.0, 0.0), v(0.4, 1.0)),
            Stroke::new(v(0.8, 0.0), v(0.4, 1.0)),
            Stroke::new(v(0.2, 0.35), v(0.6, 0.35)),
        ],
        'K' => vec![
            Stroke::new(v(0.08, 0.0), v(0.08, 1.0)),
            Stroke::new(v(0.12, 0.45), v(0.7, 1.0)),
            Stroke::new(v(0.3, 0.55), v(0.72, 0.0)),
        ],
        'Q' => {
            let center = v(0.42, 0.5);
            let radii = v(0.34, 0.42);
            let mut strokes: Vec<Stroke> = (0..RING_SEGMENTS)
                .map(|i| {
                    let a0 = i as f32 / RING_SEGMENTS as f32 * TAU;
                    let a1 = (i + 1) as f32 / RING_SEGMENTS as f32 * TAU;
                    let p0 = center + Vec2::from_angle(a0) * radii;
                    let p1 = center + Vec2::from_angle(a1) * radii;
                    Stroke::new(p0, p1)
                })
                .collect();
            strokes.push(Stroke::new(v(0.5, 0.25), v(0.82, -0.06)));
            strokes
        }
        other => return Err(GlyphError::Unsupported(other)),
    };

    Ok(GlyphOutline {
        letter: letter.to_ascii_uppercase(),
        strokes,
    })
}

/// A letter scaled to `size`, centred on its bounds and extruded to `depth`.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphShape {
    pub letter: char,
    strokes: Vec<Stroke>,
    half_extents: Vec3,
}

impl GlyphShape {
    pub fn new(letter: char, size: f32, depth: f32) -> Result<Self, GlyphError> {
        let outline = glyph_outline(letter)?;
        let bounds = outline.bounds();
        let strokes = outline
            .strokes
            .iter()
            .map(|s| s.scaled(size, bounds.center()))
            .collect();
        let half = bounds.half_size() * size;

        Ok(Self {
            letter: outline.letter,
            strokes,
            half_extents: Vec3::new(half.x, half.y, depth * 0.5),
        })
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Half extents of the box enclosing the glyph.
    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Flat-shaded mesh, one box per stroke.
    pub fn mesh(&self) -> Mesh {
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(self.strokes.len() * 24);
        let mut normals: Vec<[f32; 3]> = Vec::with_capacity(self.strokes.len() * 24);
        let mut indices: Vec<u32> = Vec::with_capacity(self.strokes.len() * 36);

        for stroke in &self.strokes {
            let center = stroke.center().extend(0.0);
            let half = Vec3::new(
                stroke.length() * 0.5,
                stroke.width * 0.5,
                self.half_extents.z,
            );
            let rotation = Quat::from_rotation_z(stroke.angle());
            push_box(&mut positions, &mut normals, &mut indices, center, half, rotation);
        }

        Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
            .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
            .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
            .with_inserted_indices(Indices::U32(indices))
    }
}

/// Face normal with the two in-plane axes, ordered so `u x v = normal`
/// (counter-clockwise winding seen from outside).
const BOX_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

fn push_box(
    positions: &mut Vec<[f32; 3]>,
    normals: &mut Vec<[f32; 3]>,
    indices: &mut Vec<u32>,
    center: Vec3,
    half: Vec3,
    rotation: Quat,
) {
    for (normal, u, v) in BOX_FACES {
        let base = positions.len() as u32;
        let world_normal = rotation * normal;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let local = (normal + u * su + v * sv) * half;
            positions.push((center + rotation * local).to_array());
            normals.push(world_normal.to_array());
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_letters() {
        for c in ['A', 'K', 'Q', 'a', 'k', 'q'] {
            assert!(glyph_outline(c).is_ok(), "{} should be supported", c);
        }
        assert_eq!(glyph_outline('q').unwrap().letter, 'Q');
    }

    #[test]
    fn test_unsupported_letter() {
        assert_eq!(glyph_outline('Z'), Err(GlyphError::Unsupported('Z')));
        assert!(GlyphShape::new('7', 1.0, 0.5).is_err());
    }

    #[test]
    fn test_shape_is_centred() {
        for c in ['A', 'K', 'Q'] {
            let shape = GlyphShape::new(c, 1.0, 0.5).unwrap();
            let outline = GlyphOutline {
                letter: c,
                strokes: shape.strokes().to_vec(),
            };
            let bounds = outline.bounds();
            assert!(bounds.center().length() < 1e-4, "{}: {:?}", c, bounds);
            assert!((bounds.half_size() - shape.half_extents().truncate()).length() < 1e-4);
        }
    }

    #[test]
    fn test_half_extents_scale_with_size() {
        let small = GlyphShape::new('A', 1.0, 0.5).unwrap();
        let large = GlyphShape::new('A', 2.0, 0.5).unwrap();
        assert!((large.half_extents().x - 2.0 * small.half_extents().x).abs() < 1e-4);
        assert!((large.half_extents().y - 2.0 * small.half_extents().y).abs() < 1e-4);
        assert_eq!(small.half_extents().z, 0.25);
        // cap height plus stroke caps
        assert!(small.half_extents().y > 0.5 && small.half_extents().y < 0.65);
    }

    #[test]
    fn test_mesh_sizes() {
        let shape = GlyphShape::new('K', 1.0, 0.5).unwrap();
        let mesh = shape.mesh();
        let strokes = shape.strokes().len();
        assert_eq!(mesh.count_vertices(), strokes * 24);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(strokes * 36));
    }

    #[test]
    fn test_mesh_stays_inside_collider() {
        let shape = GlyphShape::new('Q', 1.0, 0.5).unwrap();
        let mesh = shape.mesh();
        let half = shape.half_extents() + Vec3::splat(1e-4);
        let Some(positions) = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|a| a.as_float3())
        else {
            panic!("mesh has no positions");
        };
        for p in positions {
            let p = Vec3::from_array(*p);
            assert!(p.abs().cmple(half).all(), "{:?} outside {:?}", p, half);
        }
    }

    #[test]
    fn test_box_winding_faces_outward() {
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        push_box(
            &mut positions,
            &mut normals,
            &mut indices,
            Vec3::ZERO,
            Vec3::ONE,
            Quat::IDENTITY,
        );
        for tri in indices.chunks(3) {
            let a = Vec3::from_array(positions[tri[0] as usize]);
            let b = Vec3::from_array(positions[tri[1] as usize]);
            let c = Vec3::from_array(positions[tri[2] as usize]);
            let face_normal = (b - a).cross(c - a).normalize();
            let n = Vec3::from_array(normals[tri[0] as usize]);
            assert!(face_normal.dot(n) > 0.99);
        }
    }
}
