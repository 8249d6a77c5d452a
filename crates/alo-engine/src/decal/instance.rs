use crate::coords::Vec2;
use crate::paint::Pixel;
use crate::render::TextureId;

/// Blend policy a backend applies when drawing an instance.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DecalMode {
    #[default]
    Normal,
    Additive,
    Multiplicative,
    Stencil,
    Illuminate,
    /// Outline only: the vertices are drawn as a closed line loop.
    Wireframe,
    Model3D,
}

/// How the vertex sequence of an instance is assembled into primitives.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum DecalStructure {
    Line,
    #[default]
    Fan,
    Strip,
    List,
}

/// One queued draw command in normalized device coordinates.
///
/// The four per-vertex sequences always have the same length, which is at least two for any
/// instance that reaches a layer batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DecalInstance {
    /// `None` draws flat-coloured geometry.
    pub decal: Option<TextureId>,
    pub pos: Vec<Vec2>,
    pub uv: Vec<Vec2>,
    /// Perspective divisor per vertex; 1 for flat geometry.
    pub w: Vec<f32>,
    pub tint: Vec<Pixel>,
    pub mode: DecalMode,
    pub structure: DecalStructure,
}

impl DecalInstance {
    pub fn with_capacity(
        decal: Option<TextureId>,
        mode: DecalMode,
        structure: DecalStructure,
        points: usize,
    ) -> Self {
        Self {
            decal,
            pos: Vec::with_capacity(points),
            uv: Vec::with_capacity(points),
            w: Vec::with_capacity(points),
            tint: Vec::with_capacity(points),
            mode,
            structure,
        }
    }

    #[inline]
    pub fn push_vertex(&mut self, pos: Vec2, uv: Vec2, w: f32, tint: Pixel) {
        self.pos.push(pos);
        self.uv.push(uv);
        self.w.push(w);
        self.tint.push(tint);
    }

    #[inline]
    pub fn points(&self) -> usize {
        self.pos.len()
    }

    /// Parallel sequences agree and there are enough vertices to draw something.
    pub fn is_well_formed(&self) -> bool {
        let n = self.pos.len();
        n >= 2 && self.uv.len() == n && self.w.len() == n && self.tint.len() == n
    }
}

/// UVs of a full quad in the corner order used by every quad-shaped instance:
/// top-left, bottom-left, bottom-right, top-right.
pub(crate) const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
];
