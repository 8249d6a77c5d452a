//! Primitive assembly for decal instances.
//!
//! The GPU offers lists and strips only, so fans, strips and closed loops are flattened into
//! plain lists here. Output is a sequence of source vertex indices.

use crate::decal::{DecalMode, DecalStructure};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Primitive {
    Triangles,
    Lines,
}

impl Primitive {
    pub(crate) fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// Indices into an `n`-vertex instance drawn with `mode` and `structure`.
pub(crate) fn assemble(n: usize, mode: DecalMode, structure: DecalStructure) -> (Primitive, Vec<usize>) {
    if mode == DecalMode::Wireframe {
        return (Primitive::Lines, line_loop(n));
    }
    match structure {
        DecalStructure::Fan => (Primitive::Triangles, fan(n)),
        DecalStructure::Strip => (Primitive::Triangles, strip(n)),
        DecalStructure::List => (Primitive::Triangles, (0..n - n % 3).collect()),
        DecalStructure::Line => (Primitive::Lines, line_strip(n)),
    }
}

fn fan(n: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 1..n.saturating_sub(1) {
        out.extend_from_slice(&[0, i, i + 1]);
    }
    out
}

fn strip(n: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(n.saturating_sub(2) * 3);
    for i in 0..n.saturating_sub(2) {
        // Alternate winding so every triangle keeps the strip's orientation.
        if i % 2 == 0 {
            out.extend_from_slice(&[i, i + 1, i + 2]);
        } else {
            out.extend_from_slice(&[i + 1, i, i + 2]);
        }
    }
    out
}

fn line_strip(n: usize) -> Vec<usize> {
    let mut out = Vec::with_capacity(n.saturating_sub(1) * 2);
    for i in 1..n {
        out.extend_from_slice(&[i - 1, i]);
    }
    out
}

fn line_loop(n: usize) -> Vec<usize> {
    let mut out = line_strip(n);
    if n > 2 {
        out.extend_from_slice(&[n - 1, 0]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_fan_is_two_triangles() {
        let (p, idx) = assemble(4, DecalMode::Normal, DecalStructure::Fan);
        assert_eq!(p, Primitive::Triangles);
        assert_eq!(idx, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn strip_alternates_winding() {
        let (_, idx) = assemble(4, DecalMode::Additive, DecalStructure::Strip);
        assert_eq!(idx, vec![0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn list_drops_trailing_partial_triangle() {
        let (_, idx) = assemble(7, DecalMode::Normal, DecalStructure::List);
        assert_eq!(idx.len(), 6);
    }

    #[test]
    fn wireframe_closes_the_loop() {
        let (p, idx) = assemble(4, DecalMode::Wireframe, DecalStructure::Fan);
        assert_eq!(p, Primitive::Lines);
        assert_eq!(idx, vec![0, 1, 1, 2, 2, 3, 3, 0]);
    }

    #[test]
    fn two_point_wireframe_is_one_segment() {
        let (_, idx) = assemble(2, DecalMode::Wireframe, DecalStructure::Fan);
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn two_point_fan_draws_nothing() {
        let (_, idx) = assemble(2, DecalMode::Normal, DecalStructure::Fan);
        assert!(idx.is_empty());
    }
}
