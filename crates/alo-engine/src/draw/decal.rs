use crate::coords::{screen_to_ndc, Vec2, Vec2i};
use crate::core::Engine;
use crate::decal::{warp_factors, Decal, DecalInstance, DecalMode, QUAD_UVS};
use crate::paint::Pixel;
use crate::render::TextureId;

/// What a decal draw needs from a [`Decal`], copied out so the font decal can be used while
/// the engine is mutably borrowed.
#[derive(Debug, Copy, Clone)]
pub(crate) struct DecalSource {
    pub(crate) id: Option<TextureId>,
    pub(crate) size: Vec2i,
    pub(crate) uv_scale: Vec2,
}

impl From<&Decal> for DecalSource {
    fn from(d: &Decal) -> Self {
        Self {
            id: d.id(),
            size: d.size(),
            uv_scale: d.uv_scale(),
        }
    }
}

/// UVs of the `src .. src + size` texel rectangle in quad corner order.
fn region_uvs(tl: Vec2, br: Vec2) -> [Vec2; 4] {
    [
        Vec2::new(tl.x, tl.y),
        Vec2::new(tl.x, br.y),
        Vec2::new(br.x, br.y),
        Vec2::new(br.x, tl.y),
    ]
}

/// Corners of the NDC box spanned by `a` (top-left) and `b` (bottom-right).
fn box_corners(a: Vec2, b: Vec2) -> [Vec2; 4] {
    region_uvs(a, b)
}

impl Engine {
    /// New instance stamped with the current decal mode and structure.
    fn instance(&self, decal: Option<TextureId>, points: usize) -> DecalInstance {
        DecalInstance::with_capacity(decal, self.decal_mode, self.decal_structure, points)
    }

    /// Appends to the target layer's batch. Malformed instances are dropped.
    pub(crate) fn push_decal(&mut self, di: DecalInstance) {
        if !di.is_well_formed() {
            log::debug!("dropped decal instance with {} point(s)", di.points());
            return;
        }
        if let Some(layer) = self.layers.get_mut(self.target_layer) {
            layer.decals.push(di);
        }
    }

    #[inline]
    fn ndc(&self, p: Vec2) -> Vec2 {
        screen_to_ndc(p, self.inv_screen_size)
    }

    fn push_quad(&mut self, decal: Option<TextureId>, pos: [Vec2; 4], uv: [Vec2; 4], tint: [Pixel; 4]) {
        let mut di = self.instance(decal, 4);
        for i in 0..4 {
            di.push_vertex(pos[i], uv[i], 1.0, tint[i]);
        }
        self.push_decal(di);
    }

    /// Whole decal with its top-left at `pos`.
    pub fn draw_decal(&mut self, pos: Vec2, decal: &Decal, scale: Vec2, tint: Pixel) {
        let src = DecalSource::from(decal);
        let a = self.ndc(pos);
        let b = Vec2::new(
            a.x + 2.0 * src.size.x as f32 * self.inv_screen_size.x * scale.x,
            a.y - 2.0 * src.size.y as f32 * self.inv_screen_size.y * scale.y,
        );
        self.push_quad(src.id, box_corners(a, b), QUAD_UVS, [tint; 4]);
    }

    /// The `source_pos .. source_pos + source_size` region, scaled. Edges are snapped to view
    /// pixels and the UVs inset slightly so neighbouring texels do not bleed in.
    pub fn draw_partial_decal(
        &mut self,
        pos: Vec2,
        decal: &Decal,
        source_pos: Vec2,
        source_size: Vec2,
        scale: Vec2,
        tint: Pixel,
    ) {
        self.partial_decal(pos, DecalSource::from(decal), source_pos, source_size, scale, tint);
    }

    pub(crate) fn partial_decal(
        &mut self,
        pos: Vec2,
        src: DecalSource,
        source_pos: Vec2,
        source_size: Vec2,
        scale: Vec2,
        tint: Pixel,
    ) {
        let a = self.ndc(pos);
        let b = self.ndc(pos + source_size * scale);

        let window = Vec2::from(self.viewport.size);
        let qa = ((a * window) + Vec2::new(0.5, 0.5)).floor() / window;
        let qb = ((b * window) + Vec2::new(0.5, -0.5)).ceil() / window;

        let inset = Vec2::splat(0.0001);
        let uv_tl = (source_pos + inset) * src.uv_scale;
        let uv_br = (source_pos + source_size - inset) * src.uv_scale;
        self.push_quad(src.id, box_corners(qa, qb), region_uvs(uv_tl, uv_br), [tint; 4]);
    }

    /// The `source_pos .. source_pos + source_size` region stretched to `size` screen pixels.
    pub fn draw_partial_decal_sized(
        &mut self,
        pos: Vec2,
        size: Vec2,
        decal: &Decal,
        source_pos: Vec2,
        source_size: Vec2,
        tint: Pixel,
    ) {
        let src = DecalSource::from(decal);
        let a = self.ndc(pos);
        let b = Vec2::new(
            a.x + 2.0 * size.x * self.inv_screen_size.x,
            a.y - 2.0 * size.y * self.inv_screen_size.y,
        );
        let uv_tl = source_pos * src.uv_scale;
        let uv_br = uv_tl + source_size * src.uv_scale;
        self.push_quad(src.id, box_corners(a, b), region_uvs(uv_tl, uv_br), [tint; 4]);
    }

    /// Arbitrary vertices with per-vertex UV and colour. Extra entries in the longer slices
    /// are ignored.
    pub fn draw_explicit_decal(&mut self, decal: Option<&Decal>, pos: &[Vec2], uv: &[Vec2], col: &[Pixel]) {
        let id = decal.and_then(Decal::id);
        let n = pos.len().min(uv.len()).min(col.len());
        let mut di = self.instance(id, n);
        for i in 0..n {
            di.push_vertex(self.ndc(pos[i]), uv[i], 1.0, col[i]);
        }
        self.push_decal(di);
    }

    /// Polygon with one tint. Assembled according to the current decal structure.
    pub fn draw_polygon_decal(&mut self, decal: Option<&Decal>, pos: &[Vec2], uv: &[Vec2], tint: Pixel) {
        let id = decal.and_then(Decal::id);
        let n = pos.len().min(uv.len());
        let mut di = self.instance(id, n);
        for i in 0..n {
            di.push_vertex(self.ndc(pos[i]), uv[i], 1.0, tint);
        }
        self.push_decal(di);
    }

    /// Polygon with a tint per vertex.
    pub fn draw_polygon_decal_tinted(
        &mut self,
        decal: Option<&Decal>,
        pos: &[Vec2],
        uv: &[Vec2],
        tint: &[Pixel],
    ) {
        self.draw_explicit_decal(decal, pos, uv, tint);
    }

    /// Polygon with a perspective divisor per vertex. UVs are expected pre-multiplied by it.
    pub fn draw_polygon_decal_depth(
        &mut self,
        decal: Option<&Decal>,
        pos: &[Vec2],
        depth: &[f32],
        uv: &[Vec2],
        tint: Pixel,
    ) {
        let id = decal.and_then(Decal::id);
        let n = pos.len().min(depth.len()).min(uv.len());
        let mut di = self.instance(id, n);
        for i in 0..n {
            di.push_vertex(self.ndc(pos[i]), uv[i], depth[i], tint);
        }
        self.push_decal(di);
    }

    /// One-pixel-wide line, drawn in wireframe mode.
    pub fn draw_line_decal(&mut self, pos1: Vec2, pos2: Vec2, p: Pixel) {
        let saved = std::mem::replace(&mut self.decal_mode, DecalMode::Wireframe);
        self.draw_polygon_decal(None, &[pos1, pos2], &[Vec2::zero(); 2], p);
        self.decal_mode = saved;
    }

    /// Rectangle outline, drawn in wireframe mode.
    pub fn draw_rect_decal(&mut self, pos: Vec2, size: Vec2, col: Pixel) {
        let saved = std::mem::replace(&mut self.decal_mode, DecalMode::Wireframe);
        self.fill_rect_decal(pos, size, col);
        self.decal_mode = saved;
    }

    pub fn fill_rect_decal(&mut self, pos: Vec2, size: Vec2, col: Pixel) {
        self.gradient_fill_rect_decal(pos, size, col, col, col, col);
    }

    /// Rectangle with corner colours top-left, bottom-left, bottom-right, top-right.
    pub fn gradient_fill_rect_decal(
        &mut self,
        pos: Vec2,
        size: Vec2,
        tl: Pixel,
        bl: Pixel,
        br: Pixel,
        tr: Pixel,
    ) {
        let points = [
            pos,
            Vec2::new(pos.x, pos.y + size.y),
            pos + size,
            Vec2::new(pos.x + size.x, pos.y),
        ];
        self.draw_explicit_decal(None, &points, &[Vec2::zero(); 4], &[tl, bl, br, tr]);
    }

    /// Whole decal rotated by `angle` radians about `center` (decal pixels), placed so that
    /// `center` lands on `pos`.
    pub fn draw_rotated_decal(
        &mut self,
        pos: Vec2,
        decal: &Decal,
        angle: f32,
        center: Vec2,
        scale: Vec2,
        tint: Pixel,
    ) {
        let src = DecalSource::from(decal);
        let size = Vec2::from(src.size);
        let corners = self.rotated_corners(pos, size, angle, center, scale);
        self.push_quad(src.id, corners, QUAD_UVS, [tint; 4]);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_partial_rotated_decal(
        &mut self,
        pos: Vec2,
        decal: &Decal,
        angle: f32,
        center: Vec2,
        source_pos: Vec2,
        source_size: Vec2,
        scale: Vec2,
        tint: Pixel,
    ) {
        let src = DecalSource::from(decal);
        self.partial_rotated_decal(pos, src, angle, center, source_pos, source_size, scale, tint);
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn partial_rotated_decal(
        &mut self,
        pos: Vec2,
        src: DecalSource,
        angle: f32,
        center: Vec2,
        source_pos: Vec2,
        source_size: Vec2,
        scale: Vec2,
        tint: Pixel,
    ) {
        let corners = self.rotated_corners(pos, source_size, angle, center, scale);
        let uv_tl = source_pos * src.uv_scale;
        let uv_br = uv_tl + source_size * src.uv_scale;
        self.push_quad(src.id, corners, region_uvs(uv_tl, uv_br), [tint; 4]);
    }

    fn rotated_corners(&self, pos: Vec2, size: Vec2, angle: f32, center: Vec2, scale: Vec2) -> [Vec2; 4] {
        let (s, c) = angle.sin_cos();
        box_corners(Vec2::zero(), size).map(|corner| {
            let p = (corner - center) * scale;
            let p = pos + Vec2::new(p.x * c - p.y * s, p.x * s + p.y * c);
            self.ndc(p)
        })
    }

    /// Whole decal mapped onto four arbitrary corners (top-left, bottom-left, bottom-right,
    /// top-right). Quads whose diagonals are parallel are skipped.
    pub fn draw_warped_decal(&mut self, decal: &Decal, pos: &[Vec2; 4], tint: Pixel) {
        self.warped_decal(decal.id(), pos, QUAD_UVS, tint);
    }

    pub fn draw_partial_warped_decal(
        &mut self,
        decal: &Decal,
        pos: &[Vec2; 4],
        source_pos: Vec2,
        source_size: Vec2,
        tint: Pixel,
    ) {
        let uv_tl = source_pos * decal.uv_scale();
        let uv_br = uv_tl + source_size * decal.uv_scale();
        self.warped_decal(decal.id(), pos, region_uvs(uv_tl, uv_br), tint);
    }

    fn warped_decal(&mut self, id: Option<TextureId>, pos: &[Vec2; 4], uv: [Vec2; 4], tint: Pixel) {
        let Some(q) = warp_factors(pos) else {
            log::debug!("skipped warped decal with parallel diagonals");
            return;
        };
        let mut di = self.instance(id, 4);
        for i in 0..4 {
            di.push_vertex(self.ndc(pos[i]), uv[i] * q[i], q[i], tint);
        }
        self.push_decal(di);
    }
}
