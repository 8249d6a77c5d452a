//! wgpu implementation of [`Renderer`].
//!
//! Draw calls issued during a frame are flattened into one vertex stream and replayed in a
//! single render pass when the frame is displayed.
//!
//! Convention:
//! - Vertex positions arrive in NDC with a perspective weight `w`.
//! - A 1×1 opaque white texture stands in for untextured geometry.

mod geometry;
mod pipeline;

use std::collections::HashMap;
use std::ops::Range;

use anyhow::{Context, Result};

use geometry::{assemble, Primitive};
use pipeline::{blend_key, create_pipeline, texture_bind_group_layout, DecalVertex};

use super::{DeviceTarget, Renderer, TextureId};
use crate::coords::{Vec2, Vec2i};
use crate::decal::{DecalInstance, DecalMode, DecalStructure};
use crate::device::{Gpu, GpuInit, SurfaceErrorAction};
use crate::paint::{Pixel, BLACK};
use crate::sprite::Sprite;

struct GpuTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
    filtered: bool,
    clamp: bool,
}

/// A run of vertices sharing texture, blend and primitive.
struct DrawCmd {
    texture: TextureId,
    mode: DecalMode,
    primitive: Primitive,
    vertices: Range<u32>,
}

/// Everything that only exists while a device is alive.
struct DeviceState {
    gpu: Gpu,
    shader: wgpu::ShaderModule,
    bind_group_layout: wgpu::BindGroupLayout,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<(DecalMode, Primitive), wgpu::RenderPipeline>,
    samplers: HashMap<(bool, bool), wgpu::Sampler>,
    vbo: Option<wgpu::Buffer>,
    vbo_capacity: usize,
}

pub struct WgpuRenderer {
    init: GpuInit,
    state: Option<DeviceState>,
    textures: HashMap<TextureId, GpuTexture>,
    next_id: TextureId,
    white: TextureId,
    bound: Option<TextureId>,
    mode: DecalMode,
    clear: wgpu::Color,
    viewport: Option<(Vec2i, Vec2i)>,
    vertices: Vec<DecalVertex>,
    cmds: Vec<DrawCmd>,
}

impl Default for WgpuRenderer {
    fn default() -> Self {
        Self::new(GpuInit::default())
    }
}

impl WgpuRenderer {
    pub fn new(init: GpuInit) -> Self {
        Self {
            init,
            state: None,
            textures: HashMap::new(),
            next_id: 0,
            white: 0,
            bound: None,
            mode: DecalMode::Normal,
            clear: to_wgpu_color(BLACK),
            viewport: None,
            vertices: Vec::new(),
            cmds: Vec::new(),
        }
    }

    fn sampler(state: &mut DeviceState, filtered: bool, clamp: bool) -> wgpu::Sampler {
        state
            .samplers
            .entry((filtered, clamp))
            .or_insert_with(|| {
                let filter = if filtered {
                    wgpu::FilterMode::Linear
                } else {
                    wgpu::FilterMode::Nearest
                };
                let address = if clamp {
                    wgpu::AddressMode::ClampToEdge
                } else {
                    wgpu::AddressMode::Repeat
                };
                state.gpu.device().create_sampler(&wgpu::SamplerDescriptor {
                    label: Some("alo decal sampler"),
                    address_mode_u: address,
                    address_mode_v: address,
                    address_mode_w: address,
                    mag_filter: filter,
                    min_filter: filter,
                    ..Default::default()
                })
            })
            .clone()
    }

    fn allocate(state: &mut DeviceState, width: u32, height: u32, filtered: bool, clamp: bool) -> GpuTexture {
        let sampler = Self::sampler(state, filtered, clamp);
        let device = state.gpu.device();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("alo decal texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("alo decal bind group"),
            layout: &state.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });
        GpuTexture {
            texture,
            bind_group,
            width: width.max(1),
            height: height.max(1),
            filtered,
            clamp,
        }
    }

    fn upload(gpu: &Gpu, tex: &GpuTexture, pixels: &[Pixel]) {
        gpu.queue().write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(pixels),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * tex.width),
                rows_per_image: Some(tex.height),
            },
            wgpu::Extent3d {
                width: tex.width,
                height: tex.height,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Appends `indices` of the given vertex source as one draw run.
    fn push_run(
        &mut self,
        texture: TextureId,
        mode: DecalMode,
        primitive: Primitive,
        indices: &[usize],
        vertex: impl Fn(usize) -> DecalVertex,
    ) {
        if indices.is_empty() {
            return;
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend(indices.iter().map(|&i| vertex(i)));
        let end = self.vertices.len() as u32;

        let mode = blend_key(mode);
        if let Some(last) = self.cmds.last_mut() {
            if last.texture == texture
                && last.mode == mode
                && last.primitive == primitive
                && last.vertices.end == start
            {
                last.vertices.end = end;
                return;
            }
        }
        self.cmds.push(DrawCmd {
            texture,
            mode,
            primitive,
            vertices: start..end,
        });
    }

    fn ensure_pipelines(state: &mut DeviceState, cmds: &[DrawCmd]) {
        let format = state.gpu.surface_format();
        for cmd in cmds {
            let key = (cmd.mode, cmd.primitive);
            if state.pipelines.contains_key(&key) {
                continue;
            }
            let p = create_pipeline(
                state.gpu.device(),
                &state.pipeline_layout,
                &state.shader,
                format,
                cmd.mode,
                cmd.primitive,
            );
            state.pipelines.insert(key, p);
        }
    }

    fn ensure_vertex_capacity(state: &mut DeviceState, required: usize) {
        if required <= state.vbo_capacity && state.vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(1024);
        state.vbo = Some(state.gpu.device().create_buffer(&wgpu::BufferDescriptor {
            label: Some("alo decal vbo"),
            size: (new_cap * std::mem::size_of::<DecalVertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        state.vbo_capacity = new_cap;
    }

}

/// The requested viewport limited to the surface, or `None` when nothing is visible.
fn clamp_viewport(viewport: Option<(Vec2i, Vec2i)>, surface: (u32, u32)) -> Option<(f32, f32, f32, f32)> {
    let (sw, sh) = (surface.0 as i32, surface.1 as i32);
    let (pos, size) = viewport.unwrap_or((Vec2i::zero(), Vec2i::new(sw, sh)));
    let x = pos.x.clamp(0, sw);
    let y = pos.y.clamp(0, sh);
    let w = size.x.min(sw - x);
    let h = size.y.min(sh - y);
    (w > 0 && h > 0).then_some((x as f32, y as f32, w as f32, h as f32))
}

fn to_wgpu_color(p: Pixel) -> wgpu::Color {
    let [r, g, b, a] = p.to_f32();
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: a as f64,
    }
}

impl Renderer for WgpuRenderer {
    fn create_device(&mut self, target: DeviceTarget, full_screen: bool, vsync: bool) -> Result<()> {
        let surface = target
            .surface
            .context("wgpu renderer requires a window surface")?;
        let init = self.init.clone().with_vsync(vsync);
        let gpu = pollster::block_on(Gpu::new(surface, init)).context("failed to create GPU context")?;

        let shader = gpu.device().create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("alo decal shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/decal.wgsl").into()),
        });
        let bind_group_layout = texture_bind_group_layout(gpu.device());
        let pipeline_layout = gpu
            .device()
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("alo decal pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

        self.state = Some(DeviceState {
            gpu,
            shader,
            bind_group_layout,
            pipeline_layout,
            pipelines: HashMap::new(),
            samplers: HashMap::new(),
            vbo: None,
            vbo_capacity: 0,
        });

        self.white = self.create_texture(1, 1, false, true);
        let mut white = Sprite::new(1, 1);
        white.set_pixel(0, 0, crate::paint::WHITE);
        self.update_texture(self.white, &white);
        self.bound = None;

        log::info!("wgpu device created (full_screen={full_screen}, vsync={vsync})");
        Ok(())
    }

    fn destroy_device(&mut self) -> Result<()> {
        self.cmds.clear();
        self.vertices.clear();
        self.textures.clear();
        self.bound = None;
        self.state = None;
        log::info!("wgpu device destroyed");
        Ok(())
    }

    fn display_frame(&mut self) {
        let Some(state) = self.state.as_mut() else { return };

        Self::ensure_pipelines(state, &self.cmds);
        Self::ensure_vertex_capacity(state, self.vertices.len());

        if let Some(vbo) = state.vbo.as_ref() {
            if !self.vertices.is_empty() {
                state
                    .gpu
                    .queue()
                    .write_buffer(vbo, 0, bytemuck::cast_slice(&self.vertices));
            }
        }

        let mut frame = match state.gpu.begin_frame() {
            Ok(f) => f,
            Err(e) => {
                match state.gpu.handle_surface_error(e) {
                    SurfaceErrorAction::Fatal => log::error!("surface out of memory"),
                    action => log::debug!("frame skipped: {action:?}"),
                }
                self.cmds.clear();
                self.vertices.clear();
                return;
            }
        };

        let viewport = clamp_viewport(self.viewport, state.gpu.size());

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("alo frame pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            if let (Some((x, y, w, h)), Some(vbo)) = (viewport, state.vbo.as_ref()) {
                rpass.set_viewport(x, y, w, h, 0.0, 1.0);
                rpass.set_vertex_buffer(0, vbo.slice(..));

                for cmd in &self.cmds {
                    let Some(pipeline) = state.pipelines.get(&(cmd.mode, cmd.primitive)) else { continue };
                    let Some(tex) = self.textures.get(&cmd.texture) else { continue };
                    rpass.set_pipeline(pipeline);
                    rpass.set_bind_group(0, &tex.bind_group, &[]);
                    rpass.draw(cmd.vertices.clone(), 0..1);
                }
            }
        }

        state.gpu.submit(frame);
        self.cmds.clear();
        self.vertices.clear();
    }

    fn prepare_drawing(&mut self) {
        if let Some(state) = self.state.as_mut() {
            state.gpu.track_window_size();
        }
        self.mode = DecalMode::Normal;
    }

    fn set_decal_mode(&mut self, mode: DecalMode) {
        self.mode = mode;
    }

    fn draw_layer_quad(&mut self, offset: Vec2, scale: Vec2, tint: Pixel) {
        let Some(texture) = self.bound else { return };
        const CORNERS: [([f32; 2], [f32; 2]); 4] = [
            ([-1.0, 1.0], [0.0, 0.0]),
            ([-1.0, -1.0], [0.0, 1.0]),
            ([1.0, -1.0], [1.0, 1.0]),
            ([1.0, 1.0], [1.0, 0.0]),
        ];
        let col = [tint.r, tint.g, tint.b, tint.a];
        let (_, indices) = assemble(4, DecalMode::Normal, DecalStructure::Fan);
        self.push_run(texture, self.mode, Primitive::Triangles, &indices, |i| {
            let (p, uv) = CORNERS[i];
            DecalVertex {
                pos: [p[0], p[1], 1.0],
                uv: [uv[0] * scale.x + offset.x, uv[1] * scale.y + offset.y],
                col,
            }
        });
    }

    fn draw_decal(&mut self, decal: &DecalInstance) {
        if !decal.is_well_formed() {
            log::debug!("malformed decal instance skipped");
            return;
        }
        let texture = decal.decal.unwrap_or(self.white);
        let (primitive, indices) = assemble(decal.points(), decal.mode, decal.structure);
        self.push_run(texture, decal.mode, primitive, &indices, |i| {
            let (p, uv, t) = (decal.pos[i], decal.uv[i], decal.tint[i]);
            DecalVertex {
                pos: [p.x, p.y, decal.w[i]],
                uv: [uv.x, uv.y],
                col: [t.r, t.g, t.b, t.a],
            }
        });
    }

    fn create_texture(&mut self, width: u32, height: u32, filtered: bool, clamp: bool) -> TextureId {
        self.next_id += 1;
        let id = self.next_id;
        match self.state.as_mut() {
            Some(state) => {
                let tex = Self::allocate(state, width, height, filtered, clamp);
                self.textures.insert(id, tex);
                self.bound = Some(id);
            }
            None => log::warn!("texture {id} requested before device creation"),
        }
        id
    }

    fn update_texture(&mut self, id: TextureId, sprite: &Sprite) {
        let Some(state) = self.state.as_mut() else { return };
        let (w, h) = (sprite.width().max(0) as u32, sprite.height().max(0) as u32);
        if w == 0 || h == 0 {
            return;
        }

        let resized = match self.textures.get(&id) {
            Some(tex) if tex.width != w || tex.height != h => Some((tex.filtered, tex.clamp)),
            Some(_) => None,
            None => {
                log::warn!("update of unknown texture {id}");
                return;
            }
        };
        if let Some((filtered, clamp)) = resized {
            let tex = Self::allocate(state, w, h, filtered, clamp);
            self.textures.insert(id, tex);
        }

        if let Some(tex) = self.textures.get(&id) {
            Self::upload(&state.gpu, tex, sprite.data());
        }
    }

    fn read_texture(&mut self, id: TextureId, sprite: &mut Sprite) {
        let Some(state) = self.state.as_ref() else { return };
        let Some(tex) = self.textures.get(&id) else { return };

        let row = 4 * tex.width;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded = row.div_ceil(align) * align;
        let device = state.gpu.device();

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("alo readback"),
            size: (padded * tex.height) as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("alo readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &tex.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(tex.height),
                },
            },
            wgpu::Extent3d {
                width: tex.width,
                height: tex.height,
                depth_or_array_layers: 1,
            },
        );
        state.gpu.queue().submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        if let Err(e) = device.poll(wgpu::PollType::wait_indefinitely()) {
            log::warn!("readback poll failed: {e}");
            return;
        }
        match rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log::warn!("readback map failed: {e}");
                return;
            }
            Err(_) => return,
        }

        {
            let mapped = slice.get_mapped_range();
            let rows = (tex.height as usize).min(sprite.height().max(0) as usize);
            let cols = (tex.width as usize).min(sprite.width().max(0) as usize);
            let stride = sprite.width().max(0) as usize;
            let dst = sprite.data_mut();
            for y in 0..rows {
                let src = &mapped[y * padded as usize..][..cols * 4];
                let px: &[Pixel] = bytemuck::cast_slice(src);
                dst[y * stride..y * stride + cols].copy_from_slice(px);
            }
        }
        readback.unmap();
    }

    fn delete_texture(&mut self, id: TextureId) -> TextureId {
        if self.textures.remove(&id).is_none() {
            log::debug!("delete of unknown texture {id}");
        }
        if self.bound == Some(id) {
            self.bound = None;
        }
        id
    }

    fn apply_texture(&mut self, id: TextureId) {
        self.bound = Some(id);
    }

    fn update_viewport(&mut self, pos: Vec2i, size: Vec2i) {
        self.viewport = Some((pos, size));
    }

    fn clear_buffer(&mut self, p: Pixel, _depth: bool) {
        self.clear = to_wgpu_color(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_defaults_to_the_whole_surface() {
        assert_eq!(clamp_viewport(None, (640, 480)), Some((0.0, 0.0, 640.0, 480.0)));
    }

    #[test]
    fn viewport_is_clipped_to_the_surface() {
        let vp = Some((Vec2i::new(100, 0), Vec2i::new(800, 480)));
        assert_eq!(clamp_viewport(vp, (640, 480)), Some((100.0, 0.0, 540.0, 480.0)));
    }

    #[test]
    fn offscreen_viewport_is_dropped() {
        let vp = Some((Vec2i::new(700, 0), Vec2i::new(100, 100)));
        assert_eq!(clamp_viewport(vp, (640, 480)), None);
    }
}
