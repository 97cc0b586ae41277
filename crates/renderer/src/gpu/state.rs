use std::ops::Range;
use std::path::Path;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use viewstate::{DirtySlots, RenderParameters};
use winit::dpi::PhysicalSize;

use crate::compile::ShaderSources;
use crate::error::ViewerError;
use crate::types::{ColorSpaceMode, GpuPowerPreference};

use super::context::{AdapterSummary, GpuContext};
use super::geometry::QuadGeometry;
use super::pipeline::ViewPipeline;
use super::texture::{create_sampler, decode_image, DecodedImage, ImageTexture};
use super::uniforms::{surface_scale_range, texture_size_range, ViewUniforms, UNIFORM_SIZE};

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Texture, its bind group and the quad sized for it. Replaced as a unit.
struct ImageResources {
    texture: ImageTexture,
    bind_group: wgpu::BindGroup,
    geometry: QuadGeometry,
}

/// Owns every GPU object needed to draw the viewer frame.
pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: ViewPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    uniforms: ViewUniforms,
    sampler: wgpu::Sampler,
    image: ImageResources,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        color_space: ColorSpaceMode,
        gpu_power: GpuPowerPreference,
        sources: &ShaderSources,
    ) -> Result<Self, ViewerError>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size, color_space, gpu_power)?;
        let pipeline = ViewPipeline::new(&context.device, context.surface_format, sources)?;

        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view uniform buffer"),
            size: UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("view uniform bind group"),
                layout: &pipeline.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

        let sampler = create_sampler(&context.device);
        let image = Self::build_image(
            &context,
            &pipeline,
            &sampler,
            &DecodedImage::placeholder(),
            "placeholder image",
        );

        let mut uniforms = ViewUniforms::default();
        uniforms.set_surface_scale(context.size.width, context.size.height);
        uniforms.set_texture_size(1, 1);
        context
            .queue
            .write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        Ok(Self {
            context,
            pipeline,
            uniform_buffer,
            uniform_bind_group,
            uniforms,
            sampler,
            image,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub(crate) fn adapter(&self) -> &AdapterSummary {
        &self.context.adapter
    }

    pub(crate) fn image_size(&self) -> (u32, u32) {
        (self.image.texture.width, self.image.texture.height)
    }

    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.uniforms
            .set_surface_scale(new_size.width, new_size.height);
        self.write_range(surface_scale_range());
    }

    /// Decodes and uploads `path`, then swaps it in together with a fresh
    /// quad. On error the current image stays bound.
    pub(crate) fn load_image(&mut self, path: &Path) -> Result<(), ViewerError> {
        let decoded = decode_image(path, self.context.max_texture_dimension)?;
        let label = path.display().to_string();
        let next = Self::build_image(&self.context, &self.pipeline, &self.sampler, &decoded, &label);
        self.install(next);
        tracing::info!(
            path = %path.display(),
            width = decoded.width,
            height = decoded.height,
            "loaded image"
        );
        Ok(())
    }

    /// Rebuilds the quad from the current texture's dimensions.
    pub(crate) fn rebuild_geometry(&mut self) {
        let (width, height) = self.image_size();
        self.image.geometry = QuadGeometry::new(&self.context.device, width, height);
    }

    /// Writes the dirty slots of `params` into the uniform buffer.
    pub(crate) fn push_parameters(&mut self, params: &RenderParameters, dirty: DirtySlots) {
        if dirty.is_empty() {
            return;
        }
        for slot in dirty.iter() {
            self.uniforms.apply(params, slot);
        }
        let ranges = self.pipeline.slots.coalesced(dirty.iter());
        tracing::trace!(slots = dirty.len(), writes = ranges.len(), "pushing parameters");
        for range in ranges {
            self.write_range(range);
        }
    }

    pub(crate) fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_bind_group(1, &self.image.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.image.geometry.buffer.slice(..));
            render_pass.draw(0..self.image.geometry.vertex_count, 0..1);
        }
        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    fn build_image(
        context: &GpuContext,
        pipeline: &ViewPipeline,
        sampler: &wgpu::Sampler,
        decoded: &DecodedImage,
        label: &str,
    ) -> ImageResources {
        let texture = ImageTexture::upload(
            &context.device,
            &context.queue,
            decoded,
            label,
            context.color_space,
        );
        let bind_group = pipeline.image_bind_group(&context.device, &texture, sampler);
        let geometry = QuadGeometry::new(&context.device, texture.width, texture.height);
        ImageResources {
            texture,
            bind_group,
            geometry,
        }
    }

    fn install(&mut self, next: ImageResources) {
        self.uniforms
            .set_texture_size(next.texture.width, next.texture.height);
        self.image = next;
        self.write_range(texture_size_range());
    }

    fn write_range(&self, range: Range<usize>) {
        self.context.queue.write_buffer(
            &self.uniform_buffer,
            range.start as wgpu::BufferAddress,
            self.uniforms.bytes(range),
        );
    }
}
