use crate::device::{ColorAttachment, GpuBackend, RenderPassDesc, Session, SurfaceStatus};
use crate::time::FrameClock;
use crate::window::WindowProvider;

/// Result of one driven frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The clear pass was submitted and the image presented.
    Presented { frame_index: u64 },
    /// No surface texture was available; nothing was recorded or submitted.
    Skipped(SurfaceStatus),
}

/// Running frame counters.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub presented: u64,
    pub skipped: u64,
}

/// View over the whole surface texture: 2D, one mip, one layer, all aspects.
fn surface_view_desc() -> wgpu::TextureViewDescriptor<'static> {
    wgpu::TextureViewDescriptor {
        label: Some("ocean surface view"),
        dimension: Some(wgpu::TextureViewDimension::D2),
        aspect: wgpu::TextureAspect::All,
        base_mip_level: 0,
        mip_level_count: Some(1),
        base_array_layer: 0,
        array_layer_count: Some(1),
        ..Default::default()
    }
}

/// Produces one cleared-and-presented frame per `drive` call.
#[derive(Debug)]
pub struct FrameDriver {
    clear_color: wgpu::Color,
    clock: FrameClock,
    stats: FrameStats,
}

impl FrameDriver {
    pub fn new(clear_color: wgpu::Color) -> Self {
        Self {
            clear_color,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear_color
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Polls window events, then records, submits and presents a clear-only
    /// render pass.
    ///
    /// If the surface has no texture to hand out the frame is skipped
    /// entirely; the next call tries again.
    pub fn drive<B, W>(&mut self, backend: &B, session: &Session<B>, window: &mut W) -> FrameOutcome
    where
        B: GpuBackend,
        W: WindowProvider,
    {
        window.poll_events();

        let texture = match backend.acquire_texture(session.surface()) {
            Ok(texture) => texture,
            Err(status) => {
                self.stats.skipped += 1;
                log::trace!("frame skipped: {status}");
                return FrameOutcome::Skipped(status);
            }
        };

        let view = backend.create_view(&texture, &surface_view_desc());

        let mut encoder = backend.create_encoder(session.device(), "ocean frame encoder");
        backend.encode_render_pass(
            &mut encoder,
            &RenderPassDesc {
                label: Some("ocean clear"),
                color_attachments: &[ColorAttachment {
                    view: &view,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                }],
            },
        );

        let commands = backend.finish(encoder);
        backend.submit(session.queue(), commands);

        drop(view);

        // Browsers present the canvas themselves.
        if cfg!(not(target_arch = "wasm32")) {
            window.pre_present();
            backend.present(texture);
        } else {
            drop(texture);
        }

        backend.poll(session.device());

        let time = self.clock.tick();
        self.stats.presented += 1;
        log::trace!("frame {} presented (dt {:.4}s)", time.frame_index, time.dt);

        FrameOutcome::Presented {
            frame_index: time.frame_index,
        }
    }
}

impl Default for FrameDriver {
    /// Clears to opaque red.
    fn default() -> Self {
        Self::new(wgpu::Color::RED)
    }
}
