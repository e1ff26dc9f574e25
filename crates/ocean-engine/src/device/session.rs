use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;

use super::backend::GpuBackend;
use super::bridge::{self, WaitStrategy};
use super::diagnostics::DiagnosticSink;
use super::surface;

/// Initialization parameters for the GPU session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Debug label of the logical device.
    pub device_label: String,

    pub power_preference: wgpu::PowerPreference,

    /// Prefer an sRGB surface format over the surface's preferred format.
    pub prefer_srgb: bool,

    /// FIFO presents in submission order and never tears.
    pub present_mode: wgpu::PresentMode,

    /// Falls back to a supported mode when the request is unsupported.
    pub alpha_mode: wgpu::CompositeAlphaMode,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,

    /// How adapter/device requests wait for their callbacks.
    pub wait: WaitStrategy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            device_label: "ocean device".to_string(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
            wait: WaitStrategy::default(),
        }
    }
}

/// The GPU context used for the application's lifetime: device, queue and the
/// configured presentation surface.
///
/// Instance and adapter are transient and do not outlive `create`.
pub struct Session<B: GpuBackend> {
    device: B::Device,
    queue: B::Queue,
    surface: B::Surface,
    config: wgpu::SurfaceConfiguration,
}

impl<B: GpuBackend> Session<B> {
    /// Runs the acquisition sequence. No step is retried; on error everything
    /// acquired so far is dropped.
    pub fn create(
        backend: &B,
        window: B::Window,
        size: PhysicalSize<u32>,
        config: &SessionConfig,
        diagnostics: DiagnosticSink,
    ) -> Result<Self> {
        anyhow::ensure!(size.width > 0 && size.height > 0, "surface size is zero");

        let instance = backend.create_instance();
        let surface = backend.create_surface(&instance, window)?;

        log::info!("Requesting adapter");
        let adapter = bridge::request_sync("adapter", config.wait, |done| {
            backend.request_adapter(&instance, &surface, config, done)
        })
        .context("failed to find a suitable GPU adapter")?;

        let report = backend.describe_adapter(&adapter);
        log::info!("GPU adapter: {} ({})", report.name, report.backend);
        log::debug!("{report}");

        drop(instance);

        log::info!("Requesting device");
        let (device, queue) = bridge::request_sync("device", config.wait, |done| {
            backend.request_device(&adapter, config, diagnostics, done)
        })
        .context("failed to create GPU device/queue")?;

        log::info!("GPU device acquired");
        log::debug!("{}", backend.describe_device(&device));

        let caps = backend.surface_capabilities(&surface, &adapter);
        let format = surface::choose_surface_format(&caps, config.prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, config.alpha_mode);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: config.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: config.desired_maximum_frame_latency,
        };

        backend.configure_surface(&surface, &device, &surface_config);
        log::debug!(
            "surface configured: {}x{} {format:?} {:?}",
            size.width,
            size.height,
            config.present_mode
        );

        drop(adapter);

        Ok(Self {
            device,
            queue,
            surface,
            config: surface_config,
        })
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    pub fn queue(&self) -> &B::Queue {
        &self.queue
    }

    pub fn surface(&self) -> &B::Surface {
        &self.surface
    }

    /// Active surface configuration.
    pub fn surface_config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }

    /// Unconfigures the surface, then releases queue, surface and device in
    /// that order.
    pub fn release(self, backend: &B) {
        let Self {
            device,
            queue,
            surface,
            ..
        } = self;

        backend.unconfigure_surface(&surface);
        drop(queue);
        drop(surface);
        drop(device);

        log::debug!("GPU session released");
    }
}
