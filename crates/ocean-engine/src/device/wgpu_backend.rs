use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::{Context, Result};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};

use super::backend::{GpuBackend, RenderPassDesc};
use super::bridge::{Completer, RequestStatus};
use super::diagnostics::{DiagnosticSink, ErrorKind, GpuEvent, LostReason};
use super::error::SurfaceStatus;
use super::inspect::{AdapterReport, DeviceReport};
use super::session::SessionConfig;

/// `GpuBackend` over wgpu.
///
/// `W` is the window handle surfaces are created from; it is kept alive by the
/// surface, so `Arc<winit::window::Window>` is the usual choice.
pub struct WgpuBackend<W = Arc<winit::window::Window>> {
    backends: wgpu::Backends,
    _window: PhantomData<fn() -> W>,
}

impl<W> WgpuBackend<W> {
    pub fn new(backends: wgpu::Backends) -> Self {
        Self {
            backends,
            _window: PhantomData,
        }
    }
}

impl<W> Default for WgpuBackend<W> {
    fn default() -> Self {
        Self::new(wgpu::Backends::all())
    }
}

impl From<wgpu::DeviceLostReason> for LostReason {
    fn from(reason: wgpu::DeviceLostReason) -> Self {
        match reason {
            wgpu::DeviceLostReason::Destroyed => LostReason::Destroyed,
            _ => LostReason::Unknown,
        }
    }
}

impl From<&wgpu::Error> for GpuEvent {
    fn from(err: &wgpu::Error) -> Self {
        let kind = match err {
            wgpu::Error::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            wgpu::Error::Validation { .. } => ErrorKind::Validation,
            _ => ErrorKind::Internal,
        };
        GpuEvent::uncaptured_error(kind, err.to_string())
    }
}

fn install_device_callbacks(device: &wgpu::Device, diagnostics: DiagnosticSink) {
    let lost = diagnostics.clone();
    device.set_device_lost_callback(move |reason: wgpu::DeviceLostReason, message: String| {
        lost.report(&GpuEvent::device_lost(reason.into(), message));
    });

    let handler: Box<dyn wgpu::UncapturedErrorHandler> = Box::new(move |err: wgpu::Error| {
        diagnostics.report(&GpuEvent::from(&err));
    });
    device.on_uncaptured_error(handler.into());
}

impl<W> GpuBackend for WgpuBackend<W>
where
    W: HasWindowHandle + HasDisplayHandle + Send + Sync + 'static,
{
    type Window = W;

    type Instance = wgpu::Instance;
    type Surface = wgpu::Surface<'static>;
    type Adapter = wgpu::Adapter;
    type Device = wgpu::Device;
    type Queue = wgpu::Queue;
    type SurfaceTexture = wgpu::SurfaceTexture;
    type TextureView = wgpu::TextureView;
    type CommandEncoder = wgpu::CommandEncoder;
    type CommandBuffer = wgpu::CommandBuffer;

    fn create_instance(&self) -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        })
    }

    fn create_surface(&self, instance: &wgpu::Instance, window: W) -> Result<wgpu::Surface<'static>> {
        instance
            .create_surface(window)
            .context("failed to create wgpu surface")
    }

    fn request_adapter(
        &self,
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'static>,
        config: &SessionConfig,
        done: Completer<wgpu::Adapter>,
    ) {
        let request = instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: config.power_preference,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        });

        // Native wgpu resolves the request on first poll.
        match pollster::block_on(request) {
            Ok(adapter) => done.succeed(adapter),
            Err(err) => done.fail(RequestStatus::Unavailable, err.to_string()),
        }
    }

    fn request_device(
        &self,
        adapter: &wgpu::Adapter,
        config: &SessionConfig,
        diagnostics: DiagnosticSink,
        done: Completer<(wgpu::Device, wgpu::Queue)>,
    ) {
        let request = adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some(&config.device_label),
            required_features: config.required_features,
            required_limits: config.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        });

        match pollster::block_on(request) {
            Ok((device, queue)) => {
                install_device_callbacks(&device, diagnostics);
                done.succeed((device, queue));
            }
            Err(err) => done.fail(RequestStatus::Error, err.to_string()),
        }
    }

    fn describe_adapter(&self, adapter: &wgpu::Adapter) -> AdapterReport {
        AdapterReport::from_wgpu(adapter)
    }

    fn describe_device(&self, device: &wgpu::Device) -> DeviceReport {
        DeviceReport::from_wgpu(device)
    }

    fn surface_capabilities(
        &self,
        surface: &wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
    ) -> wgpu::SurfaceCapabilities {
        surface.get_capabilities(adapter)
    }

    fn configure_surface(
        &self,
        surface: &wgpu::Surface<'static>,
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
    ) {
        surface.configure(device, config);
    }

    fn unconfigure_surface(&self, _surface: &wgpu::Surface<'static>) {
        // wgpu has no explicit unconfigure; the swapchain goes with the surface.
        log::debug!("surface unconfigured");
    }

    fn acquire_texture(
        &self,
        surface: &wgpu::Surface<'static>,
    ) -> std::result::Result<wgpu::SurfaceTexture, SurfaceStatus> {
        surface.get_current_texture().map_err(SurfaceStatus::from)
    }

    fn create_view(
        &self,
        texture: &wgpu::SurfaceTexture,
        desc: &wgpu::TextureViewDescriptor<'_>,
    ) -> wgpu::TextureView {
        texture.texture.create_view(desc)
    }

    fn create_encoder(&self, device: &wgpu::Device, label: &str) -> wgpu::CommandEncoder {
        device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some(label) })
    }

    fn encode_render_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        desc: &RenderPassDesc<'_, wgpu::TextureView>,
    ) {
        let color_attachments: Vec<_> = desc
            .color_attachments
            .iter()
            .map(|a| {
                Some(wgpu::RenderPassColorAttachment {
                    view: a.view,
                    resolve_target: None,
                    ops: a.ops,
                    depth_slice: None,
                })
            })
            .collect();

        // The pass ends when it is dropped at the end of this scope.
        let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: desc.label,
            color_attachments: &color_attachments,
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    fn finish(&self, encoder: wgpu::CommandEncoder) -> wgpu::CommandBuffer {
        encoder.finish()
    }

    fn submit(&self, queue: &wgpu::Queue, commands: wgpu::CommandBuffer) {
        queue.submit(std::iter::once(commands));
    }

    fn present(&self, texture: wgpu::SurfaceTexture) {
        texture.present();
    }

    fn poll(&self, device: &wgpu::Device) {
        if let Err(err) = device.poll(wgpu::PollType::Poll) {
            log::warn!("device poll failed: {err}");
        }
    }
}
