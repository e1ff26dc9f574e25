use anyhow::Result;

use super::bridge::Completer;
use super::diagnostics::DiagnosticSink;
use super::error::SurfaceStatus;
use super::inspect::{AdapterReport, DeviceReport};
use super::session::SessionConfig;

/// One color attachment of a render pass.
pub struct ColorAttachment<'a, V> {
    pub view: &'a V,
    pub ops: wgpu::Operations<wgpu::Color>,
}

/// Render pass description in backend-neutral form.
pub struct RenderPassDesc<'a, V> {
    pub label: Option<&'a str>,
    pub color_attachments: &'a [ColorAttachment<'a, V>],
}

/// The native GPU calls the session and frame driver are built from.
///
/// Handles are owned values; releasing a handle is dropping it. Plain data
/// (formats, surface configuration, load/store ops) uses the wgpu types.
pub trait GpuBackend {
    /// Window handle a surface is created from.
    type Window;

    type Instance;
    type Surface;
    type Adapter;
    type Device;
    type Queue;
    type SurfaceTexture;
    type TextureView;
    type CommandEncoder;
    type CommandBuffer;

    fn create_instance(&self) -> Self::Instance;

    fn create_surface(&self, instance: &Self::Instance, window: Self::Window) -> Result<Self::Surface>;

    /// Requests an adapter able to present to `surface`. `done` is completed
    /// exactly once.
    fn request_adapter(
        &self,
        instance: &Self::Instance,
        surface: &Self::Surface,
        config: &SessionConfig,
        done: Completer<Self::Adapter>,
    );

    /// Requests a device and its queue. On success the device forwards loss
    /// and uncaptured errors to `diagnostics`.
    fn request_device(
        &self,
        adapter: &Self::Adapter,
        config: &SessionConfig,
        diagnostics: DiagnosticSink,
        done: Completer<(Self::Device, Self::Queue)>,
    );

    fn describe_adapter(&self, adapter: &Self::Adapter) -> AdapterReport;

    fn describe_device(&self, device: &Self::Device) -> DeviceReport;

    fn surface_capabilities(
        &self,
        surface: &Self::Surface,
        adapter: &Self::Adapter,
    ) -> wgpu::SurfaceCapabilities;

    fn configure_surface(
        &self,
        surface: &Self::Surface,
        device: &Self::Device,
        config: &wgpu::SurfaceConfiguration,
    );

    fn unconfigure_surface(&self, surface: &Self::Surface);

    fn acquire_texture(
        &self,
        surface: &Self::Surface,
    ) -> std::result::Result<Self::SurfaceTexture, SurfaceStatus>;

    fn create_view(
        &self,
        texture: &Self::SurfaceTexture,
        desc: &wgpu::TextureViewDescriptor<'_>,
    ) -> Self::TextureView;

    fn create_encoder(&self, device: &Self::Device, label: &str) -> Self::CommandEncoder;

    /// Begins a render pass on `encoder` and ends it before returning.
    fn encode_render_pass(
        &self,
        encoder: &mut Self::CommandEncoder,
        desc: &RenderPassDesc<'_, Self::TextureView>,
    );

    fn finish(&self, encoder: Self::CommandEncoder) -> Self::CommandBuffer;

    fn submit(&self, queue: &Self::Queue, commands: Self::CommandBuffer);

    fn present(&self, texture: Self::SurfaceTexture);

    /// Non-blocking; lets the backend fire queued callbacks.
    fn poll(&self, device: &Self::Device);
}
