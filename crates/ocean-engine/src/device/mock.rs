//! Recording `GpuBackend` + `WindowProvider` for tests.
//!
//! Every handle counts itself live on creation and records a `Release` call
//! when dropped, so tests can assert on exact release order and leaks.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use anyhow::{bail, Result};

use super::backend::{GpuBackend, RenderPassDesc};
use super::bridge::{Completer, RequestStatus};
use super::diagnostics::{DiagnosticSink, GpuEvent, LostReason};
use super::error::SurfaceStatus;
use super::inspect::{AdapterReport, DeviceReport};
use super::session::SessionConfig;
use crate::window::{WindowConfig, WindowProvider};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Kind {
    Window,
    Instance,
    Surface,
    Adapter,
    Device,
    Queue,
    SurfaceTexture,
    TextureView,
    CommandEncoder,
    CommandBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(Kind),
    Release(Kind),
    RequestAdapter,
    RequestDevice,
    Configure {
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        present_mode: wgpu::PresentMode,
    },
    Unconfigure,
    AcquireFailed(SurfaceStatus),
    CreateView {
        dimension: Option<wgpu::TextureViewDimension>,
        mip_level_count: Option<u32>,
        array_layer_count: Option<u32>,
        aspect: wgpu::TextureAspect,
    },
    RenderPass {
        label: Option<String>,
        color_attachments: Vec<wgpu::Operations<wgpu::Color>>,
    },
    /// `buffer` is the id of the submitted command buffer.
    Submit { buffer: u64 },
    Present,
    Poll,
    PollEvents,
    PrePresent,
}

struct State {
    calls: Vec<Call>,
    live: HashMap<Kind, i64>,
    next_id: u64,
    adapter_status: RequestStatus,
    device_status: RequestStatus,
    acquire_failures: VecDeque<SurfaceStatus>,
    fail_window: bool,
    close_requested: bool,
    diagnostics: Option<DiagnosticSink>,
}

pub(crate) struct Handle {
    kind: Kind,
    id: u64,
    state: Rc<RefCell<State>>,
}

impl Handle {
    fn new(kind: Kind, state: &Rc<RefCell<State>>) -> Self {
        let id = {
            let mut s = state.borrow_mut();
            s.next_id += 1;
            *s.live.entry(kind).or_default() += 1;
            s.calls.push(Call::Create(kind));
            s.next_id
        };
        Self {
            kind,
            id,
            state: Rc::clone(state),
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        let mut s = self.state.borrow_mut();
        *s.live.entry(self.kind).or_default() -= 1;
        s.calls.push(Call::Release(self.kind));
    }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct WindowToken;

#[derive(Clone)]
pub(crate) struct MockBackend {
    state: Rc<RefCell<State>>,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                calls: Vec::new(),
                live: HashMap::new(),
                next_id: 0,
                adapter_status: RequestStatus::Success,
                device_status: RequestStatus::Success,
                acquire_failures: VecDeque::new(),
                fail_window: false,
                close_requested: false,
                diagnostics: None,
            })),
        }
    }

    pub(crate) fn with_adapter_status(self, status: RequestStatus) -> Self {
        self.state.borrow_mut().adapter_status = status;
        self
    }

    pub(crate) fn with_device_status(self, status: RequestStatus) -> Self {
        self.state.borrow_mut().device_status = status;
        self
    }

    pub(crate) fn with_window_failure(self) -> Self {
        self.state.borrow_mut().fail_window = true;
        self
    }

    /// The next `acquire_texture` calls report these statuses, in order.
    pub(crate) fn fail_next_acquires(&self, statuses: &[SurfaceStatus]) {
        self.state.borrow_mut().acquire_failures.extend(statuses);
    }

    pub(crate) fn request_close(&self) {
        self.state.borrow_mut().close_requested = true;
    }

    /// Fires the device-lost callback registered at device creation.
    pub(crate) fn trigger_device_lost(&self, reason: LostReason, message: &str) {
        let sink = self.state.borrow().diagnostics.clone();
        if let Some(sink) = sink {
            sink.report(&GpuEvent::device_lost(reason, message));
        }
    }

    pub(crate) fn open_window(&self, _config: &WindowConfig) -> Result<MockWindow> {
        if self.state.borrow().fail_window {
            bail!("no display available");
        }
        Ok(MockWindow {
            _handle: Handle::new(Kind::Window, &self.state),
            state: Rc::clone(&self.state),
        })
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.state.borrow().calls.iter().filter(|c| *c == call).count()
    }

    pub(crate) fn live(&self, kind: Kind) -> i64 {
        self.state.borrow().live.get(&kind).copied().unwrap_or(0)
    }

    pub(crate) fn all_released(&self) -> bool {
        self.state.borrow().live.values().all(|n| *n == 0)
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }

    fn handle(&self, kind: Kind) -> Handle {
        Handle::new(kind, &self.state)
    }
}

impl GpuBackend for MockBackend {
    type Window = WindowToken;

    type Instance = Handle;
    type Surface = Handle;
    type Adapter = Handle;
    type Device = Handle;
    type Queue = Handle;
    type SurfaceTexture = Handle;
    type TextureView = Handle;
    type CommandEncoder = Handle;
    type CommandBuffer = Handle;

    fn create_instance(&self) -> Handle {
        self.handle(Kind::Instance)
    }

    fn create_surface(&self, _instance: &Handle, _window: WindowToken) -> Result<Handle> {
        Ok(self.handle(Kind::Surface))
    }

    fn request_adapter(
        &self,
        _instance: &Handle,
        _surface: &Handle,
        _config: &SessionConfig,
        done: Completer<Handle>,
    ) {
        self.record(Call::RequestAdapter);
        let status = self.state.borrow().adapter_status;
        match status {
            RequestStatus::Success => done.succeed(self.handle(Kind::Adapter)),
            status => done.fail(status, "no compatible adapter"),
        }
    }

    fn request_device(
        &self,
        _adapter: &Handle,
        _config: &SessionConfig,
        diagnostics: DiagnosticSink,
        done: Completer<(Handle, Handle)>,
    ) {
        self.record(Call::RequestDevice);
        let status = self.state.borrow().device_status;
        match status {
            RequestStatus::Success => {
                self.state.borrow_mut().diagnostics = Some(diagnostics);
                done.succeed((self.handle(Kind::Device), self.handle(Kind::Queue)));
            }
            status => done.fail(status, "device request rejected"),
        }
    }

    fn describe_adapter(&self, _adapter: &Handle) -> AdapterReport {
        AdapterReport {
            name: "mock adapter".into(),
            backend: "Mock".into(),
            ..Default::default()
        }
    }

    fn describe_device(&self, _device: &Handle) -> DeviceReport {
        DeviceReport::default()
    }

    fn surface_capabilities(&self, _surface: &Handle, _adapter: &Handle) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: vec![
                wgpu::TextureFormat::Bgra8Unorm,
                wgpu::TextureFormat::Bgra8UnormSrgb,
            ],
            present_modes: vec![wgpu::PresentMode::Fifo],
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            ..Default::default()
        }
    }

    fn configure_surface(&self, _surface: &Handle, _device: &Handle, config: &wgpu::SurfaceConfiguration) {
        self.record(Call::Configure {
            width: config.width,
            height: config.height,
            format: config.format,
            present_mode: config.present_mode,
        });
    }

    fn unconfigure_surface(&self, _surface: &Handle) {
        self.record(Call::Unconfigure);
    }

    fn acquire_texture(&self, _surface: &Handle) -> std::result::Result<Handle, SurfaceStatus> {
        let failure = self.state.borrow_mut().acquire_failures.pop_front();
        match failure {
            Some(status) => {
                self.record(Call::AcquireFailed(status));
                Err(status)
            }
            None => Ok(self.handle(Kind::SurfaceTexture)),
        }
    }

    fn create_view(&self, _texture: &Handle, desc: &wgpu::TextureViewDescriptor<'_>) -> Handle {
        self.record(Call::CreateView {
            dimension: desc.dimension,
            mip_level_count: desc.mip_level_count,
            array_layer_count: desc.array_layer_count,
            aspect: desc.aspect,
        });
        self.handle(Kind::TextureView)
    }

    fn create_encoder(&self, _device: &Handle, _label: &str) -> Handle {
        self.handle(Kind::CommandEncoder)
    }

    fn encode_render_pass(&self, _encoder: &mut Handle, desc: &RenderPassDesc<'_, Handle>) {
        self.record(Call::RenderPass {
            label: desc.label.map(str::to_owned),
            color_attachments: desc.color_attachments.iter().map(|a| a.ops).collect(),
        });
    }

    fn finish(&self, encoder: Handle) -> Handle {
        drop(encoder);
        self.handle(Kind::CommandBuffer)
    }

    fn submit(&self, _queue: &Handle, commands: Handle) {
        self.record(Call::Submit { buffer: commands.id });
        drop(commands);
    }

    fn present(&self, texture: Handle) {
        self.record(Call::Present);
        drop(texture);
    }

    fn poll(&self, _device: &Handle) {
        self.record(Call::Poll);
    }
}

pub(crate) struct MockWindow {
    _handle: Handle,
    state: Rc<RefCell<State>>,
}

impl WindowProvider for MockWindow {
    type Handle = WindowToken;

    fn handle(&self) -> WindowToken {
        WindowToken
    }

    fn poll_events(&mut self) {
        self.state.borrow_mut().calls.push(Call::PollEvents);
    }

    fn close_requested(&self) -> bool {
        self.state.borrow().close_requested
    }

    fn pre_present(&self) {
        self.state.borrow_mut().calls.push(Call::PrePresent);
    }
}
