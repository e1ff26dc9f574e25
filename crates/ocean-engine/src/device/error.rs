use std::fmt;

/// Non-success outcome of acquiring the next surface texture.
///
/// Every variant is handled the same way by the frame driver: the frame is
/// skipped and the next one is attempted normally.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceStatus {
    Timeout,
    Outdated,
    Lost,
    OutOfMemory,
    Other,
}

impl From<wgpu::SurfaceError> for SurfaceStatus {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Timeout => SurfaceStatus::Timeout,
            wgpu::SurfaceError::Outdated => SurfaceStatus::Outdated,
            wgpu::SurfaceError::Lost => SurfaceStatus::Lost,
            wgpu::SurfaceError::OutOfMemory => SurfaceStatus::OutOfMemory,
            wgpu::SurfaceError::Other => SurfaceStatus::Other,
        }
    }
}

impl fmt::Display for SurfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurfaceStatus::Timeout => "surface texture acquisition timed out",
            SurfaceStatus::Outdated => "surface is outdated",
            SurfaceStatus::Lost => "surface was lost",
            SurfaceStatus::OutOfMemory => "out of memory while acquiring surface texture",
            SurfaceStatus::Other => "surface texture unavailable",
        };
        f.write_str(s)
    }
}
