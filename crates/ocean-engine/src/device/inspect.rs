//! Adapter/device reports logged during session setup.

use std::fmt;

/// Texture limits worth printing at startup.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LimitsSummary {
    pub max_texture_dimension_1d: u32,
    pub max_texture_dimension_2d: u32,
    pub max_texture_dimension_3d: u32,
    pub max_texture_array_layers: u32,
}

impl From<&wgpu::Limits> for LimitsSummary {
    fn from(limits: &wgpu::Limits) -> Self {
        Self {
            max_texture_dimension_1d: limits.max_texture_dimension_1d,
            max_texture_dimension_2d: limits.max_texture_dimension_2d,
            max_texture_dimension_3d: limits.max_texture_dimension_3d,
            max_texture_array_layers: limits.max_texture_array_layers,
        }
    }
}

impl fmt::Display for LimitsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  - maxTextureDimension1D: {}", self.max_texture_dimension_1d)?;
        writeln!(f, "  - maxTextureDimension2D: {}", self.max_texture_dimension_2d)?;
        writeln!(f, "  - maxTextureDimension3D: {}", self.max_texture_dimension_3d)?;
        write!(f, "  - maxTextureArrayLayers: {}", self.max_texture_array_layers)
    }
}

/// Identity, features and limits of the selected adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdapterReport {
    pub name: String,
    pub vendor_id: u32,
    pub device_id: u32,
    pub device_type: String,
    pub backend: String,
    pub driver: String,
    pub driver_info: String,
    pub features: String,
    pub limits: LimitsSummary,
}

impl AdapterReport {
    pub fn from_wgpu(adapter: &wgpu::Adapter) -> Self {
        let info = adapter.get_info();
        Self {
            name: info.name,
            vendor_id: info.vendor,
            device_id: info.device,
            device_type: format!("{:?}", info.device_type),
            backend: format!("{:?}", info.backend),
            driver: info.driver,
            driver_info: info.driver_info,
            features: format!("{:?}", adapter.features()),
            limits: LimitsSummary::from(&adapter.limits()),
        }
    }
}

impl fmt::Display for AdapterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Adapter properties:")?;
        writeln!(f, "  - name: {}", self.name)?;
        writeln!(f, "  - vendorID: {:#06x}", self.vendor_id)?;
        writeln!(f, "  - deviceID: {:#06x}", self.device_id)?;
        writeln!(f, "  - adapterType: {}", self.device_type)?;
        writeln!(f, "  - backendType: {}", self.backend)?;
        if !self.driver.is_empty() {
            writeln!(f, "  - driver: {}", self.driver)?;
        }
        if !self.driver_info.is_empty() {
            writeln!(f, "  - driverDescription: {}", self.driver_info)?;
        }
        writeln!(f, "Adapter features: {}", self.features)?;
        writeln!(f, "Adapter limits:")?;
        write!(f, "{}", self.limits)
    }
}

/// Features and limits granted to the device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceReport {
    pub features: String,
    pub limits: LimitsSummary,
}

impl DeviceReport {
    pub fn from_wgpu(device: &wgpu::Device) -> Self {
        Self {
            features: format!("{:?}", device.features()),
            limits: LimitsSummary::from(&device.limits()),
        }
    }
}

impl fmt::Display for DeviceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device features: {}", self.features)?;
        writeln!(f, "Device limits:")?;
        write!(f, "{}", self.limits)
    }
}
