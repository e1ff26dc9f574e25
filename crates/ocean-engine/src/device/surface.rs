/// Picks the surface format.
///
/// The first reported format is the surface's preferred one. With
/// `prefer_srgb`, an sRGB 8-bit format wins when present.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    let preferred = *caps.formats.first()?;

    if prefer_srgb {
        let srgb = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        for f in srgb {
            if caps.formats.contains(&f) {
                return Some(f);
            }
        }
    }

    Some(preferred)
}

/// `Auto` is always accepted; the backend resolves it at configure time.
pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::CompositeAlphaMode,
) -> wgpu::CompositeAlphaMode {
    if requested == wgpu::CompositeAlphaMode::Auto || caps.alpha_modes.contains(&requested) {
        return requested;
    }

    caps.alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}
