/// Straight-alpha RGBA color in display (sRGB-encoded) space.
///
/// Components are authored the way they should appear on screen. Renderers call
/// [`Color::for_target`] before handing a color to the GPU, so the same value
/// looks identical on sRGB and linear surfaces.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Decodes the rgb channels with the sRGB transfer function. Alpha is linear already.
    pub fn to_linear(self) -> Self {
        Self {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    /// Returns the value to write into a target of `format`.
    ///
    /// sRGB targets encode on store, so they receive linear values; other
    /// targets store what they are given.
    pub fn for_target(self, format: wgpu::TextureFormat) -> Self {
        if format.is_srgb() {
            self.to_linear()
        } else {
            self.clamped()
        }
    }

    /// Clamps all channels to `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    let c = c.clamp(0.0, 1.0);
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
