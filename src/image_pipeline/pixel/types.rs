//! Pixel value type

/// A single pixel with three (RGB) or four (RGBA) byte channels.
///
/// Pixels are plain values: every operation returns a new pixel.
/// For RGB pixels the alpha channel reads as fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    has_alpha: bool,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl Pixel {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX, has_alpha: false }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a, has_alpha: true }
    }

    /// Builds an RGBA pixel from channels in normalized [0, 1] space.
    ///
    /// Out-of-range inputs are clamped before rounding back to a byte.
    pub fn from_normalized(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self::rgba(denormalize(r), denormalize(g), denormalize(b), denormalize(a))
    }

    /// Reads a pixel from the first 3 or 4 bytes of `bytes`.
    pub fn from_bytes(bytes: &[u8], channels: usize) -> Self {
        if channels >= 4 {
            Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
        } else {
            Self::rgb(bytes[0], bytes[1], bytes[2])
        }
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn channels(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }

    /// Same colour with the alpha channel kept (RGBA).
    pub fn with_alpha(self) -> Self {
        Self::rgba(self.r, self.g, self.b, self.a)
    }

    /// Same colour with the alpha channel dropped (RGB).
    pub fn without_alpha(self) -> Self {
        Self::rgb(self.r, self.g, self.b)
    }

    /// Reshapes the pixel to match a buffer's channel count.
    pub fn shaped(self, channels: usize) -> Self {
        if channels >= 4 { self.with_alpha() } else { self.without_alpha() }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Writes the pixel's own channels (3 or 4) into the start of `out`.
    pub fn write_to(&self, out: &mut [u8]) {
        let rgba = self.to_rgba();
        let n = self.channels();
        out[..n].copy_from_slice(&rgba[..n]);
    }

    /// Scales each colour channel by `alpha / 255`.
    pub fn premultiply(self) -> Self {
        let scale = |c: u8| ((c as u16 * self.a as u16) / 255) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            ..self
        }
    }

    /// Source-over compositing of `src` onto `dst`.
    ///
    /// Colour: `src * srcA + dst * (1 - srcA)`, alpha: `srcA + dstA * (1 - srcA)`.
    pub fn source_over(dst: Pixel, src: Pixel) -> Pixel {
        let [sr, sg, sb, sa] = src.to_rgba().map(normalize);
        let [dr, dg, db, da] = dst.to_rgba().map(normalize);
        let inv = 1.0 - sa;

        Pixel::from_normalized(
            sr * sa + dr * inv,
            sg * sa + dg * inv,
            sb * sa + db * inv,
            sa + da * inv,
        )
    }

    /// Linear interpolation `a * (1 - t) + b * t` on every channel.
    pub fn lerp(a: Pixel, b: Pixel, t: f32) -> Pixel {
        Pixel::from_normalized(
            lerp_channel(a.r, b.r, t),
            lerp_channel(a.g, b.g, t),
            lerp_channel(a.b, b.b, t),
            lerp_channel(a.a, b.a, t),
        )
    }
}

impl std::fmt::Display for Pixel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RGBA=({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[inline]
pub(crate) fn normalize(c: u8) -> f32 {
    c as f32 / 255.0
}

#[inline]
pub(crate) fn denormalize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
pub(crate) fn lerp_channel(a: u8, b: u8, t: f32) -> f32 {
    normalize(a) * (1.0 - t) + normalize(b) * t
}
