//! DIB header variants and fixed layout constants

/// Length of the `BM` file header.
pub const FILE_HEADER_LEN: usize = 14;
/// Length of the classic info header without masks.
pub const INFO_HEADER_LEN: usize = 40;

pub const BI_RGB: u32 = 0;
pub const BI_BITFIELDS: u32 = 3;

/// 96 DPI expressed in pixels per meter.
pub const PELS_PER_METER_96_DPI: i32 = 3780;

pub const RED_MASK: u32 = 0x00FF_0000;
pub const GREEN_MASK: u32 = 0x0000_FF00;
pub const BLUE_MASK: u32 = 0x0000_00FF;
pub const ALPHA_MASK: u32 = 0xFF00_0000;

/// Trailer written after a masked header: placeholder bytes then B, G, R markers.
const MASK_CHUNK: [u8; 26] = [
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0,
    255, 0, 0, 0,
    0, 255, 0, 0,
    0, 0, 255, 0,
];

/// [`MASK_CHUNK`] followed by the alpha marker.
const MASK_CHUNK_WITH_ALPHA: [u8; 30] = [
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0, 0, 0,
    0, 0,
    255, 0, 0, 0,
    0, 255, 0, 0,
    0, 0, 255, 0,
    0, 0, 0, 255,
];

/// DIB header layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DibHeaderVariant {
    /// 40-byte header, no colour masks
    #[default]
    Info,
    /// Info header plus R, G, B masks
    V2Info,
    /// Info header plus R, G, B, A masks
    V3Info,
}

impl DibHeaderVariant {
    /// Variant picked when the caller does not force one.
    pub fn for_channels(channels: usize) -> Self {
        if channels == 4 {
            DibHeaderVariant::V2Info
        } else {
            DibHeaderVariant::Info
        }
    }

    pub fn has_masks(self) -> bool {
        !matches!(self, DibHeaderVariant::Info)
    }

    /// Value of the header's own size field.
    pub fn header_len(self) -> usize {
        match self {
            DibHeaderVariant::Info => INFO_HEADER_LEN,
            DibHeaderVariant::V2Info => INFO_HEADER_LEN + 12,
            DibHeaderVariant::V3Info => INFO_HEADER_LEN + 16,
        }
    }

    /// Fixed trailer appended after the header.
    pub fn mask_chunk(self) -> &'static [u8] {
        match self {
            DibHeaderVariant::Info => &[],
            DibHeaderVariant::V2Info => &MASK_CHUNK,
            DibHeaderVariant::V3Info => &MASK_CHUNK_WITH_ALPHA,
        }
    }

    /// Header plus trailer length.
    pub fn dib_len(self) -> usize {
        self.header_len() + self.mask_chunk().len()
    }
}

impl std::str::FromStr for DibHeaderVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "info" => Ok(DibHeaderVariant::Info),
            "v2" => Ok(DibHeaderVariant::V2Info),
            "v3" => Ok(DibHeaderVariant::V3Info),
            other => Err(format!("unknown DIB header variant '{}'", other)),
        }
    }
}
