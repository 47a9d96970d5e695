use std::{io::Cursor, sync::Arc};

use crate::{
    foundation::{
        core::CanvasSize,
        error::{PlaygroundError, PlaygroundResult},
    },
    render::composite,
};

/// Immutable copy of a surface's pixels at one instant.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. Cloning is cheap: the buffer is
/// shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    size: CanvasSize,
    data: Arc<[u8]>,
}

impl Snapshot {
    pub fn from_premul_rgba8(size: CanvasSize, data: Vec<u8>) -> PlaygroundResult<Self> {
        if data.len() != size.byte_len() {
            return Err(PlaygroundError::surface(format!(
                "snapshot byte length {} does not match {}x{}",
                data.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self {
            size,
            data: data.into(),
        })
    }

    /// A fully transparent snapshot, i.e. what a freshly mounted canvas shows.
    pub fn blank(size: CanvasSize) -> Self {
        Self {
            size,
            data: vec![0u8; size.byte_len()].into(),
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width
    }

    pub fn height(&self) -> u32 {
        self.size.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Premultiplied RGBA8 of the pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn to_rgba_image(&self) -> PlaygroundResult<image::RgbaImage> {
        image::RgbaImage::from_raw(
            self.size.width,
            self.size.height,
            composite::unpremultiply(&self.data),
        )
        .ok_or_else(|| PlaygroundError::image("snapshot buffer does not fit its dimensions"))
    }

    /// Encode as PNG bytes (straight alpha).
    pub fn encode_png(&self) -> PlaygroundResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn decode_png(bytes: &[u8]) -> PlaygroundResult<Self> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?.to_rgba8();
        let size = CanvasSize::new(img.width(), img.height());
        Self::from_premul_rgba8(size, composite::premultiply(img.as_raw()))
    }

    pub fn save_png(&self, path: &std::path::Path) -> PlaygroundResult<()> {
        image::save_buffer_with_format(
            path,
            &composite::unpremultiply(&self.data),
            self.size.width,
            self.size.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )?;
        Ok(())
    }
}
