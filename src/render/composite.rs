use crate::foundation::{
    core::{CanvasSize, Rect},
    error::{PlaygroundError, PlaygroundResult},
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> PlaygroundResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PlaygroundError::surface(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Zero every pixel covered by `rect` (device space), clipped to the canvas.
pub fn clear_region(data: &mut [u8], size: CanvasSize, rect: Rect) -> PlaygroundResult<()> {
    if data.len() != size.byte_len() {
        return Err(PlaygroundError::surface(
            "clear_region buffer length does not match canvas size",
        ));
    }

    let Some((x0, y0, x1, y1)) = pixel_span(size, rect) else {
        return Ok(());
    };
    let stride = size.width as usize * 4;
    for y in y0..y1 {
        let row = y * stride;
        data[row + x0 * 4..row + x1 * 4].fill(0);
    }
    Ok(())
}

/// Convert a premultiplied buffer to straight alpha, as expected by PNG encoders.
pub fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        let unmul = |c: u8| -> u8 {
            ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8
        };
        out.extend_from_slice(&[unmul(px[0]), unmul(px[1]), unmul(px[2]), a]);
    }
    out
}

pub fn premultiply(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for px in data.chunks_exact(4) {
        let a = u16::from(px[3]);
        out.extend_from_slice(&[
            mul_div255(u16::from(px[0]), a),
            mul_div255(u16::from(px[1]), a),
            mul_div255(u16::from(px[2]), a),
            px[3],
        ]);
    }
    out
}

// Pixel centers inside `rect` decide coverage, matching how the rasterizer snaps fills.
fn pixel_span(size: CanvasSize, rect: Rect) -> Option<(usize, usize, usize, usize)> {
    let rect = rect.abs();
    let clamp = |v: f64, max: u32| -> usize { v.round().clamp(0.0, f64::from(max)) as usize };
    let x0 = clamp(rect.x0, size.width);
    let x1 = clamp(rect.x1, size.width);
    let y0 = clamp(rect.y0, size.height);
    let y1 = clamp(rect.y1, size.height);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0, y0, x1, y1))
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
