//! Changed-region detection over packed 1-bit frames.

use crate::util::{Rect, ceil_to_multiple, floor_to_multiple};

/// Granularity of partial updates in pixels.
pub const BYTE_GRID: i32 = 8;

/// Byte-wise XOR of two packed frames; set bits mark changed pixels.
///
/// The result has the length of the shorter input.
pub fn xor(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter().zip(b).map(|(x, y)| x ^ y).collect()
}

/// Returns true if both frames hold the same bytes.
pub fn are_identical(a: &[u8], b: &[u8]) -> bool {
    a == b
}

/// Smallest rectangle enclosing every set bit of `mask`, or `None` if no
/// bit is set.
pub fn bounding_box(mask: &[u8], width: usize, height: usize) -> Option<Rect> {
    if width == 0 {
        return None;
    }
    let total = width * height;
    let mut min = (usize::MAX, usize::MAX);
    let mut max = (0usize, 0usize);
    let mut found = false;

    for (byte_index, &byte) in mask.iter().enumerate() {
        if byte == 0 {
            continue;
        }
        for bit in 0..8 {
            let index = byte_index * 8 + bit;
            if index >= total {
                break;
            }
            if (byte >> bit) & 1 == 1 {
                let (x, y) = (index % width, index / width);
                min = (min.0.min(x), min.1.min(y));
                max = (max.0.max(x), max.1.max(y));
                found = true;
            }
        }
    }

    if !found {
        return None;
    }
    Rect::from_min_max(
        min.0 as i32,
        min.1 as i32,
        max.0 as i32 + 1,
        max.1 as i32 + 1,
    )
}

/// Rounds `bounds` outward to the 8-pixel grid.
///
/// `x`/`y` floor to a multiple of 8 and `width`/`height` ceil to one; if the
/// far edge would still fall short, one more grid step is added.
pub fn align_to_byte_grid(bounds: Rect) -> Rect {
    let x = floor_to_multiple(bounds.x, BYTE_GRID);
    let y = floor_to_multiple(bounds.y, BYTE_GRID);
    let mut width = ceil_to_multiple(bounds.width, BYTE_GRID);
    let mut height = ceil_to_multiple(bounds.height, BYTE_GRID);
    if x + width < bounds.right() {
        width += BYTE_GRID;
    }
    if y + height < bounds.bottom() {
        height += BYTE_GRID;
    }
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Copies the pixels inside `bounds` into a region-local packed bitmap.
///
/// Pixels are addressed row-major within the region; bit `j` of byte `i`
/// is region pixel `i*8+j`. Pixels outside the full frame read as `0`.
pub fn pack_region(full: &[u8], bounds: Rect, full_width: usize) -> Vec<u8> {
    let (w, h) = (bounds.width.max(0) as usize, bounds.height.max(0) as usize);
    let mut packed = vec![0u8; (w * h).div_ceil(8)];
    let full_width = full_width as i64;

    for ry in 0..h {
        for rx in 0..w {
            let fx = bounds.x as i64 + rx as i64;
            let fy = bounds.y as i64 + ry as i64;
            if fx < 0 || fy < 0 || fx >= full_width {
                continue;
            }
            let src = (fy * full_width + fx) as usize;
            let bit = full.get(src / 8).map(|byte| (byte >> (src % 8)) & 1);
            if bit == Some(1) {
                let dst = ry * w + rx;
                packed[dst / 8] |= 1 << (dst % 8);
            }
        }
    }
    packed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::PixelBuffer;

    fn flipped(width: usize, height: usize, pixels: &[(i32, i32)]) -> (Vec<u8>, Vec<u8>) {
        let base = PixelBuffer::new(width, height);
        let mut changed = base.clone();
        for &(x, y) in pixels {
            changed.set_pixel(x, y, 0, Default::default());
        }
        (base.export_packed(), changed.export_packed())
    }

    #[test]
    fn xor_is_symmetric_and_self_inverse() {
        let a = [0b1010_1010, 0xFF, 0x00];
        let b = [0b0110_0110, 0x0F, 0x00];
        assert_eq!(xor(&a, &b), xor(&b, &a));
        assert_eq!(xor(&xor(&a, &b), &b), a.to_vec());
        assert!(xor(&a, &a).iter().all(|&byte| byte == 0));
    }

    #[test]
    fn identical_frames_have_no_bounding_box() {
        let (a, _) = flipped(16, 4, &[]);
        assert!(are_identical(&a, &a.clone()));
        assert_eq!(bounding_box(&xor(&a, &a), 16, 4), None);
    }

    #[test]
    fn single_pixel_box_and_alignment() {
        let (a, b) = flipped(800, 480, &[(50, 0)]);
        assert!(!are_identical(&a, &b));
        let bounds = bounding_box(&xor(&a, &b), 800, 480).unwrap();
        assert_eq!(bounds, Rect::new(50, 0, 1, 1).unwrap());
        let aligned = align_to_byte_grid(bounds);
        assert_eq!(aligned, Rect::new(48, 0, 8, 8).unwrap());
        assert_eq!(align_to_byte_grid(aligned), aligned);
    }

    #[test]
    fn bounding_box_spans_all_changes() {
        let (a, b) = flipped(32, 16, &[(3, 2), (20, 9), (7, 14)]);
        let bounds = bounding_box(&xor(&a, &b), 32, 16).unwrap();
        assert_eq!(bounds, Rect::new(3, 2, 18, 13).unwrap());
    }

    #[test]
    fn alignment_grows_when_far_edge_is_lost() {
        // 6..13 floors to 0 and ceils 7 to 8, which stops at 8 < 13
        let aligned = align_to_byte_grid(Rect::new(6, 6, 7, 7).unwrap());
        assert_eq!(aligned, Rect::new(0, 0, 16, 16).unwrap());
        assert!(aligned.right() >= 13 && aligned.bottom() >= 13);
    }

    #[test]
    fn pack_region_readdresses_rows() {
        let mut frame = PixelBuffer::filled(16, 4, 0);
        frame.set_pixel(9, 1, 1, Default::default());
        frame.set_pixel(8, 2, 1, Default::default());
        let packed = pack_region(&frame.export_packed(), Rect::new(8, 1, 8, 2).unwrap(), 16);
        assert_eq!(packed, vec![0b0000_0010, 0b0000_0001]);
    }

    #[test]
    fn pack_region_zeroes_pixels_outside_the_frame() {
        let frame = PixelBuffer::new(8, 8).export_packed();
        let packed = pack_region(&frame, Rect::new(4, 4, 8, 8).unwrap(), 8);
        assert_eq!(packed.len(), 8);
        // region row 0: columns 4..8 lie in the frame, 8..12 do not
        assert_eq!(packed[0], 0x0F);
        assert_eq!(packed[4], 0x00);
    }
}
