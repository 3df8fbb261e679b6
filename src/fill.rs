use image::{Rgba, RgbaImage};

/// Recolor the 4-connected region of uniform color around `(x, y)`.
///
/// Colors are compared for exact equality on all four channels, so a region
/// stops at anti-aliased edges. Neighbors are pushed without checking them first
/// and get filtered when popped. Returns the number of pixels recolored.
pub fn flood_fill(buffer: &mut RgbaImage, x: u32, y: u32, fill: Rgba<u8>) -> usize {
    let (width, height) = buffer.dimensions();
    if x >= width || y >= height {
        return 0;
    }

    let target = *buffer.get_pixel(x, y);
    if target == fill {
        return 0;
    }

    let mut filled = 0;
    let mut stack = vec![(x, y)];
    while let Some((cx, cy)) = stack.pop() {
        let pixel = buffer.get_pixel_mut(cx, cy);
        if *pixel != target {
            continue;
        }
        *pixel = fill;
        filled += 1;

        if cx > 0 {
            stack.push((cx - 1, cy));
        }
        if cx + 1 < width {
            stack.push((cx + 1, cy));
        }
        if cy > 0 {
            stack.push((cx, cy - 1));
        }
        if cy + 1 < height {
            stack.push((cx, cy + 1));
        }
    }

    log::debug!("Flood fill at ({x}, {y}) recolored {filled} pixels");
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    /// 10x10 white image with a one pixel black square outline from (2,2) to (7,7).
    fn boxed() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(10, 10, WHITE);
        for i in 2..=7 {
            image.put_pixel(i, 2, BLACK);
            image.put_pixel(i, 7, BLACK);
            image.put_pixel(2, i, BLACK);
            image.put_pixel(7, i, BLACK);
        }
        image
    }

    #[test]
    fn test_fill_stays_inside_boundary() {
        let mut image = boxed();
        let filled = flood_fill(&mut image, 4, 4, RED);

        assert_eq!(filled, 16);
        for (x, y, pixel) in image.enumerate_pixels() {
            let inside = (3..=6).contains(&x) && (3..=6).contains(&y);
            let border = (x == 2 || x == 7 || y == 2 || y == 7)
                && (2..=7).contains(&x)
                && (2..=7).contains(&y);
            if inside {
                assert_eq!(*pixel, RED, "({x}, {y}) should be filled");
            } else if border {
                assert_eq!(*pixel, BLACK, "({x}, {y}) is boundary");
            } else {
                assert_eq!(*pixel, WHITE, "({x}, {y}) is outside");
            }
        }
    }

    #[test]
    fn test_fill_does_not_leak_diagonally() {
        let mut image = RgbaImage::from_pixel(3, 3, WHITE);
        image.put_pixel(1, 0, BLACK);
        image.put_pixel(0, 1, BLACK);

        flood_fill(&mut image, 0, 0, RED);

        assert_eq!(*image.get_pixel(0, 0), RED);
        assert_eq!(*image.get_pixel(1, 1), WHITE);
    }

    #[test]
    fn test_fill_with_same_color_is_noop() {
        let mut image = boxed();
        let before = image.clone();
        assert_eq!(flood_fill(&mut image, 4, 4, WHITE), 0);
        assert_eq!(image, before);
    }

    #[test]
    fn test_fill_twice_is_idempotent() {
        let mut image = boxed();
        flood_fill(&mut image, 0, 0, RED);
        let once = image.clone();
        assert_eq!(flood_fill(&mut image, 0, 0, RED), 0);
        assert_eq!(image, once);
    }

    #[test]
    fn test_near_colors_are_not_matched() {
        let mut image = RgbaImage::from_pixel(4, 1, WHITE);
        image.put_pixel(2, 0, Rgba([254, 255, 255, 255]));

        flood_fill(&mut image, 0, 0, RED);

        assert_eq!(*image.get_pixel(1, 0), RED);
        assert_eq!(*image.get_pixel(2, 0), Rgba([254, 255, 255, 255]));
        assert_eq!(*image.get_pixel(3, 0), WHITE);
    }

    #[test]
    fn test_seed_out_of_bounds() {
        let mut image = boxed();
        assert_eq!(flood_fill(&mut image, 10, 0, RED), 0);
    }
}
