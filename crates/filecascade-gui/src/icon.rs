//! FileCascade application icon generator.
//!
//! Produces a procedural icon: a light rounded tile carrying three blue
//! bars stepped down and to the right (files cascading into folders) with
//! a small arrow. Rendered at any resolution as RGBA pixel data.

/// Generate the FileCascade icon as egui `IconData`.
pub fn generate_icon(size: u32) -> egui::IconData {
    let rgba = render_icon(size);
    egui::IconData {
        rgba,
        width: size,
        height: size,
    }
}

const TILE_TOP: [u8; 3] = [0xfe, 0xfe, 0xfe];
const TILE_BOTTOM: [u8; 3] = [0xe0, 0xe0, 0xe0];
const BAR_LEFT: [u8; 3] = [0x6b, 0xa8, 0xff];
const BAR_RIGHT: [u8; 3] = [0x3a, 0x70, 0xe0];
const SHADOW: [u8; 3] = [0x20, 0x28, 0x40];

/// Render the icon into an RGBA pixel buffer (top-to-bottom row order).
pub fn render_icon(size: u32) -> Vec<u8> {
    let s = size as f32;
    let mut pixels = vec![0u8; (size * size * 4) as usize];

    // ── Layout ──────────────────────────────────────────────────
    let tile_margin = s * 0.04;
    let tile_radius = s * 0.18;

    // (left, top, right, bottom) for each bar, stepping down-right.
    let bar_h = s * 0.13;
    let bars: Vec<(f32, f32, f32, f32)> = (0..3)
        .map(|i| {
            let i = i as f32;
            let left = s * (0.16 + 0.10 * i);
            let top = s * (0.20 + 0.19 * i);
            (left, top, left + s * 0.44, top + bar_h)
        })
        .collect();
    let bar_radius = bar_h * 0.35;
    let shadow_offset = s * 0.025;

    // Arrow from the first bar's tail down to the last bar.
    let arrow_x = s * 0.80;
    let arrow_top = s * 0.24;
    let arrow_tip = s * 0.80;
    let arrow_w = s * 0.03;
    let head = s * 0.10;

    // ── Per-pixel rendering ─────────────────────────────────────
    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            // 1. Tile with a vertical gradient. ──────────────────
            let tile_d = rounded_rect_dist(
                px,
                py,
                (tile_margin, tile_margin, s - tile_margin, s - tile_margin),
                tile_radius,
            );
            let tile_aa = smooth_edge(tile_d, 0.0);
            let t = (py / s).clamp(0.0, 1.0);
            let mut cr = lerp_c(TILE_TOP[0], TILE_BOTTOM[0], t);
            let mut cg = lerp_c(TILE_TOP[1], TILE_BOTTOM[1], t);
            let mut cb = lerp_c(TILE_TOP[2], TILE_BOTTOM[2], t);
            let ca = tile_aa;

            // 2. Bars: soft shadow first, then the bar itself. ───
            for &rect in &bars {
                let (l, top, r, b) = rect;
                let shadow_rect = (
                    l + shadow_offset,
                    top + shadow_offset,
                    r + shadow_offset,
                    b + shadow_offset,
                );
                let sd = rounded_rect_dist(px, py, shadow_rect, bar_radius);
                let shadow_a = smooth_edge(sd, 1.0) * 0.22 * tile_aa;
                cr = lerp_c(cr, SHADOW[0], shadow_a);
                cg = lerp_c(cg, SHADOW[1], shadow_a);
                cb = lerp_c(cb, SHADOW[2], shadow_a);

                let bd = rounded_rect_dist(px, py, rect, bar_radius);
                let bar_a = smooth_edge(bd, 0.0);
                if bar_a > 0.0 {
                    let gt = ((px - l) / (r - l)).clamp(0.0, 1.0);
                    cr = lerp_c(cr, lerp_c(BAR_LEFT[0], BAR_RIGHT[0], gt), bar_a);
                    cg = lerp_c(cg, lerp_c(BAR_LEFT[1], BAR_RIGHT[1], gt), bar_a);
                    cb = lerp_c(cb, lerp_c(BAR_LEFT[2], BAR_RIGHT[2], gt), bar_a);
                }
            }

            // 3. Arrow: shaft plus two head strokes. ─────────────
            let shaft = point_to_seg_dist(px, py, arrow_x, arrow_top, arrow_x, arrow_tip);
            let left_head =
                point_to_seg_dist(px, py, arrow_x - head, arrow_tip - head, arrow_x, arrow_tip);
            let right_head =
                point_to_seg_dist(px, py, arrow_x + head, arrow_tip - head, arrow_x, arrow_tip);
            let arrow_d = shaft.min(left_head).min(right_head);
            let arrow_a = smooth_edge(arrow_d, arrow_w) * tile_aa;
            cr = lerp_c(cr, BAR_RIGHT[0], arrow_a);
            cg = lerp_c(cg, BAR_RIGHT[1], arrow_a);
            cb = lerp_c(cb, BAR_RIGHT[2], arrow_a);

            let idx = ((y * size + x) * 4) as usize;
            pixels[idx] = cr;
            pixels[idx + 1] = cg;
            pixels[idx + 2] = cb;
            pixels[idx + 3] = (ca * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pixels
}

// ── Helpers ─────────────────────────────────────────────────────

/// Smooth anti-aliased edge (1 → 0 as `dist` crosses `edge`).
fn smooth_edge(dist: f32, edge: f32) -> f32 {
    let d = dist - edge;
    if d < -1.0 {
        1.0
    } else if d > 1.0 {
        0.0
    } else {
        0.5 - d * 0.5
    }
}

/// Signed distance to a rounded rectangle given as (left, top, right, bottom).
/// Negative inside.
fn rounded_rect_dist(px: f32, py: f32, rect: (f32, f32, f32, f32), radius: f32) -> f32 {
    let (l, t, r, b) = rect;
    let cx = (l + r) * 0.5;
    let cy = (t + b) * 0.5;
    let hx = (r - l) * 0.5 - radius;
    let hy = (b - t) * 0.5 - radius;
    let qx = (px - cx).abs() - hx;
    let qy = (py - cy).abs() - hy;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Perpendicular distance from a point to a line segment.
fn point_to_seg_dist(px: f32, py: f32, ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let abx = bx - ax;
    let aby = by - ay;
    let len_sq = abx * abx + aby * aby;
    if len_sq < 0.0001 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }
    let t = (((px - ax) * abx + (py - ay) * aby) / len_sq).clamp(0.0, 1.0);
    let proj_x = ax + t * abx;
    let proj_y = ay + t * aby;
    ((px - proj_x).powi(2) + (py - proj_y).powi(2)).sqrt()
}

/// Linear interpolation for a single colour channel.
fn lerp_c(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buf: &[u8], size: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * size + x) * 4) as usize;
        [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
    }

    #[test]
    fn buffer_has_rgba_per_pixel() {
        assert_eq!(render_icon(32).len(), 32 * 32 * 4);
    }

    #[test]
    fn corners_are_transparent_and_centre_is_opaque() {
        let buf = render_icon(64);
        assert_eq!(pixel(&buf, 64, 0, 0)[3], 0);
        assert_eq!(pixel(&buf, 64, 32, 32)[3], 255);
    }

    #[test]
    fn bars_are_blue() {
        let buf = render_icon(64);
        // Middle of the first bar.
        let [r, _, b, _] = pixel(&buf, 64, 24, 17);
        assert!(b > r);
    }

    #[test]
    fn rounded_rect_distance_sign() {
        let rect = (0.0, 0.0, 10.0, 10.0);
        assert!(rounded_rect_dist(5.0, 5.0, rect, 2.0) < 0.0);
        assert!(rounded_rect_dist(20.0, 5.0, rect, 2.0) > 0.0);
    }
}
