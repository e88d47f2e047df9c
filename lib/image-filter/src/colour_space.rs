//! Pixel-level colour space conversions shared by the filters.
//!
//! Values stay on the 8-bit channel scale used by byte-per-channel images:
//! hue occupies the full 0..=255 range, and L*a*b* is stored as
//! `L* * 255/100`, `a* + 128`, `b* + 128`. LAB values are kept as `f32` so
//! distance math is not quantized prematurely.

/// Converts an RGB pixel to 8-bit hue/saturation/value channels.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let rf = r as f32 / 255.0;
    let gf = g as f32 / 255.0;
    let bf = b as f32 / 255.0;

    let maxc = rf.max(gf).max(bf);
    let minc = rf.min(gf).min(bf);
    let v = (maxc * 255.0).round() as u8;

    if maxc == minc {
        return (0, 0, v);
    }

    let s = (maxc - minc) / maxc;
    let rc = (maxc - rf) / (maxc - minc);
    let gc = (maxc - gf) / (maxc - minc);
    let bc = (maxc - bf) / (maxc - minc);

    let h = if rf == maxc {
        bc - gc
    } else if gf == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    let h = (h / 6.0).rem_euclid(1.0);

    ((h * 255.0).round() as u8, (s * 255.0).round() as u8, v)
}

/// Converts 8-bit hue/saturation/value channels back to RGB.
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> (u8, u8, u8) {
    if s == 0 {
        return (v, v, v);
    }

    let hf = h as f32 / 255.0 * 6.0;
    let sf = s as f32 / 255.0;
    let vf = v as f32 / 255.0;

    let sector = hf.floor();
    let f = hf - sector;
    let p = vf * (1.0 - sf);
    let q = vf * (1.0 - sf * f);
    let t = vf * (1.0 - sf * (1.0 - f));

    let (rf, gf, bf) = match sector as u32 % 6 {
        0 => (vf, t, p),
        1 => (q, vf, p),
        2 => (p, vf, t),
        3 => (p, q, vf),
        4 => (t, p, vf),
        _ => (vf, p, q),
    };

    (
        (rf * 255.0).round() as u8,
        (gf * 255.0).round() as u8,
        (bf * 255.0).round() as u8,
    )
}

const XN: f32 = 0.95047;
const YN: f32 = 1.00000;
const ZN: f32 = 1.08883;

fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let v = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Converts an sRGB pixel (D65) to byte-scaled L*a*b* channels.
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let rl = srgb_to_linear(r);
    let gl = srgb_to_linear(g);
    let bl = srgb_to_linear(b);

    let x = rl * 0.4124564 + gl * 0.3575761 + bl * 0.1804375;
    let y = rl * 0.2126729 + gl * 0.7151522 + bl * 0.0721750;
    let z = rl * 0.0193339 + gl * 0.1191920 + bl * 0.9503041;

    fn f(t: f32) -> f32 {
        if t > 0.008856 {
            t.powf(1.0 / 3.0)
        } else {
            7.787 * t + 16.0 / 116.0
        }
    }

    let fx = f(x / XN);
    let fy = f(y / YN);
    let fz = f(z / ZN);

    let l = (116.0 * fy - 16.0).max(0.0);
    let a = 500.0 * (fx - fy);
    let lab_b = 200.0 * (fy - fz);

    (l * 255.0 / 100.0, a + 128.0, lab_b + 128.0)
}

/// Converts byte-scaled L*a*b* channels back to an sRGB pixel.
pub fn lab_to_rgb(l: f32, a: f32, b: f32) -> (u8, u8, u8) {
    let l = l * 100.0 / 255.0;
    let a = a - 128.0;
    let b = b - 128.0;

    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    fn f_inv(t: f32) -> f32 {
        let t3 = t * t * t;
        if t3 > 0.008856 {
            t3
        } else {
            (t - 16.0 / 116.0) / 7.787
        }
    }

    let x = f_inv(fx) * XN;
    let y = f_inv(fy) * YN;
    let z = f_inv(fz) * ZN;

    let rl = x * 3.2404542 + y * -1.5371385 + z * -0.4985314;
    let gl = x * -0.9692660 + y * 1.8760108 + z * 0.0415560;
    let bl = x * 0.0556434 + y * -0.2040259 + z * 1.0572252;

    (linear_to_srgb(rl), linear_to_srgb(gl), linear_to_srgb(bl))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(255, 255, 255), (0, 0, 255));

        let (h, s, v) = rgb_to_hsv(0, 255, 0);
        assert_eq!((s, v), (255, 255));
        assert_eq!(h, 85); // one third of the hue circle
    }

    #[test]
    fn test_hsv_round_trip_exact_for_primaries_and_grays() {
        for (r, g, b) in [
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 255),
            (0, 0, 0),
            (128, 128, 128),
        ] {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            assert_eq!(hsv_to_rgb(h, s, v), (r, g, b));
        }
    }

    #[test]
    fn test_hsv_round_trip_close_for_mixed_colors() {
        for (r, g, b) in [(200, 60, 60), (10, 240, 120), (37, 99, 201)] {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r2, g2, b2) = hsv_to_rgb(h, s, v);

            assert!((r as i32 - r2 as i32).abs() <= 3);
            assert!((g as i32 - g2 as i32).abs() <= 3);
            assert!((b as i32 - b2 as i32).abs() <= 3);
        }
    }

    #[test]
    fn test_lab_extremes() {
        let (l, a, b) = rgb_to_lab(255, 255, 255);
        assert!((l - 255.0).abs() < 1.0);
        assert!((a - 128.0).abs() < 1.5);
        assert!((b - 128.0).abs() < 1.5);

        let (l, _, _) = rgb_to_lab(0, 0, 0);
        assert!(l.abs() < 0.5);
    }

    #[test]
    fn test_lab_round_trip_close() {
        for (r, g, b) in [
            (255, 0, 0),
            (100, 200, 50),
            (128, 128, 128),
            (10, 240, 120),
            (0, 0, 0),
        ] {
            let (l, a, lab_b) = rgb_to_lab(r, g, b);
            let (r2, g2, b2) = lab_to_rgb(l, a, lab_b);

            assert!((r as i32 - r2 as i32).abs() <= 2, "red drifted for ({r},{g},{b})");
            assert!((g as i32 - g2 as i32).abs() <= 2, "green drifted for ({r},{g},{b})");
            assert!((b as i32 - b2 as i32).abs() <= 2, "blue drifted for ({r},{g},{b})");
        }
    }

    #[test]
    fn test_lab_lightness_orders_grays() {
        let (dark, _, _) = rgb_to_lab(30, 30, 30);
        let (mid, _, _) = rgb_to_lab(128, 128, 128);
        let (light, _, _) = rgb_to_lab(230, 230, 230);

        assert!(dark < mid && mid < light);
    }
}
