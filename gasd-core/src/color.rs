//! Color space conversions used by color-aware descriptors

/// Convert an RGB triple to HSV
///
/// Returns `(hue, saturation, value)` with hue in degrees `[0, 360)` and
/// saturation/value in `[0, 1]`. Achromatic colors (gray, black, white) get a
/// hue of zero.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> (f32, f32, f32) {
    let [r, g, b] = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    let value = max as f32 / 255.0;
    if max == 0 {
        return (0.0, 0.0, value);
    }

    let diff = (max - min) as f32;
    let saturation = diff / max as f32;
    if min == max {
        return (0.0, saturation, value);
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut hue = if max == rgb[0] {
        60.0 * ((g - b) / diff)
    } else if max == rgb[1] {
        60.0 * (2.0 + (b - r) / diff)
    } else {
        60.0 * (4.0 + (r - g) / diff)
    };

    if hue < 0.0 {
        hue += 360.0;
    }
    if hue >= 360.0 {
        hue -= 360.0;
    }

    (hue, saturation, value)
}

/// Hue of an RGB triple in degrees, `[0, 360)`
#[inline]
pub fn rgb_to_hue(rgb: [u8; 3]) -> f32 {
    rgb_to_hsv(rgb).0
}
