use image::Rgb;
use palette::{Hsl, IntoColor, Srgb};

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn series_colors(n: usize) -> Vec<Rgb<u8>> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            Rgb([
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            ])
        })
        .collect()
}

pub fn hex(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_are_distinct() {
        let colors = series_colors(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(series_colors(0).is_empty());
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(Rgb([255, 0, 16])), "#ff0010");
    }
}
