/// HSV adjustment example
/// Shifts hue and boosts saturation on a synthetic gradient

use image::{Rgba, RgbaImage};
use image_filter::AdjustHsvConfig;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let mut img = RgbaImage::new(256, 64);
    for (x, _, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgba([x as u8, 128, 255 - x as u8, 255]);
    }

    let adjusted = AdjustHsvConfig::new()
        .with_hue(60.0)
        .with_saturation(1.5)
        .apply(&img)?;

    adjusted.save(output_dir.join("adjust_hsv.png"))?;

    println!("✓ HSV adjustment applied successfully!");
    println!("  Hue:        +60");
    println!("  Saturation: x1.5");
    println!("  Output:     tmp/adjust_hsv.png");

    Ok(())
}
