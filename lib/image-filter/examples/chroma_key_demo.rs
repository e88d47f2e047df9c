/// Chroma key example
/// Keys a green block out of a synthetic test card and saves the result

use image::{Rgba, RgbaImage};
use image_filter::{ChromaKeyConfig, Filter, BuiltinFilter, params::default_values};
use std::path::Path;

fn test_card() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(256, 256, Rgba([30, 30, 120, 255]));
    for y in 64..192 {
        for x in 64..192 {
            img.put_pixel(x, y, Rgba([0, 255, 0, 255]));
        }
    }
    img
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let img = test_card();

    // Typed API
    let keyed = ChromaKeyConfig::new()
        .with_key((0, 255, 0))
        .with_strength(0.2)
        .with_feather(0.1)
        .apply(&img)?;
    keyed.save(output_dir.join("chroma_key_typed.png"))?;

    // Mapping API, as a front end would drive it
    let filter = BuiltinFilter::ChromaKey;
    let mut values = default_values(&filter.default_params());
    values.insert(
        "Key".to_string(),
        image_filter::ParamValue::Color((0, 255, 0)),
    );
    let keyed = filter.apply(&img, &values)?;
    keyed.save(output_dir.join("chroma_key_mapped.png"))?;

    println!("✓ Chroma key applied successfully!");
    println!("  Key:     (0, 255, 0)");
    println!("  Output:  tmp/chroma_key_typed.png, tmp/chroma_key_mapped.png");

    Ok(())
}
