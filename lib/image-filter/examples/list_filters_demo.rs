/// Filter registry example
/// Lists builtins, loads presets from an extension directory, and prints
/// each filter's parameter schema as a front end would consume it

use image_filter::FilterRegistry;
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = FilterRegistry::with_builtins();

    let extension_dir = Path::new("extensions");
    if extension_dir.is_dir() {
        for failure in registry.load_extensions(extension_dir) {
            eprintln!("  ! {failure}");
        }
    }

    for filter in registry.iter() {
        println!("{}", filter.name());
        let schema = filter.default_params();
        if schema.is_empty() {
            println!("  (no parameters)");
        }
        for (name, spec) in &schema {
            println!("  {name}: {}", serde_json::to_string(spec)?);
        }
    }

    Ok(())
}
