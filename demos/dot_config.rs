//! Dot config example - builds the payload a dot renderer is started with

use rand::rngs::StdRng;
use rand::SeedableRng;
use textdots::dots::{pick_resolution, DotConfig, DEFAULT_RESOLUTION_CANDIDATES};
use textdots::RenderRequest;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("textdots - Dot Config Example\n");

    let mut rng = StdRng::seed_from_u64(2024);

    for text in ["joe thel", "hello"] {
        let resolution = pick_resolution(&DEFAULT_RESOLUTION_CANDIDATES, &mut rng);
        println!("Text: {:?} (resolution {})", text, resolution);
        println!("{}", "=".repeat(60));

        let request = RenderRequest::new(text, 150).with_resolution(resolution);
        match textdots::pixelate(&request) {
            Ok(cloud) => {
                let config = DotConfig::new(cloud).with_id(text.replace(' ', "-"));
                println!("Points: {}", config.cloud.points.len());
                println!("Radius: {}", config.cloud.radius);
                println!("Canvas: {}x{}", config.cloud.width, config.cloud.height);
                println!("{}\n", serde_json::to_string(&config)?);
            }
            Err(e) => {
                eprintln!("Error pixelating {:?}: {}", text, e);
            }
        }
    }

    println!("Done!");
    Ok(())
}
