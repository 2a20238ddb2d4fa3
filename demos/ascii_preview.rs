//! ASCII preview example - shows how sampling density changes with resolution

use textdots::dots::ascii_preview;
use textdots::RenderRequest;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = std::env::args().nth(1).unwrap_or_else(|| "joe thel".to_string());

    for resolution in [2, 3, 10, 20] {
        let cloud = textdots::pixelate(&RenderRequest::new(text.as_str(), 150).with_resolution(resolution))?;
        println!(
            "resolution {} -> freq {}, {} points",
            resolution,
            cloud.frequency(),
            cloud.points.len()
        );
        println!("{}\n", ascii_preview(&cloud));
    }

    Ok(())
}
