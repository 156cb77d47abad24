use image::{ImageBuffer, Rgb as Rgb8};
use textcollage::{Collage, Rgb};

const CORPUS: &str = "\
A collage is a picture made by sticking pieces of different material onto a surface.
Here the pieces are words, picked at random from this very paragraph, scattered over
the canvas in random colors on a random background.";

#[allow(clippy::unwrap_used)]
fn main() {
    let collage = Collage::new();
    collage.load_system_fonts();
    if !collage.renderer_init() {
        println!("No usable system font found; only the background will be drawn.");
    }

    // Generate from the file given on the command line, or the built-in corpus
    match std::env::args().nth(1) {
        Some(path) => collage
            .generate_from_path(&path, &mut rand::thread_rng())
            .expect("failed to generate collage from corpus file"),
        None => collage
            .generate_random(CORPUS, &mut rand::thread_rng())
            .unwrap(),
    }
    collage.set_current_text_color(Rgb::BLACK);
    collage.add_item("textcollage", 400, 300).unwrap();

    println!("Document:\n{}", collage.save());

    // Render at twice the canvas size
    let timer = std::time::Instant::now();
    let raster = collage.export_raster(1600, 1200);
    let elapsed = timer.elapsed();

    println!(
        "Rendered image: width={} height={} (elapsed: {:.2?})",
        raster.width, raster.height, elapsed
    );

    // Ensure debug directory exists
    std::fs::create_dir_all("debug").expect("failed to create debug directory");

    let img_buffer: ImageBuffer<Rgb8<u8>, Vec<u8>> =
        ImageBuffer::from_raw(raster.width as u32, raster.height as u32, raster.pixels)
            .expect("raster dimensions must match pixel buffer length");

    img_buffer
        .save("debug/collage.png")
        .expect("failed to save debug image");

    println!("Saved debug image to debug/collage.png");
}
