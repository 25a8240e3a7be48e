// Checks that an in-memory RGB32 bitmap converts into an `image::RgbImage`.
// Prints "Conversion successful: true" when it does.

use digit_sketch::export::to_rgb_image;
use digit_sketch::types::{FrameBuffer, BLACK};
use std::process::ExitCode;

fn main() -> ExitCode {
    let bitmap = FrameBuffer::filled(100, 100, BLACK);

    let converted = std::panic::catch_unwind(|| to_rgb_image(&bitmap));
    match converted {
        Ok(img) => {
            let ok = img.dimensions() == (100, 100) && img.pixels().all(|p| p.0 == [0, 0, 0]);
            println!("Conversion successful: {ok}");
            if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
        }
        Err(_) => {
            eprintln!("Error: RGB32 -> RGB conversion failed");
            ExitCode::FAILURE
        }
    }
}
