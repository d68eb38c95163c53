//! Unpack a single packed texture into grayscale maps.
//!
//! Usage:
//! ```sh
//! cargo run --example unpack_texture -- input.png output_dir [PRESET]
//! ```

use std::env;
use std::process;

use orm_unpack::{unpack_one, Preset, UnpackOptions, UnpackRequest};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <input> <output_dir> [preset]", args[0]);
        process::exit(1);
    }

    let options = UnpackOptions {
        preset: args
            .get(3)
            .cloned()
            .unwrap_or_else(|| Preset::default().name.to_string()),
        export_alpha_as_height: true,
        ..UnpackOptions::default()
    };

    let request = UnpackRequest {
        input: args[1].clone().into(),
        output_dir: args[2].clone().into(),
        options,
    };

    match unpack_one(&request) {
        Ok(result) => {
            for path in result.paths() {
                println!("Wrote {}", path.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
