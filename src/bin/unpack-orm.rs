use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use orm_unpack::{unpack_batch, unpack_one, Preset, UnpackOptions, UnpackRequest};

#[derive(Parser)]
#[command(
    name = "unpack-orm",
    about = "Unpack an ORM/MRA/RMA packed texture to grayscale AO/Roughness/Metallic maps",
    version,
    after_help = "Outputs are written as {name}_AO.png, {name}_Roughness.png, {name}_Metallic.png\n\
                  and, with --alpha-as-height, {name}_Height.png when the source has alpha."
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input image path, or folder with --batch
    #[arg(required_unless_present = "list_presets")]
    input: Option<PathBuf>,

    /// Output folder
    #[arg(short, long, required_unless_present = "list_presets")]
    out: Option<PathBuf>,

    /// Channel preset (ORM, MRA, RMA)
    #[arg(short, long, default_value = "ORM")]
    preset: String,

    /// Invert the roughness channel (Gloss -> Rough)
    #[arg(long)]
    invert_rough: bool,

    /// Invert the metallic channel
    #[arg(long)]
    invert_metal: bool,

    /// Export alpha channel as Height if present
    #[arg(long)]
    alpha_as_height: bool,

    /// Treat input as a folder and process images recursively
    #[arg(long)]
    batch: bool,

    /// Print the available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if cli.list_presets {
        for preset in Preset::all() {
            println!(
                "{:<4} AO={} Roughness={} Metallic={}",
                preset.name, preset.ao, preset.roughness, preset.metallic
            );
        }
        return;
    }

    let (Some(input), Some(out)) = (cli.input.as_deref(), cli.out.as_deref()) else {
        eprintln!("Error: Both an input path and --out are required");
        process::exit(2);
    };

    let options = UnpackOptions {
        preset: cli.preset,
        invert_roughness: cli.invert_rough,
        invert_metallic: cli.invert_metal,
        export_alpha_as_height: cli.alpha_as_height,
    };

    if cli.batch {
        run_batch(input, out, &options, cli.quiet);
    } else {
        run_single(input, out, options, cli.quiet);
    }
}

fn run_batch(input: &Path, out: &Path, options: &UnpackOptions, quiet: bool) {
    if !input.is_dir() {
        eprintln!("In batch mode, input must be a folder.");
        process::exit(2);
    }

    match unpack_batch(input, out, options) {
        Ok(summary) if summary.count == 0 => {
            if !quiet {
                eprintln!("No supported images found in {}", input.display());
            }
        }
        Ok(summary) => {
            if !quiet {
                println!("Processed {} image(s) -> {}", summary.count, out.display());
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_single(input: &Path, out: &Path, options: UnpackOptions, quiet: bool) {
    if !input.is_file() {
        eprintln!("Input path is not a file.");
        process::exit(2);
    }

    let request = UnpackRequest {
        input: input.to_path_buf(),
        output_dir: out.to_path_buf(),
        options,
    };

    match unpack_one(&request) {
        Ok(result) => {
            if !quiet {
                println!("Saved:");
                for path in result.paths() {
                    println!("- {}", path.display());
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
