use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use meshvox::{voxelize_file, GridResolution, Options, Result};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert a PLY/OBJ model into a voxel occupancy grid", long_about = None)]
struct Cli {
    /// Model file to voxelize (.ply or .obj)
    model: PathBuf,

    /// JSON options file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory (or .json file) for the flattened JSON export
    #[arg(long)]
    json_dir: Option<PathBuf>,

    /// Directory (or .npy file) for the NPY export
    #[arg(long)]
    numpy_dir: Option<PathBuf>,

    /// Grid resolution along x, y and z
    #[arg(long, num_args = 3, value_names = ["W", "H", "D"])]
    size: Option<Vec<usize>>,

    /// Occupancy threshold as a fraction of the voxel edge
    #[arg(long, allow_negative_numbers = true)]
    proximity: Option<f32>,

    /// Fill the grid on a single thread
    #[arg(long)]
    sequential: bool,
}

impl Cli {
    fn options(&self) -> Result<Options> {
        let mut options = match &self.config {
            Some(path) => Options::from_json_file(path)?,
            None => Options::default(),
        };

        if let Some(dir) = &self.json_dir {
            options.output_json_path.clone_from(dir);
        }
        if let Some(dir) = &self.numpy_dir {
            options.output_numpy_path.clone_from(dir);
        }
        if let Some(size) = &self.size {
            options.size = GridResolution::try_from(size.as_slice())?;
        }
        if let Some(proximity) = self.proximity {
            options.proximity_factor = proximity;
        }
        if self.sequential {
            options.parallel = false;
        }
        options.filler().validate()?;
        Ok(options)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.options()?;
    log::debug!("options: {options:?}");

    let (grid, paths) = voxelize_file(&cli.model, &options)?;
    log::info!(
        "{}: {} of {} voxels occupied -> {}, {}",
        cli.model.display(),
        grid.occupied_count(),
        grid.len(),
        paths.json.display(),
        paths.numpy.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("meshvox: {e}");
            ExitCode::FAILURE
        }
    }
}
