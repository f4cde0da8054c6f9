//! `dxfpen`
//!
//! Converts a recorded plotter job into a DXF drawing.
//!
//! Usage: `dxfpen <job.json> <output.dxf>`

use std::{path::PathBuf, process::ExitCode};

use dxfpen::ExportJob;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let (Some(job_path), Some(destination), None) = (args.next(), args.next(), args.next()) else {
        eprintln!("Usage: dxfpen <job.json> <output.dxf>");
        return ExitCode::FAILURE;
    };
    let job_path = PathBuf::from(job_path);
    let destination = PathBuf::from(destination);

    let result = ExportJob::load(&job_path).and_then(|job| job.export_to_file(&destination));
    match result {
        Ok(()) => {
            log::info!("Wrote {}", destination.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Error exporting {}: {err}", job_path.display());
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
