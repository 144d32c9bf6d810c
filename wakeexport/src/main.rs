use argh::FromArgs;
use rayon::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use wake::{WakeGeometry, WakeResults};

mod input;

#[derive(Debug, FromArgs)]
/// Write propeller wake panels as legacy VTK files
struct Options {
    /// json5 file holding the wake geometry and the rotor results
    #[argh(positional)]
    input: PathBuf,
    /// name of output file, suffixed with the propeller index unless --propeller is given
    #[argh(option, short = 'o', default = "PathBuf::from(\"wake.vtk\")")]
    output: PathBuf,
    /// only export this propeller
    #[argh(option, short = 'p')]
    propeller: Option<usize>,
    /// title of the files, overrides the one in the input
    #[argh(option, short = 't')]
    title: Option<String>,
    /// number of simultaneous exports, 0 uses every core
    #[argh(option, short = 'j', default = "1")]
    jobs: usize,
    /// disable the progressbar
    #[argh(switch)]
    no_progressbar: bool,
}

fn main() {
    let opt: Options = argh::from_env();
    if let Err(e) = run(opt) {
        eprintln!("error: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(opt: Options) -> Result<(), Box<dyn Error>> {
    let filecontents = std::fs::read_to_string(&opt.input)
        .map_err(|e| format!("could not read {}: {}", opt.input.display(), e))?;
    let configuration: input::Configuration = json5::from_str(&filecontents)?;

    let title = opt.title.or(configuration.title);
    let geometry = WakeGeometry::try_from(configuration.geometry)?;
    let results = configuration.results;
    println!("Wake of shape {}", geometry.shape());

    if let Some(prop) = opt.propeller {
        wake::export_wake(&opt.output, &geometry, &results, prop, title.as_deref())?;
        println!("Wrote {}", opt.output.display());
        return Ok(());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opt.jobs)
        .build()?;
    let progressbar = progressbar(opt.no_progressbar, geometry.shape().props as u64)?;

    let paths = pool.install(|| {
        export_every_propeller(
            &opt.output,
            &geometry,
            &results,
            title.as_deref(),
            &progressbar,
        )
    })?;
    progressbar.finish_and_clear();

    for path in paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// One file per propeller, on the current rayon pool
fn export_every_propeller(
    template: &Path,
    geometry: &WakeGeometry,
    results: &WakeResults,
    title: Option<&str>,
    progressbar: &indicatif::ProgressBar,
) -> Result<Vec<PathBuf>, wake::WakeError> {
    (0..geometry.shape().props)
        .into_par_iter()
        .map(|prop| {
            let path = wake::export_propeller(template, geometry, results, prop, title)?;
            progressbar.inc(1);
            Ok(path)
        })
        .collect()
}

fn progressbar(dummy: bool, n: u64) -> Result<indicatif::ProgressBar, Box<dyn Error>> {
    if dummy {
        Ok(indicatif::ProgressBar::hidden())
    } else {
        let progressbar = indicatif::ProgressBar::new(n);
        Ok(progressbar.with_style(
            indicatif::ProgressStyle::default_bar()
                .template("{wide_bar:.cyan/blue} {pos}/{len} ({eta})")?,
        ))
    }
}
