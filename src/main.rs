// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::path;

use svgshelf::{
    trigger_download, Catalog, DirectorySink, DownloadSink, ExportFormat, Gallery, SkiaBackend,
    StdoutSink,
};

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn timed<F, T>(perf: bool, name: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    let now = std::time::Instant::now();
    let result = f();
    if perf {
        let elapsed = now.elapsed().as_micros() as f64 / 1000.0;
        eprintln!("{}: {:.2}ms", name, elapsed);
    }

    result
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(if args.verbose {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Warn
            });
        }
    }

    let catalog = timed(args.perf, "Catalog", || match args.catalog_dir {
        Some(ref dir) => Catalog::from_dir(dir).map_err(|e| e.to_string()),
        None => Ok(Catalog::builtin()),
    })?;

    let mut gallery = timed(args.perf, "Sizing", || Gallery::new(catalog));

    let (item_id, out) = match args.mode {
        Mode::List(ref query) => {
            gallery.set_query(query);
            return list_items(&gallery);
        }
        Mode::Export(ref id, ref out) => (id.as_str(), out),
    };

    {
        let controls = gallery.controls_mut(item_id).map_err(|e| e.to_string())?;
        if !args.lock_ratio {
            controls.set_lock_ratio(false);
        }
        if let Some(format) = args.format {
            controls.set_format(format);
        }
        if let Some(transparent) = args.transparent {
            controls.set_transparent(transparent);
        }
        if args.background.is_some() {
            controls.set_background(args.background);
        }
        if let Some(w) = args.width {
            controls.set_width(w);
        }
        if let Some(h) = args.height {
            controls.set_height(h);
        }
    }

    let mut backend = SkiaBackend::new(usvg::Options {
        dpi: args.dpi as f32,
        ..usvg::Options::default()
    });
    if args.skip_system_fonts {
        backend = backend.skip_system_fonts();
    }

    let mut job = gallery.export_job(item_id).map_err(|e| e.to_string())?;
    let filename = job.filename();

    let blob = timed(args.perf, "Rendering", || {
        job.run(&backend).cloned().map_err(|e| e.to_string())
    })?;

    let sink: Box<dyn DownloadSink> = match out {
        OutputTo::Stdout => Box::new(StdoutSink),
        OutputTo::Dir(ref dir) => Box::new(DirectorySink::new(dir)),
    };

    let path = timed(args.perf, "Saving", || {
        trigger_download(sink.as_ref(), &blob, &filename).map_err(|e| e.to_string())
    })?;

    if let OutputTo::Dir(_) = out {
        println!("{}", path.display());
    }

    Ok(())
}

fn list_items(gallery: &Gallery) -> Result<(), String> {
    let mut count = 0;
    for item in gallery.visible_items() {
        count += 1;

        let size = gallery
            .controls(&item.id)
            .ok()
            .and_then(|c| c.intrinsic_size())
            .map(|s| format!("{}x{}", s.width(), s.height()))
            .unwrap_or_else(|| "unknown size".to_string());

        if item.tags.is_empty() {
            println!("{}: {}, {}", item.id, item.name, size);
        } else {
            println!(
                "{}: {}, {} [{}]",
                item.id,
                item.name,
                size,
                item.tags.join(", ")
            );
        }
    }

    if count == 0 {
        return Err(format!("no items match '{}'", gallery.query()));
    }

    Ok(())
}

const HELP: &str = "\
svgshelf exports SVG gallery items as PNG or JPEG images.

USAGE:
  svgshelf [OPTIONS] --list [--filter TEXT]  # list items
  svgshelf [OPTIONS] <item-id> <out-dir>     # export to a directory
  svgshelf [OPTIONS] <item-id> -c            # export to stdout

  svgshelf --list --filter star
  svgshelf -w 512 -f jpeg masjid-siluet .

OPTIONS:
      --help                    Prints this help
  -V, --version                 Prints version
  -c                            Prints the output image to the stdout

      --catalog DIR             Uses every SVG file in a directory as a gallery item
                                [default: built-in samples]
      --list                    Lists gallery items
      --filter TEXT             Lists only items whose name or tags contain TEXT

  -w, --width LENGTH            Sets the width in pixels
                                [default: 1024]
  -h, --height LENGTH           Sets the height in pixels
                                [default: derived from width]
      --no-lock-ratio           Does not derive one side from another
  -f, --format FORMAT           Sets the output format
                                [default: png] [possible values: png, jpeg]
      --transparent             Keeps the PNG background transparent [default]
      --opaque                  Paints the PNG background
      --background COLOR        Sets the background color
                                Examples: red, #fff, #fff000
                                [default: white]
      --dpi DPI                 Sets the resolution
                                [default: 96] [possible values: 10..4000 (inclusive)]
      --skip-system-fonts       Disables system fonts loading

      --perf                    Prints performance stats
      --verbose                 Prints debug messages
      --quiet                   Disables warnings

ARGS:
  <item-id>                     Gallery item ID
  <out-dir>                     Output directory
";

#[derive(Debug)]
struct CliArgs {
    catalog_dir: Option<path::PathBuf>,
    list: bool,
    filter: Option<String>,

    width: Option<f64>,
    height: Option<f64>,
    no_lock_ratio: bool,
    format: Option<ExportFormat>,
    transparent: bool,
    opaque: bool,
    background: Option<svgtypes::Color>,
    dpi: u32,
    skip_system_fonts: bool,

    perf: bool,
    verbose: bool,
    quiet: bool,

    free: Vec<String>,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = pico_args::Arguments::from_env();

    if input.contains("--help") {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        catalog_dir: input.opt_value_from_str("--catalog")?,
        list: input.contains("--list"),
        filter: input.opt_value_from_str("--filter")?,

        width: input.opt_value_from_fn(["-w", "--width"], parse_length)?,
        height: input.opt_value_from_fn(["-h", "--height"], parse_length)?,
        no_lock_ratio: input.contains("--no-lock-ratio"),
        format: input.opt_value_from_str(["-f", "--format"])?,
        transparent: input.contains("--transparent"),
        opaque: input.contains("--opaque"),
        background: input.opt_value_from_str("--background")?,
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        skip_system_fonts: input.contains("--skip-system-fonts"),

        perf: input.contains("--perf"),
        verbose: input.contains("--verbose"),
        quiet: input.contains("--quiet"),

        free: input
            .finish()
            .into_iter()
            .map(|s| s.to_string_lossy().into_owned())
            .collect(),
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

// Zero and negative values are allowed. Controls clamp them to one pixel.
fn parse_length(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid length")?;

    if n.is_finite() {
        Ok(n)
    } else {
        Err("LENGTH should be finite".to_string())
    }
}

#[derive(Clone, PartialEq, Debug)]
enum OutputTo {
    Stdout,
    Dir(path::PathBuf),
}

#[derive(Clone, PartialEq, Debug)]
enum Mode {
    List(String),
    Export(String, OutputTo),
}

struct Args {
    mode: Mode,
    catalog_dir: Option<path::PathBuf>,
    width: Option<f64>,
    height: Option<f64>,
    lock_ratio: bool,
    format: Option<ExportFormat>,
    transparent: Option<bool>,
    background: Option<svgtypes::Color>,
    dpi: u32,
    skip_system_fonts: bool,
    perf: bool,
    verbose: bool,
    quiet: bool,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    if let Some(arg) = args.free.iter().find(|a| a.starts_with('-') && *a != "-c") {
        return Err(format!("unknown option '{}'", arg));
    }

    let mode = if args.list {
        if !args.free.is_empty() {
            return Err("--list doesn't take arguments".to_string());
        }

        Mode::List(args.filter.clone().unwrap_or_default())
    } else {
        if args.filter.is_some() {
            println!("Warning: --filter has no effect without --list.");
        }

        let mut free = args.free.iter();
        let id = free
            .next()
            .ok_or_else(|| "<item-id> must be set".to_string())?;
        if id == "-c" {
            return Err("-c should be set after <item-id>".to_string());
        }

        let out = match free.next() {
            Some(out) if out == "-c" => OutputTo::Stdout,
            Some(out) => OutputTo::Dir(out.into()),
            None => return Err("<out-dir> must be set".to_string()),
        };

        if free.next().is_some() {
            return Err("too many arguments".to_string());
        }

        Mode::Export(id.clone(), out)
    };

    if args.transparent && args.opaque {
        return Err("--transparent and --opaque cannot be set together".to_string());
    }

    let transparent = if args.transparent {
        Some(true)
    } else if args.opaque {
        Some(false)
    } else {
        None
    };

    if transparent == Some(true) && args.format == Some(ExportFormat::Jpeg) {
        println!("Warning: --transparent has no effect for JPEG.");
    }

    // Both sides are set explicitly, so there is nothing to derive.
    let mut lock_ratio = !args.no_lock_ratio;
    if args.width.is_some() && args.height.is_some() {
        lock_ratio = false;
    }

    Ok(Args {
        mode,
        catalog_dir: args.catalog_dir,
        width: args.width,
        height: args.height,
        lock_ratio,
        format: args.format,
        transparent,
        background: args.background,
        dpi: args.dpi,
        skip_system_fonts: args.skip_system_fonts,
        perf: args.perf,
        verbose: args.verbose,
        quiet: args.quiet,
    })
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
