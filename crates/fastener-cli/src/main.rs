//! Fastener export entry point.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fastener_export::export_solid;
use fastener_kernel::TruckKernel;
use fastener_ops::{build_fastener, catalog, CatalogEntry};

mod args;

use args::Cli;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // The kernel must be usable before anything else is looked at.
    if let Err(e) = TruckKernel::self_check() {
        eprintln!(
            "Error: the geometry kernel is not usable in this environment ({}).\n\
             This build cannot construct solids; reinstall fastener-export for this platform.",
            e
        );
        std::process::exit(2);
    }

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(params) = cli.parameter_set() else {
        print_catalog(catalog());
        return Ok(());
    };

    let spec = params.resolve().context("invalid fastener parameters")?;
    let basename = spec.kind().name();

    let mut kernel = TruckKernel::new();
    let solid = build_fastener(&mut kernel, &spec)
        .with_context(|| format!("failed to build {}", basename))?;

    let output_dir = std::path::absolute(&cli.output_dir)
        .with_context(|| format!("cannot resolve {}", cli.output_dir.display()))?;
    let paths = export_solid(
        &mut kernel,
        &solid,
        &output_dir,
        basename,
        &cli.export_options(),
    )
    .with_context(|| format!("failed to export {}", basename))?;

    println!(
        "Exported {} -> {} and {}",
        basename,
        paths.step.display(),
        paths.stl.display()
    );
    Ok(())
}

fn print_catalog(entries: &[CatalogEntry]) {
    for entry in entries {
        println!("{} ({})", entry.name, entry.kind);
        println!("  {}", entry.description);
        println!("  Applications: {}", entry.applications.join(", "));
        println!("  Materials:    {}", entry.materials.join(", "));
        for (label, value) in entry.specs {
            println!("  {:<12}  {}", label, value);
        }
        println!("  Example:      fastener-export {}", entry.example_args);
        println!();
    }
}
