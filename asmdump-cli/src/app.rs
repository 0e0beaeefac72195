use std::path::PathBuf;

use clap::Parser;

/// asmdump - render the public surface of a .NET module as documentation
#[derive(Debug, Parser)]
#[command(name = "asmdump", version, about, long_about = None)]
pub struct Cli {
    /// Path to the .NET module (.dll or .exe).
    #[arg(value_name = "MODULE")]
    pub module: PathBuf,

    /// Directory receiving the listing and the generated documentation. Deleted first if it
    /// exists.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output: PathBuf,

    /// Documentation generator executable.
    #[arg(long, value_name = "EXE", default_value = "doxygen")]
    pub doxygen: PathBuf,

    /// Only write the listing, do not run the documentation generator.
    #[arg(long)]
    pub no_render: bool,

    /// Additional directory to search for referenced assemblies (repeatable).
    #[arg(long = "search-dir", value_name = "DIR")]
    pub search_dirs: Vec<PathBuf>,

    /// Do not read referenced assemblies at all.
    #[arg(long, conflicts_with = "search_dirs")]
    pub no_resolve: bool,

    /// Write the listing without a UTF-8 byte order mark.
    #[arg(long)]
    pub no_bom: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}
