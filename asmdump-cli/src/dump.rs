use std::{fs, path::Path, process::Command};

use anyhow::{bail, Context};
use asmdump::{
    doxygen::DoxygenConfig,
    loader::{DirectoryResolver, LoadOptions},
    DumpOptions, OutputOptions,
};
use log::info;

use crate::app::Cli;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.output.exists() {
        fs::remove_dir_all(&cli.output)
            .with_context(|| format!("failed to clear {}", cli.output.display()))?;
    }
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;

    let options = DumpOptions {
        load: load_options(cli),
        output: OutputOptions {
            byte_order_mark: !cli.no_bom,
        },
    };

    let listing = asmdump::dump(&cli.module, &cli.output, &options)
        .with_context(|| format!("failed to dump {}", cli.module.display()))?;
    println!("{}", listing.display());

    if !cli.no_render {
        render(cli)?;
    }
    Ok(())
}

fn load_options(cli: &Cli) -> LoadOptions {
    if cli.no_resolve {
        return LoadOptions::isolated();
    }

    let resolver = cli
        .search_dirs
        .iter()
        .fold(DirectoryResolver::new(), |resolver, dir| {
            resolver.with_search_directory(dir)
        });
    LoadOptions::with_resolver(resolver)
}

/// Run the documentation generator over the listing directory
fn render(cli: &Cli) -> anyhow::Result<()> {
    let project_name = project_name(&cli.module);
    let config = DoxygenConfig::for_output(&project_name, &cli.output);

    let doxyfile = tempfile::Builder::new()
        .prefix("Doxyfile")
        .tempfile()
        .context("failed to create a temporary Doxyfile")?;
    config
        .write_to(doxyfile.path())
        .context("failed to write the Doxyfile")?;

    info!("Running {} for {}", cli.doxygen.display(), project_name);
    let status = Command::new(&cli.doxygen)
        .arg(doxyfile.path())
        .status()
        .with_context(|| format!("failed to start {}", cli.doxygen.display()))?;

    if !status.success() {
        bail!("{} exited with {}", cli.doxygen.display(), status);
    }
    Ok(())
}

fn project_name(module: &Path) -> String {
    module
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::ffi::OsStr;

    #[test]
    fn project_names() {
        assert_eq!(project_name(Path::new("/opt/lib/My.Library.dll")), "My.Library");
        assert_eq!(project_name(Path::new("Tool.exe")), "Tool");
    }

    #[test]
    fn flags() {
        let cli = Cli::parse_from([
            "asmdump",
            "Library.dll",
            "out",
            "--search-dir",
            "a",
            "--search-dir",
            "b",
            "--no-bom",
        ]);

        assert_eq!(cli.search_dirs.len(), 2);
        assert!(cli.no_bom);
        assert!(!cli.no_render);
        assert_eq!(cli.doxygen, Path::new("doxygen"));
    }

    #[test]
    fn unreadable_module_leaves_empty_output() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("Broken.dll");
        fs::write(&module, [0_u8; 16]).unwrap();
        let output = dir.path().join("out");
        fs::create_dir_all(output.join("stale")).unwrap();

        let cli = Cli::parse_from([
            OsStr::new("asmdump"),
            module.as_os_str(),
            output.as_os_str(),
            OsStr::new("--no-render"),
        ]);

        assert!(run(&cli).is_err());
        assert!(output.exists());
        assert!(!output.join("stale").exists());
    }
}
