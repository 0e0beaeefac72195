//! Writing listings to disk.

use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;

use crate::{
    emitter::Emitter,
    loader::{load, LoadOptions},
    Result,
};

/// UTF-8 byte order mark
const BYTE_ORDER_MARK: &[u8] = b"\xEF\xBB\xBF";

/// Directory below the output directory that receives the listings
pub const SOURCE_DIRECTORY: &str = "src";

/// Listing file extension
pub const LISTING_EXTENSION: &str = "cs";

/// How listings are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Start the file with a UTF-8 byte order mark
    pub byte_order_mark: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            byte_order_mark: true,
        }
    }
}

/// Settings for a complete [`dump`]
#[derive(Default)]
pub struct DumpOptions {
    /// Dependency handling while loading
    pub load: LoadOptions,
    /// Listing encoding
    pub output: OutputOptions,
}

/// Write `lines` to `path` as UTF-8, each terminated by `\n`
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_lines<S: AsRef<str>>(path: &Path, lines: &[S], options: &OutputOptions) -> Result<()> {
    let mut writer = BufWriter::new(fs::File::create(path)?);

    if options.byte_order_mark {
        writer.write_all(BYTE_ORDER_MARK)?;
    }
    for line in lines {
        writer.write_all(line.as_ref().as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Load `module`, emit its listing and write it to `<output_dir>/src/<stem>.cs`
///
/// Returns the path of the written listing.
///
/// # Errors
/// Returns an error if the module cannot be loaded or the listing cannot be written.
pub fn dump(module: &Path, output_dir: &Path, options: &DumpOptions) -> Result<PathBuf> {
    let catalog = load(module, &options.load)?;
    let lines = Emitter::emit(&catalog);

    let stem = module
        .file_stem()
        .ok_or_else(|| crate::Error::Error(format!("{} has no file name", module.display())))?;

    let directory = output_dir.join(SOURCE_DIRECTORY);
    fs::create_dir_all(&directory)?;

    let path = directory.join(format!("{}.{}", stem.to_string_lossy(), LISTING_EXTENSION));
    write_lines(&path, &lines, &options.output)?;

    info!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_mark() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.cs");

        write_lines(&path, &["// Demo", "", "namespace N {"], &OutputOptions::default()).unwrap();
        assert_eq!(
            fs::read(&path).unwrap(),
            b"\xEF\xBB\xBF// Demo\n\nnamespace N {\n".to_vec()
        );

        write_lines(&path, &["ä"], &OutputOptions { byte_order_mark: false }).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "ä\n");
    }

    #[test]
    fn empty_listing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cs");

        write_lines::<&str>(&path, &[], &OutputOptions { byte_order_mark: false }).unwrap();
        assert!(fs::read(&path).unwrap().is_empty());
    }

    #[test]
    fn dump_rejects_non_modules() {
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("Fake.dll");
        fs::write(&module, b"MZ not really").unwrap();

        assert!(dump(&module, &dir.path().join("out"), &DumpOptions::default()).is_err());
        assert!(!dir.path().join("out").exists());
    }
}
