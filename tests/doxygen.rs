//! Integration tests for the Doxyfile template and listing output.

use std::fs;

use asmdump::{doxygen::DoxygenConfig, write_lines, OutputOptions};

#[test]
fn rendered_configuration_points_at_the_listings() {
    let dir = tempfile::tempdir().unwrap();
    let config = DoxygenConfig::for_output("MyLibrary", dir.path());

    let doxyfile = dir.path().join("Doxyfile");
    config.write_to(&doxyfile).unwrap();

    let rendered = fs::read_to_string(&doxyfile).unwrap();
    assert!(!rendered.contains("${"));
    assert!(rendered.contains("PROJECT_NAME           = \"MyLibrary\""));
    assert!(rendered.contains(&format!("{}", dir.path().join("src").display())));
    assert!(rendered.contains(&format!("{}", dir.path().join("doxygen").display())));
    assert!(rendered.contains("*.cs"));
}

#[test]
fn listings_are_written_with_a_byte_order_mark() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.cs");

    write_lines(&path, &["// Library", "namespace Ns {", "}"], &OutputOptions::default()).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    assert_eq!(&bytes[3..], b"// Library\nnamespace Ns {\n}\n");
}

#[test]
fn byte_order_mark_can_be_disabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Library.cs");

    let options = OutputOptions {
        byte_order_mark: false,
    };
    write_lines(&path, &["// Library"], &options).unwrap();

    assert_eq!(fs::read(&path).unwrap(), b"// Library\n");
}
