//! Configuration for the documentation generator.
//!
//! The generator is driven by a Doxyfile rendered from a built-in template. The template
//! refers to the project name, the directory holding the listings and the output directory
//! through `${KEY}` placeholders.
//!
//! # Examples
//!
//! ```rust
//! use asmdump::doxygen::DoxygenConfig;
//! use std::path::Path;
//!
//! let config = DoxygenConfig::for_output("MyLibrary", Path::new("out"));
//! let doxyfile = config.render();
//! assert!(doxyfile.contains("PROJECT_NAME           = \"MyLibrary\""));
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::Result;

/// The built-in Doxyfile template
pub const DOXYFILE_TEMPLATE: &str = include_str!("../res/Doxyfile");

/// Values substituted into the Doxyfile template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoxygenConfig {
    /// `${PROJECT_NAME}`
    pub project_name: String,
    /// `${INPUT}`: directory holding the listings
    pub input: PathBuf,
    /// `${OUTPUT_DIRECTORY}`: where the generator writes its output
    pub output_directory: PathBuf,
}

impl DoxygenConfig {
    /// Configuration for a dump written to `output`: listings in `output/src`, documentation
    /// in `output/doxygen`
    #[must_use]
    pub fn for_output(project_name: &str, output: &Path) -> Self {
        DoxygenConfig {
            project_name: project_name.to_string(),
            input: output.join("src"),
            output_directory: output.join("doxygen"),
        }
    }

    /// The placeholder names and their values
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("PROJECT_NAME", self.project_name.clone()),
            ("INPUT", self.input.display().to_string()),
            ("OUTPUT_DIRECTORY", self.output_directory.display().to_string()),
        ]
    }

    /// The built-in template with all placeholders replaced
    #[must_use]
    pub fn render(&self) -> String {
        substitute(DOXYFILE_TEMPLATE, &self.variables())
    }

    /// Write the rendered configuration to `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// Replace every `${KEY}` in `template` with its value, line by line
///
/// Unknown placeholders are left untouched. Every line of the result ends with `\n`.
#[must_use]
pub fn substitute<K: AsRef<str>, V: AsRef<str>>(template: &str, variables: &[(K, V)]) -> String {
    let mut rendered = String::with_capacity(template.len());

    for line in template.lines() {
        let mut line = line.to_string();
        for (key, value) in variables {
            line = line.replace(&format!("${{{}}}", key.as_ref()), value.as_ref());
        }
        rendered.push_str(&line);
        rendered.push('\n');
    }

    rendered
}
