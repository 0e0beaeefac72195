//! Test support: crafted metadata images and catalog factories.

mod builder;

pub use builder::*;
pub use factories::*;
