pub mod go;
pub mod java;
pub mod nodejs;
pub mod python;
pub mod ruby;

pub use go::{GoPackage, GoPackageBuilder};
pub use java::{JavaProject, MavenProjectBuilder};
pub use nodejs::{NodeJsPackage, NodeJsPackageBuilder};
pub use python::{PythonModule, PythonModuleBuilder, PythonPackage, PythonPackageBuilder};
pub use ruby::{RubyApp, RubyAppBuilder, RubyGem, RubyGemBuilder};
