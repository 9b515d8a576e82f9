//! Per-language extractor families (spec.md 4.2).

mod generic;
mod javascript_typescript;
mod python;
mod walk;

pub use generic::GenericExtractor;
pub use javascript_typescript::JavaScriptTypeScriptExtractor;
pub use python::PythonExtractor;
