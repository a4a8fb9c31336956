//! Go type-declaration renderer.
//!
//! Serializes a finished type model into a single Go source file: structs
//! with json (and optionally bson) tags, string/int constant enums, and
//! marker interfaces for sum types.

pub mod emit;
pub mod type_mapper;

use jsg_core::config::GenerateConfig;
use jsg_core::ir::TypeModel;
use jsg_core::{GeneratedFile, Renderer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GoError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}

/// Go code renderer.
pub struct GoRenderer;

impl Renderer for GoRenderer {
    type Error = GoError;

    fn render(
        &self,
        model: &TypeModel,
        config: &GenerateConfig,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let content = emit::emit_types(model, config)?;
        log::debug!("rendered {} byte(s) of Go source", content.len());
        Ok(vec![GeneratedFile {
            path: "types.go".to_string(),
            content,
        }])
    }
}
