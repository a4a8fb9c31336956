pub mod config;
pub mod discover;
pub mod error;
pub mod ir;
pub mod model;
pub mod naming;
pub mod parse;
pub mod paths;
pub mod resolve;
pub mod synth;

use config::GenerateConfig;
use error::GenerateError;
use ir::TypeModel;
use model::SchemaArena;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for renderers that serialize a finished type model into concrete
/// source syntax. Renderers perform no resolution logic.
pub trait Renderer {
    type Error: std::error::Error;
    fn render(
        &self,
        model: &TypeModel,
        config: &GenerateConfig,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}

/// Run the whole pipeline: discover input files, parse them, resolve
/// references, and synthesize the output type model.
pub fn build_type_model(config: &GenerateConfig) -> Result<TypeModel, GenerateError> {
    let files = discover::discover_files(&config.root_path, &config.inputs)?;
    let mut arena = SchemaArena::new();
    let documents = parse::read_input_files(&mut arena, &files, config.schema_key_optional)?;
    let mut generator = synth::Generator::new(
        arena,
        documents,
        config.root_path.clone(),
        config.object_id,
    );
    generator.create_types()?;
    Ok(generator.into_model())
}
