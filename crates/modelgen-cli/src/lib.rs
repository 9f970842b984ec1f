//! CLI logic for the modelgen tool.
//!
//! A run reads the class model and writes every generator's output, then
//! diffs the original and patched configuration documents and writes the
//! delta together with the patched document rebuilt from it.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};

use modelgen::{
    ModelPipeline, ModelgenError, config::AppConfig, delta::Document, parse_document,
};

/// Run the modelgen CLI application
///
/// # Errors
///
/// Returns `ModelgenError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Model and configuration document parsing errors
/// - Output generation errors
pub fn run(args: &Args) -> Result<(), ModelgenError> {
    let app_config = apply_overrides(config::load_config(args.config.as_ref())?, args);
    debug!(app_config:?; "Effective configuration");

    let pipeline = ModelPipeline::new(app_config);
    let input = pipeline.config().input();
    let output = pipeline.config().output();

    // Class model outputs
    let model_path = input.model();
    let source = fs::read_to_string(model_path)?;
    let graph = pipeline.parse_model(&source, model_path)?;
    debug!(classes = graph.class_count(); "Model read");

    let outputs = pipeline.generate_outputs(&graph)?;
    for generated in &outputs {
        write_output(generated.path(), generated.contents())?;
    }

    // Configuration delta
    let original = read_document(input.original_config())?;
    let patched = read_document(input.patched_config())?;
    let result = pipeline.process_configs(&original, &patched);

    write_output(&output.delta_path(), &result.delta_json()?)?;
    write_output(&output.patched_config_path(), &result.patched_json()?)?;

    Ok(())
}

fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(path) = &args.model {
        config = config.with_model(path);
    }
    if let Some(path) = &args.original_config {
        config = config.with_original_config(path);
    }
    if let Some(path) = &args.patched_config {
        config = config.with_patched_config(path);
    }
    if let Some(dir) = &args.out_dir {
        config = config.with_output_dir(dir);
    }
    config
}

fn read_document(path: &Path) -> Result<Document, ModelgenError> {
    let source = fs::read_to_string(path)?;
    parse_document(&source, path)
}

fn write_output(path: &Path, contents: &[u8]) -> Result<(), ModelgenError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    info!(path = path.display().to_string(), bytes = contents.len(); "Output written");
    Ok(())
}
