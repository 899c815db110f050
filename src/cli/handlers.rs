// FILE: src/cli/handlers.rs
use crate::{
    extract_variables, FileOutcome, GeneratorOptions, Generator, Renderer, Result,
    TemplateConfig,
};

use std::path::PathBuf;
use std::time::Instant;

// --- GENERATE ---
pub fn handle_generate_command(
    config: &TemplateConfig,
    options: &GeneratorOptions,
    files: &[PathBuf],
) -> Result<i32> {
    let start = Instant::now();
    let renderer = Renderer::new(config)?;
    let generator = Generator::new(renderer, options);
    let report = generator.generate(files);

    for outcome in &report.outcomes {
        let name = outcome
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| outcome.path().display().to_string());

        match outcome {
            FileOutcome::Written { warnings, .. } => {
                println!("[OK] {}", name);
                for warning in warnings {
                    eprintln!("  warning: {}", warning);
                }
            }
            FileOutcome::Skipped { reason, .. } => {
                eprintln!("[SKIP] {}: {}", name, reason);
            }
            FileOutcome::Failed { error, .. } => {
                eprintln!("[FAIL] {}: {}", name, error);
            }
        }
    }

    log::info!(
        "{} written, {} skipped, {} failed in {:.2}ms",
        report.written(),
        report.skipped(),
        report.failed(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(if report.has_failures() { 1 } else { 0 })
}

// --- EXTRACT ---
pub fn handle_extract_command(config: &TemplateConfig, files: &[PathBuf]) -> Result<i32> {
    let found = extract_variables(files, config.escape)?;
    println!("{}", found.to_json()?);
    Ok(0)
}
