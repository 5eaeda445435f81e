//! Shared project loading for CLI commands.
//!
//! Locates `tempo.toml`, loads and resolves it, and renders every diagnostic
//! produced on the way to stderr, as text or as JSON lines to match the
//! command's report format.

use std::path::{Path, PathBuf};

use tempo_config::{ConfigError, ResolvedProject, CONFIG_FILE_NAME};
use tempo_diagnostics::{
    Category, Diagnostic, DiagnosticCode, DiagnosticRenderer, DiagnosticSink, JsonRenderer,
    Severity, TerminalRenderer,
};

use crate::{GlobalArgs, ReportFormat};

/// The project file could not be loaded or resolved.
const CONFIG_ERROR: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 1,
};

/// Walks up from `start` looking for the nearest directory containing `tempo.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the configuration file path from global CLI args.
///
/// `--config` may name the file itself or the directory holding
/// `tempo.toml`. Without it the current directory and its parents are
/// searched.
pub fn resolve_config_path(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match global.config {
        Some(ref config) => {
            let path = PathBuf::from(config);
            if path.is_dir() {
                Ok(path.join(CONFIG_FILE_NAME))
            } else {
                Ok(path)
            }
        }
        None => Ok(find_project_root(&std::env::current_dir()?)?.join(CONFIG_FILE_NAME)),
    }
}

/// Loads and resolves the project selected by the global args.
///
/// Returns `Ok(None)` when the project could not be used; the reason has
/// already been rendered as an error diagnostic in `format`.
pub fn load_project(
    global: &GlobalArgs,
    format: ReportFormat,
) -> Result<Option<ResolvedProject>, Box<dyn std::error::Error>> {
    let path = resolve_config_path(global)?;
    if global.verbose {
        eprintln!("    Loading {}", path.display());
    }

    let sink = DiagnosticSink::new();
    let project = match load_from(&path, &sink) {
        Ok(project) => Some(project),
        Err(err) => {
            sink.emit(
                Diagnostic::error(CONFIG_ERROR, err.to_string())
                    .with_subject(path.display().to_string()),
            );
            None
        }
    };

    render_diagnostics(&sink, global, format);

    match project {
        Some(project) if !sink.has_errors() => {
            if !global.quiet {
                eprintln!(
                    "    Timing {} ({} profile(s), {} item(s))",
                    project.name,
                    project.store.len(),
                    project.items.len()
                );
            }
            Ok(Some(project))
        }
        _ => Ok(None),
    }
}

fn load_from(path: &Path, sink: &DiagnosticSink) -> Result<ResolvedProject, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    tempo_config::load_config_from_str(&content)?.resolve(sink)
}

/// Renders the diagnostics in `sink` to stderr.
///
/// With `--quiet` only errors are shown. Returns the number rendered.
pub fn render_diagnostics(
    sink: &DiagnosticSink,
    global: &GlobalArgs,
    format: ReportFormat,
) -> usize {
    let lines = render_lines(sink, global, format);
    for line in &lines {
        eprintln!("{line}");
    }
    lines.len()
}

fn render_lines(sink: &DiagnosticSink, global: &GlobalArgs, format: ReportFormat) -> Vec<String> {
    let renderer: Box<dyn DiagnosticRenderer> = match format {
        ReportFormat::Text => Box::new(TerminalRenderer::new(global.color)),
        ReportFormat::Json => Box::new(JsonRenderer),
    };
    sink.diagnostics()
        .iter()
        .filter(|diag| !global.quiet || diag.severity == Severity::Error)
        .map(|diag| renderer.render(diag))
        .collect()
}
