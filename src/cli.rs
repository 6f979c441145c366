//! CLI: repair → synthesize → (rust | schema | event) over batches of sample
//! files. Per-document failures are logged and skipped; one broken sample
//! never halts the batch or disturbs other documents' registry entries.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, warn};

use crate::emit::Codegen;
use crate::error::Error;
use crate::naming;
use crate::registry::TypeRegistry;
use crate::repair;
use crate::synth::{Synthesizer, variant};

// ------------------------------- Types ------------------------------------ //

/// infer named record types from JSON sample payloads and emit Rust source
#[derive(Parser, Debug)]
#[command(name = "json2record", version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// synthesize record types and emit Rust source
    Rust(RustOut),
    /// synthesize record types and dump the registry as JSON
    Schema(SchemaOut),
    /// resolve event variants from discriminated envelopes and emit Rust source
    Event(EventOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// one or more inputs: literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,

    /// JSON Pointer selecting a subnode of each document (e.g. /data/items/0)
    #[arg(long)]
    select: Option<String>,

    /// synthesize documents in parallel; registry merge stays in input order
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct RustOut {
    #[command(flatten)]
    input: InputSettings,

    /// root type name (defaults to `{FileStem}Response` per input)
    #[arg(long)]
    name: Option<String>,

    /// registry namespace for the synthesized composites
    #[arg(long, default_value = "response")]
    namespace: String,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input: InputSettings,

    /// root type name (defaults to `{FileStem}Response` per input)
    #[arg(long)]
    name: Option<String>,

    /// registry namespace for the synthesized composites
    #[arg(long, default_value = "response")]
    namespace: String,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EventOut {
    #[command(flatten)]
    input: InputSettings,

    /// event group name (defaults to the file stem per input)
    #[arg(long)]
    group: Option<String>,

    /// JSON Pointer to the discriminant inside each envelope
    #[arg(long, default_value = variant::DISCRIMINANT_POINTER)]
    discriminant: String,

    /// registry namespace for the synthesized composites
    #[arg(long, default_value = "event")]
    namespace: String,

    /// output .rs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

/// One successfully loaded sample document.
struct Document {
    stem: String,
    value: Value,
}

// ---------------------------- Implementation ------------------------------ //

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Rust(target) => {
                let registry =
                    synthesize_batch(&target.input, &target.namespace, target.name.as_deref())?;
                let mut cg = Codegen::new();
                cg.emit_registry(&registry);
                write_output(target.out.as_deref(), &cg.into_string())
            }
            Command::Schema(target) => {
                let registry =
                    synthesize_batch(&target.input, &target.namespace, target.name.as_deref())?;
                let text = serde_json::to_string_pretty(&registry)?;
                write_output(target.out.as_deref(), &text)
            }
            Command::Event(target) => {
                let registry = synthesize_event_batch(target)?;
                let mut cg = Codegen::new();
                cg.emit_registry(&registry);
                write_output(target.out.as_deref(), &cg.into_string())
            }
        }
    }
}

impl InputSettings {
    /// Resolve inputs, then read + repair + parse + select each document.
    /// Unresolvable patterns abort the run; per-document failures are logged
    /// and skipped.
    fn load_documents(&self) -> Result<Vec<Document>, Error> {
        let paths = resolve_file_path_patterns(&self.input)?;
        let mut docs = Vec::new();
        for path in paths {
            match self.load_one(&path) {
                Ok(doc) => docs.push(doc),
                Err(error) => warn!(error = %error, "skipping sample document"),
            }
        }
        Ok(docs)
    }

    fn load_one(&self, path: &Path) -> Result<Document, Error> {
        let origin = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut value = repair::parse_sample(&raw, &origin)?;
        if let Some(pointer) = &self.select {
            value = value
                .pointer(pointer)
                .cloned()
                .ok_or_else(|| Error::Selector {
                    pointer: pointer.clone(),
                    path: origin.clone(),
                })?;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".to_owned());
        debug!(origin = %origin, "loaded sample document");
        Ok(Document { stem, value })
    }
}

/// Synthesize every document into one registry. The parallel path builds a
/// registry per document and absorbs them in input order, so its output is
/// byte-identical to the sequential path.
fn synthesize_batch(
    settings: &InputSettings,
    namespace: &str,
    name: Option<&str>,
) -> Result<TypeRegistry, Error> {
    let docs = settings.load_documents()?;
    let root_name = |doc: &Document| match name {
        Some(n) => n.to_owned(),
        None => format!("{}Response", naming::type_name(&doc.stem)),
    };

    if settings.parallel {
        let parts: Vec<TypeRegistry> = docs
            .par_iter()
            .map(|doc| {
                let mut part = TypeRegistry::new();
                Synthesizer::new(&mut part, namespace).synthesize(&doc.value, &root_name(doc));
                part
            })
            .collect();
        let mut registry = TypeRegistry::new();
        for part in parts {
            registry.absorb(part);
        }
        Ok(registry)
    } else {
        let mut registry = TypeRegistry::new();
        for doc in &docs {
            Synthesizer::new(&mut registry, namespace).synthesize(&doc.value, &root_name(doc));
        }
        Ok(registry)
    }
}

/// Event documents: each file is one group; a top-level array carries many
/// envelope samples, anything else is a single envelope.
fn synthesize_event_batch(target: &EventOut) -> Result<TypeRegistry, Error> {
    let docs = target.input.load_documents()?;
    let group_name = |doc: &Document| match &target.group {
        Some(g) => g.clone(),
        None => naming::type_name(&doc.stem),
    };

    if target.input.parallel {
        let parts: Vec<TypeRegistry> = docs
            .par_iter()
            .map(|doc| {
                let mut part = TypeRegistry::new();
                variant::synthesize_group(
                    &mut part,
                    &target.namespace,
                    &group_name(doc),
                    &target.discriminant,
                    envelope_slice(&doc.value),
                );
                part
            })
            .collect();
        let mut registry = TypeRegistry::new();
        for part in parts {
            registry.absorb(part);
        }
        Ok(registry)
    } else {
        let mut registry = TypeRegistry::new();
        for doc in &docs {
            variant::synthesize_group(
                &mut registry,
                &target.namespace,
                &group_name(doc),
                &target.discriminant,
                envelope_slice(&doc.value),
            );
        }
        Ok(registry)
    }
}

fn envelope_slice(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    }
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text)?;
        }
        None => println!("{text}"),
    }
    Ok(())
}

// ---------------------------- Internal helpers ---------------------------- //

fn resolve_file_path_patterns(patterns: &[String]) -> Result<Vec<PathBuf>, Error> {
    fn has_glob_chars(s: &str) -> bool {
        // minimal detection for the `glob` crate syntax
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::new();
    for pattern in patterns {
        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // explicitly a glob but matched nothing: surface as an error
                return Err(Error::NoMatches {
                    pattern: pattern.clone(),
                });
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }
    Ok(out)
}

// ------------------------------- Tests ------------------------------------ //
