//! Minimal CLI: load JSON → typed collection → (check | transform)
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use ordered_float::OrderedFloat;
use typed_collection::{ClassRegistry, Collection, TypeFactory, Value};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// build a runtime-typed collection from JSON/NDJSON documents, then validate or transform it
#[derive(Parser, Debug)]
#[command(name = "typed-collection", version)]
pub struct CommandLineInterface {
    /// more log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// validate every element against the type and report the count
    Check(InputSettings),
    /// `array_slice`-style slice (negative offset/length count from the end)
    Slice(SliceOut),
    /// stable sort in natural order (numbers, then strings, ...)
    Sort(TransformOut),
    /// reverse the element order
    Reverse(TransformOut),
    /// keep the first N elements
    Take(CountOut),
    /// drop the first N elements
    Drop(CountOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// element type: a primitive (int, float, bool, string, array, object, ...) or a registered class/interface
    #[arg(long = "type", short = 't')]
    type_designator: String,

    /// JSON manifest declaring classes and interfaces: {"types": [{"name", "kind", "extends"}]}
    #[arg(long)]
    registry: Option<PathBuf>,

    /// treat input as newline-delimited JSON (NDJSON)
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// jq filter selecting element values from each document
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct TransformOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SliceOut {
    #[command(flatten)]
    target: TransformOut,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
    offset: isize,

    #[arg(long, allow_hyphen_values = true)]
    length: Option<isize>,
}

#[derive(Args, Debug)]
struct CountOut {
    #[command(flatten)]
    target: TransformOut,

    #[arg(long, short = 'n')]
    count: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_types(&self) -> Result<TypeFactory> {
        let Some(path) = self.registry.as_ref() else {
            return Ok(TypeFactory::primitives_only());
        };
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read registry manifest {}", path.display()))?;
        let registry = ClassRegistry::from_manifest_str(&src)
            .with_context(|| format!("invalid registry manifest {}", path.display()))?;
        log::debug!("loaded {} types from {}", registry.len(), path.display());
        Ok(TypeFactory::with_registry(registry))
    }

    fn load_collection(&self) -> Result<Collection> {
        let types = self.load_types()?;
        let mut collection = Collection::with_types(&types, &self.type_designator, Vec::<Value>::new())?;
        for source_path in resolve_file_path_patterns(&self.input)? {
            let documents = self.read_documents(&source_path)?;
            let mut pushed = 0usize;
            for document in documents {
                for element in self.select_elements(document)? {
                    collection
                        .push_element(Value::from_json_tagged(element))
                        .with_context(|| {
                            format!("{}: element #{pushed} rejected", source_path.display())
                        })?;
                    pushed += 1;
                }
            }
            log::debug!("{}: {pushed} elements", source_path.display());
        }
        Ok(collection)
    }

    fn read_documents(&self, source_path: &Path) -> Result<Vec<serde_json::Value>> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("failed to read source file {}", source_path.display()))?;
        if !self.ndjson {
            let document = serde_json::from_str(&source).with_context(|| {
                format!("failed to parse JSON source file {}", source_path.display())
            })?;
            return Ok(vec![document]);
        }
        source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str(line).with_context(|| {
                    format!("failed to parse NDJSON line {} of {}", number + 1, source_path.display())
                })
            })
            .collect()
    }

    /// Without a jq filter a top-level array contributes its items and anything
    /// else is one element. With one, every jq output is one element.
    fn select_elements(&self, document: serde_json::Value) -> Result<Vec<serde_json::Value>> {
        if let Some(jq_expr) = self.jq_expr.as_ref() {
            return crate::jq_exec::select_values(jq_expr, &document);
        }
        Ok(match document {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        })
    }
}

impl TransformOut {
    fn run(&self, transform: impl FnOnce(&Collection) -> typed_collection::Result<Collection>) -> Result<()> {
        let collection = self.input_settings.load_collection()?;
        let result = transform(&collection)?;
        write_output(self.out.as_deref(), &result)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Check(input_settings) => {
                let collection = input_settings.load_collection()?;
                println!(
                    "{} {} elements of type `{}`",
                    "ok".green().bold(),
                    collection.count(),
                    collection.type_name()
                );
                Ok(())
            }
            Command::Slice(args) => args.target.run(|c| c.slice(args.offset, args.length)),
            Command::Sort(target) => target.run(|c| c.sort_by(natural_order)),
            Command::Reverse(target) => target.run(Collection::reverse),
            Command::Take(args) => args.target.run(|c| c.take(args.count)),
            Command::Drop(args) => args.target.run(|c| c.drop(args.count)),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, collection: &Collection) -> Result<()> {
    let json = serde_json::Value::Array(collection.iter().map(Value::to_json).collect());
    let rendered = serde_json::to_string_pretty(&json)?;
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(out, &rendered)
                .with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Total order across kinds: numbers < strings < booleans < everything else
/// (compared by JSON text). Integers compare exactly; a float on either side
/// puts both on one numeric scale.
fn natural_order(a: &Value, b: &Value) -> Ordering {
    fn rank(v: &Value) -> u8 {
        match v {
            Value::Integer(_) | Value::Float(_) => 0,
            Value::String(_) => 1,
            Value::Bool(_) => 2,
            _ => 3,
        }
    }
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => OrderedFloat(x).cmp(&OrderedFloat(y)),
            _ => rank(a)
                .cmp(&rank(b))
                .then_with(|| a.to_string().cmp(&b.to_string())),
        },
    }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();
    for raw in patterns {
        let pattern = raw.as_ref();
        if !has_glob_chars(pattern) {
            out.push(PathBuf::from(pattern));
            continue;
        }
        let before = out.len();
        for entry in glob::glob(pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
            out.push(entry?);
        }
        if out.len() == before {
            bail!("glob pattern matched no files: {pattern}");
        }
    }
    Ok(out)
}
