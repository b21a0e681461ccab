use std::path::{Path, PathBuf};

use anyhow::Context as _;
use canvas_export::{
    ArtworkDocument, CompileOptions, CompiledDocument, DocumentCompiler, EmitOptions,
    TypeScriptEmitter,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "canvas-export", version)]
struct Cli {
    /// Log compile decisions (debug level). `RUST_LOG` is used otherwise.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an artwork document into a TypeScript canvas module.
    Compile(CompileArgs),
    /// Print functions, patterns, bounds and warnings of a compiled document.
    Info(InputArgs),
    /// Print the compiled document as JSON.
    Dump(InputArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input artwork JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output TypeScript path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// JSON file with `compile` and `emit` option objects.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Leave the clock runtime out of animated output.
    #[arg(long, default_value_t = false)]
    no_runtime: bool,

    /// Emit origin markers and a debug summary comment.
    #[arg(long, default_value_t = false)]
    debug: bool,
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input artwork JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// JSON file with `compile` and `emit` option objects.
    #[arg(long)]
    options: Option<PathBuf>,
}

/// Contents of an `--options` file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct OptionsFile {
    compile: CompileOptions,
    emit: EmitOptions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Info(args) => cmd_info(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(path: Option<&Path>) -> anyhow::Result<OptionsFile> {
    let Some(path) = path else {
        return Ok(OptionsFile::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read options '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse options '{}'", path.display()))
}

fn compile(
    in_path: &Path,
    options: &CompileOptions,
) -> anyhow::Result<(ArtworkDocument, CompiledDocument)> {
    let doc = ArtworkDocument::from_path(in_path)
        .with_context(|| format!("load artwork '{}'", in_path.display()))?;
    let compiled = DocumentCompiler::new(options.clone())
        .compile(&doc)
        .with_context(|| format!("compile '{}'", in_path.display()))?;
    Ok((doc, compiled))
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let mut options = load_options(args.options.as_deref())?;
    if args.no_runtime {
        options.emit.include_runtime = false;
    }
    if args.debug {
        options.emit.debug = true;
    }

    let (doc, compiled) = compile(&args.in_path, &options.compile)?;
    for warning in &compiled.warnings {
        eprintln!("warning: {warning}");
    }
    let source = TypeScriptEmitter::new(&compiled, &doc, options.emit)
        .emit()
        .context("emit typescript")?;

    let Some(out) = args.out else {
        print!("{source}");
        return Ok(());
    };
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, source).with_context(|| format!("write '{}'", out.display()))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_info(args: InputArgs) -> anyhow::Result<()> {
    let options = load_options(args.options.as_deref())?;
    let (_, compiled) = compile(&args.in_path, &options.compile)?;

    let b = compiled.bounds;
    println!(
        "Bounds: left={} top={} width={} height={}",
        b.left,
        b.top,
        compiled.width(),
        compiled.height()
    );
    println!("Animated: {}", compiled.has_animation);
    print!("{}", compiled.functions.debug_info());
    println!("Patterns: {}", compiled.patterns.len());
    for pattern in compiled.patterns.iter() {
        match pattern.canvas {
            Some(canvas) => println!(
                "- {}: symbol={}, canvas={}",
                pattern.name, pattern.is_symbol, canvas.0
            ),
            None => println!("- {}: symbol={}", pattern.name, pattern.is_symbol),
        }
    }
    println!("Warnings: {}", compiled.warnings.len());
    for warning in &compiled.warnings {
        println!("- {warning}");
    }
    Ok(())
}

fn cmd_dump(args: InputArgs) -> anyhow::Result<()> {
    let options = load_options(args.options.as_deref())?;
    let (_, compiled) = compile(&args.in_path, &options.compile)?;
    let json = serde_json::to_string_pretty(&compiled).context("serialize compiled document")?;
    println!("{json}");
    Ok(())
}
