mod config;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use blocks::{LoadError, Registry, ReservedWords, Workspace};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Severity};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use codegen::{Board, CompileRequest, Driver};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "blockc", version, about = "Block workspace to Arduino sketch compiler")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the sketch for a workspace file
    Generate(GenerateArgs),

    /// Load and generate without writing output; report identifier warnings
    Check(CheckArgs),

    /// Print the block toolbox as JSON
    Toolbox,

    /// Print the reserved identifiers, one per line
    Reserved,

    /// Run .test.json case files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Workspace JSON file
    file: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target board (uno, nano, mega or an arduino:avr FQBN)
    #[arg(long)]
    board: Option<Board>,

    /// Emit a compile-service request body instead of bare code
    #[arg(long)]
    request: bool,

    /// Project config file (defaults to ./blockc.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(clap::Args)]
struct CheckArgs {
    /// Workspace JSON file
    file: PathBuf,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.json file or a directory containing them
    path: PathBuf,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Generate(args) => do_generate(args, cli.no_color),
        Command::Check(args) => do_check(args, cli.no_color),
        Command::Toolbox => {
            let toolbox = Registry::arduino().toolbox();
            match serde_json::to_string_pretty(&toolbox) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&format!("cannot serialise toolbox: {}", e)),
            }
        }
        Command::Reserved => {
            for word in ReservedWords::get().iter() {
                println!("{}", word);
            }
        }
        Command::Test(args) => {
            if args.list_categories {
                test_runner::list_categories(&args.path);
                return;
            }
            let exit_code = test_runner::run_tests(&args.path, cli.no_color, &args.category);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn color_choice(no_color: bool) -> ColorChoice {
    if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

/// Read and load a workspace file, printing load diagnostics and exiting on failure.
fn load(path: &Path, registry: &Registry, no_color: bool) -> Workspace {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => fail(&format!("cannot read '{}': {}", path.display(), e)),
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(path.display().to_string(), source.clone());

    match blocks::load_workspace(&source, file_id, registry) {
        Ok(workspace) => workspace,
        Err(errors) => {
            emit_load_errors(&files, &errors, no_color);
            process::exit(1);
        }
    }
}

fn emit_load_errors(files: &SimpleFiles<String, String>, errors: &[LoadError], no_color: bool) {
    let writer = StandardStream::stderr(color_choice(no_color));
    let config = term::Config::default();
    for error in errors {
        let diagnostic = error.to_diagnostic();
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, &diagnostic);
    }
}

fn do_generate(args: GenerateArgs, no_color: bool) {
    let config = match Config::load(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };
    let board = match args.board {
        Some(board) => board,
        None => match config.board() {
            Ok(board) => board.unwrap_or_default(),
            Err(e) => fail(&e),
        },
    };
    let output = args.output.or(config.output);

    let registry = Registry::arduino();
    let workspace = load(&args.file, &registry, no_color);

    let mut driver = Driver::new(&registry, Vec::new());
    let code = match driver.on_graph_changed(&workspace) {
        Ok(code) => code,
        Err(e) => fail(&e.to_string()),
    };

    let text = if args.request {
        match CompileRequest::new(code, board).to_json() {
            Ok(json) => json + "\n",
            Err(e) => fail(&format!("cannot serialise request: {}", e)),
        }
    } else {
        code
    };

    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, text) {
                fail(&format!("cannot write '{}': {}", path.display(), e));
            }
            tracing::info!(path = %path.display(), %board, "wrote sketch");
        }
        None => print!("{}", text),
    }
}

fn do_check(args: CheckArgs, no_color: bool) {
    let registry = Registry::arduino();
    let workspace = load(&args.file, &registry, no_color);

    let writer = StandardStream::stderr(color_choice(no_color));
    let config = term::Config::default();
    let files: SimpleFiles<String, String> = SimpleFiles::new();
    for warning in workspace.identifier_warnings(&registry, ReservedWords::get()) {
        let diagnostic = Diagnostic::new(Severity::Warning).with_message(warning.to_string());
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }

    let roots = workspace.program_roots(&registry);
    match codegen::generate(&registry, &workspace, &roots) {
        Ok(code) => eprintln!(
            "ok: {} generates {} line(s) from {} block(s)",
            args.file.display(),
            code.lines().count(),
            workspace.len()
        ),
        Err(e) => fail(&e.to_string()),
    }
}
