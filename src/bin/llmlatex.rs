//! llmlatex CLI - Render LaTeX-laden LLM output as plain Unicode text

#[cfg(feature = "cli")]
use clap::{Parser as ClapParser, ValueEnum};
#[cfg(feature = "cli")]
use llmlatex::{
    default_known_names, diagnostics::check_text, diagnostics::format_diagnostics,
    enumerate_macros, load_known_names, FormatOptions, Formatter, Parser, ScriptStyle,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, IsTerminal, Read, Write};
#[cfg(feature = "cli")]
use std::process::ExitCode;
#[cfg(feature = "cli")]
use std::sync::Arc;
#[cfg(feature = "cli")]
use tracing::debug;

#[cfg(feature = "cli")]
#[derive(ClapParser)]
#[command(name = "llmlatex")]
#[command(version)]
#[command(about = "Render LaTeX-laden LLM output as plain Unicode text", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Write scripts with Unicode super/subscript characters where possible
    #[arg(long)]
    unicode_scripts: bool,

    /// Keep math children as written instead of spacing out operators
    #[arg(long)]
    no_math_spacing: bool,

    /// Render commands without a renderer as their arguments instead of failing
    #[arg(long)]
    passthrough_unknown: bool,

    /// File with the recognized command names, one per line
    #[arg(long, value_name = "FILE", conflicts_with = "no_known_names")]
    known_names: Option<String>,

    /// Accept every command name as written (no prefix recovery or dropping)
    #[arg(long)]
    no_known_names: bool,

    /// Symbol override table (.json, .yaml or .toml)
    #[arg(long, value_name = "FILE")]
    overrides: Option<String>,

    /// Print the parsed tree as JSON instead of rendering
    #[arg(long)]
    tree: bool,

    /// Print the command names used in the input, one per line
    #[arg(long)]
    macros: bool,

    /// Check mode - report markup the conversion would drop or fail on
    #[arg(long)]
    check: bool,

    /// When to color check output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Log parser decisions to stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum ColorChoice {
    /// Color when writing to a terminal
    Auto,
    Always,
    Never,
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("llmlatex={}", default_level).into()),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Read input
    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if cli.macros {
        let names: Vec<String> = enumerate_macros(&input).into_iter().collect();
        write_output(cli, &names.join("\n"))?;
        return Ok(ExitCode::SUCCESS);
    }

    let parser = build_parser(cli)?;
    let formatter = build_formatter(cli)?;

    // If check mode, analyze and report issues
    if cli.check {
        let result = check_text(&input, &parser, &formatter);
        let use_color = match cli.color {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        };
        println!("{}", format_diagnostics(&result, use_color));

        // Exit with error code if there are errors
        return Ok(if result.has_errors() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let nodes = parser.parse(&input);
    debug!(nodes = nodes.len(), "parsed input");

    if cli.tree {
        let json = serde_json::to_string_pretty(&nodes)?;
        write_output(cli, &json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let rendered = formatter.render(&nodes)?;
    write_output(cli, &rendered)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "cli")]
fn build_parser(cli: &Cli) -> Result<Parser, Box<dyn std::error::Error>> {
    if cli.no_known_names {
        return Ok(Parser::new());
    }
    let known = match cli.known_names {
        Some(ref path) => Arc::new(load_known_names(path)?),
        None => default_known_names(),
    };
    Ok(Parser::with_known_names(known))
}

#[cfg(feature = "cli")]
fn build_formatter(cli: &Cli) -> Result<Formatter, Box<dyn std::error::Error>> {
    let options = FormatOptions {
        math_spacing: !cli.no_math_spacing,
        script_style: if cli.unicode_scripts {
            ScriptStyle::Unicode
        } else {
            ScriptStyle::Braced
        },
        passthrough_unknown: cli.passthrough_unknown,
    };
    let builder = Formatter::builder().options(options);

    match cli.overrides {
        #[cfg(feature = "data-loading")]
        Some(ref path) => Ok(builder
            .overrides(llmlatex::data::load_symbol_overrides(path)?)
            .build()),
        #[cfg(not(feature = "data-loading"))]
        Some(_) => Err("--overrides requires the data-loading feature".into()),
        None => Ok(builder.build()),
    }
}

#[cfg(feature = "cli")]
fn write_output(cli: &Cli, content: &str) -> io::Result<()> {
    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", content)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install llmlatex --features cli");
    eprintln!("  llmlatex [OPTIONS] [INPUT_FILE]");
}
