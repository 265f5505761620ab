use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result, WrapErr};
use objdraw::{Command, Dispatcher, DispatcherConfig, Outcome, SvgCanvas, SvgOptions};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "objdraw", version, about = "Build 2D drawings from shape commands")]
struct Args {
    /// Script to execute. Commands are read from stdin when omitted.
    script: Option<PathBuf>,

    /// SVG file to write on exit, or '-' for stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Pixels per drawing unit
    #[arg(long, default_value_t = SvgOptions::default().scale)]
    scale: f64,

    /// Maximum nesting of execute_file
    #[arg(long = "max-depth", default_value_t = DispatcherConfig::MAX_SCRIPT_DEPTH)]
    max_depth: usize,
}

fn main() -> Result<ExitCode> {
    // stdout may carry the SVG, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = SvgOptions {
        scale: args.scale,
        ..Default::default()
    };
    let config = DispatcherConfig::default().with_max_script_depth(args.max_depth);
    let mut dispatcher = Dispatcher::new(SvgCanvas::new(options)).with_config(config);

    let ok = match &args.script {
        Some(path) => run_script(&mut dispatcher, path),
        None => run_interactive(&mut dispatcher)?,
    };

    if let Some(output) = &args.output {
        write_svg(dispatcher.sink(), output)?;
    }

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn report(outcome: &Outcome) {
    eprintln!("{outcome}");
}

fn run_script(dispatcher: &mut Dispatcher<SvgCanvas>, path: &Path) -> bool {
    let cmd = Command::new("execute_file").with_arg("file_path", path.to_string_lossy());
    let outcome = dispatcher.execute(&cmd);
    report(&outcome);
    outcome.success
}

fn run_interactive(dispatcher: &mut Dispatcher<SvgCanvas>) -> Result<bool> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    let mut lines = stdin.lock().lines();

    loop {
        if prompt {
            print!("> ");
            io::stdout().flush().into_diagnostic()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.into_diagnostic().wrap_err("failed to read from stdin")?;

        match line.trim() {
            "" => report(&Outcome::failed(
                "Empty command. Please enter a valid command.",
            )),
            "quit" | "exit" => break,
            "list" => list_shapes(dispatcher),
            raw => match objdraw::parse(raw) {
                Ok(cmd) => report(&dispatcher.execute(&cmd)),
                Err(err) => eprintln!("{:?}", miette::Report::new(err)),
            },
        }
    }

    Ok(true)
}

fn list_shapes(dispatcher: &Dispatcher<SvgCanvas>) {
    let lines = dispatcher.registry().describe();
    if lines.is_empty() {
        report(&Outcome::ok("No objects."));
    }
    for line in lines {
        report(&Outcome::ok(line));
    }
}

fn write_svg(canvas: &SvgCanvas, output: &Path) -> Result<()> {
    let svg = canvas.to_svg();
    if output == Path::new("-") {
        io::stdout().write_all(svg.as_bytes()).into_diagnostic()?;
        return Ok(());
    }

    std::fs::write(output, svg)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write {}", output.display()))?;
    tracing::info!(path = %output.display(), "wrote drawing");
    Ok(())
}
