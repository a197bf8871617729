//! A CLI for lowering a program.

use anyhow::{Context as _, Result, bail};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
  better_panic::Settings::new()
    .message("unsugar crashed. this is a bug, please report it.")
    .verbosity(better_panic::Verbosity::Medium)
    .install();
  env_logger::init();
  let args = match get_args() {
    Err(e) => {
      println!("error parsing args: {e}");
      return ExitCode::FAILURE;
    }
    Ok(None) => return ExitCode::SUCCESS,
    Ok(Some(x)) => x,
  };
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      println!("error: {e:#}");
      ExitCode::FAILURE
    }
  }
}

struct Args {
  file: PathBuf,
  passes: Option<PathBuf>,
  output: Option<PathBuf>,
  stdout: bool,
}

fn get_args() -> Result<Option<Args>> {
  let mut args = pico_args::Arguments::from_env();
  if args.contains(["-h", "--help"]) {
    println!("usage:");
    println!("  unsugar [<option>...] <file>");
    println!();
    println!("options:");
    println!("  -h, --help");
    println!("    show this help");
    println!("  -p, --passes <file>");
    println!("    only run the passes named in <file>, one per line");
    println!("    defaults to every pass");
    println!("  -o, --output <file>");
    println!("    write to <file>");
    println!("    defaults to overwriting the input");
    println!("  --stdout");
    println!("    print the output instead of writing it");
    println!();
    return Ok(None);
  }
  let passes = args.opt_value_from_str::<_, PathBuf>(["-p", "--passes"])?;
  let output = args.opt_value_from_str::<_, PathBuf>(["-o", "--output"])?;
  let stdout = args.contains("--stdout");
  let file = args.free_from_str::<PathBuf>()?;
  let rest = args.finish();
  if !rest.is_empty() {
    bail!("unexpected arguments: {rest:?}");
  }
  Ok(Some(Args { file, passes, output, stdout }))
}

fn run(args: &Args) -> Result<()> {
  let passes = match &args.passes {
    None => unsugar_lower::Passes::all(),
    Some(path) => {
      let contents = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read {}", path.display()))?;
      unsugar_lower::Passes::from_keywords(&contents)
        .with_context(|| format!("{}: bad pass selection", path.display()))?
    }
  };
  let src = std::fs::read_to_string(&args.file)
    .with_context(|| format!("couldn't read {}", args.file.display()))?;
  let parse =
    unsugar_parse::get(&src).with_context(|| format!("{}: couldn't parse", args.file.display()))?;
  log::debug!("declared functions: {:?}", parse.functions.keys().collect::<Vec<_>>());
  let lower = unsugar_lower::get(parse.nodes, &passes)
    .with_context(|| format!("{}: couldn't lower", args.file.display()))?;
  let mut options = unsugar_emit::Options::default();
  if let Some(indent) = parse.indent {
    options.indent = indent;
  }
  let out = unsugar_emit::get(&lower.nodes, &lower.helpers, &options);
  if args.stdout {
    print!("{out}");
    return Ok(());
  }
  let dest = args.output.as_ref().unwrap_or(&args.file);
  std::fs::write(dest, out).with_context(|| format!("couldn't write {}", dest.display()))?;
  log::info!("wrote {}", dest.display());
  Ok(())
}
