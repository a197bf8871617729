//! Repository tasks: `cargo xtask ci` and `cargo xtask dist [--target <TARGET>]`.

use flate2::{Compression, write::GzEncoder};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::{env, fs, io};

const USAGE: &str = "usage: cargo xtask (ci | dist [--target <TARGET>])";

fn cargo<const N: usize>(args: [&str; N]) {
  let status = Command::new("cargo").args(args).status().expect("spawn cargo");
  assert!(status.success(), "cargo {args:?} failed");
}

fn ci() {
  cargo(["build", "--workspace"]);
  cargo(["fmt", "--", "--check"]);
  cargo(["clippy", "--workspace", "--tests"]);
  cargo(["test", "--workspace"]);
}

/// builds the CLI for release and gzips it into `binary/`.
fn dist(target: Option<&str>) {
  match target {
    None => cargo(["build", "--release", "--bin", "unsugar"]),
    Some(t) => cargo(["build", "--release", "--bin", "unsugar", "--target", t]),
  }
  let src: PathBuf = ["target"].into_iter().chain(target).chain(["release"]).collect();
  let src = src.join(format!("unsugar{}", env::consts::EXE_SUFFIX));
  fs::create_dir_all("binary").expect("create binary dir");
  let dst = match target {
    None => PathBuf::from("binary/unsugar.gz"),
    Some(t) => PathBuf::from(format!("binary/unsugar-{t}.gz")),
  };
  let mut input = io::BufReader::new(fs::File::open(&src).expect("open binary"));
  let mut encoder = GzEncoder::new(fs::File::create(&dst).expect("create gz"), Compression::best());
  io::copy(&mut input, &mut encoder).expect("gzip binary");
  encoder.finish().expect("finish gz");
  println!("wrote {}", dst.display());
}

fn main() {
  let mut args = pico_args::Arguments::from_env();
  let cmd = args.subcommand().expect("subcommand");
  let target: Option<String> = args.opt_value_from_str("--target").expect("target");
  let rest = args.finish();
  assert!(rest.is_empty(), "unexpected arguments: {rest:?}");
  let root = Path::new(env!("CARGO_MANIFEST_DIR")).parent().expect("root dir");
  env::set_current_dir(root).expect("set dir");
  match cmd.as_deref() {
    Some("ci") if target.is_none() => ci(),
    Some("dist") => dist(target.as_deref()),
    _ => println!("{USAGE}"),
  }
}
