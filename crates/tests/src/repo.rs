//! Tests about the repository itself.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

fn empty_set<T>(set: &BTreeSet<T>, msg: &str)
where
  T: Ord + std::fmt::Debug,
{
  assert!(set.is_empty(), "{msg}: {set:#?}");
}

fn root_dir() -> &'static Path {
  Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().parent().unwrap()
}

/// every `.rs` file under the directory, relative to the root.
fn rs_files(dir: &Path, out: &mut Vec<PathBuf>) {
  for entry in fs::read_dir(dir).unwrap() {
    let path = entry.unwrap().path();
    if path.is_dir() {
      rs_files(&path, out);
    } else if path.extension().is_some_and(|x| x == "rs") {
      out.push(path.strip_prefix(root_dir()).unwrap().to_owned());
    }
  }
}

fn all_rs_files() -> Vec<PathBuf> {
  let mut ret = Vec::<PathBuf>::new();
  rs_files(&root_dir().join("crates"), &mut ret);
  rs_files(&root_dir().join("xtask"), &mut ret);
  ret
}

#[test]
fn rs_file_comments() {
  let no_doc: BTreeSet<_> = all_rs_files()
    .into_iter()
    .filter(|file| {
      let out = fs::read_to_string(root_dir().join(file)).unwrap();
      let fst = out.lines().next().unwrap_or_default();
      !fst.starts_with("//! ")
    })
    .collect();
  empty_set(&no_doc, "rust files without doc comment at top");
}

#[test]
fn no_debugging() {
  // the uppercase + to_ascii_lowercase is to prevent this test from triggering on this file.
  let patterns = ["DBG!", "EPRINT"].map(|x| x.to_ascii_lowercase());
  let with_debugging: BTreeSet<_> = all_rs_files()
    .into_iter()
    .filter(|file| {
      let out = fs::read_to_string(root_dir().join(file)).unwrap();
      patterns.iter().any(|p| out.contains(p.as_str()))
    })
    .collect();
  empty_set(&with_debugging, "files with debugging");
}

#[test]
fn cargo_toml() {
  for entry in fs::read_dir(root_dir().join("crates")).unwrap() {
    let entry = entry.unwrap();
    let mut path = entry.path();
    path.push("Cargo.toml");
    let contents = fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    if !lines.by_ref().any(|line| matches!(line, "[dependencies]" | "[dev-dependencies]")) {
      continue;
    }
    let mut workspace = true;
    let mut ps = Vec::<&str>::new();
    for line in lines {
      if line.starts_with('[') {
        break;
      }
      if line.is_empty() {
        workspace = false;
        continue;
      }
      let (lhs, rhs) = line.split_once(" = ").unwrap();
      let (pkg, dot_what) = lhs.split_once('.').expect(lhs);
      match dot_what {
        "path" => {
          let mut ps_sorted = ps.clone();
          ps_sorted.sort_unstable();
          assert_eq!(ps, ps_sorted);
          ps.clear();
          workspace = false;
          let basename = rhs.strip_prefix("\"../").unwrap().strip_suffix('\"').unwrap();
          assert_eq!(pkg, basename);
        }
        "workspace" => {
          assert!(workspace);
          assert_eq!(rhs, "true");
        }
        _ => panic!("unknown dot_what: {dot_what}"),
      }
      ps.push(pkg);
    }
    let mut ps_sorted = ps.clone();
    ps_sorted.sort_unstable();
    assert_eq!(ps, ps_sorted);
  }
}
