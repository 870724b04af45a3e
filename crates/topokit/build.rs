use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;

// cli.rs only depends on clap + clap_complete, both build-dependencies.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .expect("OUT_DIR not set by Cargo")
        .into();
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).expect("failed to create man output directory");

    let mut pages = Vec::new();
    render_pages(&cli::Cli::command(), &man_dir, &mut pages);

    // Embedded by `topokit man`, root page first.
    let mut index = String::from("pub const MAN_PAGES: &[(&str, &str)] = &[\n");
    for (name, path) in &pages {
        writeln!(index, "    ({name:?}, include_str!({:?})),", path.display().to_string())
            .expect("writing to a String cannot fail");
    }
    index.push_str("];\n");
    fs::write(out_dir.join("man_pages.rs"), index).expect("failed to write man page index");
}

/// Render `<name>.1` for a command and every visible subcommand, collecting
/// `(name, path)` pairs in depth-first order.
fn render_pages(cmd: &clap::Command, dir: &Path, pages: &mut Vec<(String, PathBuf)>) {
    let name = cmd.get_name().to_owned();
    let path = dir.join(format!("{name}.1"));

    let mut buf = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buf)
        .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
    fs::write(&path, buf).unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    pages.push((name.clone(), path));

    for sub in cmd.get_subcommands().filter(|sub| !sub.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        render_pages(&sub, dir, pages);
    }
}
