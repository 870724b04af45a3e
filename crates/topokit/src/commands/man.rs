//! `man`: man pages rendered at build time.

use std::io::Write;

use crate::cli::ManArgs;
use crate::error::CliError;
use crate::output;

mod pages {
    include!(concat!(env!("OUT_DIR"), "/man_pages.rs"));
}

use pages::MAN_PAGES;

pub fn handle(args: &ManArgs, quiet: bool) -> Result<(), CliError> {
    let Some(dir) = &args.out else {
        let page = MAN_PAGES.first().map_or("", |(_, page)| page);
        let _ = std::io::stdout().lock().write_all(page.as_bytes());
        return Ok(());
    };

    std::fs::create_dir_all(dir).map_err(|source| CliError::WriteFailed {
        path: dir.display().to_string(),
        source,
    })?;
    for (name, page) in MAN_PAGES {
        let path = dir.join(format!("{name}.1"));
        std::fs::write(&path, page).map_err(|source| CliError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;
        output::print_output(&format!("Wrote {}", path.display()), quiet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_page_comes_first() {
        let names: Vec<_> = MAN_PAGES.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.first(), Some(&"topokit"));
        assert!(names.contains(&"topokit-build"));
        assert!(names.contains(&"topokit-config-show"));
        assert!(MAN_PAGES.iter().all(|(_, page)| page.contains(".TH")));
    }
}
