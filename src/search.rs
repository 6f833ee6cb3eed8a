use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bytes::Bytes;
use log::{debug, warn};

use crate::config::Config;
use crate::input;
use crate::pattern::Pattern;

/// Totals for one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub matched_lines: usize,
    pub errors: usize,
}

impl Summary {
    /// 0 when something matched, 1 when nothing did, 2 after any error.
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            2
        } else if self.matched_lines > 0 {
            0
        } else {
            1
        }
    }
}

/// Write every line of `buffer` that matches `pattern` to `out`, prefixed
/// with `label:` when a label is given. Returns the number of lines written.
pub fn search_buffer(
    pattern: &Pattern,
    buffer: Bytes,
    label: Option<&str>,
    out: &mut impl Write,
) -> io::Result<usize> {
    let mut matched = 0;
    for line in input::lines(buffer) {
        let text = String::from_utf8_lossy(&line);
        if !pattern.matches(&text) {
            continue;
        }
        matched += 1;
        match label {
            Some(label) => writeln!(out, "{}:{}", label, text)?,
            None => writeln!(out, "{}", text)?,
        }
    }
    Ok(matched)
}

/// Run a whole search as described by `config`.
///
/// Problems with individual paths are reported to `diagnostics` and counted;
/// only failures to write output abort the run.
pub fn run(
    pattern: &Pattern,
    config: &Config,
    out: &mut impl Write,
    diagnostics: &mut impl Write,
) -> Result<Summary> {
    let mut summary = Summary::default();

    if config.paths.is_empty() {
        let buffer = input::read_all(io::stdin().lock())?;
        summary.matched_lines += search_buffer(pattern, buffer, None, out)?;
        return Ok(summary);
    }

    for path in &config.paths {
        let files = match files_under(path, config.recursive) {
            Ok(files) => files,
            Err(err) => {
                report(diagnostics, &mut summary, &err)?;
                continue;
            }
        };

        for file in files {
            let buffer = match input::read_file(&file) {
                Ok(buffer) => buffer,
                Err(err) => {
                    report(diagnostics, &mut summary, &err)?;
                    continue;
                }
            };
            let label = file.display().to_string();
            let label = config.prefix_paths().then_some(label.as_str());
            summary.matched_lines += search_buffer(pattern, buffer, label, out)
                .context("error writing output")?;
        }
    }

    debug!("search finished: {:?}", summary);
    Ok(summary)
}

fn report(diagnostics: &mut impl Write, summary: &mut Summary, err: &anyhow::Error) -> Result<()> {
    warn!("{:#}", err);
    summary.errors += 1;
    writeln!(diagnostics, "tinygrep: {:#}", err).context("error writing diagnostics")
}

/// The files to search for `path`: the path itself, or with `recursive`
/// every file below it in sorted order.
pub fn files_under(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(path).with_context(|| format!("error opening {:?}", path))?;
    if !metadata.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !recursive {
        bail!("{:?} is a directory", path);
    }

    let mut files = Vec::new();
    walk(path, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("error reading directory {:?}", dir))?
        .map(|entry| entry.and_then(|entry| Ok((entry.path(), entry.file_type()?))))
        .collect::<io::Result<Vec<_>>>()
        .with_context(|| format!("error reading directory {:?}", dir))?;
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (entry, file_type) in entries {
        if file_type.is_dir() {
            walk(&entry, files)?;
        } else if file_type.is_symlink() && entry.is_dir() {
            // linked directories below the root are not followed
            debug!("skipping directory symlink {:?}", entry);
        } else {
            files.push(entry);
        }
    }
    Ok(())
}
