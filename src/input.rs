use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use bytes::{Buf, Bytes};

/// Read a whole file into a shared buffer.
pub fn read_file(path: &Path) -> Result<Bytes> {
    let data = fs::read(path).with_context(|| format!("error opening {:?}", path))?;
    Ok(Bytes::from(data))
}

/// Read everything from `reader`.
pub fn read_all(mut reader: impl Read) -> Result<Bytes> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .context("error reading input")?;
    Ok(Bytes::from(data))
}

/// Iterator over the `\n`-terminated lines of a buffer.
///
/// Lines share the buffer's storage. The terminating `\n` is stripped; a
/// final newline does not produce an extra empty line.
#[derive(Debug, Clone)]
pub struct Lines {
    remaining: Bytes,
}

pub fn lines(buffer: Bytes) -> Lines {
    Lines { remaining: buffer }
}

impl Iterator for Lines {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        if !self.remaining.has_remaining() {
            return None;
        }

        match self.remaining.iter().position(|b| *b == b'\n') {
            Some(newline) => {
                let line = self.remaining.split_to(newline);
                self.remaining.advance(1);
                Some(line)
            }
            None => Some(self.remaining.split_off(0)),
        }
    }
}
