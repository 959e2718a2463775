use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, StdinLock, StdoutLock, Write};
use std::path::Path;

use tracing::debug;

use crate::models::errors::Error;

/// Where converted text comes from. Only the `File` variant is owned and
/// closed by the driver.
pub enum Input {
    Stdin(StdinLock<'static>),
    File(BufReader<File>),
}

/// Where converted text goes. Only the `File` variant is owned and closed by
/// the driver.
pub enum Output {
    Stdout(StdoutLock<'static>),
    File(BufWriter<File>),
}

/// A writable destination that must be released explicitly once a run ends.
pub trait Sink: Write {
    fn close(self) -> io::Result<()>;
}

pub fn open_input(path: Option<&Path>) -> Result<Input, Error> {
    let path = match path {
        None => return Ok(Input::Stdin(io::stdin().lock())),
        Some(path) => path,
    };

    debug!("opening input {}", path.display());
    match File::open(path) {
        Ok(file) => Ok(Input::File(BufReader::new(file))),
        Err(source) => Err(Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub fn open_output(path: Option<&Path>) -> Result<Output, Error> {
    let path = match path {
        None => return Ok(Output::Stdout(io::stdout().lock())),
        Some(path) => path,
    };

    debug!("opening output {}", path.display());
    match File::create(path) {
        Ok(file) => Ok(Output::File(BufWriter::new(file))),
        Err(source) => Err(Error::FileNotWritable {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl Input {
    pub fn is_owned(&self) -> bool {
        matches!(self, Input::File(_))
    }
}

impl Output {
    pub fn is_owned(&self) -> bool {
        matches!(self, Output::File(_))
    }
}

impl Sink for Output {
    /// Flushes pending output and releases the stream. Files are synced and
    /// closed, standard output stays open.
    fn close(self) -> io::Result<()> {
        match self {
            Output::Stdout(mut out) => out.flush(),
            Output::File(writer) => {
                let file = writer.into_inner().map_err(|err| err.into_error())?;
                file.sync_all()
            }
        }
    }
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Stdin(r) => r.read(buf),
            Input::File(r) => r.read(buf),
        }
    }
}

impl BufRead for Input {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::Stdin(r) => r.fill_buf(),
            Input::File(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::Stdin(r) => r.consume(amt),
            Input::File(r) => r.consume(amt),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(w) => w.write(buf),
            Output::File(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(w) => w.flush(),
            Output::File(w) => w.flush(),
        }
    }
}
