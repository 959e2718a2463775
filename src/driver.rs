use std::io::{self, BufRead, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::models::errors::Error;
use crate::pipeline::{Pipeline, PipelineBuilder};
use crate::streams::{self, Sink};

/// Outcome of a successful conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub lines: usize,
    /// the reader of the output went away before input was exhausted
    pub output_closed: bool,
}

pub struct ConversionDriver<P> {
    pipeline: P,
}

impl<P: Pipeline> ConversionDriver<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn build<B>(builder: &B, config: &str) -> Result<Self, Error>
    where
        B: PipelineBuilder<Pipeline = P>,
    {
        let pipeline = builder.build(config)?;
        Ok(Self::new(pipeline))
    }

    /// Converts `input_path` (stdin when unset) into `output_path` (stdout
    /// when unset). The input is opened first so a missing input never
    /// truncates the output file.
    pub fn run(&self, input_path: Option<&Path>, output_path: Option<&Path>) -> Result<Summary, Error> {
        let mut input = streams::open_input(input_path)?;
        let mut output = streams::open_output(output_path)?;
        debug!(
            "streams ready, input owned: {}, output owned: {}",
            input.is_owned(),
            output.is_owned()
        );

        let summary = self.convert_into(&mut input, output)?;
        info!("converted {} lines", summary.lines);
        Ok(summary)
    }

    /// Runs [`process`](Self::process) and then closes `output`. Once the
    /// reader of `output` has gone away nothing more is flushed, and a broken
    /// pipe reported by the final flush still counts as success.
    pub fn convert_into<R: BufRead, S: Sink>(&self, input: R, mut output: S) -> Result<Summary, Error> {
        let summary = self.process(input, &mut output)?;
        if summary.output_closed {
            return Ok(summary);
        }

        match output.close() {
            Ok(()) => Ok(summary),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!("output closed while flushing");
                Ok(Summary {
                    output_closed: true,
                    ..summary
                })
            }
            Err(err) => Err(Error::Write(err)),
        }
    }

    /// Reads `input` line by line, writing each converted line to `output`
    /// with a `\n` terminator and flushing before the next read.
    ///
    /// `\n` and `\r\n` terminators are stripped before conversion. A final
    /// line without a terminator still gets one on output. If the reader of
    /// `output` goes away the run ends early without error.
    pub fn process<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<Summary, Error> {
        let mut buf = String::new();
        let mut lines = 0;
        let mut output_closed = false;

        loop {
            buf.clear();
            if input.read_line(&mut buf).map_err(Error::Read)? == 0 {
                break;
            }

            let converted = self.pipeline.convert(strip_terminator(&buf));
            match write_line(&mut output, &converted) {
                Ok(()) => lines += 1,
                Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                    debug!("output closed after {} lines", lines);
                    output_closed = true;
                    break;
                }
                Err(err) => return Err(Error::Write(err)),
            }
        }

        Ok(Summary { lines, output_closed })
    }
}

/// Builds the pipeline named by `config` and runs one conversion.
pub fn run<B: PipelineBuilder>(
    builder: &B,
    input_path: Option<&Path>,
    output_path: Option<&Path>,
    config: &str,
) -> Result<Summary, Error> {
    let driver = ConversionDriver::build(builder, config)?;
    driver.run(input_path, output_path)
}

fn write_line<W: Write>(output: &mut W, line: &str) -> io::Result<()> {
    output.write_all(line.as_bytes())?;
    output.write_all(b"\n")?;
    output.flush()
}

fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
