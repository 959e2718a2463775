use std::error::Error as _;
use std::ffi::OsString;
use std::io;

use tracing::debug;

use crate::driver;
use crate::models::banner::Banner;
use crate::models::options::{Action, OptionSet};
use crate::pipeline::PipelineBuilder;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Parses `args` and runs the selected action, returning the process exit status.
pub fn main_with<I, T, B, W>(args: I, banner: &Banner, builder: &B, console: W) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    B: PipelineBuilder,
    W: io::Write,
{
    let options = OptionSet::parse_from(args);
    run(&options, banner, builder, console)
}

/// Dispatches one invocation. Version and help text go to `console`;
/// conversion failures are reported on stderr and turn into a failure status.
pub fn run<B: PipelineBuilder, W: io::Write>(
    options: &OptionSet,
    banner: &Banner,
    builder: &B,
    mut console: W,
) -> u8 {
    debug!("options: {:?}", options);

    let text = match options.action {
        Action::ShowVersion => banner.version_text(),
        Action::ShowHelp => banner.usage_text(),
        Action::Convert => {
            return convert(options, banner, builder);
        }
    };

    if let Err(err) = console.write_all(text.as_bytes()).and_then(|_| console.flush()) {
        debug!("failed to print {:?} text: {}", options.action, err);
    }

    EXIT_SUCCESS
}

fn convert<B: PipelineBuilder>(options: &OptionSet, banner: &Banner, builder: &B) -> u8 {
    let result = driver::run(
        builder,
        options.input.as_deref(),
        options.output.as_deref(),
        &options.config,
    );

    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => {
            debug!("conversion failed: {}, cause: {:?}", err, err.source());
            eprintln!("{}: {}", banner.program, err);
            EXIT_FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use crate::pipeline::IdentityBuilder;

    /// Shared buffer standing in for stderr.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("capture lock poisoned").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn conversion_failure_is_not_repeated_in_error_log() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let code = tracing::subscriber::with_default(subscriber, || {
            main_with(
                ["cconv", "-i", "/nonexistent/in.txt"],
                &Banner::DEFAULT,
                &IdentityBuilder,
                Vec::new(),
            )
        });

        assert_eq!(code, EXIT_FAILURE);
        assert!(captured.0.lock().expect("capture lock poisoned").is_empty());
    }

    #[test]
    fn version_prints_banner_without_touching_paths() {
        let mut console = Vec::new();
        let code = main_with(
            ["cconv", "-v", "-i", "/nonexistent/in.txt", "-o", "/nonexistent/dir/out.txt"],
            &Banner::DEFAULT,
            &IdentityBuilder,
            &mut console,
        );

        assert_eq!(code, EXIT_SUCCESS);
        assert_eq!(
            String::from_utf8(console).expect("console is not utf-8"),
            Banner::DEFAULT.version_text()
        );
    }

    #[test]
    fn help_and_unknown_flags_print_usage() {
        for flag in ["-h", "--help", "-?", "--bogus"] {
            let mut console = Vec::new();
            let code = main_with(
                ["cconv", flag, "-o", "/nonexistent/dir/out.txt"],
                &Banner::DEFAULT,
                &IdentityBuilder,
                &mut console,
            );

            assert_eq!(code, EXIT_SUCCESS, "failed: {}", flag);
            assert_eq!(
                String::from_utf8(console).expect("console is not utf-8"),
                Banner::DEFAULT.usage_text(),
                "failed: {}",
                flag
            );
        }
    }
}
