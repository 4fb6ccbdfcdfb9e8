//! Pipeline output channel.
//!
//! The hosting runner consumes two surfaces:
//! - Named outputs, appended to the file named by `GITHUB_OUTPUT` (with a
//!   `::set-output` fallback for runners that predate the file)
//! - Workflow commands on stdout (`::error::`, `::debug::`)
//!
//! [`OutputGuard`] carries the obligation to publish `run_result` exactly
//! once: acquired at entry, discharged on drop, whichever way the
//! invocation exits.

use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use uuid::Uuid;

/// Name of the single output this action publishes
pub const OUTPUT_RUN_RESULT: &str = "run_result";

/// Environment variable naming the runner's output file
pub const ENV_GITHUB_OUTPUT: &str = "GITHUB_OUTPUT";

/// Escape a command value (`%`, CR, LF survive the command grammar)
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property (additionally `:` and `,`)
fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// Emit an error annotation on the runner's error channel
pub fn error(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// Emit a debug line (visible when the runner's debug logging is on)
pub fn debug(message: &str) {
    println!("::debug::{}", escape_data(message));
}

/// Publish a named output value.
///
/// Appends to the `GITHUB_OUTPUT` file when the runner provides one,
/// otherwise falls back to the legacy stdout command.
pub fn set_output(name: &str, value: &str) -> io::Result<()> {
    match env::var(ENV_GITHUB_OUTPUT) {
        Ok(path) if !path.is_empty() => append_output(Path::new(&path), name, value),
        _ => {
            println!(
                "::set-output name={}::{}",
                escape_property(name),
                escape_data(value)
            );
            Ok(())
        }
    }
}

/// Append a heredoc-delimited record, so multi-line values round-trip
fn append_output(path: &Path, name: &str, value: &str) -> io::Result<()> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(io::Error::other("output value collides with delimiter"));
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}<<{}", name, delimiter)?;
    writeln!(file, "{}", value)?;
    writeln!(file, "{}", delimiter)?;
    Ok(())
}

/// Obligation to publish one output exactly once.
///
/// The value starts empty; the holder may replace it any number of times
/// before the guard goes out of scope. Drop performs the single write, so
/// every exit path, early returns and error paths included, publishes.
#[derive(Debug)]
pub struct OutputGuard {
    name: &'static str,
    value: String,
}

impl OutputGuard {
    /// Acquire the obligation for the named output, initial value empty
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            value: String::new(),
        }
    }

    /// Replace the value the guard will publish
    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value currently slated for publication
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        if let Err(err) = set_output(self.name, &self.value) {
            eprintln!("Warning: failed to write output {}: {}", self.name, err);
        }
    }
}
