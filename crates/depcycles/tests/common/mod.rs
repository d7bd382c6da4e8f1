//! Common test utilities shared across integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Path to the depcycles binary built for this test run
pub fn depcycles_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_depcycles"))
}

fn command(args: &[&str]) -> Command {
    let mut command = Command::new(depcycles_binary());
    command
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("DEPCYCLES_PRUNE_SEEDS")
        .env_remove("DEPCYCLES_MAX_CHAIN_LEN")
        .env("NO_COLOR", "1");
    command
}

/// Run depcycles with the given arguments and piped stdin
pub fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = command(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn depcycles binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child
        .wait_with_output()
        .expect("Failed to wait for depcycles binary")
}

/// Run depcycles on an input file
pub fn run_on_file(path: &Path, extra_args: &[&str]) -> Output {
    let path = path.to_str().expect("temp path should be UTF-8");
    let mut args = extra_args.to_vec();
    args.push(path);
    command(&args)
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute depcycles binary")
}

/// Stdout as a string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr as a string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
