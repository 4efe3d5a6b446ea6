/// Bounded execution of OS probe utilities
///
/// Hardware probes shell out to tools like `wmic` and `sysctl`. A wedged
/// utility must not hang the whole run, so every invocation gets a deadline.
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL_MS: u64 = 25;

/// Run a command and capture its stdout, killing it if it exceeds `timeout`.
///
/// Returns `None` if the command cannot be spawned, exits non-zero, times
/// out, or produces non-UTF-8 output.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    // Drain stdout on a separate thread so a chatty utility can't block on a
    // full pipe while we poll for exit.
    let mut stdout = child.stdout.take()?;
    let reader = thread::spawn(move || {
        let mut buf = String::new();
        stdout.read_to_string(&mut buf).ok().map(|_| buf)
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    return None;
                }
                thread::sleep(Duration::from_millis(POLL_INTERVAL_MS));
            }
            Err(_) => return None,
        }
    };

    let output = reader.join().ok()??;
    if !status.success() {
        return None;
    }
    Some(output)
}
