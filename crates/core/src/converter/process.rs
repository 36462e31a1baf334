//! Subprocess plumbing shared by the tool implementations.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tokio::time::{timeout, Duration};

use super::error::ConverterError;

/// Output of one tool run.
pub(crate) struct ToolRun {
    pub status: std::process::ExitStatus,
    /// Stdout and stderr concatenated, in that order.
    pub output: String,
}

/// Runs `program` with `args` in `work_dir`, capturing combined output.
///
/// The child is killed if it runs past `timeout_secs`.
pub(crate) async fn run_tool(
    program: &Path,
    args: &[String],
    work_dir: &Path,
    timeout_secs: u64,
) -> Result<ToolRun, ConverterError> {
    let tool = program
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.display().to_string());

    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConverterError::ToolNotFound {
                path: program.to_path_buf(),
            }
        } else {
            ConverterError::Io(e)
        }
    })?;

    match timeout(Duration::from_secs(timeout_secs), child.wait_with_output()).await {
        Ok(Ok(out)) => {
            let mut output = String::from_utf8_lossy(&out.stdout).into_owned();
            output.push_str(&String::from_utf8_lossy(&out.stderr));
            Ok(ToolRun {
                status: out.status,
                output,
            })
        }
        Ok(Err(e)) => Err(ConverterError::Io(e)),
        // Dropping the timed-out future reaps the child via kill_on_drop.
        Err(_) => Err(ConverterError::Timeout { tool, timeout_secs }),
    }
}

/// Checks that a tool binary responds to `-version`.
pub(crate) async fn check_binary(program: &Path) -> Result<(), ConverterError> {
    let result = Command::new(program).arg("-version").output().await;

    match result {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConverterError::ToolNotFound {
            path: program.to_path_buf(),
        }),
        Err(e) => Err(ConverterError::Io(e)),
    }
}
