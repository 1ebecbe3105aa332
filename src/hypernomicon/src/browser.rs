use std::{ffi::OsString, path::Path};

use subprocess::{Exec, ExitStatus, NullFile};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Popen(#[from] subprocess::PopenError),
    #[error("{program} exited with {status:?}")]
    Status { program: String, status: ExitStatus },
}

/// The command that opens `path` with the host's default browser. `$BROWSER`
/// wins over the platform opener when set.
pub fn opener_command(path: &Path) -> (OsString, Vec<OsString>) {
    if let Some(browser) = std::env::var_os("BROWSER").filter(|b| !b.is_empty()) {
        return (browser, vec![path.as_os_str().to_owned()]);
    }
    if cfg!(target_os = "windows") {
        (
            "cmd".into(),
            vec!["/C".into(), "start".into(), "".into(), path.as_os_str().to_owned()],
        )
    } else if cfg!(target_os = "macos") {
        ("open".into(), vec![path.as_os_str().to_owned()])
    } else {
        ("xdg-open".into(), vec![path.as_os_str().to_owned()])
    }
}

pub fn launch(path: &Path) -> Result<(), LaunchError> {
    let (program, args) = opener_command(path);
    run_opener(program, args)
}

fn run_opener(program: OsString, args: Vec<OsString>) -> Result<(), LaunchError> {
    debug!("Launching {:?} {:?}", program, args);
    let status = Exec::cmd(&program)
        .args(args.as_slice())
        .stdout(NullFile)
        .stderr(NullFile)
        .join()?;
    if status.success() {
        Ok(())
    } else {
        Err(LaunchError::Status {
            program: program.to_string_lossy().into_owned(),
            status,
        })
    }
}
