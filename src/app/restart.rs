use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;

fn relaunch_command<I>(executable: &Path, args: I) -> Command
where
    I: IntoIterator<Item = OsString>,
{
    let mut command = Command::new(executable);
    command.args(args);
    command
}

/// Starts a fresh copy of this executable with the original arguments.
///
/// Call only after the main loop has returned so the old instance has
/// finished every write before the new one reads settings.
pub(super) fn relaunch_current_process() -> io::Result<u32> {
    let executable = std::env::current_exe()?;
    let child = relaunch_command(&executable, std::env::args_os().skip(1)).spawn()?;
    tracing::info!(
        pid = child.id(),
        executable = %executable.display(),
        "relaunched launcher"
    );
    Ok(child.id())
}
