use std::env;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

pub const CREATE_NO_WINDOW: u32 = 0x0800_0000;
pub const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
pub const NORMAL_PRIORITY_CLASS: u32 = 0x0000_0020;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessType {
    Windows,
    Unix,
    Unsupported,
}

pub fn get_os() -> ProcessType {
    os_from(env::consts::OS)
}

pub fn os_from(name: &str) -> ProcessType {
    match name {
        "linux" => ProcessType::Unix,
        "macos" => ProcessType::Unix,
        "windows" => ProcessType::Windows,
        _ => ProcessType::Unsupported,
    }
}

pub fn quoted(path: &Path) -> String {
    format!("\"{}\"", path.display())
}

/// Command line of the update step, as it is handed to the OS.
pub fn update_command_line(os: ProcessType, script: &Path) -> Option<String> {
    match os {
        ProcessType::Windows => Some(format!("cmd /c {}", quoted(script))),
        ProcessType::Unix => Some(format!("sh {}", quoted(script))),
        ProcessType::Unsupported => None,
    }
}

pub fn main_command_line(executable: &Path) -> String {
    quoted(executable)
}

/// Interpreter invocation for the update script: no window, no stdio,
/// running inside the install directory.
pub fn update_command(os: ProcessType, dir: &Path, script: &Path) -> Option<Command> {
    let mut cmd = match os {
        ProcessType::Windows => {
            let mut cmd = Command::new("cmd");
            cmd.arg("/c");
            push_path_arg(&mut cmd, script);
            cmd
        }
        ProcessType::Unix => {
            let mut cmd = Command::new("sh");
            cmd.arg(script);
            cmd
        }
        ProcessType::Unsupported => return None,
    };

    cmd.current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    set_creation_flags(&mut cmd, CREATE_NO_WINDOW);
    Some(cmd)
}

/// The main application gets its own console at normal priority.
pub fn main_command(dir: &Path, executable: &Path) -> Command {
    let mut cmd = Command::new(executable);
    cmd.current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    set_creation_flags(&mut cmd, NORMAL_PRIORITY_CLASS | CREATE_NEW_CONSOLE);
    cmd
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn set_creation_flags(cmd: &mut Command, flags: u32) {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(flags);
        }

        // cmd.exe parses its own command line, so the script path is
        // passed pre-quoted instead of through the std escaping rules.
        fn push_path_arg(cmd: &mut Command, path: &Path) {
            use std::os::windows::process::CommandExt;
            cmd.raw_arg(quoted(path));
        }

        fn to_wide(text: &std::ffi::OsStr) -> Vec<u16> {
            use std::iter::once;
            use std::os::windows::ffi::OsStrExt;
            text.encode_wide().chain(once(0)).collect()
        }

        /// Starts the program of `cmd` in a console of its own and closes
        /// the process and thread handles right away.
        ///
        /// The child must not get std handles, or its output never reaches
        /// the new console, so this calls `CreateProcessW` with a zeroed
        /// `STARTUPINFOW` rather than `Command::spawn`. Only the program
        /// and the working directory of `cmd` are used.
        pub fn spawn_detached(cmd: &mut Command) -> io::Result<()> {
            use std::{mem, ptr};
            use windows_sys::Win32::Foundation::CloseHandle;
            use windows_sys::Win32::System::Threading::{
                CreateProcessW, PROCESS_INFORMATION, STARTUPINFOW,
            };

            let mut command_line = to_wide(std::ffi::OsStr::new(&quoted(Path::new(cmd.get_program()))));
            let current_dir = cmd.get_current_dir().map(|dir| to_wide(dir.as_os_str()));

            let mut si: STARTUPINFOW = unsafe { mem::zeroed() };
            si.cb = mem::size_of::<STARTUPINFOW>() as u32;
            let mut pi: PROCESS_INFORMATION = unsafe { mem::zeroed() };

            let created = unsafe {
                CreateProcessW(
                    ptr::null(),
                    command_line.as_mut_ptr(),
                    ptr::null(),
                    ptr::null(),
                    0,
                    NORMAL_PRIORITY_CLASS | CREATE_NEW_CONSOLE,
                    ptr::null(),
                    current_dir.as_ref().map_or(ptr::null(), |dir| dir.as_ptr()),
                    &si,
                    &mut pi,
                )
            };
            if created == 0 {
                return Err(io::Error::last_os_error());
            }

            unsafe {
                CloseHandle(pi.hProcess);
                CloseHandle(pi.hThread);
            }
            Ok(())
        }
    } else {
        fn set_creation_flags(_cmd: &mut Command, _flags: u32) {}

        fn push_path_arg(cmd: &mut Command, path: &Path) {
            cmd.arg(path);
        }

        /// Starts `cmd` without waiting; dropping the child leaves it running.
        pub fn spawn_detached(cmd: &mut Command) -> io::Result<()> {
            cmd.spawn().map(drop)
        }
    }
}
