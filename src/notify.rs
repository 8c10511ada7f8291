pub const ERROR_TITLE: &str = "Update Launcher Error";

/// Shows the modal launcher error box.
pub fn show_error(message: &str) {
    show(ERROR_TITLE, message);
}

cfg_if::cfg_if! {
    if #[cfg(windows)] {
        fn show(title: &str, message: &str) {
            use std::ffi::OsStr;
            use std::iter::once;
            use std::os::windows::ffi::OsStrExt;
            use windows_sys::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

            let text: Vec<u16> = OsStr::new(message).encode_wide().chain(once(0)).collect();
            let caption: Vec<u16> = OsStr::new(title).encode_wide().chain(once(0)).collect();
            unsafe { MessageBoxW(0, text.as_ptr(), caption.as_ptr(), MB_OK | MB_ICONERROR) };
        }
    } else {
        fn show(title: &str, message: &str) {
            use colored::Colorize;
            eprintln!("{}: {}", title.red().bold(), message);
        }
    }
}
