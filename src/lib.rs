pub mod console;
pub mod launch;
pub mod notify;
pub mod process;
pub mod update;
pub mod utility;
