//! Access to the outside world for built-in functions
//!
//! Built-ins read the clock, the login name and the output of external
//! commands (git). They do so only through [`Host`], so rendering can be
//! exercised with a fixed clock and canned command output.

use chrono::{DateTime, Local};
use std::env;
use std::path::Path;
use std::process::Command;

pub trait Host {
    fn now(&self) -> DateTime<Local>;

    /// Login name of the current user, if it can be determined
    fn user_name(&self) -> Option<String>;

    /// Run `program` with `args` in `cwd` and return its standard output.
    /// `None` when the command could not be started or exited unsuccessfully.
    fn run_command(&self, program: &str, args: &[&str], cwd: &Path) -> Option<String>;
}

/// The real clock, environment and process table
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn user_name(&self) -> Option<String> {
        ["LOGNAME", "USER", "LNAME", "USERNAME"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.is_empty())
    }

    fn run_command(&self, program: &str, args: &[&str], cwd: &Path) -> Option<String> {
        let mut command = Command::new(program);
        command.args(args);
        if !cwd.as_os_str().is_empty() {
            command.current_dir(cwd);
        }

        let output = match command.output() {
            Ok(output) => output,
            Err(e) => {
                log::debug!("Failed to run {} {:?}: {}", program, args, e);
                return None;
            }
        };

        if !output.status.success() {
            log::debug!(
                "{} {:?} exited with {}: {}",
                program,
                args,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// Host with a fixed clock and canned command output
    #[derive(Debug, Default)]
    pub struct FakeHost {
        pub user: Option<String>,
        pub outputs: HashMap<String, String>,
        pub calls: RefCell<Vec<(String, PathBuf)>>,
    }

    impl FakeHost {
        pub fn new() -> Self {
            Self {
                user: Some("jdoe".to_string()),
                ..Self::default()
            }
        }

        pub fn with_output(mut self, command_line: &str, output: &str) -> Self {
            self.outputs
                .insert(command_line.to_string(), output.to_string());
            self
        }
    }

    impl Host for FakeHost {
        fn now(&self) -> DateTime<Local> {
            Local
                .with_ymd_and_hms(2017, 4, 28, 9, 30, 0)
                .single()
                .unwrap_or_else(Local::now)
        }

        fn user_name(&self) -> Option<String> {
            self.user.clone()
        }

        fn run_command(&self, program: &str, args: &[&str], cwd: &Path) -> Option<String> {
            let command_line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls
                .borrow_mut()
                .push((command_line.clone(), cwd.to_path_buf()));
            self.outputs.get(&command_line).cloned()
        }
    }
}
