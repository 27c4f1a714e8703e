//! Socket lister backed by the platform's command-line utilities.

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Once;
use tracing::{debug, warn};

use crate::domain::{Backend, RawTable};
use crate::error::{Error, Result};
use crate::ports::SocketLister;

use super::command::{locate, CommandRunner};
use super::platform::Platform;

const LSOF_PATHS: &[&str] = &["/usr/sbin/lsof", "/usr/bin/lsof"];
const SS_PATHS: &[&str] = &["/usr/sbin/ss", "/usr/bin/ss", "/sbin/ss", "/bin/ss"];
const NETSTAT_PATHS: &[&str] = &["/usr/sbin/netstat", "/usr/bin/netstat", "/bin/netstat"];

/// Lists listening TCP sockets by shelling out to `lsof`, `ss` or `netstat`.
///
/// On macOS `lsof` is run directly. On Linux `ss` is tried first and
/// `netstat` only if `ss` cannot run, times out, or exits non-zero.
pub struct CommandSocketLister {
    platform: Platform,
    runner: CommandRunner,
    programs: HashMap<Backend, PathBuf>,
    unsupported_reported: Once,
}

impl CommandSocketLister {
    /// A lister that finds each backend among its well-known install paths.
    pub fn new(platform: Platform, runner: CommandRunner) -> Self {
        let programs = platform
            .backends()
            .iter()
            .map(|&backend| (backend, Self::default_program(backend)))
            .collect();
        Self::with_programs(platform, runner, programs)
    }

    /// A lister running the given executable for each backend.
    ///
    /// Backends missing from `programs` fall back to their well-known paths.
    pub fn with_programs(
        platform: Platform,
        runner: CommandRunner,
        programs: HashMap<Backend, PathBuf>,
    ) -> Self {
        Self {
            platform,
            runner,
            programs,
            unsupported_reported: Once::new(),
        }
    }

    /// A lister for the current platform with the default timeout.
    pub fn for_current_platform() -> Self {
        Self::new(Platform::current(), CommandRunner::default())
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    fn default_program(backend: Backend) -> PathBuf {
        let paths = match backend {
            Backend::Lsof => LSOF_PATHS,
            Backend::Ss => SS_PATHS,
            Backend::Netstat => NETSTAT_PATHS,
        };
        locate(backend.program(), paths)
    }

    /// Arguments that restrict output to listening TCP sockets with numeric
    /// addresses and owning processes.
    ///
    /// - lsof: `-iTCP -sTCP:LISTEN` TCP listeners, `-n -P` no name lookups
    /// - ss / netstat: `-t` TCP, `-l` listening, `-n` numeric, `-p` processes
    fn args(backend: Backend) -> &'static [&'static str] {
        match backend {
            Backend::Lsof => &["-iTCP", "-sTCP:LISTEN", "-n", "-P"],
            Backend::Ss => &["-tlnp"],
            Backend::Netstat => &["-tlnp"],
        }
    }

    fn program(&self, backend: Backend) -> PathBuf {
        self.programs
            .get(&backend)
            .cloned()
            .unwrap_or_else(|| Self::default_program(backend))
    }

    /// Run one backend, returning its table if its output can be trusted.
    async fn try_backend(&self, backend: Backend) -> Result<RawTable> {
        let program = self.program(backend);
        let output = self.runner.run(&program, Self::args(backend)).await?;

        // lsof exits 1 when nothing matches, which is just an empty table.
        if output.success() || backend == Backend::Lsof {
            debug!(backend = %backend, bytes = output.stdout.len(), "Socket table read");
            return Ok(RawTable::new(backend, output.stdout));
        }

        Err(Error::CommandFailed(format!(
            "{} exited with {:?}: {}",
            backend,
            output.status.code(),
            output.stderr.trim()
        )))
    }
}

impl Default for CommandSocketLister {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

impl SocketLister for CommandSocketLister {
    async fn list(&self) -> RawTable {
        if let Platform::Unsupported(os) = &self.platform {
            self.unsupported_reported.call_once(|| {
                let e = Error::UnsupportedPlatform(os.clone());
                warn!(error = %e, "No listening processes can be found");
            });
            return RawTable::empty();
        }

        for &backend in self.platform.backends() {
            match self.try_backend(backend).await {
                Ok(table) => return table,
                Err(e) => warn!(backend = %backend, error = %e, "Socket listing command failed"),
            }
        }

        let e = Error::BackendUnavailable(self.platform.to_string());
        warn!(error = %e, "Reporting no listening processes");
        RawTable::empty()
    }
}
