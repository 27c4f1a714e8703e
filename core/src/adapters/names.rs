//! Process name lookup via `ps`.

use tracing::debug;

use crate::ports::NameResolver;

use super::command::{locate, CommandRunner};

const PS_PATHS: &[&str] = &["/bin/ps", "/usr/bin/ps"];

/// Resolves process names with `ps -p <pid> -o comm=`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsNameResolver {
    runner: CommandRunner,
}

impl PsNameResolver {
    pub fn new(runner: CommandRunner) -> Self {
        Self { runner }
    }
}

impl NameResolver for PsNameResolver {
    async fn resolve(&self, pid: u32) -> Option<String> {
        let pid_arg = pid.to_string();
        let output = match self
            .runner
            .run(&locate("ps", PS_PATHS), &["-p", &pid_arg, "-o", "comm="])
            .await
        {
            Ok(output) => output,
            Err(e) => {
                debug!(pid = pid, error = %e, "Process name lookup failed");
                return None;
            }
        };

        if !output.success() {
            debug!(pid = pid, "Process exited before its name was resolved");
            return None;
        }

        // macOS reports the executable path, Linux the bare command.
        let name = output.stdout.trim();
        let name = name.rsplit('/').next().unwrap_or(name).trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_current_process() {
        let resolver = PsNameResolver::default();
        // `ps` may be missing in minimal containers; then there is no name.
        if let Some(name) = resolver.resolve(std::process::id()).await {
            assert!(!name.is_empty());
            assert!(!name.contains('/'));
        }
    }

    #[tokio::test]
    async fn test_resolve_nonexistent_process() {
        let resolver = PsNameResolver::default();
        // Above the default Linux and macOS pid limits.
        assert_eq!(resolver.resolve(999_999_999).await, None);
    }
}
