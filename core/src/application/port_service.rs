//! Listing and killing application service.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::adapters::{
    parse_table, CommandRunner, CommandSocketLister, Platform, PsNameResolver, SignalTerminator,
};
use crate::config::Settings;
use crate::domain::{
    Inventory, InventoryBuilder, KillOutcome, KillReport, ListeningProcess, PortRange, Termination,
};
use crate::ports::{NameResolver, ProcessTerminator, SocketLister};

/// Application service for listing and killing port owners.
///
/// Every call re-reads live OS state; nothing is cached between calls, so
/// a kill always acts on a fresh inventory. The lister, resolver and
/// terminator are injected through their port traits, allowing tests to
/// run without touching the OS.
pub struct PortService<L, R, T> {
    lister: L,
    resolver: R,
    terminator: T,
}

impl PortService<CommandSocketLister, PsNameResolver, SignalTerminator> {
    /// Create a service backed by the system utilities of `platform`.
    pub fn for_platform(platform: Platform, runner: CommandRunner) -> Self {
        Self::new(
            CommandSocketLister::new(platform, runner),
            PsNameResolver::new(runner),
            SignalTerminator::new(),
        )
    }

    /// Create a service for the current platform using the configured timeout.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::for_platform(
            Platform::current(),
            CommandRunner::new(settings.command_timeout()),
        )
    }
}

impl Default for PortService<CommandSocketLister, PsNameResolver, SignalTerminator> {
    fn default() -> Self {
        Self::for_platform(Platform::current(), CommandRunner::default())
    }
}

impl<L, R, T> PortService<L, R, T>
where
    L: SocketLister,
    R: NameResolver,
    T: ProcessTerminator,
{
    /// Create a new service from its collaborators.
    pub fn new(lister: L, resolver: R, terminator: T) -> Self {
        Self {
            lister,
            resolver,
            terminator,
        }
    }

    /// List processes listening on ports inside `range`, sorted by port.
    pub async fn list(&self, range: PortRange) -> Inventory {
        let table = self.lister.list().await;
        let builder = InventoryBuilder::new(range);
        let selected = builder.select(parse_table(&table));

        // Only records that survived filtering get a name lookup, once per pid.
        let mut names: HashMap<u32, String> = HashMap::new();
        let mut named = Vec::with_capacity(selected.len());
        for mut record in selected {
            let name = match record.name.take() {
                Some(name) => name,
                None => match names.get(&record.pid) {
                    Some(name) => name.clone(),
                    None => {
                        let name = self
                            .resolver
                            .resolve(record.pid)
                            .await
                            .unwrap_or_else(|| ListeningProcess::placeholder_name(record.pid));
                        names.insert(record.pid, name.clone());
                        name
                    }
                },
            };
            named.push((record, name));
        }

        let inventory = builder.assemble(named);
        debug!(
            backend = ?table.backend,
            range = %range,
            count = inventory.len(),
            "Inventory built"
        );
        inventory
    }

    /// Kill every process listening on `port`, if `port` lies inside `range`.
    pub async fn kill_port(&self, range: PortRange, port: u16) -> KillReport {
        let inventory = self.list(range).await;
        let targets: Vec<ListeningProcess> = inventory.on_port(port).cloned().collect();

        if targets.is_empty() {
            debug!(port = port, "No process listening on port");
        }
        self.kill_listeners(targets).await
    }

    /// Kill every process listening inside `range`.
    pub async fn kill_all(&self, range: PortRange) -> KillReport {
        let inventory = self.list(range).await;
        self.kill_listeners(inventory.into_iter().collect()).await
    }

    /// Signal each distinct pid once; count every `(port, pid)` listener.
    async fn kill_listeners(&self, targets: Vec<ListeningProcess>) -> KillReport {
        let mut results: HashMap<u32, Termination> = HashMap::new();
        let mut outcomes = Vec::with_capacity(targets.len());

        for process in targets {
            let termination = match results.get(&process.pid()) {
                Some(termination) => termination.clone(),
                None => {
                    info!(
                        pid = process.pid(),
                        port = process.port(),
                        name = process.name(),
                        "Killing process"
                    );
                    let termination = self.terminator.terminate(process.pid()).await;
                    results.insert(process.pid(), termination.clone());
                    termination
                }
            };
            outcomes.push(KillOutcome {
                process,
                termination,
            });
        }

        let report = KillReport {
            requested: outcomes.len(),
            killed: outcomes.iter().filter(|o| o.termination.is_killed()).count(),
            outcomes,
        };
        debug!(killed = report.killed, requested = report.requested, "Kill batch finished");
        report
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use parking_lot::Mutex;

    use crate::domain::{Backend, RawTable};

    /// Mock lister returning a fixed table.
    pub(crate) struct MockLister {
        table: RawTable,
    }

    impl MockLister {
        pub(crate) fn ss(rows: &[&str]) -> Self {
            let mut text = String::from(
                "State Recv-Q Send-Q Local Address:Port Peer Address:Port Process\n",
            );
            for row in rows {
                text.push_str(row);
                text.push('\n');
            }
            Self {
                table: RawTable::new(Backend::Ss, text),
            }
        }

        pub(crate) fn empty() -> Self {
            Self {
                table: RawTable::empty(),
            }
        }
    }

    impl SocketLister for MockLister {
        async fn list(&self) -> RawTable {
            self.table.clone()
        }
    }

    /// Mock resolver counting lookups.
    #[derive(Default)]
    pub(crate) struct MockResolver {
        names: HashMap<u32, String>,
        lookups: Arc<Mutex<Vec<u32>>>,
    }

    impl MockResolver {
        pub(crate) fn with_name(mut self, pid: u32, name: &str) -> Self {
            self.names.insert(pid, name.to_string());
            self
        }
    }

    impl NameResolver for MockResolver {
        async fn resolve(&self, pid: u32) -> Option<String> {
            self.lookups.lock().push(pid);
            self.names.get(&pid).cloned()
        }
    }

    /// Mock terminator with configurable failures.
    #[derive(Default, Clone)]
    pub(crate) struct MockTerminator {
        denied: HashSet<u32>,
        vanished: HashSet<u32>,
        pub(crate) signalled: Arc<Mutex<Vec<u32>>>,
    }

    impl MockTerminator {
        pub(crate) fn deny(mut self, pid: u32) -> Self {
            self.denied.insert(pid);
            self
        }

        pub(crate) fn vanish(mut self, pid: u32) -> Self {
            self.vanished.insert(pid);
            self
        }
    }

    impl ProcessTerminator for MockTerminator {
        async fn terminate(&self, pid: u32) -> Termination {
            self.signalled.lock().push(pid);
            if self.denied.contains(&pid) {
                Termination::PermissionDenied
            } else if self.vanished.contains(&pid) {
                Termination::Vanished
            } else {
                Termination::Killed
            }
        }
    }

    fn range(start: u16, end: u16) -> PortRange {
        PortRange::new(start, end).unwrap()
    }

    #[tokio::test]
    async fn test_single_port_scenario() {
        let terminator = MockTerminator::default();
        let signalled = terminator.signalled.clone();
        let service = PortService::new(
            MockLister::ss(&[r#"LISTEN 0 511 0.0.0.0:3000 0.0.0.0:* users:(("node",pid=111,fd=20))"#]),
            MockResolver::default(),
            terminator,
        );

        let inventory = service.list(range(3000, 3000)).await;
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.processes()[0].name(), "node");

        let report = service.kill_port(range(3000, 3000), 3000).await;
        assert_eq!(report.killed, 1);
        assert_eq!(*signalled.lock(), vec![111]);
    }

    #[tokio::test]
    async fn test_dual_stack_listener_reported_once() {
        let service = PortService::new(
            MockLister::ss(&[
                r#"LISTEN 0 511 0.0.0.0:8080 0.0.0.0:* users:(("nginx",pid=222,fd=6))"#,
                r#"LISTEN 0 511 [::]:8080 [::]:* users:(("nginx",pid=222,fd=7))"#,
            ]),
            MockResolver::default(),
            MockTerminator::default(),
        );

        let inventory = service.list(range(3000, 9000)).await;
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.on_port(8080).count(), 1);

        let report = service.kill_port(range(3000, 9000), 8080).await;
        assert_eq!(report.requested, 1);
        assert_eq!(report.killed, 1);
    }

    fn three_listeners() -> MockLister {
        MockLister::ss(&[
            r#"LISTEN 0 511 0.0.0.0:3000 0.0.0.0:* users:(("node",pid=1,fd=20))"#,
            r#"LISTEN 0 511 0.0.0.0:5000 0.0.0.0:* users:(("flask",pid=2,fd=20))"#,
            r#"LISTEN 0 511 0.0.0.0:8080 0.0.0.0:* users:(("nginx",pid=3,fd=20))"#,
            r#"LISTEN 0 511 0.0.0.0:22 0.0.0.0:* users:(("sshd",pid=4,fd=3))"#,
        ])
    }

    #[tokio::test]
    async fn test_kill_all_counts() {
        let service = PortService::new(
            three_listeners(),
            MockResolver::default(),
            MockTerminator::default(),
        );
        assert_eq!(service.kill_all(range(3000, 9000)).await.killed, 3);

        let service = PortService::new(
            three_listeners(),
            MockResolver::default(),
            MockTerminator::default().deny(3),
        );
        let report = service.kill_all(range(3000, 9000)).await;
        assert_eq!(report.killed, 2);
        assert_eq!(report.requested, 3);
        assert_eq!(report.to_string(), "killed 2 of 3 requested");
        assert_eq!(report.outcomes[2].termination, Termination::PermissionDenied);
    }

    #[tokio::test]
    async fn test_kill_race_is_soft() {
        let service = PortService::new(
            three_listeners(),
            MockResolver::default(),
            MockTerminator::default().vanish(1),
        );

        let report = service.kill_port(range(3000, 9000), 3000).await;
        assert_eq!(report.killed, 0);
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(report.outcomes[0].termination, Termination::Vanished);

        // The rest of a batch still runs after a vanished pid.
        let report = service.kill_all(range(3000, 9000)).await;
        assert_eq!(report.killed, 2);
    }

    #[tokio::test]
    async fn test_kill_outside_range_does_nothing() {
        let terminator = MockTerminator::default();
        let signalled = terminator.signalled.clone();
        let service = PortService::new(three_listeners(), MockResolver::default(), terminator);

        let report = service.kill_port(range(3000, 9000), 22).await;
        assert!(report.is_empty());
        assert_eq!(report.killed, 0);
        assert!(signalled.lock().is_empty());
    }

    #[tokio::test]
    async fn test_pid_on_two_ports_signalled_once() {
        let terminator = MockTerminator::default();
        let signalled = terminator.signalled.clone();
        let service = PortService::new(
            MockLister::ss(&[
                r#"LISTEN 0 511 0.0.0.0:3000 0.0.0.0:* users:(("node",pid=7,fd=20))"#,
                r#"LISTEN 0 511 0.0.0.0:3001 0.0.0.0:* users:(("node",pid=7,fd=21))"#,
                r#"LISTEN 0 511 0.0.0.0:8080 0.0.0.0:* users:(("nginx",pid=9,fd=6))"#,
            ]),
            MockResolver::default(),
            terminator,
        );

        // Three distinct (port, pid) listeners, two of them owned by pid 7.
        let report = service.kill_all(range(3000, 9000)).await;
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.requested, 3);
        assert_eq!(report.killed, 3);
        assert_eq!(*signalled.lock(), vec![7, 9]);
    }

    #[tokio::test]
    async fn test_shared_pid_failure_counts_each_listener() {
        let service = PortService::new(
            MockLister::ss(&[
                r#"LISTEN 0 511 0.0.0.0:3000 0.0.0.0:* users:(("node",pid=7,fd=20))"#,
                r#"LISTEN 0 511 0.0.0.0:3001 0.0.0.0:* users:(("node",pid=7,fd=21))"#,
                r#"LISTEN 0 511 0.0.0.0:8080 0.0.0.0:* users:(("nginx",pid=9,fd=6))"#,
            ]),
            MockResolver::default(),
            MockTerminator::default().deny(7),
        );

        let report = service.kill_all(range(3000, 9000)).await;
        assert_eq!(report.requested, 3);
        assert_eq!(report.killed, 1);
        assert_eq!(report.to_string(), "killed 1 of 3 requested");
    }

    #[tokio::test]
    async fn test_names_resolved_only_when_missing() {
        let resolver = MockResolver::default().with_name(10, "java");
        let lookups = resolver.lookups.clone();
        let service = PortService::new(
            MockLister::ss(&[
                "LISTEN 0 128 *:8080 *:* users:((pid=10,fd=3))",
                "LISTEN 0 128 *:8081 *:* users:((pid=10,fd=4))",
                "LISTEN 0 128 *:8082 *:* users:((pid=11,fd=3))",
                "LISTEN 0 128 *:80 *:* users:((pid=12,fd=3))",
                r#"LISTEN 0 128 *:3000 *:* users:(("node",pid=13,fd=3))"#,
            ]),
            resolver,
            MockTerminator::default(),
        );

        let inventory = service.list(range(3000, 9000)).await;
        let names: Vec<&str> = inventory.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["node", "java", "java", "PID-11"]);

        // Out-of-range pid 12 and named pid 13 are never looked up.
        assert_eq!(*lookups.lock(), vec![10, 11]);
    }

    #[tokio::test]
    async fn test_unavailable_backend_is_empty() {
        let service = PortService::new(
            MockLister::empty(),
            MockResolver::default(),
            MockTerminator::default(),
        );

        assert!(service.list(range(1, 65535)).await.is_empty());
        let report = service.kill_all(range(1, 65535)).await;
        assert_eq!(report.killed, 0);
        assert_eq!(report.requested, 0);
    }

    #[tokio::test]
    async fn test_list_is_idempotent() {
        let service = PortService::new(
            three_listeners(),
            MockResolver::default(),
            MockTerminator::default(),
        );
        let first = service.list(range(3000, 9000)).await;
        let second = service.list(range(3000, 9000)).await;
        assert_eq!(first, second);
        assert_eq!(first.keys(), second.keys());
    }
}
