//! Parsers for OS service-manager output.

/// `sc query` states that count as running.
const SC_RUNNING_STATES: &[&str] = &["RUNNING", "START_PENDING", "CONTINUE_PENDING"];

/// True when `sc query <name>` reports the service running or about to run.
#[must_use]
pub fn sc_query_reports_running(output: &str) -> bool {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("STATE"))
        .any(|line| {
            line.split_whitespace()
                .any(|word| SC_RUNNING_STATES.contains(&word))
        })
}

/// Look up `name` in `launchctl list` output.
///
/// A row matches when its label equals `name` or ends with `.<name>`.
/// Returns `Some(true)` when the matching row has a PID, `Some(false)` when
/// it is loaded but not running, and `None` when no row matches.
#[must_use]
pub fn launchctl_service_state(output: &str, name: &str) -> Option<bool> {
    let dotted = format!(".{name}");
    output.lines().find_map(|line| {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [pid, _, label, ..] = fields.as_slice() else {
            return None;
        };
        if *pid == "PID" {
            return None;
        }
        (*label == name || label.ends_with(&dotted)).then_some(*pid != "-")
    })
}

/// True when `systemctl is-active` printed `active`.
#[must_use]
pub fn systemctl_reports_active(output: &str) -> bool {
    output.trim() == "active"
}
