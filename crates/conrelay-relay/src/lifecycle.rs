//! Liveness propagation between the supervisor and the remote process.
//!
//! Each monitor is a thread blocked on one process's exit. When the watched
//! process goes away the monitor runs its callback, which closes gates and
//! kills or reports whatever depended on that process.

use std::io;
use std::process::{Child, ExitStatus};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, warn};

/// Poll interval used when the platform cannot signal a process exit.
const FALLBACK_POLL: Duration = Duration::from_millis(200);

/// A pid kill(2) can address as a single process. Zero and values that
/// wrap to negative would name process groups instead.
fn to_pid(pid: u32) -> Option<libc::pid_t> {
    libc::pid_t::try_from(pid).ok().filter(|pid| *pid > 0)
}

/// Check if a process is still alive.
///
/// Uses kill(pid, 0), which only checks whether the process exists. A pid
/// outside the platform's range is never alive.
pub fn is_process_alive(pid: u32) -> bool {
    let Some(pid) = to_pid(pid) else {
        return false;
    };
    // SAFETY: signal 0 performs the permission and existence checks only.
    unsafe { libc::kill(pid, 0) == 0 }
}

/// Ask a process to terminate with SIGTERM.
pub fn terminate(pid: u32) {
    let Some(target) = to_pid(pid) else {
        debug!(pid, "not a valid pid, nothing to terminate");
        return;
    };
    // SAFETY: plain kill(2) on a pid we spawned.
    let ret = unsafe { libc::kill(target, libc::SIGTERM) };
    if ret != 0 {
        let err = io::Error::last_os_error();
        debug!(pid, error = %err, "failed to send SIGTERM");
    }
}

/// SIGKILL the process group led by `pid`, or just `pid` when it leads
/// none. Programs hosted on a PTY lead their own session, so this also
/// reaches whatever they started.
pub fn kill_process_group(pid: u32) {
    let Some(leader) = to_pid(pid) else {
        debug!(pid, "not a valid pid, nothing to kill");
        return;
    };
    // SAFETY: kill(2) with a negated pid signals that process group.
    if unsafe { libc::kill(-leader, libc::SIGKILL) } == 0 {
        return;
    }
    // SAFETY: plain kill(2) on a single pid.
    if unsafe { libc::kill(leader, libc::SIGKILL) } != 0 {
        let err = io::Error::last_os_error();
        debug!(pid, error = %err, "failed to send SIGKILL");
    }
}

/// Block until the process `pid` (not necessarily our child) exits.
/// Returns at once for a pid outside the platform's range.
pub fn wait_for_exit(pid: u32) {
    let Some(target) = to_pid(pid) else {
        warn!(pid, "not a valid pid, treating it as gone");
        return;
    };
    #[cfg(target_os = "linux")]
    {
        if wait_pidfd(target).is_ok() {
            return;
        }
    }
    while is_process_alive(pid) {
        thread::sleep(FALLBACK_POLL);
    }
}

/// Wait on a pidfd. Fails when pidfds are unavailable, in which case the
/// caller falls back to polling.
#[cfg(target_os = "linux")]
fn wait_pidfd(pid: libc::pid_t) -> io::Result<()> {
    // SAFETY: pidfd_open takes a pid and flags and returns a new fd or -1.
    let fd = unsafe { libc::syscall(libc::SYS_pidfd_open, pid, 0) };
    if fd < 0 {
        let err = io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            // Already gone.
            return Ok(());
        }
        return Err(err);
    }
    let fd = fd as libc::c_int;
    let mut pollfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    let result = loop {
        // SAFETY: one valid pollfd, infinite timeout.
        let ret = unsafe { libc::poll(&mut pollfd, 1, -1) };
        if ret >= 0 {
            break Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            break Err(err);
        }
    };
    // SAFETY: closing the fd opened above exactly once.
    unsafe {
        libc::close(fd);
    }
    result
}

/// Remote side: run `on_exit` once the supervisor process is gone.
pub fn watch_parent<F>(pid: u32, on_exit: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce() + Send + 'static,
{
    thread::Builder::new()
        .name("parent-monitor".into())
        .spawn(move || {
            wait_for_exit(pid);
            warn!(pid, "supervisor process is gone");
            on_exit();
        })
}

/// Supervisor side: reap the remote process and run `on_exit` with its
/// exit status.
pub fn watch_child<F>(mut child: Child, on_exit: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce(Option<ExitStatus>) + Send + 'static,
{
    thread::Builder::new()
        .name("child-monitor".into())
        .spawn(move || {
            let status = match child.wait() {
                Ok(status) => Some(status),
                Err(e) => {
                    warn!(error = %e, "waiting for remote process failed");
                    None
                }
            };
            debug!(pid = child.id(), ?status, "remote process exited");
            on_exit(status);
        })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::process::Command;
    use std::sync::mpsc;

    #[test]
    fn current_process_is_alive() {
        assert!(is_process_alive(std::process::id()));
    }

    #[test]
    fn watch_child_reports_exit_status() {
        let child = Command::new("/bin/sh")
            .args(["-c", "exit 3"])
            .spawn()
            .expect("spawn sh");
        let (tx, rx) = mpsc::channel();
        watch_child(child, move |status| {
            let _ = tx.send(status.and_then(|s| s.code()));
        })
        .expect("monitor");
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Some(3));
    }

    #[test]
    fn watch_parent_fires_when_the_process_exits() {
        let mut child = Command::new("/bin/sh")
            .args(["-c", "sleep 0.2"])
            .spawn()
            .expect("spawn sh");
        let pid = child.id();
        let (tx, rx) = mpsc::channel();
        watch_parent(pid, move || {
            let _ = tx.send(());
        })
        .expect("monitor");
        child.wait().expect("reap");
        rx.recv_timeout(Duration::from_secs(5))
            .expect("monitor fired after exit");
    }

    #[test]
    fn out_of_range_pids_are_never_alive() {
        assert!(!is_process_alive(u32::MAX));
        assert!(!is_process_alive(i32::MAX as u32 + 1));
        assert!(!is_process_alive(0));
    }

    #[test]
    fn waiting_on_an_out_of_range_pid_returns() {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            wait_for_exit(u32::MAX);
            let _ = tx.send(());
        });
        rx.recv_timeout(Duration::from_secs(5))
            .expect("wait_for_exit returned");
    }

    #[test]
    fn kill_process_group_reaches_grandchildren() {
        use std::os::unix::process::CommandExt;

        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("sleeper");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());
        let child = Command::new("/bin/sh")
            .args(["-c", &script])
            .process_group(0)
            .spawn()
            .expect("spawn sh");
        let pid = child.id();
        let (tx, rx) = mpsc::channel();
        watch_child(child, move |status| {
            let _ = tx.send(status.map(|s| s.success()));
        })
        .expect("monitor");

        let sleeper = wait_for_pid_file(&pid_file);
        kill_process_group(pid);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Some(false));
        assert!(eventually_gone(sleeper), "grandchild {sleeper} survived");
    }

    fn wait_for_pid_file(path: &std::path::Path) -> u32 {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(pid) = std::fs::read_to_string(path)
                .ok()
                .and_then(|text| text.trim().parse().ok())
            {
                return pid;
            }
            assert!(std::time::Instant::now() < deadline, "no pid written");
            thread::sleep(Duration::from_millis(20));
        }
    }

    /// Gone or a zombie nobody has reaped yet.
    pub(crate) fn eventually_gone(pid: u32) -> bool {
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while is_process_alive(pid) && !is_zombie(pid) {
            if std::time::Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(20));
        }
        true
    }

    fn is_zombie(pid: u32) -> bool {
        std::fs::read_to_string(format!("/proc/{pid}/stat"))
            .ok()
            .and_then(|stat| {
                let (_, rest) = stat.rsplit_once(')')?;
                rest.trim_start().chars().next()
            })
            .map_or(true, |state| state == 'Z')
    }

    #[test]
    fn terminate_stops_a_process() {
        let child = Command::new("/bin/sh")
            .args(["-c", "sleep 30"])
            .spawn()
            .expect("spawn sh");
        let pid = child.id();
        let (tx, rx) = mpsc::channel();
        watch_child(child, move |status| {
            let _ = tx.send(status.map(|s| s.success()));
        })
        .expect("monitor");
        terminate(pid);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), Some(false));
    }
}
