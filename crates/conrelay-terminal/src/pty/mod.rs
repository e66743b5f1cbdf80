//! PTY management using the `portable-pty` crate.
//!
//! Provides [`PtyManager`] for running a command line inside a
//! pseudo-terminal. Output and the exit of the hosted program are delivered
//! as [`PtyEvent`]s on the owner's event channel.

mod manager;
mod types;

pub use manager::*;
pub use types::*;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    fn collect_until_exit(rx: &mpsc::Receiver<PtyEvent>) -> (String, Option<PtyEvent>) {
        let mut output = String::new();
        let deadline = Instant::now() + Duration::from_secs(10);
        while Instant::now() < deadline {
            match rx.recv_timeout(Duration::from_millis(100)) {
                Ok(PtyEvent::Output(bytes)) => output.push_str(&String::from_utf8_lossy(&bytes)),
                Ok(exited @ PtyEvent::Exited { .. }) => return (output, Some(exited)),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }
        (output, None)
    }

    #[test]
    #[cfg(unix)]
    fn output_is_relayed_before_exit() {
        let (tx, rx) = mpsc::sync_channel(16);
        let options = PtyOptions {
            cols: 80,
            rows: 24,
            drain_grace: Duration::from_millis(500),
        };
        let mgr = PtyManager::spawn("echo hello; echo world", &options, tx).expect("spawn");
        let pid = mgr.pid();

        let (output, exited) = collect_until_exit(&rx);
        assert!(output.contains("hello"), "missing output: {output:?}");
        assert!(output.contains("world"), "missing output: {output:?}");
        match exited {
            Some(PtyEvent::Exited { pid: exited_pid, code }) => {
                assert_eq!(Some(exited_pid), pid);
                assert_eq!(code, Some(0));
            }
            other => panic!("expected exit event, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn input_reaches_the_program() {
        let (tx, rx) = mpsc::sync_channel(16);
        let options = PtyOptions {
            cols: 80,
            rows: 24,
            drain_grace: Duration::from_millis(500),
        };
        let mut mgr = PtyManager::spawn("read line; echo got-$line", &options, tx).expect("spawn");
        mgr.write(b"abc\r").expect("write");

        let (output, exited) = collect_until_exit(&rx);
        assert!(output.contains("got-abc"), "unexpected output: {output:?}");
        assert!(exited.is_some());
    }

    #[test]
    #[cfg(unix)]
    fn kill_ends_the_program() {
        let (tx, rx) = mpsc::sync_channel(16);
        let options = PtyOptions {
            cols: 80,
            rows: 24,
            drain_grace: Duration::from_millis(100),
        };
        let mut mgr = PtyManager::spawn("sleep 30", &options, tx).expect("spawn");
        mgr.kill();
        let (_, exited) = collect_until_exit(&rx);
        assert!(exited.is_some());
    }

    #[test]
    #[cfg(unix)]
    fn undrained_channel_stalls_the_program() {
        let (tx, rx) = mpsc::sync_channel(1);
        let options = PtyOptions {
            cols: 80,
            rows: 24,
            drain_grace: Duration::from_millis(100),
        };
        let mgr = PtyManager::spawn("yes | head -c 4000000", &options, tx).expect("spawn");

        // Nothing reads for a while: the reader blocks and the PTY fills up.
        std::thread::sleep(Duration::from_millis(500));

        let queued: Vec<PtyEvent> = rx.try_iter().take(64).collect();
        assert!(queued.len() < 64, "reader kept queueing: {}", queued.len());
        assert!(
            !queued.iter().any(|e| matches!(e, PtyEvent::Exited { .. })),
            "program finished while nothing was drained"
        );
        drop(mgr);
    }
}
