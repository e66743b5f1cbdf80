#[cfg(target_os = "linux")]
mod cli;

use std::process::ExitCode;

#[cfg(target_os = "linux")]
fn main() -> ExitCode {
    let args = cli::parse();
    match args.command {
        cli::Command::Child {
            supervisor_pid,
            command_line,
            channel,
        } => run_remote(
            supervisor_pid,
            &command_line.join(" "),
            &channel,
            args.log_level.as_deref(),
        ),
        cli::Command::Run { command_line } => run_supervisor(
            &command_line.join(" "),
            args.config.as_deref(),
            args.log_level.as_deref(),
        ),
    }
}

#[cfg(not(target_os = "linux"))]
fn main() -> ExitCode {
    eprintln!("conrelay: console relay is only available on Linux");
    ExitCode::FAILURE
}

#[cfg(target_os = "linux")]
fn run_remote(
    supervisor_pid: u32,
    command_line: &str,
    channel: &std::path::Path,
    log_level: Option<&str>,
) -> ExitCode {
    use conrelay_relay::logging::{init_logging, Role};

    let config = conrelay_relay::remote::channel_config(channel);
    init_logging(Role::Remote, &config.logging, log_level);

    match conrelay_relay::remote::run(supervisor_pid, command_line, channel, &config) {
        Ok(()) => {
            tracing::info!("remote role finished");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "remote role failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_os = "linux")]
fn run_supervisor(
    command_line: &str,
    config_path: Option<&std::path::Path>,
    log_level: Option<&str>,
) -> ExitCode {
    use std::io::BufRead;
    use std::sync::mpsc;
    use std::time::Duration;

    use conrelay_config::{load_config, RelayConfig};
    use conrelay_relay::logging::{init_logging, Role};
    use conrelay_relay::{LinePrinter, Supervisor};

    let (config, load_error) = match load_config(config_path) {
        Ok(config) => (config, None),
        Err(e) => (RelayConfig::default(), Some(e)),
    };
    let log_file = init_logging(Role::Supervisor, &config.logging, log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = ?log_file,
        "conrelay starting"
    );
    if let Some(e) = load_error {
        tracing::warn!(error = %e, "config load failed, using defaults");
    }

    let (mut supervisor, host) =
        match Supervisor::spawn_with_host(&config, command_line, LinePrinter::new(std::io::stdout())) {
            Ok(pair) => pair,
            Err(e) => {
                eprintln!("conrelay: {e}");
                return ExitCode::FAILURE;
            }
        };

    let (line_tx, line_rx) = mpsc::channel::<String>();
    let stdin_reader = std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = stdin_reader {
        tracing::warn!(error = %e, "input relay unavailable");
    }

    while !host.is_finished() {
        match line_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(line) => {
                if let Err(e) = supervisor.writeline(&line) {
                    tracing::warn!(error = %e, "input not delivered");
                    if !e.is_peer_lost() {
                        break;
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            // Stdin is done; keep relaying output until the process ends.
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    let printed = host.join();
    let inert = supervisor.is_inert();
    drop(supervisor);
    if printed.is_err() || inert {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
