//! Process and filesystem actions: stopping the gateway, uninstalling,
//! relaunching the manager

use std::path::Path;
use std::process::Command;

use tracing::{info, warn};

use super::error::{BackendError, BackendResult};
use crate::config::UninstallSettings;
use crate::domain::UninstallReport;

/// Find processes listening on `port`
#[cfg(unix)]
fn listening_pids(port: u16) -> BackendResult<Vec<u32>> {
    let output = Command::new("lsof")
        .args(["-t", "-sTCP:LISTEN", &format!("-iTCP:{}", port)])
        .output()
        .map_err(|e| BackendError::Process(format!("Failed to run lsof: {}", e)))?;

    // lsof exits with 1 when nothing matches
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_pid_lines(&stdout))
}

#[cfg(windows)]
fn listening_pids(port: u16) -> BackendResult<Vec<u32>> {
    let output = Command::new("netstat")
        .args(["-ano", "-p", "TCP"])
        .output()
        .map_err(|e| BackendError::Process(format!("Failed to run netstat: {}", e)))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_netstat(&stdout, port))
}

#[cfg(not(any(unix, windows)))]
fn listening_pids(_port: u16) -> BackendResult<Vec<u32>> {
    Err(BackendError::Process(
        "Stopping processes is not supported on this platform".to_string(),
    ))
}

fn parse_pid_lines(output: &str) -> Vec<u32> {
    let mut pids: Vec<u32> = output
        .lines()
        .filter_map(|line| line.trim().parse().ok())
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}

#[cfg_attr(not(windows), allow(dead_code))]
fn parse_netstat(output: &str, port: u16) -> Vec<u32> {
    let suffix = format!(":{}", port);
    let mut pids: Vec<u32> = output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            // Proto  Local Address  Foreign Address  State  PID
            if cols.len() < 5 || !cols[3].eq_ignore_ascii_case("LISTENING") {
                return None;
            }
            if !cols[1].ends_with(&suffix) {
                return None;
            }
            cols[4].parse().ok()
        })
        .collect();
    pids.sort_unstable();
    pids.dedup();
    pids
}

#[cfg(unix)]
fn terminate(pid: u32) -> BackendResult<()> {
    let pid = libc::pid_t::try_from(pid)
        .map_err(|_| BackendError::Process(format!("Invalid pid {}", pid)))?;
    // SAFETY: kill(2) has no memory-safety preconditions
    let rc = unsafe { libc::kill(pid, libc::SIGTERM) };
    if rc != 0 {
        return Err(BackendError::Process(format!(
            "Failed to stop process {}: {}",
            pid,
            std::io::Error::last_os_error()
        )));
    }
    Ok(())
}

#[cfg(windows)]
fn terminate(pid: u32) -> BackendResult<()> {
    let status = Command::new("taskkill")
        .args(["/F", "/PID", &pid.to_string()])
        .status()
        .map_err(|e| BackendError::Process(format!("Failed to run taskkill: {}", e)))?;
    if !status.success() {
        return Err(BackendError::Process(format!(
            "taskkill failed for process {}",
            pid
        )));
    }
    Ok(())
}

#[cfg(not(any(unix, windows)))]
fn terminate(_pid: u32) -> BackendResult<()> {
    Ok(())
}

/// Best-effort stop of every process listening on the gateway port
pub(super) fn stop_port_processes(port: u16) -> BackendResult<String> {
    let pids = listening_pids(port)?;
    if pids.is_empty() {
        return Ok(format!("No process is listening on port {}", port));
    }

    let mut stopped = 0;
    for pid in &pids {
        match terminate(*pid) {
            Ok(()) => stopped += 1,
            Err(e) => warn!("[backend] {}", e),
        }
    }
    info!("[backend] Stopped {}/{} process(es) on port {}", stopped, pids.len(), port);
    Ok(format!(
        "Stopped {} of {} process(es) on port {}",
        stopped,
        pids.len(),
        port
    ))
}

fn run_cli_uninstall(argv: &[String]) -> BackendResult<()> {
    let Some((program, args)) = argv.split_first() else {
        return Ok(());
    };
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| BackendError::Process(format!("Failed to run {}: {}", program, e)))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BackendError::Process(format!(
            "{} exited with {}: {}",
            argv.join(" "),
            output.status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// Remove the OpenClaw data directory and CLI. Never fails at the call
/// level; problems are described in the report.
pub(super) fn uninstall(
    settings: &UninstallSettings,
    data_dir: &Path,
    gateway_port: u16,
) -> UninstallReport {
    if settings.stop_gateway {
        if let Err(e) = stop_port_processes(gateway_port) {
            warn!("[backend] Could not stop gateway before uninstall: {}", e);
        }
    }

    if data_dir.exists() {
        if let Err(e) = std::fs::remove_dir_all(data_dir) {
            return UninstallReport::failed(
                format!("Failed to remove {}", data_dir.display()),
                e.to_string(),
            );
        }
        info!("[backend] Removed {}", data_dir.display());
    }

    if let Err(e) = run_cli_uninstall(&settings.cli_command) {
        return UninstallReport::failed(
            "Data removed, but the OpenClaw CLI could not be uninstalled",
            e.to_string(),
        );
    }

    UninstallReport::succeeded("OpenClaw has been removed from this machine")
}

/// Start a fresh copy of the manager with the same arguments
pub(super) fn relaunch() -> BackendResult<()> {
    let exe = std::env::current_exe().map_err(|e| {
        BackendError::Process(format!("Failed to locate current executable: {}", e))
    })?;
    Command::new(&exe)
        .args(std::env::args_os().skip(1))
        .spawn()
        .map_err(|e| BackendError::Process(format!("Failed to relaunch {}: {}", exe.display(), e)))?;
    info!("[backend] Relaunched {}", exe.display());
    Ok(())
}
