//! Probe batches backed by the system `ping` utility

use crate::errors::{ErrorContext, PingmonError, Result};
use crate::probe::{ProbeBatch, ProbeOutcome, Prober};

use async_trait::async_trait;
use regex::Regex;
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Matches one echo reply, with or without the resolved address in parentheses:
/// `64 bytes from dns.google (8.8.8.8): icmp_seq=1 ttl=117 time=10.5 ms`
static REPLY_PATTERN: OnceLock<Regex> = OnceLock::new();

fn reply_pattern() -> &'static Regex {
    REPLY_PATTERN.get_or_init(|| {
        Regex::new(
            r"^\d+ bytes from (?P<host>[^ ]+?)(?: \((?P<ip>[^ ]+)\))?: icmp_seq=(?P<seq>\d+) ttl=\d+ time=(?P<time>[^ ]+) ms",
        )
        .expect("Invalid ping reply regex")
    })
}

/// Extract the round-trip time of every reply line, in output order.
///
/// Headers, statistics and replies whose time is not a number are skipped.
pub fn parse_replies(output: &str) -> Vec<f64> {
    let pattern = reply_pattern();
    output
        .lines()
        .filter_map(|line| pattern.captures(line.trim()))
        .filter_map(|caps| {
            let rtt = caps["time"].parse::<f64>().ok();
            trace!(
                "reply from {} seq={} time={}",
                &caps["host"], &caps["seq"], &caps["time"]
            );
            rtt
        })
        .collect()
}

/// Runs `ping -c <count> <host>` and collects the round-trip samples
#[derive(Debug, Clone)]
pub struct PingProber {
    host: String,
    count: u32,
    binary: String,
    timeout: Duration,
}

impl PingProber {
    pub fn new(host: impl Into<String>, count: u32, binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            count,
            binary: binary.into(),
            timeout,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary);
        command
            .arg("-c")
            .arg(self.count.to_string())
            .arg(&self.host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl Prober for PingProber {
    fn attempts(&self) -> u32 {
        self.count
    }

    async fn probe(&self, cancel: &CancellationToken) -> Result<ProbeOutcome> {
        debug!("Running {} -c {} {}", self.binary, self.count, self.host);

        let child = self
            .command()
            .spawn()
            .with_probe_context(&format!("Failed to start '{}'", self.binary))?;

        // Dropping the wait future kills the child (kill_on_drop)
        let output = tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                debug!("Probe cancelled, discarding batch");
                return Ok(ProbeOutcome::Cancelled);
            }
            result = timeout(self.timeout, child.wait_with_output()) => match result {
                Ok(output) => output.with_probe_context("Failed to collect ping output")?,
                Err(_) => {
                    return Err(PingmonError::probe(format!(
                        "'{}' did not finish within {:?}",
                        self.binary, self.timeout
                    )));
                }
            },
        };

        // ping exits non-zero when replies are lost; the output is still valid
        if !output.status.success() {
            debug!("{} exited with {}", self.binary, output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let rtts_ms = parse_replies(&stdout);
        debug!(
            "Probe batch finished: {}/{} replies",
            rtts_ms.len(),
            self.count
        );

        Ok(ProbeOutcome::Completed(ProbeBatch::new(self.count, rtts_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use std::time::Instant;
    #[cfg(unix)]
    use tempfile::TempDir;

    const LINUX_OUTPUT: &str = "\
PING dns.google (8.8.8.8) 56(84) bytes of data.
64 bytes from dns.google (8.8.8.8): icmp_seq=1 ttl=117 time=10.5 ms
64 bytes from dns.google (8.8.8.8): icmp_seq=2 ttl=117 time=11.2 ms
64 bytes from dns.google (8.8.8.8): icmp_seq=4 ttl=117 time=9.87 ms

--- dns.google ping statistics ---
4 packets transmitted, 3 received, 25% packet loss, time 3004ms
rtt min/avg/max/mdev = 9.870/10.523/11.200/0.543 ms
";

    #[test]
    fn test_parse_hostname_replies() {
        assert_eq!(parse_replies(LINUX_OUTPUT), vec![10.5, 11.2, 9.87]);
    }

    #[test]
    fn test_parse_address_replies() {
        let output = "\
PING 1.1.1.1 (1.1.1.1) 56(84) bytes of data.
64 bytes from 1.1.1.1: icmp_seq=1 ttl=58 time=4.12 ms
64 bytes from 1.1.1.1: icmp_seq=2 ttl=58 time=3.98 ms
";
        assert_eq!(parse_replies(output), vec![4.12, 3.98]);
    }

    #[test]
    fn test_parse_ipv6_replies() {
        let output = "64 bytes from 2001:4860:4860::8888: icmp_seq=1 ttl=118 time=7.01 ms\n";
        assert_eq!(parse_replies(output), vec![7.01]);
    }

    #[test]
    fn test_parse_skips_errors_and_bad_times() {
        let output = "\
From 192.168.1.1 icmp_seq=1 Destination Host Unreachable
64 bytes from h (10.0.0.1): icmp_seq=2 ttl=64 time=fast ms
Request timeout for icmp_seq 3
";
        assert!(parse_replies(output).is_empty());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_replies("").is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_is_probe_error() {
        let prober = PingProber::new(
            "localhost",
            3,
            "/nonexistent/pingmon-test-ping",
            Duration::from_secs(5),
        );
        let result = prober.probe(&CancellationToken::new()).await;
        assert!(matches!(result, Err(PingmonError::Probe(_))));
    }

    #[tokio::test]
    async fn test_silent_binary_yields_failed_batch() {
        let prober = PingProber::new("localhost", 3, "true", Duration::from_secs(5));
        let outcome = prober.probe(&CancellationToken::new()).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::Completed(ProbeBatch::failed(3)));
    }

    #[tokio::test]
    async fn test_cancelled_token_discards_batch() {
        let prober = PingProber::new("localhost", 3, "true", Duration::from_secs(5));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = prober.probe(&cancel).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::Cancelled);
    }

    /// A stand-in for ping that ignores its arguments and hangs
    #[cfg(unix)]
    fn hanging_binary() -> (TempDir, String) {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hanging-ping");
        std::fs::write(&path, "#!/bin/sh\nexec sleep 30\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let binary = path.to_string_lossy().into_owned();
        (dir, binary)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_cancel_interrupts_running_batch() {
        let (_dir, binary) = hanging_binary();
        let prober = PingProber::new("localhost", 3, binary, Duration::from_secs(30));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let outcome = prober.probe(&cancel).await.unwrap();

        assert_eq!(outcome, ProbeOutcome::Cancelled);
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "cancel took {:?}",
            started.elapsed()
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hanging_binary_times_out() {
        let (_dir, binary) = hanging_binary();
        let prober = PingProber::new("localhost", 3, binary, Duration::from_millis(200));

        let started = Instant::now();
        let result = prober.probe(&CancellationToken::new()).await;

        match result {
            Err(PingmonError::Probe(msg)) => {
                assert!(msg.contains("did not finish"), "unexpected message: {}", msg);
                assert!(msg.contains("200ms"), "unexpected message: {}", msg);
            }
            other => panic!("expected probe timeout, got {:?}", other),
        }
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
