//! Persistence of working endpoints and run statistics

use crate::checker::models::ProbeOutcome;
use crate::Result;
use anyhow::Context;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Statistics for one complete run
#[derive(Debug, Clone, Copy, Default)]
pub struct RunStats {
    /// Candidate lines read (parsed plus rejected)
    pub submitted: usize,
    /// Successfully parsed endpoints
    pub parsed: usize,
    /// Rejected candidate lines
    pub parse_failures: usize,
    /// Probes performed
    pub probed: usize,
    /// Probes that succeeded
    pub succeeded: usize,
    /// Probes that hit the timeout
    pub timeouts: usize,
    /// Probes that could not connect
    pub connect_errors: usize,
    /// Probes answered with a non-2xx status
    pub bad_status: usize,
    /// Total wall time of the run
    pub elapsed: Duration,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} candidates ({} rejected), {} probed: {} working, {} timeout, {} connect error, {} bad status in {:.2}s",
            self.submitted,
            self.parse_failures,
            self.probed,
            self.succeeded,
            self.timeouts,
            self.connect_errors,
            self.bad_status,
            self.elapsed.as_secs_f64()
        )
    }
}

/// Writes the working endpoints to a flat output file
pub struct Reporter;

impl Reporter {
    /// Overwrite `path` with one `host:port` line per outcome, in the
    /// order the collector holds them.
    ///
    /// The content goes to a temp file in the destination directory first
    /// and is persisted with an atomic rename, so a failed write cannot
    /// leave a truncated output file behind.
    pub fn report<P: AsRef<Path>>(path: P, results: &[ProbeOutcome]) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temp file in {:?}", dir))?;

        for outcome in results {
            writeln!(file, "{}", outcome.endpoint)
                .with_context(|| format!("failed to write output for {:?}", path))?;
        }

        file.persist(path)
            .with_context(|| format!("failed to replace output file {:?}", path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::models::Endpoint;

    fn outcomes(ports: &[u16]) -> Vec<ProbeOutcome> {
        ports
            .iter()
            .map(|&port| {
                ProbeOutcome::success(
                    Endpoint::new("10.0.0.1".to_string(), port),
                    Duration::from_millis(5),
                )
            })
            .collect()
    }

    #[test]
    fn test_report_writes_one_endpoint_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid.txt");

        Reporter::report(&path, &outcomes(&[80, 8080])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "10.0.0.1:80\n10.0.0.1:8080\n");
    }

    #[test]
    fn test_report_overwrites_previous_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid.txt");
        std::fs::write(&path, "stale:1\nstale:2\n").unwrap();

        Reporter::report(&path, &outcomes(&[3128])).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "10.0.0.1:3128\n");
    }

    #[test]
    fn test_report_empty_results_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("valid.txt");

        Reporter::report(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_report_missing_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("valid.txt");

        assert!(Reporter::report(&path, &outcomes(&[80])).is_err());
    }

    #[test]
    fn test_stats_display_summary() {
        let stats = RunStats {
            submitted: 3,
            parsed: 2,
            parse_failures: 1,
            probed: 2,
            succeeded: 0,
            timeouts: 1,
            connect_errors: 1,
            bad_status: 0,
            elapsed: Duration::from_secs(1),
        };

        let line = stats.to_string();
        assert!(line.contains("3 candidates"));
        assert!(line.contains("1 rejected"));
        assert!(line.contains("0 working"));
    }
}
