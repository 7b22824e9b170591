use std::path::Path;
use std::sync::Arc;

use super::resume::resolve;
use super::sink::ResultSink;
use super::source::{DomainSource, count_domains};
use crate::config::Config;
use crate::core::Result;
use crate::logging::ProbeLog;
use crate::probe::{Fetch, Prober};
use crate::progress::ProgressReporter;

/// Counts from one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Index the run started at; everything below was done by earlier runs
    pub resumed_from: u64,
    /// Domains in the input
    pub total_domains: u64,
    /// Domains probed and written by this run
    pub processed: u64,
    /// Of those, domains with a valid security.txt
    pub found: u64,
}

impl RunSummary {
    /// Domains still to probe after this run.
    pub fn remaining(&self) -> u64 {
        self.total_domains
            .saturating_sub(self.resumed_from)
            .saturating_sub(self.processed)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }
}

/// Drives resume -> source -> probe -> sink, one domain at a time.
pub struct BatchRunner {
    prober: Prober,
    candidate_paths: Vec<String>,
    log: Arc<dyn ProbeLog>,
    limit: Option<u64>,
}

impl BatchRunner {
    pub fn new(prober: Prober, candidate_paths: Vec<String>, log: Arc<dyn ProbeLog>) -> Self {
        Self {
            prober,
            candidate_paths,
            log,
            limit: None,
        }
    }

    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetch>, log: Arc<dyn ProbeLog>) -> Self {
        let prober = Prober::new(fetcher, log.clone()).with_scheme(config.scheme());
        Self::new(prober, config.candidate_paths(), log)
    }

    /// Stop after probing at most `limit` domains in this run.
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// Probe every domain in `sites` not yet present in `output`, appending a
    /// row for each.
    ///
    /// The resume state is resolved before anything else, so an unusable
    /// output aborts the run without a single request.
    pub async fn run(
        &self,
        sites: &Path,
        output: &Path,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Result<RunSummary> {
        self.log.info(&format!(
            "Reading sites from {} and writing to {}...",
            sites.display(),
            output.display()
        ));

        self.log.debug(&format!(
            "Getting index of last-queried site from {}...",
            output.display()
        ));
        let resume = resolve(output)?;
        self.log.debug(&format!(
            "Got {} already-queried sites from {}.",
            resume.next_index,
            output.display()
        ));

        self.log
            .debug(&format!("Getting number of rows from {}...", sites.display()));
        let total_domains = count_domains(sites)?;
        self.log.debug(&format!(
            "Got {total_domains} rows from {}.",
            sites.display()
        ));

        let source = DomainSource::open(sites)?;
        let mut sink = ResultSink::open(output)?;

        let remaining = total_domains.saturating_sub(resume.next_index);
        let planned = self.limit.map_or(remaining, |limit| limit.min(remaining));
        if let Some(p) = progress.as_deref_mut() {
            p.start_domain_probing(planned);
        }
        if !resume.is_fresh() {
            self.log.trace(&format!(
                "Skipping {} already-queried sites.",
                resume.next_index.min(total_domains)
            ));
        }

        let mut summary = RunSummary {
            resumed_from: resume.next_index,
            total_domains,
            ..Default::default()
        };

        for record in source {
            let record = record?;
            if resume.is_done(record.index) {
                continue;
            }
            if self.limit.is_some_and(|limit| summary.processed >= limit) {
                self.log.info(&format!(
                    "Stopping before index {}, limit of {} sites reached.",
                    record.index, summary.processed
                ));
                break;
            }
            if record.domain.contains(char::REPLACEMENT_CHARACTER) {
                let message = format!(
                    "Domain at index {} is not valid UTF-8, checking it as {}.",
                    record.index, record.domain
                );
                self.log.warn(&message);
                if let Some(p) = progress.as_deref() {
                    p.log_warning(&message);
                }
            }

            let result = self.prober.probe(&record, &self.candidate_paths).await;
            sink.emit(&result)?;

            summary.processed += 1;
            if result.is_found() {
                summary.found += 1;
            }
            if let Some(p) = progress.as_deref() {
                p.domain_done(&result.site);
            }
        }

        if let Some(p) = progress.as_deref() {
            p.finish_domain_probing(summary.found, summary.processed);
        }
        self.log.info(&format!(
            "Checked {} sites ({} with a valid security.txt), wrote {} rows to {}.",
            summary.processed,
            summary.found,
            sink.rows_written(),
            sink.path().display()
        ));

        Ok(summary)
    }
}
