use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressReporter {
    domain_progress: Option<ProgressBar>,
    record_progress: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            domain_progress: None,
            record_progress: None,
            enabled,
        }
    }

    /// Start a bar over the domains left to probe in this run.
    pub fn start_domain_probing(&mut self, remaining: u64) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new(remaining);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sites checked ({eta}) {msg}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        self.domain_progress = Some(pb);
    }

    /// Advance by one processed domain.
    pub fn domain_done(&self, site: &str) {
        if let Some(ref pb) = self.domain_progress {
            pb.set_message(site.to_string());
            pb.inc(1);
        }
    }

    pub fn finish_domain_probing(&self, found: u64, processed: u64) {
        if let Some(ref pb) = self.domain_progress {
            pb.finish_with_message(format!(
                "✓ Checked {processed} sites, {found} with a valid security.txt"
            ));
        }
    }

    pub fn position(&self) -> u64 {
        self.domain_progress
            .as_ref()
            .map(|pb| pb.position())
            .unwrap_or(0)
    }

    pub fn log_warning(&self, message: &str) {
        if let Some(ref pb) = self.domain_progress {
            pb.println(format!("⚠ {message}"));
        }
    }

    /// Start a spinner for copying records of unknown count.
    pub fn start_record_copy(&mut self) {
        if !self.enabled {
            return;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {pos} records {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        self.record_progress = Some(pb);
    }

    pub fn record_done(&self) {
        if let Some(ref pb) = self.record_progress {
            pb.inc(1);
        }
    }

    pub fn finish_record_copy(&self, written: u64) {
        if let Some(ref pb) = self.record_progress {
            pb.finish_with_message(format!("✓ Wrote {written} records"));
        }
    }

    pub fn records_copied(&self) -> u64 {
        self.record_progress
            .as_ref()
            .map(|pb| pb.position())
            .unwrap_or(0)
    }
}
