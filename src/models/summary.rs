use std::fmt;

/// Aggregate timings over a run of several problems.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub count: usize,
    pub total_ms: u64,
    pub min_ms: u64,
    pub max_ms: u64,
}

impl RunSummary {
    pub fn from_times(times: &[u64]) -> Option<Self> {
        let min_ms = *times.iter().min()?;
        let max_ms = *times.iter().max()?;

        Some(Self {
            count: times.len(),
            total_ms: times.iter().sum(),
            min_ms,
            max_ms,
        })
    }

    pub fn total_secs(&self) -> f64 {
        self.total_ms as f64 / 1000.0
    }

    pub fn average_ms(&self) -> f64 {
        self.total_ms as f64 / self.count as f64
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total run time:   {:.2} s", self.total_secs())?;
        writeln!(f, "Average run time: {:.2} ms", self.average_ms())?;
        writeln!(f, "Min run time:     {} ms", self.min_ms)?;
        write!(f, "Max run time:     {} ms", self.max_ms)
    }
}
