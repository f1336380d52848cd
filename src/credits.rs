use std::fmt;

/// Logical count of vendor operations performed during a run.
///
/// These are local tallies for cost visibility, not the vendor's own credit
/// accounting. The value is owned by whoever drives the lookups and passed by
/// `&mut` to every operation that spends a credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreditUsage {
    pub match_credits: u64,
    pub enrich_credits: u64,
    pub email_credits: u64,
    pub mobile_credits: u64,
}

impl CreditUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_match(&mut self) {
        self.match_credits += 1;
    }

    pub fn record_enrich(&mut self) {
        self.enrich_credits += 1;
    }

    pub fn record_email(&mut self) {
        self.email_credits += 1;
    }

    pub fn record_mobile(&mut self) {
        self.mobile_credits += 1;
    }

    pub fn total(&self) -> u64 {
        self.match_credits + self.enrich_credits + self.email_credits + self.mobile_credits
    }
}

impl fmt::Display for CreditUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Match credits:  {}", self.match_credits)?;
        writeln!(f, "Enrich credits: {}", self.enrich_credits)?;
        writeln!(f, "Email credits:  {}", self.email_credits)?;
        write!(f, "Mobile credits: {}", self.mobile_credits)
    }
}
