use serde::{Deserialize, Serialize};
use std::fmt;

/// Application lifecycle: Pending is the only live state; Accepted and
/// Rejected are decisions. Whether a decision can be revised is a
/// deployment policy (see Config::strict_status_transitions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<ApplicationStatus> {
        match s {
            "Pending" => Some(ApplicationStatus::Pending),
            "Accepted" => Some(ApplicationStatus::Accepted),
            "Rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }

    /// A candidate may withdraw only while the application is undecided
    pub fn can_withdraw(&self) -> bool {
        matches!(self, ApplicationStatus::Pending)
    }

    /// Whether a recruiter may set a new status from this one. In strict
    /// mode decisions are terminal; otherwise re-deciding is allowed
    /// (the historically observed behavior).
    pub fn can_decide(&self, strict: bool) -> bool {
        !strict || matches!(self, ApplicationStatus::Pending)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn wire_format_round_trips() {
        for status in [
            ApplicationStatus::Pending,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(ApplicationStatus::parse("pending"), None);
    }

    #[rstest]
    #[case(ApplicationStatus::Pending, true)]
    #[case(ApplicationStatus::Accepted, false)]
    #[case(ApplicationStatus::Rejected, false)]
    fn only_pending_can_be_withdrawn(#[case] status: ApplicationStatus, #[case] ok: bool) {
        assert_eq!(status.can_withdraw(), ok);
    }

    #[rstest]
    #[case(ApplicationStatus::Pending, true, true)]
    #[case(ApplicationStatus::Accepted, true, false)]
    #[case(ApplicationStatus::Rejected, true, false)]
    #[case(ApplicationStatus::Pending, false, true)]
    #[case(ApplicationStatus::Accepted, false, true)]
    #[case(ApplicationStatus::Rejected, false, true)]
    fn strict_mode_makes_decisions_terminal(
        #[case] from: ApplicationStatus,
        #[case] strict: bool,
        #[case] ok: bool,
    ) {
        assert_eq!(from.can_decide(strict), ok);
    }
}
