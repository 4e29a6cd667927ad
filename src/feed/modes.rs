// Feed modes.
// Toggles controlling which (kind, state) combinations end up in the feed.

use crate::github::{IssueKind, IssueState};

/// Which kinds of entries to emit. Defaults to everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub issue_open: bool,
    pub issue_closed: bool,
    pub pr_open: bool,
    pub pr_closed: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self::ALL
    }
}

impl Modes {
    pub const ALL: Modes = Modes {
        issue_open: true,
        issue_closed: true,
        pr_open: true,
        pr_closed: true,
    };

    pub const NONE: Modes = Modes {
        issue_open: false,
        issue_closed: false,
        pr_open: false,
        pr_closed: false,
    };

    /// Build modes from `io`, `ic`, `po`, `pc` codes.
    ///
    /// Each value may itself be a comma separated list. Only the listed
    /// modes are enabled; with no codes at all every mode is enabled.
    /// An empty `m=` therefore means everything, not nothing.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut modes = Modes::NONE;
        let mut any = false;

        for value in codes {
            for code in value.as_ref().split(',').map(str::trim) {
                if code.is_empty() {
                    continue;
                }
                any = true;
                match code {
                    "io" => modes.issue_open = true,
                    "ic" => modes.issue_closed = true,
                    "po" => modes.pr_open = true,
                    "pc" => modes.pr_closed = true,
                    other => tracing::warn!("Ignoring unknown mode '{}'", other),
                }
            }
        }

        if any { modes } else { Modes::ALL }
    }

    /// Whether entries of this kind should be emitted in this state.
    pub fn allows(&self, kind: IssueKind, state: IssueState) -> bool {
        match (kind, state) {
            (IssueKind::Issue, IssueState::Open) => self.issue_open,
            (IssueKind::Issue, IssueState::Closed) => self.issue_closed,
            (IssueKind::PullRequest, IssueState::Open) => self.pr_open,
            (IssueKind::PullRequest, IssueState::Closed) => self.pr_closed,
        }
    }
}
