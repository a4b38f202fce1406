//! Decision controls attached to a moderator summary.
//!
//! A control carries exactly two things: which action it triggers and which
//! report it targets. They are serialized into the platform's custom id as
//! `report:<action>:<report id>` and validated on the way back in.

use crate::ReportId;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tribunal_error::{ReportError, ReportErrorKind, ReportResult};

const CONTROL_PREFIX: &str = "report";
const SEPARATOR: char = ':';

/// Moderator decision on a report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Restore the message to its origin channel.
    Approve,
    /// Keep the message removed and notify its author.
    Delete,
}

/// Tagged `{action, report id}` pair embedded in a decision control.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct DecisionControl {
    /// Action the control triggers.
    action: DecisionAction,
    /// Report the control targets.
    report_id: ReportId,
}

impl DecisionControl {
    /// Create a control for a report.
    pub fn new(action: DecisionAction, report_id: ReportId) -> Self {
        Self { action, report_id }
    }

    /// Serialized form used as the platform custom id.
    ///
    /// ```
    /// use tribunal_core::{DecisionAction, DecisionControl, ReportId};
    ///
    /// let id = ReportId::parse("abcd1234").expect("valid id");
    /// let control = DecisionControl::new(DecisionAction::Approve, id);
    /// assert_eq!(control.custom_id(), "report:approve:abcd1234");
    /// ```
    pub fn custom_id(&self) -> String {
        format!(
            "{CONTROL_PREFIX}{SEPARATOR}{}{SEPARATOR}{}",
            self.action, self.report_id
        )
    }

    /// Whether a custom id belongs to a decision control at all.
    ///
    /// Lets the interaction router skip components owned by something else
    /// without treating them as malformed.
    pub fn is_decision_control(custom_id: &str) -> bool {
        custom_id
            .strip_prefix(CONTROL_PREFIX)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Parse and validate a custom id.
    pub fn parse(custom_id: &str) -> ReportResult<Self> {
        let invalid = |reason: &str| {
            ReportError::new(ReportErrorKind::InvalidControl {
                custom_id: custom_id.to_string(),
                reason: reason.to_string(),
            })
        };

        let mut parts = custom_id.splitn(3, SEPARATOR);
        let (Some(prefix), Some(action), Some(report_id)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected report:<action>:<id>"));
        };

        if prefix != CONTROL_PREFIX {
            return Err(invalid("unknown prefix"));
        }

        let action = DecisionAction::from_str(action).map_err(|_| invalid("unknown action"))?;
        let report_id = ReportId::parse(report_id).ok_or_else(|| invalid("malformed report id"))?;

        Ok(Self { action, report_id })
    }
}

impl FromStr for DecisionControl {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
