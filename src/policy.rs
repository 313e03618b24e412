use crate::header::HeaderMap;
use std::fmt;

/// Thresholds for the default keep policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Both players must be rated at least this high
    pub minimum_elo: i64,
    /// Leading integer of the `TimeControl` tag (base seconds)
    pub minimum_time_control_seconds: u64,
    /// Exact `Termination` tag value required
    pub required_termination: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        FilterConfig {
            minimum_elo: 2400,
            minimum_time_control_seconds: 600,
            required_termination: "Normal".to_string(),
        }
    }
}

/// Why a game was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingTag(&'static str),
    InvalidElo(&'static str),
    EloBelowMinimum(&'static str),
    InvalidTimeControl,
    TimeControlBelowMinimum,
    TerminationMismatch,
    /// Rejected by a caller-supplied predicate
    Custom,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::MissingTag(tag) => write!(f, "missing {} tag", tag),
            Rejection::InvalidElo(tag) => write!(f, "{} is not an integer", tag),
            Rejection::EloBelowMinimum(tag) => write!(f, "{} below minimum", tag),
            Rejection::InvalidTimeControl => write!(f, "TimeControl has no leading seconds"),
            Rejection::TimeControlBelowMinimum => write!(f, "TimeControl below minimum"),
            Rejection::TerminationMismatch => write!(f, "Termination does not match"),
            Rejection::Custom => write!(f, "rejected by custom policy"),
        }
    }
}

/// Decides whether a finished game is copied to the output
pub trait KeepPolicy {
    fn evaluate(&self, headers: &HeaderMap) -> Result<(), Rejection>;

    fn keep(&self, headers: &HeaderMap) -> bool {
        self.evaluate(headers).is_ok()
    }
}

impl<F> KeepPolicy for F
where
    F: Fn(&HeaderMap) -> bool,
{
    fn evaluate(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        if self(headers) {
            Ok(())
        } else {
            Err(Rejection::Custom)
        }
    }
}

/// Rating, time control and termination checks, in that order
impl KeepPolicy for FilterConfig {
    fn evaluate(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        for tag in ["WhiteElo", "BlackElo"] {
            let elo = headers.get(tag).ok_or(Rejection::MissingTag(tag))?;
            let elo: i64 = elo.trim().parse().map_err(|_| Rejection::InvalidElo(tag))?;
            if elo < self.minimum_elo {
                return Err(Rejection::EloBelowMinimum(tag));
            }
        }

        let time_control = headers
            .get("TimeControl")
            .ok_or(Rejection::MissingTag("TimeControl"))?;
        let base_seconds =
            leading_seconds(time_control).ok_or(Rejection::InvalidTimeControl)?;
        if base_seconds < self.minimum_time_control_seconds {
            return Err(Rejection::TimeControlBelowMinimum);
        }

        let termination = headers
            .get("Termination")
            .ok_or(Rejection::MissingTag("Termination"))?;
        if *termination != self.required_termination {
            return Err(Rejection::TerminationMismatch);
        }

        Ok(())
    }
}

/// Filtering mode for game selection
#[derive(Clone, Copy)]
pub enum FilterMode<'a> {
    /// Keep every complete game (still counted)
    Passthrough,
    /// Keep games accepted by the policy
    Policy(&'a dyn KeepPolicy),
}

impl FilterMode<'_> {
    pub fn evaluate(&self, headers: &HeaderMap) -> Result<(), Rejection> {
        match self {
            FilterMode::Passthrough => Ok(()),
            FilterMode::Policy(policy) => policy.evaluate(headers),
        }
    }
}

impl fmt::Debug for FilterMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::Passthrough => write!(f, "Passthrough"),
            FilterMode::Policy(_) => write!(f, "Policy(..)"),
        }
    }
}

/// Integer formed by the leading ASCII digits, saturating on overflow.
/// `"600+5"` gives 600, `"-"` gives `None`.
#[inline]
fn leading_seconds(time_control: &str) -> Option<u64> {
    let digits_end = time_control
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(time_control.len());
    if digits_end == 0 {
        return None;
    }

    Some(
        time_control[..digits_end]
            .bytes()
            .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))),
    )
}
