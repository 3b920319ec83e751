// Session: the form shell's mutable state as explicit, labeled transitions.
// Timers are modeled as `Tick` transitions carrying a clock reading, so a new
// submission or leaving the result view cancels any progress in flight.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::constants::*;
use crate::shell::{self, FormError, FormState};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Form,
    Result,
    Guide,
}

/// Progress bar shown after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Progress {
    pub calculating: bool,
    pub value: u8,
    pub started_at_ms: Option<u64>,
}

impl Progress {
    fn started(now_ms: u64) -> Self {
        Progress {
            calculating: true,
            value: 0,
            started_at_ms: Some(now_ms),
        }
    }

    /// Cancel any pending completion; the bar keeps its last value.
    fn stopped(self) -> Self {
        Progress {
            calculating: false,
            started_at_ms: None,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub open: bool,
    pub active_tab: Tab,
    pub form: FormState,
    pub result: Option<SizeResult>,
    pub error: Option<FormError>,
    pub progress: Progress,
    pub guide_image_error: bool,
    pub current_year: i32,
}

impl Session {
    pub fn new(current_year: i32) -> Self {
        Session {
            open: true,
            active_tab: Tab::Form,
            form: FormState::default(),
            result: None,
            error: None,
            progress: Progress::default(),
            guide_image_error: false,
            current_year,
        }
    }
}

/// Labels for each transition, enabling deterministic trace replay.
#[derive(Debug, Clone, PartialEq)]
pub enum TransitionLabel {
    Open,
    Close,
    SetSex(Sex),
    SetBirthYear(String),
    SetHeight(String),
    SetWeight(String),
    SetCategory(Category),
    SetCut(Cut),
    SetFit(Fit),
    SwitchHeightUnit(HeightUnit),
    SwitchWeightUnit(WeightUnit),
    Submit { now_ms: u64 },
    Tick { now_ms: u64 },
    EditForm,
    SelectTab(Tab),
    GuideImageFailed,
}

impl fmt::Display for TransitionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionLabel::SetBirthYear(v) => write!(f, "SetBirthYear({})", v),
            TransitionLabel::SetHeight(v) => write!(f, "SetHeight({})", v),
            TransitionLabel::SetWeight(v) => write!(f, "SetWeight({})", v),
            TransitionLabel::SetCategory(c) => write!(f, "SetCategory({})", c),
            TransitionLabel::SetCut(c) => write!(f, "SetCut({})", c),
            TransitionLabel::SetFit(v) => write!(f, "SetFit({})", v),
            TransitionLabel::Submit { now_ms } => write!(f, "Submit(@{}ms)", now_ms),
            TransitionLabel::Tick { now_ms } => write!(f, "Tick(@{}ms)", now_ms),
            other => write!(f, "{:?}", other),
        }
    }
}

/// Result of a pure transition function.
pub struct TransitionResult {
    pub success: bool,
    pub new_state: Session,
}

fn rejected(state: &Session) -> TransitionResult {
    TransitionResult {
        success: false,
        new_state: state.clone(),
    }
}

fn accepted(new_state: Session) -> TransitionResult {
    TransitionResult {
        success: true,
        new_state,
    }
}

pub fn open(state: &Session) -> TransitionResult {
    if state.open {
        return rejected(state);
    }
    accepted(Session {
        open: true,
        ..state.clone()
    })
}

pub fn close(state: &Session) -> TransitionResult {
    if !state.open {
        return rejected(state);
    }
    accepted(Session {
        open: false,
        progress: state.progress.stopped(),
        ..state.clone()
    })
}

/// Edit one form field. Category and cut changes clear a failed guide image.
pub fn edit_field(state: &Session, label: &TransitionLabel) -> TransitionResult {
    let mut next = state.clone();
    match label {
        TransitionLabel::SetSex(sex) => next.form.sex = *sex,
        TransitionLabel::SetBirthYear(year) => next.form.birth_year = year.clone(),
        TransitionLabel::SetHeight(height) => next.form.height = height.clone(),
        TransitionLabel::SetWeight(weight) => next.form.weight = weight.clone(),
        TransitionLabel::SetFit(fit) => next.form.fit = *fit,
        TransitionLabel::SetCategory(category) => {
            next.form.category = *category;
            next.guide_image_error = false;
        }
        TransitionLabel::SetCut(cut) => {
            next.form.cut = *cut;
            next.guide_image_error = false;
        }
        TransitionLabel::SwitchHeightUnit(unit) => next.form.switch_height_unit(*unit),
        TransitionLabel::SwitchWeightUnit(unit) => next.form.switch_weight_unit(*unit),
        _ => return rejected(state),
    }
    accepted(next)
}

/// Validate and compute. Any progress from an earlier submission is cancelled first.
/// On a form error the result is cleared and the form tab shown.
pub fn submit(state: &Session, now_ms: u64) -> TransitionResult {
    if !state.open {
        return rejected(state);
    }

    let base = Session {
        error: None,
        progress: state.progress.stopped(),
        ..state.clone()
    };

    match shell::submit(&state.form, state.current_year) {
        Err(error) => accepted(Session {
            result: None,
            active_tab: Tab::Form,
            error: Some(error),
            ..base
        }),
        Ok(result) => accepted(Session {
            result: Some(result),
            active_tab: Tab::Result,
            progress: Progress::started(now_ms),
            ..base
        }),
    }
}

/// Advance the progress bar to `now_ms`; completes once the full duration has elapsed.
pub fn tick(state: &Session, now_ms: u64) -> TransitionResult {
    let running = state.progress.calculating;
    let Some(started_at) = state.progress.started_at_ms.filter(|_| running) else {
        return rejected(state);
    };

    let elapsed = now_ms.saturating_sub(started_at);
    let progress = if elapsed >= PROGRESS_DURATION_MS {
        tracing::debug!(elapsed, "progress complete");
        Progress {
            value: 100,
            ..state.progress.stopped()
        }
    } else {
        let value = (elapsed as f64 / PROGRESS_DURATION_MS as f64 * 100.0).round() as u8;
        Progress {
            value: value.min(100),
            ..state.progress
        }
    };

    accepted(Session {
        progress,
        ..state.clone()
    })
}

/// Back to the form, cancelling progress ("Editar datos" / "Calcular de nuevo").
pub fn edit_form(state: &Session) -> TransitionResult {
    accepted(Session {
        active_tab: Tab::Form,
        progress: state.progress.stopped(),
        ..state.clone()
    })
}

/// Switch tabs. The result tab is unavailable until something was computed.
pub fn select_tab(state: &Session, tab: Tab) -> TransitionResult {
    match tab {
        Tab::Form => edit_form(state),
        Tab::Result if state.result.is_none() => rejected(state),
        _ => accepted(Session {
            active_tab: tab,
            ..state.clone()
        }),
    }
}

pub fn guide_image_failed(state: &Session) -> TransitionResult {
    accepted(Session {
        guide_image_error: true,
        ..state.clone()
    })
}

/// Apply a single labeled transition to the state.
pub fn apply_transition(state: &Session, label: &TransitionLabel) -> TransitionResult {
    match label {
        TransitionLabel::Open => open(state),
        TransitionLabel::Close => close(state),
        TransitionLabel::Submit { now_ms } => submit(state, *now_ms),
        TransitionLabel::Tick { now_ms } => tick(state, *now_ms),
        TransitionLabel::EditForm => edit_form(state),
        TransitionLabel::SelectTab(tab) => select_tab(state, *tab),
        TransitionLabel::GuideImageFailed => guide_image_failed(state),
        field => edit_field(state, field),
    }
}

/// Tick at the progress interval from `now_ms` until the bar completes.
pub fn settle(state: &Session, now_ms: u64) -> Session {
    let mut state = state.clone();
    let mut now = now_ms;
    while state.progress.calculating {
        now += PROGRESS_TICK_MS;
        state = tick(&state, now).new_state;
    }
    state
}

// Session invariants, checked after every replayed step.

/// val resultTabNeedsResult
pub fn result_tab_needs_result(state: &Session) -> bool {
    state.active_tab != Tab::Result || state.result.is_some()
}

/// val errorClearsResult
pub fn error_clears_result(state: &Session) -> bool {
    state.error.is_none() || state.result.is_none()
}

/// val progressNeedsResult
pub fn progress_needs_result(state: &Session) -> bool {
    !state.progress.calculating || state.result.is_some()
}

/// val progressBounded
pub fn progress_bounded(state: &Session) -> bool {
    state.progress.value <= 100
}

/// val closedIsIdle
pub fn closed_is_idle(state: &Session) -> bool {
    state.open || !state.progress.calculating
}

pub const SESSION_INVARIANTS: &[(&str, fn(&Session) -> bool)] = &[
    ("resultTabNeedsResult", result_tab_needs_result),
    ("errorClearsResult", error_clears_result),
    ("progressNeedsResult", progress_needs_result),
    ("progressBounded", progress_bounded),
    ("closedIsIdle", closed_is_idle),
];

pub fn check_session(state: &Session) -> Result<(), &'static str> {
    for (name, check) in SESSION_INVARIANTS {
        if !check(state) {
            return Err(*name);
        }
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("transition {label} rejected at step {step}")]
    Rejected { step: usize, label: String },

    #[error("invariant '{invariant}' violated after step {step} ({label})")]
    Violated {
        step: usize,
        label: String,
        invariant: &'static str,
    },
}

/// Replay a full trace of labeled transitions starting from `init`.
/// Every transition must be accepted and leave the session invariants intact.
/// Returns the sequence of (label, resulting state) pairs.
pub fn replay_trace(
    init: Session,
    labels: &[TransitionLabel],
) -> Result<Vec<(TransitionLabel, Session)>, ReplayError> {
    let mut trace = Vec::with_capacity(labels.len());
    let mut state = init;

    for (step, label) in labels.iter().enumerate() {
        let result = apply_transition(&state, label);
        if !result.success {
            return Err(ReplayError::Rejected {
                step,
                label: label.to_string(),
            });
        }

        if let Err(invariant) = check_session(&result.new_state) {
            return Err(ReplayError::Violated {
                step,
                label: label.to_string(),
                invariant,
            });
        }

        state = result.new_state;
        trace.push((label.clone(), state.clone()));
    }

    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_session() -> Session {
        let mut session = Session::new(2026);
        session.form.birth_year = "1990".to_string();
        session
    }

    #[test]
    fn test_submit_starts_progress() {
        let r = submit(&ready_session(), 1_000);
        assert!(r.success);
        assert_eq!(r.new_state.active_tab, Tab::Result);
        assert_eq!(r.new_state.result.as_ref().map(|r| r.size.as_str()), Some("L"));
        assert_eq!(r.new_state.progress, Progress::started(1_000));
    }

    #[test]
    fn test_submit_with_error_clears_result() {
        let done = submit(&ready_session(), 0).new_state;
        let bad = Session {
            form: FormState {
                weight: "500".to_string(),
                ..done.form.clone()
            },
            ..done
        };
        let r = submit(&bad, 100);
        assert_eq!(r.new_state.result, None);
        assert_eq!(r.new_state.error, Some(FormError::ImplausibleBody));
        assert_eq!(r.new_state.active_tab, Tab::Form);
        assert!(!r.new_state.progress.calculating);
    }

    #[test]
    fn test_tick_progress_values() {
        let s = submit(&ready_session(), 0).new_state;
        assert_eq!(tick(&s, 60).new_state.progress.value, 2);
        assert_eq!(tick(&s, 1_500).new_state.progress.value, 50);

        let done = tick(&s, 3_000).new_state;
        assert_eq!(done.progress.value, 100);
        assert!(!done.progress.calculating);
        assert!(!tick(&done, 3_060).success);
    }

    #[test]
    fn test_resubmit_supersedes_progress() {
        let first = submit(&ready_session(), 0).new_state;
        let halfway = tick(&first, 1_500).new_state;
        let second = submit(&halfway, 2_000).new_state;
        assert_eq!(second.progress, Progress::started(2_000));
        // The old deadline no longer completes the bar
        assert_eq!(tick(&second, 3_000).new_state.progress.value, 33);
    }

    #[test]
    fn test_settle_completes() {
        let s = submit(&ready_session(), 0).new_state;
        let settled = settle(&s, 0);
        assert_eq!(settled.progress.value, 100);
        assert!(!settled.progress.calculating);
    }

    #[test]
    fn test_result_tab_disabled_without_result() {
        assert!(!select_tab(&ready_session(), Tab::Result).success);
        assert!(select_tab(&ready_session(), Tab::Guide).success);
    }

    #[test]
    fn test_category_change_resets_guide_error() {
        let failed = guide_image_failed(&ready_session()).new_state;
        assert!(failed.guide_image_error);
        let r = edit_field(&failed, &TransitionLabel::SetCategory(Category::Polos));
        assert!(!r.new_state.guide_image_error);
        assert_eq!(r.new_state.form.category, Category::Polos);
    }

    #[test]
    fn test_close_stops_progress() {
        let s = submit(&ready_session(), 0).new_state;
        let closed = close(&s).new_state;
        assert!(!closed.open);
        assert!(!closed.progress.calculating);
        assert!(!close(&closed).success);
        assert!(open(&closed).success);
    }
}
