//! Interactive confirmation of a resolved record.
//!
//! The loop moves through `Searching -> AwaitingConfirmation -> {Confirmed, Skipped}`
//! and may cycle back to `Searching` whenever the operator supplies an
//! alternate title or an explicit id.

use crate::api::MovieRecord;
use crate::prompt::{PromptError, Prompter};
use crate::resolver::{is_external_id, LookupOutcome, LookupRequest, Resolve};
use crate::ui::Ui;
use std::fmt;
use tracing::{debug, info, warn};

pub const CONFIRM_QUESTION: &str = "Organize this? (y/n/search): ";
pub const ALTERNATE_QUESTION: &str =
    "Enter an alternate title or an ID (tt...), or press Enter to skip: ";
pub const NOT_FOUND_QUESTION: &str =
    "No match found. Enter an alternate title or an ID (tt...), or press Enter to skip: ";

/// How a resolved candidate gets accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmPolicy {
    #[default]
    Interactive,
    /// Accept every found record, skip everything else, never prompt
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    Declined,
    InputClosed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NotFound => "no match found",
            SkipReason::Declined => "skipped by operator",
            SkipReason::InputClosed => "input closed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Searching(LookupRequest),
    AwaitingConfirmation(MovieRecord),
    Confirmed(MovieRecord),
    Skipped(SkipReason),
}

impl LoopState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoopState::Confirmed(_) | LoopState::Skipped(_))
    }
}

/// Final result of a disambiguation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Confirmed(MovieRecord),
    Skipped(SkipReason),
}

/// What the operator typed at the confirmation prompt
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Accept,
    AskAlternate,
    Query(LookupRequest),
    Skip,
    Unrecognized,
}

fn interpret_reply(answer: &str) -> Reply {
    let answer = answer.trim();
    let lowered = answer.to_lowercase();

    match lowered.as_str() {
        "y" | "yes" => return Reply::Accept,
        "n" | "no" | "search" => return Reply::AskAlternate,
        "" | "s" | "skip" => return Reply::Skip,
        _ => {}
    }

    if is_external_id(&lowered) {
        return Reply::Query(LookupRequest::ById {
            external_id: lowered,
        });
    }

    if lowered.starts_with("search ") {
        if let Some(request) = LookupRequest::from_operator_input(&answer["search ".len()..]) {
            return Reply::Query(request);
        }
    }

    Reply::Unrecognized
}

pub struct DisambiguationLoop<'a> {
    resolver: &'a dyn Resolve,
    policy: ConfirmPolicy,
}

impl<'a> DisambiguationLoop<'a> {
    pub fn new(resolver: &'a dyn Resolve, policy: ConfirmPolicy) -> Self {
        Self { resolver, policy }
    }

    /// Drive the state machine from an initial request to a terminal state
    pub fn run(
        &self,
        initial: LookupRequest,
        prompter: &mut dyn Prompter,
        ui: &mut Ui,
    ) -> Decision {
        let mut state = LoopState::Searching(initial);

        loop {
            state = match state {
                LoopState::Confirmed(record) => return Decision::Confirmed(record),
                LoopState::Skipped(reason) => return Decision::Skipped(reason),
                pending => self.step(pending, prompter, ui),
            };
        }
    }

    /// Single transition
    pub fn step(&self, state: LoopState, prompter: &mut dyn Prompter, ui: &mut Ui) -> LoopState {
        match state {
            LoopState::Searching(request) => self.search(&request, prompter, ui),
            LoopState::AwaitingConfirmation(record) => {
                ui.candidate(&record);

                if self.policy == ConfirmPolicy::Automatic {
                    info!(id = %record.external_id, "Accepted automatically");
                    return LoopState::Confirmed(record);
                }

                self.confirm(record, prompter, ui)
            }
            terminal => terminal,
        }
    }

    fn search(&self, request: &LookupRequest, prompter: &mut dyn Prompter, ui: &mut Ui) -> LoopState {
        debug!("Resolving {}", request);

        match self.resolver.resolve(request) {
            LookupOutcome::Found { record, stage, .. } => {
                debug!(id = %record.external_id, "Found via {}", stage);
                LoopState::AwaitingConfirmation(record)
            }
            LookupOutcome::NotFound { failures } => {
                for failure in &failures {
                    debug!("  {}", failure);
                }
                ui.warning(&format!("No match for {}", request));

                if self.policy == ConfirmPolicy::Automatic {
                    return LoopState::Skipped(SkipReason::NotFound);
                }

                let answer = match prompter.ask(NOT_FOUND_QUESTION) {
                    Ok(answer) => answer,
                    Err(e) => return closed(e),
                };

                let next = match interpret_reply(&answer) {
                    Reply::Skip | Reply::AskAlternate => None,
                    Reply::Query(request) => Some(request),
                    Reply::Accept | Reply::Unrecognized => LookupRequest::from_operator_input(&answer),
                };

                match next {
                    Some(request) => LoopState::Searching(request),
                    None => LoopState::Skipped(SkipReason::NotFound),
                }
            }
        }
    }

    fn confirm(&self, record: MovieRecord, prompter: &mut dyn Prompter, ui: &mut Ui) -> LoopState {
        loop {
            let answer = match prompter.ask(CONFIRM_QUESTION) {
                Ok(answer) => answer,
                Err(e) => return closed(e),
            };

            match interpret_reply(&answer) {
                Reply::Accept => return LoopState::Confirmed(record),
                Reply::Skip => return LoopState::Skipped(SkipReason::Declined),
                Reply::Query(request) => return LoopState::Searching(request),
                Reply::AskAlternate => {
                    return match prompter.ask(ALTERNATE_QUESTION) {
                        Ok(answer) => match LookupRequest::from_operator_input(&answer) {
                            Some(request) => LoopState::Searching(request),
                            None => LoopState::Skipped(SkipReason::Declined),
                        },
                        Err(e) => closed(e),
                    };
                }
                Reply::Unrecognized => {
                    ui.warning("Please answer y, n, search <title>, or an ID (tt...)");
                }
            }
        }
    }
}

fn closed(error: PromptError) -> LoopState {
    warn!("Prompt unavailable: {}", error);
    LoopState::Skipped(SkipReason::InputClosed)
}
