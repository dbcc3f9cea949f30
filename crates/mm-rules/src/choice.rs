//! Choice presentation.
//!
//! Rules never render a dialog. They describe the choice as a
//! [`ChoiceRequest`] and block on a [`ChoicePresenter`] for the answer.

use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Stable identifier returned in the response.
    pub id: String,
    /// Text shown to the user.
    pub label: String,
}

impl ChoiceOption {
    /// Create an option.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A request for one of several mutually exclusive options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRequest {
    /// Dialog title.
    pub title: String,
    /// The options, in display order.
    pub options: Vec<ChoiceOption>,
    /// Trait names to pick from alongside the option, for jewelry.
    pub traits: Option<Vec<String>>,
}

impl ChoiceRequest {
    /// Look up an offered option by ID.
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// The answer to a [`ChoiceRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceResponse {
    /// An option was picked.
    Chosen {
        /// ID of the chosen option.
        option: String,
        /// Chosen trait, when the request listed traits.
        trait_name: Option<String>,
    },
    /// The user dismissed the choice.
    Cancelled,
}

/// Something that can answer choice requests.
pub trait ChoicePresenter {
    /// Present `request` and block until it is answered.
    fn choose(&mut self, request: &ChoiceRequest) -> ChoiceResponse;
}

/// Answers every request with a fixed selection.
///
/// The preset option matches an offered option's ID or, ignoring case, its
/// label. A preset that matches nothing is passed through verbatim so the
/// caller can report it.
#[derive(Debug, Clone, Default)]
pub struct PresetPresenter {
    option: Option<String>,
    trait_name: Option<String>,
    seen: Vec<ChoiceRequest>,
}

impl PresetPresenter {
    /// Answer with `option`.
    pub fn new(option: impl Into<String>) -> Self {
        Self {
            option: Some(option.into()),
            ..Self::default()
        }
    }

    /// Cancel every request.
    pub fn cancelling() -> Self {
        Self::default()
    }

    /// Also answer with a trait.
    pub fn with_trait(mut self, trait_name: impl Into<String>) -> Self {
        self.trait_name = Some(trait_name.into());
        self
    }

    /// Requests presented so far.
    pub fn seen(&self) -> &[ChoiceRequest] {
        &self.seen
    }
}

impl ChoicePresenter for PresetPresenter {
    fn choose(&mut self, request: &ChoiceRequest) -> ChoiceResponse {
        self.seen.push(request.clone());
        let Some(preset) = &self.option else {
            return ChoiceResponse::Cancelled;
        };
        let option = request
            .option(preset)
            .or_else(|| {
                request
                    .options
                    .iter()
                    .find(|o| o.label.eq_ignore_ascii_case(preset))
            })
            .map_or_else(|| preset.clone(), |o| o.id.clone());
        ChoiceResponse::Chosen {
            option,
            trait_name: self.trait_name.clone(),
        }
    }
}

/// A presenter that forwards requests over a channel to another thread.
///
/// If the [`ChoiceResponder`] is dropped, every request is cancelled.
#[derive(Debug)]
pub struct ChannelPresenter {
    requests: Sender<ChoiceRequest>,
    responses: Receiver<ChoiceResponse>,
}

/// The answering side of a [`ChannelPresenter`].
#[derive(Debug)]
pub struct ChoiceResponder {
    requests: Receiver<ChoiceRequest>,
    responses: Sender<ChoiceResponse>,
}

impl ChannelPresenter {
    /// Create a connected presenter and responder.
    pub fn pair() -> (Self, ChoiceResponder) {
        let (request_tx, request_rx) = mpsc::channel();
        let (response_tx, response_rx) = mpsc::channel();
        (
            Self {
                requests: request_tx,
                responses: response_rx,
            },
            ChoiceResponder {
                requests: request_rx,
                responses: response_tx,
            },
        )
    }
}

impl ChoicePresenter for ChannelPresenter {
    fn choose(&mut self, request: &ChoiceRequest) -> ChoiceResponse {
        if self.requests.send(request.clone()).is_err() {
            return ChoiceResponse::Cancelled;
        }
        self.responses.recv().unwrap_or(ChoiceResponse::Cancelled)
    }
}

impl ChoiceResponder {
    /// Wait for the next request. Returns `None` once the presenter is gone.
    pub fn next_request(&self) -> Option<ChoiceRequest> {
        self.requests.recv().ok()
    }

    /// Send the answer to the pending request. Returns false if the
    /// presenter is gone.
    pub fn respond(&self, response: ChoiceResponse) -> bool {
        self.responses.send(response).is_ok()
    }
}
