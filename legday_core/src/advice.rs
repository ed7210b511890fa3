//! Client for the remote trainer-advice relay.
//!
//! Questions are wrapped in a fixed role-setting preamble and posted as JSON
//! to the relay endpoint. The relay's answer is exposed verbatim; any failure
//! degrades to a fixed fallback message with no retry.

use crate::types::AdviceExchange;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Role-setting preamble prepended to every question
pub const TRAINER_PREAMBLE: &str = "You are an experienced fitness trainer \
specializing in lower-body training, squats in particular. Answer the \
following question in a friendly, easy-to-understand way:\n\n";

/// Shown in place of an answer when the relay cannot be reached
pub const FALLBACK_MESSAGE: &str = "Sorry, the AI trainer service is \
unavailable right now. Please try again later.";

/// Canned questions offered by the chat view
pub const QUICK_QUESTIONS: [&str; 5] = [
    "Suggest a beginner-friendly leg training menu",
    "Explain proper squat form",
    "What are effective ways to strengthen the lower body?",
    "Build me a three-day-a-week training plan",
    "When is the best time to take protein?",
];

#[derive(Serialize)]
struct AdviceRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct AdviceResponse {
    response: String,
}

/// Transport that delivers a prepared prompt and returns the answer text
pub trait AdviceTransport {
    fn send(&self, prompt: &str) -> Result<String>;
}

/// Blocking HTTP transport posting to the relay endpoint
pub struct HttpRelay {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl AdviceTransport for HttpRelay {
    fn send(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&AdviceRequest { prompt })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Advice(format!("relay returned {}", status)));
        }

        let body: AdviceResponse = response.json()?;
        Ok(body.response)
    }
}

/// Trainer-advice client tracking a single exchange at a time
///
/// `ask` is synchronous, so overlapping submissions are impossible through
/// this API; front ends disable their input while `pending` is set, the
/// client itself does not queue or reject.
pub struct AdviceClient<T> {
    transport: T,
    exchange: AdviceExchange,
}

impl<T: AdviceTransport> AdviceClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            exchange: AdviceExchange::default(),
        }
    }

    pub fn exchange(&self) -> &AdviceExchange {
        &self.exchange
    }

    pub fn is_pending(&self) -> bool {
        self.exchange.pending
    }

    /// Submit a question and block until an answer or the fallback is ready
    pub fn ask(&mut self, question: &str) -> &AdviceExchange {
        self.exchange = AdviceExchange {
            prompt_text: question.to_string(),
            response_text: String::new(),
            pending: true,
        };

        let prompt = format!("{}{}", TRAINER_PREAMBLE, question);
        let response_text = match self.transport.send(&prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Advice request failed: {}. Using fallback.", e);
                FALLBACK_MESSAGE.to_string()
            }
        };

        self.exchange.response_text = response_text;
        self.exchange.pending = false;
        &self.exchange
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct CannedTransport(&'static str);

    impl AdviceTransport for CannedTransport {
        fn send(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingTransport;

    impl AdviceTransport for FailingTransport {
        fn send(&self, _prompt: &str) -> Result<String> {
            Err(Error::Advice("relay returned 502 Bad Gateway".into()))
        }
    }

    struct CapturingTransport(RefCell<Vec<String>>);

    impl AdviceTransport for CapturingTransport {
        fn send(&self, prompt: &str) -> Result<String> {
            self.0.borrow_mut().push(prompt.to_string());
            Ok("ok".to_string())
        }
    }

    #[test]
    fn test_success_exposes_answer_verbatim() {
        let mut client = AdviceClient::new(CannedTransport("X"));
        let exchange = client.ask("how deep should I squat?");

        assert_eq!(exchange.response_text, "X");
        assert!(!exchange.pending);
        assert_eq!(exchange.prompt_text, "how deep should I squat?");
    }

    #[test]
    fn test_failure_substitutes_fallback() {
        let mut client = AdviceClient::new(FailingTransport);
        let exchange = client.ask("anything");

        assert_eq!(exchange.response_text, FALLBACK_MESSAGE);
        assert!(!exchange.pending);
    }

    #[test]
    fn test_preamble_is_prepended() {
        let mut client = AdviceClient::new(CapturingTransport(RefCell::new(Vec::new())));
        client.ask("my knees cave in");

        let sent = client.transport.0.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with(TRAINER_PREAMBLE));
        assert!(sent[0].ends_with("my knees cave in"));
    }

    #[test]
    fn test_new_call_overwrites_previous_response() {
        let mut client = AdviceClient::new(CannedTransport("second"));
        client.exchange = AdviceExchange {
            prompt_text: "old".into(),
            response_text: "first".into(),
            pending: false,
        };

        let exchange = client.ask("new question");
        assert_eq!(exchange.response_text, "second");
        assert_eq!(exchange.prompt_text, "new question");
    }
}
