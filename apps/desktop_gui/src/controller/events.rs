//! UI/backend events and error modeling for the quick start form.

use hdp_client::FormEvent;

pub enum UiEvent {
    Info(String),
    /// A network call finished; carries the settlement for the form state.
    Settled(FormEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Startup,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    EditInputs,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if context == UiErrorContext::BackendStartup
            || message_lower.contains("startup failure")
        {
            UiErrorCategory::Startup
        } else if message_lower.contains("out of range")
            || message_lower.contains("limited to")
            || message_lower.contains("invalid")
            || message_lower.contains("unknown")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Banner text shown above the form.
    pub fn banner(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Startup => "Startup",
            UiErrorCategory::Transport => "Connection",
            UiErrorCategory::Validation => "Input",
            UiErrorCategory::Unknown => "Error",
        };
        format!("{label}: {}", self.message)
    }
}
