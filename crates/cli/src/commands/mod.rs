//! CLI commands

pub mod history;
pub mod init;
pub mod invoice;
pub mod licenses;
pub mod login;
pub mod logout;
pub mod profile;
pub mod purchase;
pub mod status;
pub mod transactions;

use crate::http::HttpClient;
use crate::progress::Step;
use crate::OutputFormat;

/// What every backend-facing command runs against.
pub struct Portal {
    pub http: HttpClient,
    pub format: OutputFormat,
}

impl Portal {
    pub fn new(http: HttpClient, format: OutputFormat) -> Self {
        Self { http, format }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// A spinner, hidden when stdout carries JSON.
    pub fn step(&self, label: &str) -> Step {
        if self.is_json() {
            Step::hidden(label)
        } else {
            Step::new(label)
        }
    }
}
