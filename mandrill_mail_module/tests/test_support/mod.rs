#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mandrill_mail_module::{ApiRequest, MailError, Transport, TransportResponse};

pub fn start_mockito_server(test_name: &str) -> Option<mockito::ServerGuard> {
    let server = std::panic::catch_unwind(mockito::Server::new);
    match server {
        Ok(server) => Some(server),
        Err(_) => {
            eprintln!(
                "Skipping {test_name}; unable to start mockito server in this environment."
            );
            None
        }
    }
}

/// Transport that records each posted body and answers with a fixed status.
#[derive(Debug, Clone)]
pub struct RecordingTransport {
    status: u16,
    calls: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl RecordingTransport {
    pub fn answering(status: u16) -> Self {
        Self {
            status,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(String, serde_json::Value)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn post(&self, url: &str, request: &ApiRequest<'_>) -> Result<TransportResponse, MailError> {
        let body = serde_json::to_value(request).expect("api request serializes");
        self.calls.lock().unwrap().push((url.to_string(), body));
        Ok(TransportResponse {
            status: self.status,
            body: String::new(),
        })
    }
}
