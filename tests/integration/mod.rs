//! Integration tests for the Glean server event logger

mod config_integration;
mod events_ping;

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use glean_server::{AppIdentity, GleanEventsLogger};
use serde_json::Value;

/// In-memory sink that tests can read back.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn test_identity() -> AppIdentity {
    AppIdentity::new("myapp", "1.0", "prod")
}

pub fn logger_with_buffer() -> (GleanEventsLogger, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let logger = GleanEventsLogger::new(test_identity()).with_writer(buffer.clone());
    (logger, buffer)
}

/// Parse an envelope line and its embedded payload.
pub fn decode_line(line: &str) -> (Value, Value) {
    let envelope: Value = serde_json::from_str(line).unwrap();
    let payload: Value =
        serde_json::from_str(envelope["Fields"]["payload"].as_str().unwrap()).unwrap();
    (envelope, payload)
}
