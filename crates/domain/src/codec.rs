//! Polymorphic event serialization.
//!
//! The codec maps a stable string type tag to a decode function per event
//! variant. Storage keeps `(type_tag, payload)` pairs; decoding picks its
//! path from the stored tag rather than from anything inside the payload.

use std::collections::HashMap;

use thiserror::Error;

use crate::aggregate::DomainEvent;

/// Errors that can occur while encoding or decoding events.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored type tag has no registered decoder.
    #[error("Unknown event type tag: {0}")]
    UnknownEventType(String),

    /// The event could not be serialized.
    #[error("Failed to encode event: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored payload does not conform to the variant's shape.
    #[error("Failed to decode event payload: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Decode function for a single event variant.
pub type DecodeFn<E> = fn(serde_json::Value) -> serde_json::Result<E>;

/// Registry of decode functions keyed by type tag.
pub struct EventCodec<E> {
    decoders: HashMap<&'static str, DecodeFn<E>>,
}

impl<E: DomainEvent> EventCodec<E> {
    /// Creates an empty codec.
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Registers a decoder for a type tag, consuming and returning the codec
    /// so registrations chain.
    pub fn with(mut self, tag: &'static str, decode: DecodeFn<E>) -> Self {
        self.decoders.insert(tag, decode);
        self
    }

    /// Returns the number of registered decoders.
    pub fn decoder_count(&self) -> usize {
        self.decoders.len()
    }

    /// Encodes an event to its type tag and storable payload.
    ///
    /// Deterministic and lossless for any event whose data serializes.
    pub fn encode(&self, event: &E) -> Result<(&'static str, serde_json::Value), CodecError> {
        let payload = event.payload().map_err(CodecError::Encode)?;
        Ok((event.event_type(), payload))
    }

    /// Decodes a stored payload using its type tag.
    pub fn decode(&self, tag: &str, payload: serde_json::Value) -> Result<E, CodecError> {
        let decode = self
            .decoders
            .get(tag)
            .ok_or_else(|| CodecError::UnknownEventType(tag.to_string()))?;
        decode(payload).map_err(CodecError::Decode)
    }
}

impl<E: DomainEvent> Default for EventCodec<E> {
    fn default() -> Self {
        E::codec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct PingData {
        count: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum TestEvent {
        Ping(PingData),
    }

    impl DomainEvent for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Ping(_) => "Ping",
            }
        }

        fn payload(&self) -> serde_json::Result<serde_json::Value> {
            match self {
                TestEvent::Ping(data) => serde_json::to_value(data),
            }
        }

        fn codec() -> EventCodec<Self> {
            EventCodec::new().with("Ping", |payload| {
                Ok(TestEvent::Ping(serde_json::from_value(payload)?))
            })
        }
    }

    #[test]
    fn encode_decode_roundtrip() {
        let codec = TestEvent::codec();
        let event = TestEvent::Ping(PingData { count: 3 });

        let (tag, payload) = codec.encode(&event).unwrap();
        assert_eq!(tag, "Ping");

        let decoded = codec.decode(tag, payload).unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn unknown_tag_is_an_error() {
        let codec = TestEvent::codec();
        let result = codec.decode("Pong", serde_json::json!({}));
        assert!(matches!(result, Err(CodecError::UnknownEventType(tag)) if tag == "Pong"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let codec = TestEvent::codec();
        let result = codec.decode("Ping", serde_json::json!({"count": "not-a-number"}));
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }
}
