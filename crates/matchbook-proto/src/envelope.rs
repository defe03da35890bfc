//! JSON envelope codec.
//!
//! Every frame on the wire is `{ "type": <tag>, "data"?: <payload>,
//! "seq"?: <n> }`. The optional `seq` is the request/response correlation
//! number: a request that wants its response matched to it carries one,
//! and the server echoes it back. Servers that do not correlate simply
//! omit it, which decodes as `None`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    errors::{DecodeError, EncodeError},
    message::MessageCatalog,
};

/// A wire frame: one tagged message plus the optional correlation number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<M> {
    /// The tagged message.
    #[serde(flatten)]
    pub message: M,
    /// Correlation number echoed by responses. Absent on the wire when
    /// unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl<M> Envelope<M> {
    /// Wrap a message with no correlation number.
    pub fn new(message: M) -> Self {
        Self { message, seq: None }
    }

    /// Wrap a message carrying a correlation number.
    pub fn with_seq(message: M, seq: u64) -> Self {
        Self { message, seq: Some(seq) }
    }
}

impl<M: Serialize> Envelope<M> {
    /// Encode to the UTF-8 JSON text sent on the socket.
    pub fn encode(&self) -> Result<String, EncodeError> {
        serde_json::to_string(self).map_err(|e| EncodeError { reason: e.to_string() })
    }
}

impl<M: DeserializeOwned + MessageCatalog> Envelope<M> {
    /// Decode an inbound frame.
    ///
    /// Classification of failures:
    /// - not a JSON object with a string `type` → [`DecodeError::Malformed`]
    /// - `type` outside the catalog → [`DecodeError::UnknownType`]
    /// - known `type`, bad `data` → [`DecodeError::InvalidPayload`]
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| DecodeError::Malformed { reason: e.to_string() })?;

        let Some(tag) = value.get("type").and_then(Value::as_str) else {
            return Err(DecodeError::Malformed {
                reason: "missing string `type` field".to_owned(),
            });
        };

        if !M::TYPES.contains(&tag) {
            return Err(DecodeError::UnknownType { message_type: tag.to_owned() });
        }

        let message_type = tag.to_owned();
        serde_json::from_value(value)
            .map_err(|e| DecodeError::InvalidPayload { message_type, reason: e.to_string() })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{
        message::{ClientRequest, ServerMessage},
        model::{MatchSummary, UserProfile},
    };

    #[test]
    fn create_match_encodes_bare_type() {
        let envelope = Envelope::new(ClientRequest::CreateMatch);
        assert_eq!(envelope.encode().unwrap(), r#"{"type":"CreateMatch"}"#);
    }

    #[test]
    fn create_match_round_trip() {
        let text = Envelope::new(ClientRequest::CreateMatch).encode().unwrap();
        let decoded = Envelope::<ClientRequest>::decode(&text).unwrap();
        assert_eq!(decoded.message, ClientRequest::CreateMatch);
        assert_eq!(decoded.seq, None);
    }

    #[test]
    fn seq_is_carried_and_echoed() {
        let text = Envelope::with_seq(ClientRequest::ListMatches, 7).encode().unwrap();
        assert_eq!(text, r#"{"type":"ListMatches","seq":7}"#);

        let decoded = Envelope::<ClientRequest>::decode(&text).unwrap();
        assert_eq!(decoded.seq, Some(7));
    }

    #[test]
    fn list_response_decodes_observed_shape() {
        let raw = r#"{
            "type": "ListMatchesResponse",
            "data": [{"id": "m1", "player1": {"id": "u2", "name": "Bob"}}]
        }"#;

        let decoded = Envelope::<ServerMessage>::decode(raw).unwrap();
        let ServerMessage::ListMatchesResponse(matches) = decoded.message else {
            panic!("wrong variant");
        };
        assert_eq!(matches, vec![MatchSummary::new("m1", UserProfile::new("u2", "Bob"))]);
        assert!(matches[0].is_open());
    }

    #[test]
    fn malformed_json_is_classified() {
        let err = Envelope::<ServerMessage>::decode("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));

        let err = Envelope::<ServerMessage>::decode(r#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed { .. }));
    }

    #[test]
    fn unknown_type_is_classified() {
        let err = Envelope::<ServerMessage>::decode(r#"{"type":"MatchStarted"}"#).unwrap_err();
        assert_eq!(err, DecodeError::UnknownType { message_type: "MatchStarted".to_owned() });
        assert!(err.is_ignorable());
    }

    #[test]
    fn bad_payload_for_known_type_is_classified() {
        let raw = r#"{"type":"LoginResponse","data":{"id":"u1"}}"#;
        let err = Envelope::<ServerMessage>::decode(raw).unwrap_err();
        assert!(
            matches!(err, DecodeError::InvalidPayload { ref message_type, .. }
                if message_type == "LoginResponse")
        );
        assert!(!err.is_ignorable());
    }

    #[test]
    fn outbound_catalog_decodes_as_server_would_see_it() {
        let text = Envelope::new(ClientRequest::JoinMatch("m9".into())).encode().unwrap();
        let decoded = Envelope::<ClientRequest>::decode(&text).unwrap();
        assert_eq!(decoded.message, ClientRequest::JoinMatch("m9".into()));
    }
}
