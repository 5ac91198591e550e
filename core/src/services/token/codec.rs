//! Compact token encoding: base64url segments and the HS256 signature.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use constant_time_eq::constant_time_eq;
use jsonwebtoken::{Algorithm, EncodingKey};
use serde::Serialize;

use crate::domain::entities::token::{TokenHeader, TokenPayload};
use crate::errors::TokenError;

/// A token split into its segments, with header and payload decoded
pub(crate) struct DecodedToken<'a> {
    /// `encodedHeader.encodedPayload`, the exact bytes that were signed
    pub signing_input: &'a str,
    pub payload: Vec<u8>,
    pub signature: &'a str,
}

pub(crate) fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|_| TokenError::SigningError)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// HMAC-SHA256 over `message`, base64url without padding.
pub(crate) fn sign(message: &str, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::SigningError);
    }

    let key = EncodingKey::from_secret(secret.as_bytes());
    jsonwebtoken::crypto::sign(message.as_bytes(), &key, Algorithm::HS256)
        .map_err(|_| TokenError::SigningError)
}

/// Builds and signs a token for `payload`
pub(crate) fn encode(payload: &TokenPayload, secret: &str) -> Result<String, TokenError> {
    let header = encode_segment(&TokenHeader::hs256())?;
    let payload = encode_segment(payload)?;
    let signing_input = format!("{}.{}", header, payload);
    let signature = sign(&signing_input, secret)?;

    Ok(format!("{}.{}", signing_input, signature))
}

/// Structural check: exactly three non-empty base64url segments and an
/// HS256 header. Nothing past this point is trusted yet.
pub(crate) fn decode(token: &str) -> Result<DecodedToken<'_>, TokenError> {
    let mut parts = token.split('.');
    let (header, payload, signature) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(s), None) => (h, p, s),
        _ => return Err(TokenError::MalformedToken),
    };

    if header.is_empty() || payload.is_empty() || signature.is_empty() {
        return Err(TokenError::MalformedToken);
    }

    let header_bytes = decode_segment(header)?;
    let payload_bytes = decode_segment(payload)?;
    decode_segment(signature)?;

    let header: TokenHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::MalformedToken)?;
    if !header.is_hs256() {
        return Err(TokenError::MalformedToken);
    }

    let signing_len = token.len() - signature.len() - 1;

    Ok(DecodedToken {
        signing_input: &token[..signing_len],
        payload: payload_bytes,
        signature,
    })
}

/// Recomputes the signature and compares it in constant time
pub(crate) fn verify_signature(decoded: &DecodedToken<'_>, secret: &str) -> Result<(), TokenError> {
    let expected = sign(decoded.signing_input, secret)?;

    if constant_time_eq(expected.as_bytes(), decoded.signature.as_bytes()) {
        Ok(())
    } else {
        Err(TokenError::InvalidSignature)
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::MalformedToken)
}

/// Decodes a single segment to text, for inspecting issued tokens
#[cfg(test)]
pub(crate) fn decode_segment_text(segment: &str) -> String {
    String::from_utf8(decode_segment(segment).unwrap()).unwrap()
}
