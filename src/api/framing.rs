//! Canonical JSON bodies with a CRC32 integrity header.
//!
//! Clients verify the `CRC32` header by hashing the body bytes exactly as
//! received, so the text layout here is part of the wire contract: `", "`
//! between items, `": "` after keys, no indentation, non-ASCII written as raw
//! UTF-8 and object keys in insertion order.

use axum::http::{HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;
use tracing::error;

pub const CHECKSUM_HEADER: &str = "crc32";

#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(256);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, CanonicalFormatter);
    value.serialize(&mut ser)?;
    // The serializer only ever emits valid UTF-8.
    String::from_utf8(buf).map_err(|e| serde::ser::Error::custom(e.to_string()))
}

pub fn checksum(body: &str) -> u32 {
    crc32fast::hash(body.as_bytes())
}

/// A `200 OK` JSON response carrying the `CRC32` header.
#[derive(Debug)]
pub struct Framed<T>(pub T);

impl<T: Serialize> IntoResponse for Framed<T> {
    fn into_response(self) -> Response {
        let body = match to_canonical_json(&self.0) {
            Ok(body) => body,
            Err(e) => {
                error!(error = %e, "Failed to serialize response body");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(serde_json::json!({ "detail": "Failed to serialize response." })),
                )
                    .into_response();
            }
        };
        let crc = HeaderValue::from(checksum(&body));

        (
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                ),
                (HeaderName::from_static(CHECKSUM_HEADER), crc),
            ],
            body,
        )
            .into_response()
    }
}
