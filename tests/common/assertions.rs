//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid BMP image and return its parsed header
pub fn assert_bmp(response: &TestResponse) -> BmpHeader {
    assert_ok(response);
    assert!(
        response.is_bmp(),
        "Expected BMP image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    assert_eq!(
        response.header("content-type"),
        Some("image/bmp"),
        "Expected Content-Type: image/bmp"
    );
    assert_eq!(
        response.header("content-length"),
        Some(response.body.len().to_string().as_str()),
        "Content-Length should match the body"
    );

    let header = BmpHeader::parse(&response.body);
    assert_eq!(
        header.file_size as usize,
        response.body.len(),
        "BMP file size field should match the body"
    );
    header
}

/// Assert a JSON error response with the given status
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) -> String {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    json["error"]
        .as_str()
        .expect("Expected error message")
        .to_string()
}

/// The header fields tests care about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub file_size: u32,
    pub pixel_offset: u32,
    pub width: i32,
    pub height: i32,
    pub bits: u16,
    pub colors_used: u32,
}

impl BmpHeader {
    pub fn parse(bytes: &[u8]) -> Self {
        let u32_at = |o: usize| u32::from_le_bytes(bytes[o..o + 4].try_into().unwrap());
        let i32_at = |o: usize| i32::from_le_bytes(bytes[o..o + 4].try_into().unwrap());
        Self {
            file_size: u32_at(2),
            pixel_offset: u32_at(10),
            width: i32_at(18),
            height: i32_at(22),
            bits: u16::from_le_bytes([bytes[28], bytes[29]]),
            colors_used: u32_at(46),
        }
    }
}
