//! Codec Tests
//!
//! Tests for port message encoding/decoding and the line-stream helpers.

use std::io::Cursor;

use serde_json::json;
use symbolbridge::port::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, Request, Response, MAX_LINE_SIZE,
};
use symbolbridge::{BridgeError, SymbolList};

fn symbols(items: &[&str]) -> SymbolList {
    SymbolList::from_symbols(items.iter().copied())
}

fn assert_protocol_error<T: std::fmt::Debug>(result: symbolbridge::Result<T>) {
    match result {
        Err(BridgeError::Protocol(_)) => {}
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_load_request() {
    let line = encode_request(&Request::LoadSymbols).unwrap();

    assert_eq!(line, r#"{"port":"loadSymbols"}"#);
}

#[test]
fn test_encode_save_request() {
    let line = encode_request(&Request::SaveSymbols(symbols(&["AAPL", "MSFT"]))).unwrap();

    assert_eq!(line, r#"{"port":"saveSymbols","payload":["AAPL","MSFT"]}"#);
}

#[test]
fn test_decode_load_request() {
    let request = decode_request(r#"{"port":"loadSymbols"}"#).unwrap();

    assert_eq!(request, Request::LoadSymbols);
    assert_eq!(request.port_name(), "loadSymbols");
}

#[test]
fn test_decode_save_request_with_whitespace() {
    let request =
        decode_request("  { \"port\" : \"saveSymbols\", \"payload\" : [\"GOOG\"] }\r\n").unwrap();

    assert_eq!(request, Request::SaveSymbols(symbols(&["GOOG"])));
}

#[test]
fn test_decode_save_request_empty_payload() {
    let request = decode_request(r#"{"port":"saveSymbols","payload":[]}"#).unwrap();

    assert_eq!(request, Request::SaveSymbols(SymbolList::new()));
}

#[test]
fn test_decode_save_request_mixed_elements() {
    let request = decode_request(r#"{"port":"saveSymbols","payload":[1,"A",{"k":"v"}]}"#).unwrap();

    match request {
        Request::SaveSymbols(list) => {
            assert_eq!(list.into_inner(), vec![json!(1), json!("A"), json!({"k": "v"})]);
        }
        other => panic!("Expected saveSymbols, got {:?}", other),
    }
}

#[test]
fn test_decode_save_request_non_array_payload() {
    assert_protocol_error(decode_request(r#"{"port":"saveSymbols","payload":{"a":1}}"#));
    assert_protocol_error(decode_request(r#"{"port":"saveSymbols","payload":"AAPL"}"#));
}

#[test]
fn test_decode_unknown_port() {
    assert_protocol_error(decode_request(r#"{"port":"deleteSymbols"}"#));
}

#[test]
fn test_decode_malformed_json() {
    assert_protocol_error(decode_request("{not json"));
    assert_protocol_error(decode_request("42"));
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_response() {
    let line = encode_response(&Response::Symbols(symbols(&["AAPL"]))).unwrap();

    assert_eq!(line, r#"{"port":"symbolsPort","payload":["AAPL"]}"#);
}

#[test]
fn test_decode_response() {
    let response = decode_response(r#"{"port":"symbolsPort","payload":[]}"#).unwrap();

    assert_eq!(response, Response::Symbols(SymbolList::new()));
    assert_eq!(response.port_name(), "symbolsPort");
}

#[test]
fn test_decode_response_rejects_request_port() {
    assert_protocol_error(decode_response(r#"{"port":"loadSymbols"}"#));
}

// =============================================================================
// Stream Helper Tests
// =============================================================================

#[test]
fn test_read_request_sequence() {
    let input = "{\"port\":\"loadSymbols\"}\n\n   \n{\"port\":\"saveSymbols\",\"payload\":[\"A\"]}\n";
    let mut reader = Cursor::new(input.as_bytes());

    assert_eq!(read_request(&mut reader).unwrap(), Some(Request::LoadSymbols));
    assert_eq!(
        read_request(&mut reader).unwrap(),
        Some(Request::SaveSymbols(symbols(&["A"])))
    );
    assert_eq!(read_request(&mut reader).unwrap(), None);
}

#[test]
fn test_read_request_last_line_without_newline() {
    let mut reader = Cursor::new(r#"{"port":"loadSymbols"}"#.as_bytes());

    assert_eq!(read_request(&mut reader).unwrap(), Some(Request::LoadSymbols));
    assert_eq!(read_request(&mut reader).unwrap(), None);
}

#[test]
fn test_read_request_continues_after_malformed_line() {
    let mut reader = Cursor::new("garbage\n{\"port\":\"loadSymbols\"}\n".as_bytes());

    assert_protocol_error(read_request(&mut reader));
    assert_eq!(read_request(&mut reader).unwrap(), Some(Request::LoadSymbols));
}

#[test]
fn test_write_request_and_response_lines() {
    let mut out = Vec::new();

    write_request(&mut out, &Request::LoadSymbols).unwrap();
    write_response(&mut out, &Response::Symbols(symbols(&["X"]))).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"port\":\"loadSymbols\"}\n{\"port\":\"symbolsPort\",\"payload\":[\"X\"]}\n"
    );
}

#[test]
fn test_written_response_reads_back() {
    let mut out = Vec::new();
    let response = Response::Symbols(symbols(&["AAPL", "MSFT"]));
    write_response(&mut out, &response).unwrap();

    let mut reader = Cursor::new(out);

    assert_eq!(read_response(&mut reader).unwrap(), Some(response));
    assert_eq!(read_response(&mut reader).unwrap(), None);
}

#[test]
fn test_read_request_skips_non_utf8_line() {
    let input = b"\xff\xfe garbage\n{\"port\":\"loadSymbols\"}\n".to_vec();
    let mut reader = Cursor::new(input);

    assert_protocol_error(read_request(&mut reader));
    assert_eq!(read_request(&mut reader).unwrap(), Some(Request::LoadSymbols));
    assert_eq!(read_request(&mut reader).unwrap(), None);
}

#[test]
fn test_read_request_oversized_line_is_discarded() {
    let mut input = vec![b'x'; MAX_LINE_SIZE + 10];
    input.extend_from_slice(b"\n{\"port\":\"loadSymbols\"}\n");
    let mut reader = Cursor::new(input);

    assert_protocol_error(read_request(&mut reader));
    assert_eq!(read_request(&mut reader).unwrap(), Some(Request::LoadSymbols));
}

#[test]
fn test_read_request_oversized_final_line_without_newline() {
    let mut reader = Cursor::new(vec![b'x'; MAX_LINE_SIZE + 1]);

    assert_protocol_error(read_request(&mut reader));
    assert_eq!(read_request(&mut reader).unwrap(), None);
}
