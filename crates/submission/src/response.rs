use crate::error::FailureKind;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use model::LicenseRecord;
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io;

const SUCCESS_STATUS: i64 = 200;

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

/// JSON formatting with `", "` and `": "` separators and DEL and non-ASCII
/// characters escaped as `\uXXXX`, the body format clients already parse.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
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

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if fragment.chars().all(is_printable_ascii) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units: [u16; 2] = [0; 2];
        for ch in fragment.chars() {
            if is_printable_ascii(ch) {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }

        Ok(())
    }
}

// Control characters below 0x20 are already escaped by serde_json
fn is_printable_ascii(ch: char) -> bool {
    ch.is_ascii() && ch != '\x7f'
}

/// Serialize a response body.
pub fn to_json_body<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value.serialize(&mut serializer)?;

    // The formatter only ever writes ASCII
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn ok_response(record: &LicenseRecord) -> Result<ApiGatewayProxyResponse, serde_json::Error> {
    Ok(json_response(SUCCESS_STATUS, Some(to_json_body(record)?)))
}

pub fn error_response(kind: FailureKind, message: &str) -> ApiGatewayProxyResponse {
    let body: Option<String> = to_json_body(&MessageBody { message }).ok();

    json_response(kind.status_code(), body)
}

fn json_response(status_code: i64, body: Option<String>) -> ApiGatewayProxyResponse {
    let mut response: ApiGatewayProxyResponse = ApiGatewayProxyResponse::default();
    response.status_code = status_code;
    response.body = body.map(Body::Text);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::response_body;

    #[test]
    fn record_body_uses_field_order_and_spacing() {
        let response = ok_response(&LicenseRecord::new("123", "234353-verif")).unwrap();

        assert_eq!(200, response.status_code);
        assert_eq!(
            r#"{"doctor_id": "123", "license_number": "234353-verif", "status": "Verified"}"#,
            response_body(&response)
        );
    }

    #[test]
    fn error_body_holds_message() {
        let response =
            error_response(FailureKind::PreconditionFailed, "missing or malformed request body");

        assert_eq!(412, response.status_code);
        assert_eq!(
            r#"{"message": "missing or malformed request body"}"#,
            response_body(&response)
        );
    }

    #[test]
    fn non_ascii_is_escaped() {
        let body = to_json_body(&MessageBody { message: "é 🩺 \"q\"" }).unwrap();

        assert_eq!(r#"{"message": "\u00e9 \ud83e\ude7a \"q\""}"#, body);
    }

    #[test]
    fn delete_and_control_characters_are_escaped() {
        let body = to_json_body(&MessageBody { message: "a\u{7f}b\u{1f}" }).unwrap();

        assert_eq!(r#"{"message": "a\u007fb\u001f"}"#, body);
    }

    #[test]
    fn arrays_are_spaced() {
        assert_eq!("[1, 2, [3, 4]]", to_json_body(&serde_json::json!([1, 2, [3, 4]])).unwrap());
        assert_eq!("[]", to_json_body(&Vec::<u8>::new()).unwrap());
        assert_eq!("{}", to_json_body(&serde_json::json!({})).unwrap());
    }
}
