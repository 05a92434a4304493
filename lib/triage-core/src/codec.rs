//! Body serialization utilities.

use bytes::Bytes;

use crate::Result;

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to form URL-encoded bytes.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
pub fn to_form<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_html_form::to_string(value)
        .map(|s| Bytes::from(s.into_bytes()))
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// Uses `serde_path_to_error` so failures name the exact field that did not
/// deserialize (e.g., "style.images.0.url").
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if deserialization fails.
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already-parsed JSON value with path-aware error messages.
///
/// # Errors
///
/// Returns [`crate::Error::JsonDeserialization`] if deserialization fails.
pub fn decode_value<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

#[cfg(test)]
mod tests {
    use assert2::check;

    use super::*;

    #[test]
    fn to_json_serialize() {
        #[derive(serde::Serialize)]
        struct Style {
            name: String,
            price: u32,
        }

        let style = Style {
            name: "denim".to_string(),
            price: 120,
        };

        let bytes = to_json(&style).expect("serialize");
        check!(bytes.as_ref() == br#"{"name":"denim","price":120}"#);
    }

    #[test]
    fn to_form_serialize() {
        #[derive(serde::Serialize)]
        struct Login {
            username: String,
            password: String,
        }

        let login = Login {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };

        let bytes = to_form(&login).expect("serialize");
        check!(bytes.as_ref() == b"username=alice&password=secret");
    }

    #[test]
    fn from_json_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Style {
            id: u64,
            name: String,
        }

        let bytes = br#"{"id":1,"name":"x"}"#;
        let style: Style = from_json(bytes).expect("deserialize");

        check!(
            style
                == Style {
                    id: 1,
                    name: "x".to_string(),
                }
        );
    }

    #[test]
    fn from_json_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Image {
            #[allow(dead_code)]
            url: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Style {
            #[allow(dead_code)]
            image: Image,
        }

        let bytes = br#"{"image":{}}"#;
        let result: Result<Style> = from_json(bytes);

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        check!(msg.contains("image"), "expected path in error: {msg}");
        check!(msg.contains("url"), "expected field in error: {msg}");
    }

    #[test]
    fn decode_value_deserialize() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Style {
            id: u64,
        }

        let value = serde_json::json!({"id": 7});
        let style: Style = decode_value(&value).expect("decode");
        check!(style == Style { id: 7 });

        let bad = serde_json::json!({"id": "seven"});
        let err = decode_value::<Style>(&bad).expect_err("should fail");
        check!(err.to_string().contains("id"));
    }
}
