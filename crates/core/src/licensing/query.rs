use std::collections::HashMap;

use super::ValidationError;

/// Decode a URL query string (`a=1&b=2`) into a map.
///
/// Names and values are percent-decoded and `+` becomes a space. Every
/// parameter must split into exactly one name and one non-empty value;
/// trailing empty parts are dropped first, so `VT=` and `=` are rejected.
pub fn decode_query(raw: &str) -> Result<HashMap<String, String>, ValidationError> {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    let mut results = HashMap::new();
    for param in raw.split('&').filter(|p| !p.is_empty()) {
        let mut parts: Vec<&str> = param.split('=').collect();
        while parts.last().is_some_and(|p| p.is_empty()) {
            parts.pop();
        }
        let [name, value] = parts.as_slice() else {
            return Err(ValidationError::InvalidQueryParameter(param.to_string()));
        };
        results.insert(percent_decode(name, param)?, percent_decode(value, param)?);
    }
    Ok(results)
}

fn percent_decode(input: &str, param: &str) -> Result<String, ValidationError> {
    let invalid = || ValidationError::InvalidQueryParameter(param.to_string());
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = bytes.get(i + 1..i + 3).ok_or_else(invalid)?;
                if !hex.iter().all(u8::is_ascii_hexdigit) {
                    return Err(invalid());
                }
                let hex = std::str::from_utf8(hex).map_err(|_| invalid())?;
                out.push(u8::from_str_radix(hex, 16).map_err(|_| invalid())?);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_server_extras() {
        let map = decode_query("VT=1700000000000&GT=1700000060000&GR=10").unwrap();
        assert_eq!(map.get("VT").map(String::as_str), Some("1700000000000"));
        assert_eq!(map.get("GT").map(String::as_str), Some("1700000060000"));
        assert_eq!(map.get("GR").map(String::as_str), Some("10"));
    }

    #[test]
    fn decodes_percent_and_plus() {
        let map = decode_query("?na%20me=a+b%26c").unwrap();
        assert_eq!(map.get("na me").map(String::as_str), Some("a b&c"));
    }

    #[test]
    fn empty_name_with_value_is_kept() {
        let map = decode_query("=1").unwrap();
        assert_eq!(map.get("").map(String::as_str), Some("1"));
    }

    #[test]
    fn empty_query_is_empty_map() {
        assert!(decode_query("").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_parameters() {
        assert!(decode_query("VT").is_err());
        assert!(decode_query("VT=1=2").is_err());
        assert!(decode_query("VT=%zz").is_err());
        assert!(decode_query("VT=%4").is_err());
        assert!(decode_query("VT=").is_err());
        assert!(decode_query("=").is_err());
        assert!(decode_query("VT=&GT=999999&GR=5").is_err());
    }
}
