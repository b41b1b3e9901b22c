//! OAuth 1.0a HMAC-SHA1 request signing for user-context endpoints.

use base64::Engine;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986: unreserved characters pass through, everything else is escaped.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// OAuth 1.0a user-context credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

pub(crate) fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, OAUTH_ENCODE_SET).to_string()
}

fn nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before Unix epoch")
        .as_secs()
}

/// Build the `Authorization: OAuth …` header value for one request.
///
/// `params` must carry every query/form parameter that participates in
/// signing. JSON and multipart bodies contribute nothing.
pub fn authorization_header(
    creds: &Credentials,
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
) -> String {
    header_with(creds, method, base_url, params, &nonce(), timestamp())
}

/// Deterministic variant with the nonce and timestamp supplied by the caller.
fn header_with(
    creds: &Credentials,
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
    nonce: &str,
    timestamp: u64,
) -> String {
    let ts = timestamp.to_string();
    let oauth_params: [(&str, &str); 6] = [
        ("oauth_consumer_key", &creds.api_key),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", &ts),
        ("oauth_token", &creds.access_token),
        ("oauth_version", "1.0"),
    ];

    let signature = sign(creds, method, base_url, params, &oauth_params);

    let mut header_params: Vec<(&str, &str)> = oauth_params.to_vec();
    header_params.push(("oauth_signature", signature.as_str()));
    header_params.sort_by(|a, b| a.0.cmp(b.0));

    let fields: Vec<String> = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, percent_encode(v)))
        .collect();

    format!("OAuth {}", fields.join(", "))
}

/// HMAC-SHA1 over the signature base string, base64-encoded.
fn sign(
    creds: &Credentials,
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let base = signature_base_string(method, base_url, params, oauth_params);
    let key = format!(
        "{}&{}",
        percent_encode(&creds.api_secret),
        percent_encode(&creds.access_token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(base.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
}

/// `METHOD&enc(url)&enc(sorted k=v pairs)` per RFC 5849 §3.4.1.
fn signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
    oauth_params: &[(&str, &str)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&param_string)
    )
}
