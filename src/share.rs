//! Shareable link state: the `name` / `template` projection of a card into
//! URL query parameters.
//!
//! ## Encoding
//!
//! The name is percent-encoded (URI component rules) before it is stored as
//! the `name` value, and the URL layer form-encodes that value again. A
//! reader therefore form-decodes the query (done by [`Url::query_pairs`]) and
//! then percent-decodes the name once more. Hand-written links such as
//! `?name=Amina` survive this because plain text percent-decodes to itself.
//!
//! ```text
//! "Amina Noor"  →  name=Amina%2520Noor&template=emerald
//! ```
//!
//! ## Malformed input
//!
//! - A name that is missing, blank, or fails to decode as UTF-8 is treated
//!   as absent.
//! - The template id is returned as-is. Resolving it against the registry
//!   (and ignoring unknown ids) is the caller's job.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

pub const NAME_PARAM: &str = "name";
pub const TEMPLATE_PARAM: &str = "template";

/// Characters escaped when encoding a URI component: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Card data recovered from a shared link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCard {
    /// Decoded display name, exactly as it was written.
    pub name: String,
    /// Raw template id, unresolved.
    pub template: Option<String>,
}

/// Why a link's `name` was discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIssue {
    Undecodable(String),
    Blank,
}

/// Percent-encode a name as a URI component.
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, URI_COMPONENT).to_string()
}

/// Reverse of [`encode_name`]. Fails on sequences that are not valid UTF-8.
pub fn decode_name(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|name| name.into_owned())
}

/// Read the shared card from `url`, if it carries a usable name.
pub fn read(url: &Url) -> Option<SharedCard> {
    inspect(url).ok().flatten()
}

/// Like [`read`], but reports why a present name was rejected.
pub fn inspect(url: &Url) -> Result<Option<SharedCard>, LinkIssue> {
    let mut raw_name = None;
    let mut template = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            NAME_PARAM if raw_name.is_none() => raw_name = Some(value.into_owned()),
            TEMPLATE_PARAM if template.is_none() => template = Some(value.into_owned()),
            _ => {}
        }
    }

    let Some(raw_name) = raw_name else {
        return Ok(None);
    };
    if raw_name.is_empty() {
        return Ok(None);
    }
    let name = decode_name(&raw_name).ok_or(LinkIssue::Undecodable(raw_name))?;
    if name.trim().is_empty() {
        return Err(LinkIssue::Blank);
    }
    Ok(Some(SharedCard {
        name,
        template: template.filter(|t| !t.is_empty()),
    }))
}

/// Write `name` and `template` into `url`, replacing any previous values and
/// keeping unrelated parameters in their original order.
pub fn write(url: &mut Url, name: &str, template_id: &str) {
    let mut pairs = foreign_pairs(url);
    pairs.push((NAME_PARAM.to_string(), encode_name(name)));
    pairs.push((TEMPLATE_PARAM.to_string(), template_id.to_string()));
    set_pairs(url, &pairs);
}

/// Remove `name` and `template` from `url`. Other parameters stay.
pub fn clear(url: &mut Url) {
    let pairs = foreign_pairs(url);
    set_pairs(url, &pairs);
}

/// A fresh link for the given card, built on `base`.
pub fn link(base: &Url, name: &str, template_id: &str) -> Url {
    let mut url = base.clone();
    write(&mut url, name, template_id);
    url
}

fn foreign_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .filter(|(key, _)| key != NAME_PARAM && key != TEMPLATE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

fn set_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
        return;
    }
    url.query_pairs_mut().clear().extend_pairs(pairs);
}
