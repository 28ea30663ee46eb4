use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::Result;
use super::ast::SendSpec;
use super::effects::Messenger;
use super::value::VarMap;

static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*([^{}]+?)\s*\}\}").expect("token pattern"));

/// Replace every `{{key}}` token with the string form of `vars[key]`.
///
/// Substitution is best-effort: tokens whose key is absent from `vars` are
/// left as literal text. Values are not re-scanned, so interpolation is
/// idempotent on already-substituted text.
pub fn interpolate(text: &str, vars: &VarMap) -> String {
    TOKEN
        .replace_all(text, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(value) => value.to_text(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Dispatch a step's send entries, in entry order.
///
/// An entry of the form `attach(<name>)` routes to attachment dispatch with
/// the parenthesized content taken verbatim (no interpolation); every other
/// entry is interpolated and dispatched as a message.
pub fn send_step(spec: &SendSpec, vars: &VarMap, messenger: &dyn Messenger) -> Result<()> {
    for entry in spec.entries() {
        match attachment_name(entry) {
            Some(name) => messenger.send_attachment(name)?,
            None => messenger.send_message(&interpolate(entry, vars))?,
        }
    }
    Ok(())
}

/// Recognize the `attach(<name>)` marker. Case-sensitive literal prefix; the
/// whole entry must be the marker.
fn attachment_name(entry: &str) -> Option<&str> {
    entry.strip_prefix("attach(")?.strip_suffix(')')
}
