// CtrlMend - core/route.rs
//
// Routing-path normalisation: every class-level `@RequestMapping("/api/...")`
// is rewritten to `<category prefix><last segment>`.

use crate::util::constants;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

fn route_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::ROUTE_PATTERN).expect("route regex"))
}

/// Rebuild one routing path under `prefix`.
///
/// Returns `None` when the path is left as is:
/// - it has no non-empty segment after the root (`/api//`)
/// - it already names the category root (`/api/app` under `/api/app/`)
///
/// These are the only paths that do not end up under `prefix`. Rebuilding
/// the second one would yield `/api/app/app`.
///
/// A trailing slash does not count as a segment, so `/api/old/list/`
/// becomes `<prefix>list`.
pub fn rewrite_path(path: &str, prefix: &str) -> Option<String> {
    if path == prefix.trim_end_matches('/') {
        return None;
    }
    let rest = path.strip_prefix(constants::ROUTE_ROOT).unwrap_or(path);
    let last = rest.split('/').filter(|s| !s.is_empty()).last()?;
    Some(format!("{prefix}{last}"))
}

/// Rewrite every routing declaration in `text` to use `prefix`.
///
/// Returns the new text and the number of declarations whose path
/// actually changed. With no prefix the text is returned untouched.
pub fn normalize_routes<'a>(text: &'a str, prefix: Option<&str>) -> (Cow<'a, str>, usize) {
    let Some(prefix) = prefix else {
        return (Cow::Borrowed(text), 0);
    };

    let mut rewritten = 0;
    let out = route_re().replace_all(text, |caps: &Captures| {
        let whole = &caps[0];
        let path = &caps[1];
        match rewrite_path(path, prefix) {
            Some(new_path) => {
                if new_path != path {
                    rewritten += 1;
                    tracing::debug!(from = path, to = %new_path, "Routing path rewritten");
                }
                format!("@RequestMapping(\"{new_path}\")")
            }
            None => {
                tracing::debug!(path, "Routing path left unchanged");
                whole.to_string()
            }
        }
    });

    (out, rewritten)
}
