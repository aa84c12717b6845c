// CtrlMend - core/patcher.rs
//
// Guarded single-insertion text patching.
//
// A `TextPatcher` finds the first match of an anchor pattern and inserts a
// block of lines directly before or after it, unless a guard substring shows
// the block (or an equivalent one) is already present. Applying the same
// patcher twice therefore inserts at most once.

use regex::Regex;
use std::borrow::Cow;

/// Where the inserted lines go relative to the anchor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// On the lines immediately above the match.
    Before,
    /// On the lines immediately below the match.
    After,
}

/// Why a patch did or did not modify the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    Inserted,
    /// The guard substring was already present.
    Guarded,
    /// The anchor pattern did not match.
    AnchorMissing,
}

impl PatchOutcome {
    pub fn inserted(self) -> bool {
        self == Self::Inserted
    }
}

#[derive(Debug, Clone)]
pub struct TextPatcher {
    anchor: Regex,
    guard: String,
    placement: Placement,
}

impl TextPatcher {
    pub fn new(anchor: Regex, guard: impl Into<String>, placement: Placement) -> Self {
        Self {
            anchor,
            guard: guard.into(),
            placement,
        }
    }

    /// Insert `lines` next to the first anchor match.
    ///
    /// `lines` is joined with the anchor line's own terminator (`\r\n` or
    /// `\n`); exactly `lines.len()` new lines appear in the output. The
    /// input is borrowed back untouched when nothing is inserted.
    pub fn apply<'a>(&self, text: &'a str, lines: &[&str]) -> (Cow<'a, str>, PatchOutcome) {
        if lines.is_empty() {
            return (Cow::Borrowed(text), PatchOutcome::Guarded);
        }
        if text.contains(self.guard.as_str()) {
            return (Cow::Borrowed(text), PatchOutcome::Guarded);
        }
        let Some(m) = self.anchor.find(text) else {
            return (Cow::Borrowed(text), PatchOutcome::AnchorMissing);
        };

        let eol = line_ending_at(text, m.end());
        let block = lines.join(eol);
        let mut out = String::with_capacity(text.len() + block.len() + eol.len());
        match self.placement {
            Placement::Before => {
                out.push_str(&text[..m.start()]);
                out.push_str(&block);
                out.push_str(eol);
                out.push_str(&text[m.start()..]);
            }
            Placement::After => {
                out.push_str(&text[..m.end()]);
                out.push_str(eol);
                out.push_str(&block);
                out.push_str(&text[m.end()..]);
            }
        }
        (Cow::Owned(out), PatchOutcome::Inserted)
    }
}

/// Terminator of the line containing byte offset `pos`.
///
/// A last line without a terminator counts as `\n`.
fn line_ending_at(text: &str, pos: usize) -> &'static str {
    match text[pos..].find('\n') {
        Some(i) if text[..pos + i].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}
