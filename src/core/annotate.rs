// CtrlMend - core/annotate.rs
//
// Injection of API documentation imports and class-level tag annotations.
// Both steps are guarded no-ops when the annotation is already present or
// the expected anchor is missing.

use crate::core::model::{Category, RuleSet};
use crate::core::patcher::{PatchOutcome, Placement, TextPatcher};
use crate::util::constants;
use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn class_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(constants::CLASS_NAME_PATTERN).expect("class name regex"))
}

fn tag_patcher() -> &'static TextPatcher {
    static PATCHER: OnceLock<TextPatcher> = OnceLock::new();
    PATCHER.get_or_init(|| {
        TextPatcher::new(
            Regex::new(constants::TAG_ANCHOR_PATTERN).expect("tag anchor regex"),
            constants::TAG_GUARD,
            Placement::Before,
        )
    })
}

/// Insert the documentation imports directly below the package line.
pub fn inject_imports<'a>(text: &'a str, rules: &RuleSet) -> (Cow<'a, str>, PatchOutcome) {
    let patcher = TextPatcher::new(
        rules.package_pattern.clone(),
        constants::IMPORT_GUARD,
        Placement::After,
    );
    let (out, outcome) = patcher.apply(text, constants::IMPORT_LINES);
    if outcome == PatchOutcome::AnchorMissing {
        tracing::debug!(
            package_root = %rules.package_root,
            "No package declaration found; imports not added"
        );
    }
    (out, outcome)
}

/// Controller class name declared in `text`, if any.
pub fn controller_class_name(text: &str) -> Option<&str> {
    class_name_re()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Render the tag annotation line for `name` and `description`.
///
/// Values are trusted rule set strings and are not escaped.
pub fn tag_line(name: &str, description: &str) -> String {
    format!("@Tag(name = \"{name}\", description = \"{description}\")")
}

/// Insert the category's tag annotation above the first `@RestController`.
pub fn inject_tag<'a>(text: &'a str, category: &Category) -> (Cow<'a, str>, PatchOutcome) {
    if text.contains(constants::TAG_GUARD) {
        return (Cow::Borrowed(text), PatchOutcome::Guarded);
    }

    let Some(class_name) = controller_class_name(text) else {
        tracing::debug!(category = %category.name, "No controller class found; tag not added");
        return (Cow::Borrowed(text), PatchOutcome::AnchorMissing);
    };

    let Some(tag) = category.tag_for(class_name) else {
        tracing::debug!(
            category = %category.name,
            class = class_name,
            "No tag configured for class"
        );
        return (Cow::Borrowed(text), PatchOutcome::AnchorMissing);
    };

    let line = tag_line(&tag.name, &tag.description);
    tag_patcher().apply(text, &[line.as_str()])
}
