// CtrlMend - core/pipeline.rs
//
// The in-memory transformation of one file's text. Steps always run in
// this order: garbled text, imports, tag, routing paths.

use crate::core::annotate;
use crate::core::garble;
use crate::core::model::{Category, RepairStats, RuleSet};
use crate::core::route;

/// Apply every repair step to `text` for a file in `category`.
pub fn repair_text(text: &str, rules: &RuleSet, category: &Category) -> (String, RepairStats) {
    let mut stats = RepairStats::default();

    let (text, replaced) = garble::correct_garbled(text, &rules.garbled);
    stats.garbled_replaced = replaced;

    let (text, outcome) = annotate::inject_imports(&text, rules);
    stats.imports_added = outcome.inserted();

    let (text, outcome) = annotate::inject_tag(&text, category);
    stats.tag_added = outcome.inserted();

    let (text, rewritten) = route::normalize_routes(&text, category.prefix.as_deref());
    stats.routes_rewritten = rewritten;

    (text.into_owned(), stats)
}
