// CtrlMend - core/garble.rs
//
// Literal replacement of known mis-encoded sequences.
//
// This is a lookup, not a decoder: only sequences listed in the rule set
// are touched, and nothing is reported for sequences that are absent.

use crate::core::model::GarbledPair;

/// Replace every occurrence of every garbled key, in the given order.
///
/// Returns the corrected text and the total number of replacements.
/// `pairs` is expected in rule set order (longest key first), so a key
/// that occurs inside a longer one never splits the longer match.
pub fn correct_garbled(text: &str, pairs: &[GarbledPair]) -> (String, usize) {
    let mut out = text.to_string();
    let mut replaced = 0;

    for pair in pairs {
        let key = pair.garbled.as_str();
        if !out.contains(key) {
            continue;
        }

        let mut next = String::with_capacity(out.len());
        let mut last = 0;
        let mut hits = 0;
        for (start, _) in out.match_indices(key) {
            next.push_str(&out[last..start]);
            next.push_str(&pair.correct);
            last = start + key.len();
            hits += 1;
        }
        next.push_str(&out[last..]);

        out = next;
        replaced += hits;
        tracing::trace!(garbled = key, hits, "Corrected garbled text");
    }

    (out, replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rules::load_builtin_rules;

    fn pair(garbled: &str, correct: &str) -> GarbledPair {
        GarbledPair {
            garbled: garbled.to_string(),
            correct: correct.to_string(),
        }
    }

    #[test]
    fn test_replaces_all_occurrences_of_all_keys() {
        let pairs = [pair("AA", "x"), pair("B", "y")];
        let (out, n) = correct_garbled("AA B AA -", &pairs);
        assert_eq!(out, "x y x -");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_repeated_key_counts_non_overlapping_hits() {
        let (out, n) = correct_garbled("aaaaa|aa", &[pair("aa", "b")]);
        assert_eq!(out, "bba|b");
        assert_eq!(n, 3);
    }

    #[test]
    fn test_absent_keys_ignored() {
        let (out, n) = correct_garbled("clean text", &[pair("zz", "q")]);
        assert_eq!(out, "clean text");
        assert_eq!(n, 0);
    }

    #[test]
    fn test_builtin_example_marker_corrected() {
        let rules = load_builtin_rules().unwrap();
        let text = "    /**\n     * 绀轰緥锛?A01-B02\n     */\n";
        let (out, n) = correct_garbled(text, &rules.garbled);
        assert!(out.contains("示例:A01-B02"), "got {out}");
        assert!(!out.contains("绀轰緥锛?"));
        assert_eq!(n, 1);
    }

    #[test]
    fn test_builtin_overlapping_keys_repair_whole_phrase() {
        let rules = load_builtin_rules().unwrap();
        let text = r#"return ApiResponse.error(400, "platform 鍜?current_version 涓嶈兘涓虹┖");"#;
        let (out, _) = correct_garbled(text, &rules.garbled);
        assert_eq!(
            out,
            r#"return ApiResponse.error(400, "platform 和 current_version 不能为空");"#
        );
    }

    #[test]
    fn test_builtin_correction_is_idempotent() {
        let rules = load_builtin_rules().unwrap();
        let text = "鏂板缁忛攢鍟?\n鑾峰彇鍗曚釜缁忛攢鍟嗚鎯?\ncontent 涓嶈兘涓虹┖\n鍦板潃";
        let (once, _) = correct_garbled(text, &rules.garbled);
        let (twice, n) = correct_garbled(&once, &rules.garbled);
        assert_eq!(once, twice);
        assert_eq!(n, 0);
    }
}
