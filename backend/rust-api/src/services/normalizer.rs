const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Removes surrounding whitespace and one enclosing markdown code fence from a
/// model reply. An opening fence (with or without a `json` tag) and a closing
/// fence are stripped independently, so a reply carrying only one of them is
/// handled too. No JSON validation happens here.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = strip_json_tag(rest);
    }

    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim().to_string()
}

fn strip_json_tag(text: &str) -> &str {
    match text.get(..JSON_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &text[JSON_TAG.len()..],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tagged_fence() {
        let raw = "```json\n{\"summary\":\"ok\"}\n```";
        assert_eq!(normalize(raw), "{\"summary\":\"ok\"}");
    }

    #[test]
    fn test_strips_untagged_fence() {
        let raw = "  ```\n{\"a\":1}\n```  \n";
        assert_eq!(normalize(raw), "{\"a\":1}");
    }

    #[test]
    fn test_tag_match_ignores_case() {
        assert_eq!(normalize("```JSON\n[1,2]\n```"), "[1,2]");
    }

    #[test]
    fn test_plain_text_is_only_trimmed() {
        assert_eq!(normalize("  Tidak ada masalah.\n"), "Tidak ada masalah.");
    }

    #[test]
    fn test_opening_fence_only() {
        assert_eq!(normalize("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_closing_fence_only() {
        assert_eq!(normalize("{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_inner_fences_are_kept() {
        let raw = "```json\n{\"code\":\"```py\\nx=1\\n```\"}\n```";
        assert_eq!(normalize(raw), "{\"code\":\"```py\\nx=1\\n```\"}");
    }

    #[test]
    fn test_empty_and_bare_fence() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("```"), "");
        assert_eq!(normalize("``````"), "");
    }

    #[test]
    fn test_rewrapping_is_stable() {
        let samples = [
            "{\"summary\":\"assigns 1 to x\",\"lineNotes\":[]}",
            "Baris 1: ini bukan JSON",
            "json tanpa pagar",
            "multi\nline\n  text",
        ];

        for sample in samples {
            let stripped = normalize(sample);
            assert_eq!(normalize(&stripped), stripped);

            for wrapped in [
                format!("```json\n{}\n```", stripped),
                format!("```\n{}\n```", stripped),
            ] {
                assert_eq!(normalize(&wrapped), stripped, "wrapped: {:?}", wrapped);
            }
        }
    }
}
