/// Strip the code fences models like to wrap JSON in and return the outermost
/// JSON object, if any.
///
/// Accepts ```` ```json ... ``` ````, bare ```` ``` ```` fences, and prose
/// around the object.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest
            .strip_prefix("json")
            .or_else(|| rest.strip_prefix("JSON"))
            .unwrap_or(rest);
        text = rest.trim_start();
        if let Some(end) = text.rfind("```") {
            text = &text[..end];
        }
        text = text.trim();
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    Some(&text[start..=end])
}
