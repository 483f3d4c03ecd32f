const FENCE: &str = "```";

/// Recovers a bare SQL statement from model output.
///
/// With a fenced block, returns the content of the first block (minus a
/// language tag such as `sql` on the opening line), or everything after the
/// opening fence when it is never closed. Without a fence, returns the
/// trimmed input. Never fails.
pub fn clean(raw: Option<&str>) -> String {
    let text = match raw {
        Some(t) => t,
        None => return String::new(),
    };

    let Some(open) = text.find(FENCE) else {
        return text.trim().to_string();
    };

    let body = strip_info_string(&text[open + FENCE.len()..]);
    let block = match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    block.trim().to_string()
}

/// Drops the language tag that follows an opening fence, e.g. `sql\n`.
///
/// A bare token alone on the opening line is a tag. On a one-line fence
/// ("```sql SELECT 1;```") the leading token is a tag only when a statement
/// follows it, so "```SELECT 1```" keeps its content.
fn strip_info_string(after_fence: &str) -> &str {
    let line_end = after_fence.find('\n').unwrap_or(after_fence.len());
    let line = after_fence[..line_end].trim();
    if line.is_empty() || is_tag(line) {
        return after_fence.get(line_end + 1..).unwrap_or("");
    }

    let lead = after_fence.trim_start_matches([' ', '\t']);
    if let Some((token, rest)) = lead.split_once(char::is_whitespace) {
        if is_tag(token) && rest.split_whitespace().next().is_some_and(starts_statement) {
            return rest;
        }
    }
    after_fence
}

fn is_tag(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+'))
        && !starts_statement(token)
}

fn starts_statement(token: &str) -> bool {
    ["select", "with", "values", "pragma", "explain"]
        .iter()
        .any(|kw| token.eq_ignore_ascii_case(kw))
}
