const FENCE: &str = "```";
const BOLD: &str = "**";

/// Renderable piece of a chat message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatBlock {
    Text(Vec<TextSpan>),
    Code { lang: String, code: String },
}

impl ChatBlock {
    /// Header label for a code block.
    #[must_use]
    pub fn code_label(lang: &str) -> &str {
        if lang.is_empty() { "code" } else { lang }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextSpan {
    pub text: String,
    pub bold: bool,
}

/// Splits a message into prose and fenced code blocks. Inside prose,
/// `**bold**` runs on a single line become bold spans. An unterminated fence
/// stays prose.
#[must_use]
pub fn split_chat_content(content: &str) -> Vec<ChatBlock> {
    let mut blocks = Vec::new();
    let mut rest = content;
    while let Some(start) = rest.find(FENCE) {
        let after = &rest[start + FENCE.len()..];
        let Some(len) = after.find(FENCE) else {
            break;
        };
        push_text(&mut blocks, &rest[..start]);
        blocks.push(code_block(&after[..len]));
        rest = &after[len + FENCE.len()..];
    }
    push_text(&mut blocks, rest);
    blocks
}

fn code_block(inner: &str) -> ChatBlock {
    let lang_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(inner.len());
    match inner[lang_len..].strip_prefix('\n') {
        Some(code) => ChatBlock::Code {
            lang: inner[..lang_len].to_string(),
            code: code.to_string(),
        },
        None => ChatBlock::Code {
            lang: String::new(),
            code: inner.to_string(),
        },
    }
}

fn push_text(blocks: &mut Vec<ChatBlock>, text: &str) {
    if !text.is_empty() {
        blocks.push(ChatBlock::Text(bold_spans(text)));
    }
}

fn bold_spans(text: &str) -> Vec<TextSpan> {
    let mut spans = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find(BOLD) {
        let after = &rest[open + BOLD.len()..];
        let Some(close) = after.find(BOLD) else {
            break;
        };
        if after[..close].contains('\n') {
            push_plain(&mut spans, &rest[..open + BOLD.len()]);
            rest = after;
            continue;
        }
        push_plain(&mut spans, &rest[..open]);
        spans.push(TextSpan {
            text: after[..close].to_string(),
            bold: true,
        });
        rest = &after[close + BOLD.len()..];
    }
    push_plain(&mut spans, rest);
    spans
}

fn push_plain(spans: &mut Vec<TextSpan>, text: &str) {
    if text.is_empty() {
        return;
    }
    match spans.last_mut() {
        Some(last) if !last.bold => last.text.push_str(text),
        _ => spans.push(TextSpan {
            text: text.to_string(),
            bold: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> TextSpan {
        TextSpan {
            text: text.into(),
            bold: false,
        }
    }

    fn bold(text: &str) -> TextSpan {
        TextSpan {
            text: text.into(),
            bold: true,
        }
    }

    #[test]
    fn splits_fenced_code_with_language() {
        let blocks = split_chat_content("Try this:\n```python\nx = 1\n```\nDone.");
        assert_eq!(
            blocks,
            vec![
                ChatBlock::Text(vec![plain("Try this:\n")]),
                ChatBlock::Code {
                    lang: "python".into(),
                    code: "x = 1\n".into(),
                },
                ChatBlock::Text(vec![plain("\nDone.")]),
            ]
        );
    }

    #[test]
    fn fence_without_newline_has_no_language() {
        let blocks = split_chat_content("```a + b```");
        assert_eq!(
            blocks,
            vec![ChatBlock::Code {
                lang: String::new(),
                code: "a + b".into(),
            }]
        );
        assert_eq!(ChatBlock::code_label(""), "code");
    }

    #[test]
    fn unterminated_fence_stays_text() {
        let blocks = split_chat_content("partial ```rust\nfn main");
        assert_eq!(
            blocks,
            vec![ChatBlock::Text(vec![plain("partial ```rust\nfn main")])]
        );
    }

    #[test]
    fn bold_runs_become_spans() {
        let blocks = split_chat_content("Use a **hash map** for **O(1)** lookups");
        assert_eq!(
            blocks,
            vec![ChatBlock::Text(vec![
                plain("Use a "),
                bold("hash map"),
                plain(" for "),
                bold("O(1)"),
                plain(" lookups"),
            ])]
        );
    }

    #[test]
    fn bold_does_not_span_lines() {
        let blocks = split_chat_content("a **b\nc** d");
        assert_eq!(blocks, vec![ChatBlock::Text(vec![plain("a **b\nc** d")])]);
    }
}
