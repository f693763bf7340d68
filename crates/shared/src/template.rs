/// Token replaced by a word's element id when a control is rendered.
pub const WORD_PLACEHOLDER: &str = "wx";

/// Word control fragment served when no template file is configured.
pub const BUILTIN_WORD_TEMPLATE: &str = include_str!("../static/word_ui_element.html");
