/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_escape_markup() {
        assert_eq!(
            escape_html(r#"<b>"Banka" & 'trh'</b>"#),
            "&lt;b&gt;&quot;Banka&quot; &amp; &#39;trh&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("důvěra"), "důvěra");
    }
}
