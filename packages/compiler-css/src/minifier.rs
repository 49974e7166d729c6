//! CSS minification - compress stylesheet text for smaller payloads

/// Punctuation that never needs surrounding whitespace
fn is_structural(ch: char) -> bool {
    matches!(ch, '{' | '}' | ':' | ';' | ',' | '>')
}

/// Minify stylesheet text.
///
/// Strips comments, collapses whitespace, removes whitespace around
/// structural punctuation and drops the final `;` of each block. Quoted
/// strings are copied verbatim. Minifying already minified text returns it
/// unchanged.
pub fn minify(css: &str) -> String {
    let mut result = String::with_capacity(css.len());
    let mut chars = css.chars().peekable();
    let mut pending_space = false;

    while let Some(ch) = chars.next() {
        // Comments
        if ch == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut last = '\0';
            for next in chars.by_ref() {
                if last == '*' && next == '/' {
                    break;
                }
                last = next;
            }
            pending_space = true;
            continue;
        }

        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }

        if is_structural(ch) {
            if ch == '}' {
                while result.ends_with(';') {
                    result.pop();
                }
            }
            result.push(ch);
            pending_space = false;
            continue;
        }

        if pending_space && !result.is_empty() && !result.ends_with(is_structural) {
            result.push(' ');
        }
        pending_space = false;

        if ch == '"' || ch == '\'' {
            result.push(ch);
            for next in chars.by_ref() {
                result.push(next);
                if next == ch {
                    break;
                }
            }
            continue;
        }

        result.push(ch);
    }

    result
}

/// Calculate compression ratio as a percentage saved
pub fn calculate_compression_ratio(original_size: usize, minified_size: usize) -> f64 {
    if original_size == 0 || minified_size >= original_size {
        return 0.0;
    }
    ((original_size - minified_size) as f64 / original_size as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_punctuation() {
        let css = "#wpadminbar {\n  background-color: #112233;\n  height: 40px;\n}\n\n";
        assert_eq!(minify(css), "#wpadminbar{background-color:#112233;height:40px}");
    }

    #[test]
    fn test_strips_comments() {
        assert_eq!(minify("/* theme */ a { color : red ; } /* end */"), "a{color:red}");
        assert_eq!(minify("a{color:red}/* unterminated"), "a{color:red}");
    }

    #[test]
    fn test_keeps_meaningful_spaces() {
        assert_eq!(
            minify("#adminmenu  a.menu-top , #wpadminbar   .ab-item { box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.2); }"),
            "#adminmenu a.menu-top,#wpadminbar .ab-item{box-shadow:0 2px 4px 0 rgba(0,0,0,0.2)}"
        );
        assert_eq!(minify("li > a { color: red }"), "li>a{color:red}");
    }

    #[test]
    fn test_quoted_strings_are_verbatim() {
        assert_eq!(
            minify("a { font-family: \"Segoe UI\",  'Open  Sans', sans-serif; }"),
            "a{font-family:\"Segoe UI\",'Open  Sans',sans-serif}"
        );
    }

    #[test]
    fn test_media_queries() {
        let css = "@media screen and (max-width: 782px) {\n  #adminmenu a.menu-top {\n    padding-top: 4px;\n  }\n}\n";
        assert_eq!(
            minify(css),
            "@media screen and (max-width:782px){#adminmenu a.menu-top{padding-top:4px}}"
        );
    }

    #[test]
    fn test_minify_is_idempotent() {
        let inputs = [
            "",
            "   ",
            "a { color: red; }",
            "/* x */ @media screen and (max-width: 782px) { a { b: c; } }",
            "a{font-family:\"Segoe UI\",sans-serif;}",
            "#a , #b > c { margin : 0 -4px 0 4px ; }",
            "a { color: red;; }",
        ];

        for input in inputs {
            let once = minify(input);
            assert_eq!(minify(&once), once, "input: {:?}", input);
        }
    }

    #[test]
    fn test_compression_ratio() {
        assert_eq!(calculate_compression_ratio(0, 0), 0.0);
        assert_eq!(calculate_compression_ratio(200, 150), 25.0);
    }
}
