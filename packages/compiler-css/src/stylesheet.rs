use thiserror::Error;

pub type CssResult<T> = Result<T, GenerationError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Field '{path}' holds an unexpected value: {value}")]
    UnexpectedValue { path: String, value: String },

    #[error("Settings document could not be projected: {message}")]
    Projection { message: String },
}

/// CSS rule with selector, ordered declarations and optional media query
#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
    pub media_query: Option<String>,
}

impl CssRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
            media_query: None,
        }
    }

    pub fn with_media(mut self, query: impl Into<String>) -> Self {
        self.media_query = Some(query.into());
        self
    }

    /// Add a declaration. A property declared twice keeps its first position
    /// and takes the latest value.
    pub fn declare(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value,
            None => self.declarations.push((property, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn write_block(&self, css: &mut String, indent: &str) {
        css.push_str(indent);
        css.push_str(&self.selector);
        css.push_str(" {\n");

        for (key, value) in &self.declarations {
            css.push_str(indent);
            css.push_str("  ");
            css.push_str(key);
            css.push_str(": ");
            css.push_str(value);
            css.push_str(";\n");
        }

        css.push_str(indent);
        css.push_str("}\n");
    }
}

/// Ordered collection of rules produced by the generator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    pub rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; empty rules are dropped
    pub fn add_rule(&mut self, rule: CssRule) {
        if !rule.is_empty() {
            self.rules.push(rule);
        }
    }

    pub fn extend(&mut self, rules: impl IntoIterator<Item = CssRule>) {
        for rule in rules {
            self.add_rule(rule);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// First rule for `selector` outside any media query
    pub fn find(&self, selector: &str) -> Option<&CssRule> {
        self.rules
            .iter()
            .find(|rule| rule.selector == selector && rule.media_query.is_none())
    }

    /// Convert to CSS text
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        for rule in &self.rules {
            match &rule.media_query {
                Some(query) => {
                    css.push_str("@media ");
                    css.push_str(query);
                    css.push_str(" {\n");
                    rule.write_block(&mut css, "  ");
                    css.push_str("}\n\n");
                }
                None => {
                    rule.write_block(&mut css, "");
                    css.push('\n');
                }
            }
        }

        css
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_to_css() {
        let mut sheet = Stylesheet::new();
        let mut rule = CssRule::new("#wpadminbar");
        rule.declare("background-color", "#112233");
        rule.declare("height", "40px");
        sheet.add_rule(rule);

        assert_eq!(
            sheet.to_css(),
            "#wpadminbar {\n  background-color: #112233;\n  height: 40px;\n}\n\n"
        );
    }

    #[test]
    fn test_media_rules_are_wrapped() {
        let mut sheet = Stylesheet::new();
        let mut rule = CssRule::new("#adminmenu a.menu-top").with_media("screen and (max-width: 782px)");
        rule.declare("padding-top", "4px");
        sheet.add_rule(rule);

        let css = sheet.to_css();
        assert!(css.starts_with("@media screen and (max-width: 782px) {\n  #adminmenu a.menu-top {\n"));
        assert!(css.contains("    padding-top: 4px;\n"));
    }

    #[test]
    fn test_declarations_keep_order_and_replace() {
        let mut rule = CssRule::new("a");
        rule.declare("color", "#000");
        rule.declare("margin", "0");
        rule.declare("color", "#fff");

        assert_eq!(
            rule.declarations,
            vec![
                ("color".to_string(), "#fff".to_string()),
                ("margin".to_string(), "0".to_string())
            ]
        );
        assert_eq!(rule.get("color"), Some("#fff"));
    }

    #[test]
    fn test_empty_rules_are_dropped() {
        let mut sheet = Stylesheet::new();
        sheet.add_rule(CssRule::new("#wpadminbar"));
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_css(), "");
    }
}
