use std::collections::HashMap;

/// Fills `{key}` placeholders in a static template.
pub struct MessageBuilder {
    template: &'static str,
    vars: HashMap<&'static str, String>,
}

impl MessageBuilder {
    pub fn new(template: &'static str) -> Self {
        Self {
            template,
            vars: HashMap::new(),
        }
    }

    pub fn var(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.vars.insert(key, value.into());
        self
    }

    /// Substitutes in one pass over the template, so values are never re-expanded
    pub fn build(self) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            match after.find('}') {
                Some(close) => match self.vars.get(&after[..close]) {
                    Some(value) => {
                        result.push_str(value);
                        rest = &after[close + 1..];
                    }
                    None => {
                        result.push('{');
                        rest = after;
                    }
                },
                None => {
                    result.push('{');
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let text = MessageBuilder::new("{name} -> {value}")
            .var("name", "http_proxy")
            .build();
        assert_eq!(text, "http_proxy -> {value}");
    }

    #[test]
    fn test_placeholders_inside_values_are_not_expanded() {
        let text = MessageBuilder::new("Setting '{name}' updated to {value}")
            .var("name", "login_text")
            .var("value", "Hello {name}")
            .build();
        assert_eq!(text, "Setting 'login_text' updated to Hello {name}");
    }

    #[test]
    fn test_stray_braces_are_kept() {
        let text = MessageBuilder::new("{ {name} }")
            .var("name", "x")
            .build();
        assert_eq!(text, "{ x }");
    }
}
