//! Monitor rule data structures

use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::scan::{count_matches, trailing_window, WINDOW_LINES};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRule {
    /// Pattern counted within the trailing window (regex, literal fallback)
    pub keyword: String,
    /// Minimum match count that raises an alert
    pub threshold: u32,
    /// Alert text shown to the user
    pub message: String,
}

impl MonitorRule {
    /// Build a rule, applying the field defaults.
    ///
    /// An empty keyword is rejected; a threshold below 1 is clamped to 1;
    /// an empty message defaults to `"match: {keyword}"`.
    pub fn new(keyword: &str, threshold: u32, message: &str) -> Result<Self> {
        if keyword.trim().is_empty() {
            return Err(RuleError::InvalidRule("keyword cannot be empty".to_string()));
        }

        let message = if message.trim().is_empty() {
            format!("match: {keyword}")
        } else {
            message.to_string()
        };

        Ok(Self {
            keyword: keyword.to_string(),
            threshold: threshold.max(1),
            message,
        })
    }
}

/// An ordered sequence of monitor rules.
///
/// Evaluation order is insertion order. A `RuleSet` is a plain value; the
/// manager clones the default template into every new session so rule edits
/// stay local to one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    rules: Vec<MonitorRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The built-in template cloned into every new session.
    ///
    /// Four rules, threshold 3 each. "失败" is the localized failure term
    /// the shipped rule set has always watched for.
    pub fn default_template() -> Self {
        let rules = vec![
            MonitorRule {
                keyword: "Error".to_string(),
                threshold: 3,
                message: "repeated errors detected (Error x3)".to_string(),
            },
            MonitorRule {
                keyword: "Timeout".to_string(),
                threshold: 3,
                message: "network timeouts detected (Timeout x3)".to_string(),
            },
            MonitorRule {
                keyword: "Exception".to_string(),
                threshold: 3,
                message: "exceptions detected (Exception x3)".to_string(),
            },
            MonitorRule {
                keyword: "失败".to_string(),
                threshold: 3,
                message: "operation failures detected".to_string(),
            },
        ];

        Self { rules }
    }

    /// Append a rule, applying the `MonitorRule::new` defaults.
    pub fn add(&mut self, keyword: &str, threshold: u32, message: &str) -> Result<()> {
        let rule = MonitorRule::new(keyword, threshold, message)?;
        self.rules.push(rule);
        Ok(())
    }

    /// Remove the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Result<MonitorRule> {
        if index >= self.rules.len() {
            return Err(RuleError::IndexOutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        Ok(self.rules.remove(index))
    }

    /// Replace the whole sequence.
    pub fn replace(&mut self, rules: Vec<MonitorRule>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &[MonitorRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the rules against a raw text sample.
    ///
    /// The sample is reduced to its trailing window first. Rules are checked
    /// in insertion order and the first rule whose match count reaches its
    /// threshold wins; evaluation stops there, so one sample raises at most
    /// one alert. A second condition present in the same window is masked
    /// until the next tick.
    pub fn evaluate(&self, sample: &str) -> Option<&MonitorRule> {
        let window = trailing_window(sample, WINDOW_LINES);

        self.rules
            .iter()
            .find(|rule| count_matches(&rule.keyword, &window) >= rule.threshold as usize)
    }

    /// Serialize to the JSON wire form used by the settings table.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.rules)
    }

    /// Parse the JSON wire form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let rules: Vec<MonitorRule> = serde_json::from_str(json)?;
        Ok(Self { rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rule_defaults() {
        let rule = MonitorRule::new("Error", 0, "").unwrap();
        assert_eq!(rule.threshold, 1);
        assert_eq!(rule.message, "match: Error");
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let result = MonitorRule::new("", 3, "x");
        assert!(matches!(result, Err(RuleError::InvalidRule(_))));

        let mut set = RuleSet::new();
        assert!(set.add("", 3, "x").is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_add_then_remove_restores_empty() {
        let mut set = RuleSet::new();
        set.add("Error", 3, "x").unwrap();
        assert_eq!(set.len(), 1);

        let removed = set.remove(0).unwrap();
        assert_eq!(removed.keyword, "Error");
        assert!(set.is_empty());
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut set = RuleSet::new();
        set.add("Error", 3, "x").unwrap();

        let err = set.remove(1).unwrap_err();
        assert!(matches!(
            err,
            RuleError::IndexOutOfRange { index: 1, len: 1 }
        ));
        // Failed removal leaves the set untouched
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_default_template_shape() {
        let template = RuleSet::default_template();
        assert_eq!(template.len(), 4);

        let keywords: Vec<&str> = template.rules().iter().map(|r| r.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["Error", "Timeout", "Exception", "失败"]);
        assert!(template.rules().iter().all(|r| r.threshold == 3));
    }

    #[test]
    fn test_template_copies_are_independent() {
        let template = RuleSet::default_template();
        let mut a = template.clone();
        let b = template.clone();

        a.add("Panic", 1, "panicked").unwrap();

        assert_eq!(a.len(), 5);
        assert_eq!(b.len(), 4);
        assert_eq!(template.len(), 4);
    }

    #[test]
    fn test_evaluate_at_threshold() {
        let mut set = RuleSet::new();
        set.add("Error", 3, "three errors").unwrap();

        let sample = "Error\nok\nError\nok\nError";
        let hit = set.evaluate(sample).unwrap();
        assert_eq!(hit.message, "three errors");
    }

    #[test]
    fn test_evaluate_below_threshold() {
        let mut set = RuleSet::new();
        set.add("Error", 4, "four errors").unwrap();

        let sample = "Error\nError\nError";
        assert!(set.evaluate(sample).is_none());
    }

    #[test]
    fn test_evaluate_first_match_wins() {
        let mut set = RuleSet::new();
        set.add("Error", 1, "first").unwrap();
        set.add("Timeout", 1, "second").unwrap();

        // Both conditions present; insertion order decides.
        let sample = "Timeout then Error";
        assert_eq!(set.evaluate(sample).unwrap().message, "first");
    }

    #[test]
    fn test_evaluate_ignores_lines_outside_window() {
        let mut set = RuleSet::new();
        set.add("Error", 3, "x").unwrap();

        // Three matches, but all above the 50-line trailing window.
        let mut lines = vec!["Error"; 3];
        lines.extend(std::iter::repeat("quiet").take(60));
        let sample = lines.join("\n");

        assert!(set.evaluate(&sample).is_none());
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let template = RuleSet::default_template();
        let json = template.to_json().unwrap();
        let back = RuleSet::from_json(&json).unwrap();
        assert_eq!(back, template);
    }
}
