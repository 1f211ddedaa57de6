//! Rule registration and cascade resolution.
//!
//! A selector is a class or tag name followed by any number of pseudo
//! states: `button`, `button:hover`, `item:selected:hover`. Names and states
//! are made of ASCII letters, digits, `_` and `-`.
//!
//! Matching rules are applied in registration order, so a later rule wins
//! over an earlier one whatever their kinds. Re-registering a selector
//! replaces its style but keeps its original position.

use std::fmt;

use facet_common::warning::warn_once;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::StyleError;
use crate::style::Style;

/// What a selector's name is matched against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SelectorKind {
    /// Matches the node's tag.
    Tag,
    /// Matches any of the node's classes.
    Class,
}

/// A parsed `name(:state)*` selector.
///
/// States are kept sorted and deduplicated, so `a:focus:hover` and
/// `a:hover:focus` are the same selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    name: String,
    states: Vec<String>,
}

fn is_ident(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidSelector`] when the name or any state is
    /// empty or contains a character outside `[A-Za-z0-9_-]`.
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        let mut parts = text.trim().split(':');
        let name = parts.next().unwrap_or_default();
        if !is_ident(name) {
            return Err(StyleError::InvalidSelector(text.to_string()));
        }

        let mut states = Vec::new();
        for state in parts {
            if !is_ident(state) {
                return Err(StyleError::InvalidSelector(text.to_string()));
            }
            states.push(state.to_string());
        }
        states.sort_unstable();
        states.dedup();

        Ok(Self {
            name: name.to_string(),
            states,
        })
    }

    /// The class or tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required pseudo states, sorted.
    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    fn matches(&self, kind: SelectorKind, node: &NodeSelectors) -> bool {
        let name_matches = match kind {
            SelectorKind::Tag => node.tag.as_deref() == Some(self.name.as_str()),
            SelectorKind::Class => node.has_class(&self.name),
        };
        name_matches && self.states.iter().all(|state| node.has_state(state))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for state in &self.states {
            write!(f, ":{state}")?;
        }
        Ok(())
    }
}

/// The identifiers of one node that rules are matched against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSelectors {
    /// The node's tag, if any.
    pub tag: Option<String>,
    /// Class names, in assignment order.
    pub classes: Vec<String>,
    /// Active pseudo states (`hover`, `disabled`, ...).
    pub states: Vec<String>,
}

impl NodeSelectors {
    /// No tag, classes or states.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.has_class(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add a pseudo state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        let state = state.into();
        if !self.has_state(&state) {
            self.states.push(state);
        }
        self
    }

    /// True if `class` is one of the node's classes.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// True if `state` is active.
    #[must_use]
    pub fn has_state(&self, state: &str) -> bool {
        self.states.iter().any(|s| s == state)
    }
}

#[derive(Debug, Clone)]
struct Rule {
    kind: SelectorKind,
    selector: Selector,
    style: Style,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    kind: SelectorKind,
    selector: String,
    #[serde(default)]
    style: Style,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StylesheetDocument {
    #[serde(default)]
    rules: Vec<RuleEntry>,
}

/// An ordered set of class and tag rules.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    rules: Vec<Rule>,
    generation: u64,
}

impl Stylesheet {
    /// An empty stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load rules from a JSON document of the form
    /// `{"rules":[{"kind":"class","selector":"button:hover","style":{...}}]}`.
    ///
    /// Malformed selectors are reported and skipped like in
    /// [`set_class_rule`](Self::set_class_rule).
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Json`] if the document does not deserialize.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let mut sheet = Self::new();
        sheet.extend_from_json(json)?;
        Ok(sheet)
    }

    /// Register every rule of a JSON document after the existing rules.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Json`] if the document does not deserialize.
    /// No rule is registered in that case.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), StyleError> {
        let document: StylesheetDocument = serde_json::from_str(json)?;
        for entry in document.rules {
            self.set_rule(entry.kind, &entry.selector, entry.style);
        }
        Ok(())
    }

    /// Register a class rule.
    ///
    /// Registering the same selector again replaces that rule's style. A
    /// malformed selector is reported once and registers nothing.
    pub fn set_class_rule(&mut self, selector: &str, style: Style) {
        self.set_rule(SelectorKind::Class, selector, style);
    }

    /// Register a tag rule. Same replacement rules as
    /// [`set_class_rule`](Self::set_class_rule).
    pub fn set_tag_rule(&mut self, selector: &str, style: Style) {
        self.set_rule(SelectorKind::Tag, selector, style);
    }

    /// Register a rule of either kind.
    pub fn set_rule(&mut self, kind: SelectorKind, selector: &str, style: Style) {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(err) => {
                warn_once("style", &format!("ignoring {kind} rule: {err}"));
                return;
            }
        };

        if let Some(rule) = self
            .rules
            .iter_mut()
            .find(|rule| rule.kind == kind && rule.selector == selector)
        {
            rule.style = style;
        } else {
            self.rules.push(Rule {
                kind,
                selector,
                style,
            });
        }
        self.generation += 1;
    }

    /// Merge every rule matching `node` into one style.
    ///
    /// The result depends only on the registered rules and `node`; a node no
    /// rule matches gets an all-unset style.
    #[must_use]
    pub fn resolve(&self, node: &NodeSelectors) -> Style {
        let mut resolved = Style::default();
        for rule in self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(rule.kind, node))
        {
            resolved.merge(&rule.style);
        }
        resolved
    }

    /// Incremented on every registration. Nodes resolved against an older
    /// generation must be re-resolved.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
