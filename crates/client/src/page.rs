//! Minimal document model for the navigation behaviors.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList(Vec<String>);

impl ClassList {
    pub fn contains(&self, class: &str) -> bool {
        self.0.iter().any(|c| c == class)
    }

    pub fn add(&mut self, class: &str) {
        if !self.contains(class) {
            self.0.push(class.to_owned());
        }
    }

    pub fn remove(&mut self, class: &str) {
        self.0.retain(|c| c != class);
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(" "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    pub class_list: ClassList,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.class_list.add(class);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// One compound selector: `tag`, `.class` or `[attr]`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Simple {
    Tag(String),
    Class(String),
    Attr(String),
}

impl Simple {
    fn parse(part: &str) -> Self {
        if let Some(class) = part.strip_prefix('.') {
            Self::Class(class.to_owned())
        } else if let Some(attr) = part.strip_prefix('[').and_then(|p| p.strip_suffix(']')) {
            Self::Attr(attr.to_owned())
        } else {
            Self::Tag(part.to_owned())
        }
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Self::Tag(tag) => element.tag.eq_ignore_ascii_case(tag),
            Self::Class(class) => element.class_list.contains(class),
            Self::Attr(attr) => element.attrs.contains_key(attr),
        }
    }
}

/// Index path from the body to an element.
pub type NodePath = Vec<usize>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `location.pathname` of the page.
    pub path: String,
    pub body: Element,
}

impl Document {
    pub fn new(path: impl Into<String>, body: Element) -> Self {
        Self {
            path: path.into(),
            body,
        }
    }

    /// Descendant selectors only, e.g. `.nav-links a`.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodePath> {
        let parts = selector
            .split_whitespace()
            .map(Simple::parse)
            .collect::<Vec<_>>();

        let mut found = vec![];
        if !parts.is_empty() {
            walk(&self.body, &mut vec![], &parts, 0, &mut found);
        }
        found.dedup();

        found
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodePath> {
        self.query_selector_all(selector).into_iter().next()
    }

    pub fn get(&self, path: &[usize]) -> Option<&Element> {
        path.iter()
            .try_fold(&self.body, |element, i| element.children.get(*i))
    }

    pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut Element> {
        path.iter()
            .try_fold(&mut self.body, |element, i| element.children.get_mut(*i))
    }
}

/// Depth-first, document order. `matched` counts the leading selector parts
/// already satisfied by ancestors.
fn walk(
    element: &Element,
    path: &mut NodePath,
    parts: &[Simple],
    matched: usize,
    found: &mut Vec<NodePath>,
) {
    for (i, child) in element.children.iter().enumerate() {
        path.push(i);

        let mut next = matched;
        if parts[matched].matches(child) {
            if matched + 1 == parts.len() {
                found.push(path.clone());
            } else {
                next = matched + 1;
            }
        }
        walk(child, path, parts, next, found);

        path.pop();
    }
}
