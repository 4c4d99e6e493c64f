//! In-memory document
//!
//! A flat arena of elements with the subset of DOM behaviour the localization
//! controller relies on: attribute and class access, text/markup content,
//! selector queries, click listeners and insertion after load.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use serde::{Deserialize, Serialize};
use super::selector::Selector;

/// Handle to an element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// Click listener registered on an element
pub type Listener = Rc<dyn Fn(ElementId)>;

/// Serializable description of an element
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self.html = None;
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.html = Some(html.to_string());
        self.text = None;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Text(String),
    Markup(String),
}

struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    content: Content,
    listeners: Vec<Listener>,
}

#[derive(Default)]
struct Tree {
    nodes: Vec<Node>,
}

/// Shared, single-threaded document handle
#[derive(Clone, Default)]
pub struct Document {
    tree: Rc<RefCell<Tree>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from element descriptions, in order
    pub fn from_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = ElementSpec>,
    {
        let document = Self::new();
        for spec in elements {
            document.append(spec);
        }
        document
    }

    /// Insert an element at the end of the document
    pub fn append(&self, spec: ElementSpec) -> ElementId {
        let content = match (spec.html, spec.text) {
            (Some(html), _) => Content::Markup(html),
            (None, text) => Content::Text(text.unwrap_or_default()),
        };

        let mut tree = self.tree.borrow_mut();
        tree.nodes.push(Node {
            tag: spec.tag.to_ascii_lowercase(),
            attributes: spec.attributes,
            content,
            listeners: Vec::new(),
        });
        ElementId(tree.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.tree.borrow().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| selector.matches(&node.tag, &node.attributes))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .position(|node| node.attributes.get("id").map(String::as_str) == Some(id))
            .map(ElementId)
    }

    pub fn tag_name(&self, element: ElementId) -> Option<String> {
        self.with_node(element, |node| node.tag.clone())
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.with_node(element, |node| node.attributes.get(name).cloned())
            .flatten()
    }

    pub fn set_attribute(&self, element: ElementId, name: &str, value: &str) {
        self.with_node_mut(element, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.attribute(element, "class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add or remove `class` depending on `force`
    pub fn toggle_class(&self, element: ElementId, class: &str, force: bool) {
        self.with_node_mut(element, |node| {
            let current = node.attributes.get("class").cloned().unwrap_or_default();
            let mut classes: Vec<&str> = current
                .split_whitespace()
                .filter(|c| *c != class)
                .collect();
            if force {
                classes.push(class);
            }

            if classes.is_empty() {
                node.attributes.remove("class");
            } else {
                node.attributes.insert("class".to_string(), classes.join(" "));
            }
        });
    }

    pub fn text_content(&self, element: ElementId) -> Option<String> {
        self.with_node(element, |node| match &node.content {
            Content::Text(text) => text.clone(),
            Content::Markup(html) => strip_tags(html),
        })
    }

    pub fn set_text_content(&self, element: ElementId, text: &str) {
        self.with_node_mut(element, |node| {
            node.content = Content::Text(text.to_string());
        });
    }

    pub fn inner_html(&self, element: ElementId) -> Option<String> {
        self.with_node(element, |node| match &node.content {
            Content::Text(text) => escape_html(text),
            Content::Markup(html) => html.clone(),
        })
    }

    pub fn set_inner_html(&self, element: ElementId, html: &str) {
        self.with_node_mut(element, |node| {
            node.content = Content::Markup(html.to_string());
        });
    }

    pub fn add_click_listener(&self, element: ElementId, listener: Listener) {
        self.with_node_mut(element, |node| node.listeners.push(listener));
    }

    /// Dispatch a click to every listener of `element`
    ///
    /// Listeners run after the document borrow is released, so they may read
    /// and write the document freely.
    pub fn click(&self, element: ElementId) {
        let listeners = self
            .with_node(element, |node| node.listeners.clone())
            .unwrap_or_default();

        for listener in listeners {
            listener(element);
        }
    }

    /// Describe the current state of every element
    pub fn snapshot(&self) -> Vec<ElementSpec> {
        self.tree
            .borrow()
            .nodes
            .iter()
            .map(|node| {
                let (text, html) = match &node.content {
                    Content::Text(text) if text.is_empty() => (None, None),
                    Content::Text(text) => (Some(text.clone()), None),
                    Content::Markup(html) => (None, Some(html.clone())),
                };
                ElementSpec {
                    tag: node.tag.clone(),
                    attributes: node.attributes.clone(),
                    text,
                    html,
                }
            })
            .collect()
    }

    fn with_node<T>(&self, element: ElementId, f: impl FnOnce(&Node) -> T) -> Option<T> {
        self.tree.borrow().nodes.get(element.0).map(f)
    }

    fn with_node_mut<T>(&self, element: ElementId, f: impl FnOnce(&mut Node) -> T) -> Option<T> {
        self.tree.borrow_mut().nodes.get_mut(element.0).map(f)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.len())
            .finish()
    }
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
