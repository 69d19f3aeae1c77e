//! Backend-agnostic view tree.

use std::fmt::Write as _;

use hcms_core::doctor::Doctor;
use hcms_core::role::Role;
use hcms_core::route::Location;

/// Class carried by every placeholder node (empty and error states).
pub const PLACEHOLDER_CLASS: &str = "placeholder";

const VOID_TAGS: [&str; 4] = ["input", "img", "br", "hr"];

/// Dialogs a page can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    AddDoctor,
    AdminLogin,
    DoctorLogin,
    PatientLogin,
    PatientSignup,
}

impl ModalKind {
    fn as_str(self) -> &'static str {
        match self {
            ModalKind::AddDoctor => "addDoctor",
            ModalKind::AdminLogin => "adminLogin",
            ModalKind::DoctorLogin => "doctorLogin",
            ModalKind::PatientLogin => "patientLogin",
            ModalKind::PatientSignup => "patientSignup",
        }
    }
}

/// A user interaction attached to a node, dispatched back to the owning
/// page controller by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Location),
    DeleteDoctor { id: String, name: String },
    OpenBooking { doctor: Doctor },
    LoginRequired,
    OpenModal(ModalKind),
    CloseModal,
    /// Resets a date picker to today.
    ShowToday,
    Logout,
    LogoutPatient,
    SelectRole(Role),
}

impl Action {
    /// Compact form used for the `data-action` attribute.
    pub fn descriptor(&self) -> String {
        match self {
            Action::Navigate(location) => format!("navigate:{}", location.href()),
            Action::DeleteDoctor { id, .. } => format!("deleteDoctor:{}", id),
            Action::OpenBooking { doctor } => format!("openBooking:{}", doctor.id),
            Action::LoginRequired => "loginRequired".to_string(),
            Action::OpenModal(kind) => format!("openModal:{}", kind.as_str()),
            Action::CloseModal => "closeModal".to_string(),
            Action::ShowToday => "today".to_string(),
            Action::Logout => "logout".to_string(),
            Action::LogoutPatient => "logoutPatient".to_string(),
            Action::SelectRole(role) => format!("selectRole:{}", role),
        }
    }
}

/// One element of the view tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ViewNode>,
    pub actions: Vec<Action>,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Default::default()
        }
    }

    /// Shorthand for an element holding only text.
    pub fn text_node(tag: &'static str, text: impl Into<String>) -> Self {
        Self::new(tag).text(text)
    }

    /// Adds one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.push((key.to_string(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn maybe_child(mut self, child: Option<ViewNode>) -> Self {
        self.children.extend(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr_value(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_placeholder(&self) -> bool {
        self.has_class(PLACEHOLDER_CLASS)
    }

    /// Pre-order traversal.
    pub fn walk(&self) -> Vec<&ViewNode> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.walk());
        }
        out
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&ViewNode> {
        self.walk()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    /// Every action in the tree, with the text of the node carrying it.
    pub fn collect_actions(&self) -> Vec<(String, &Action)> {
        self.walk()
            .into_iter()
            .flat_map(|node| {
                let label = node.text.clone().unwrap_or_default();
                node.actions.iter().map(move |a| (label.clone(), a))
            })
            .collect()
    }

    /// All text in the subtree, joined by single spaces.
    pub fn all_text(&self) -> String {
        self.walk()
            .into_iter()
            .filter_map(|n| n.text.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialises the tree to HTML with text and attribute values escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&self.classes.join(" ")));
        }
        for (key, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", key, escape(value));
        }
        if let Some(action) = self.actions.first() {
            let _ = write!(out, " data-action=\"{}\"", escape(&action.descriptor()));
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag) {
            return;
        }
        if let Some(text) = &self.text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    /// Renders the tree as indented plain text. Nodes carrying an action are
    /// prefixed with their index in [`collect_actions`](Self::collect_actions).
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let mut counter = 0;
        self.write_text(&mut out, 0, &mut counter);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize, counter: &mut usize) {
        let line = self.text_line();
        let mut next_depth = depth;
        if !line.is_empty() || !self.actions.is_empty() {
            let indent = "  ".repeat(depth);
            let mut prefix = String::new();
            for _ in &self.actions {
                *counter += 1;
                let _ = write!(prefix, "[{}] ", counter);
            }
            let _ = writeln!(out, "{}{}{}", indent, prefix, line);
            next_depth += 1;
        }
        for child in &self.children {
            child.write_text(out, next_depth, counter);
        }
    }

    fn text_line(&self) -> String {
        match (self.tag, self.text.as_deref()) {
            ("input" | "textarea" | "select", _) => {
                let name = self.attr_value("name").unwrap_or("field");
                let value = self.attr_value("value").unwrap_or("");
                match self.text.as_deref() {
                    Some(label) => format!("{}: {} = {}", label, name, value),
                    None => format!("{} = {}", name, value),
                }
            }
            ("option", Some(text)) => format!("- {}", text),
            (_, Some(text)) => text.to_string(),
            _ => String::new(),
        }
    }
}

/// Escapes the five HTML-significant characters.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A replaceable region of a page.
///
/// `replace` clears the slot before rebuilding it, so rendering the same
/// collection twice yields the same children.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSlot {
    id: &'static str,
    children: Vec<ViewNode>,
}

impl ContentSlot {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    pub fn replace(&mut self, children: Vec<ViewNode>) {
        self.children.clear();
        self.children.extend(children);
    }

    /// Shows `items`, or exactly one empty-state placeholder when there are
    /// none.
    pub fn show_items(&mut self, items: Vec<ViewNode>, empty_message: &str) {
        if items.is_empty() {
            self.replace(vec![super::empty_state(empty_message)]);
        } else {
            self.replace(items);
        }
    }

    pub fn show_error(&mut self, message: &str) {
        self.replace(vec![super::error_state(message)]);
    }

    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// Number of children that are not placeholders.
    pub fn item_count(&self) -> usize {
        self.children.iter().filter(|c| !c.is_placeholder()).count()
    }

    pub fn placeholder(&self) -> Option<&ViewNode> {
        self.children.iter().find(|c| c.is_placeholder())
    }

    pub fn node(&self) -> ViewNode {
        ViewNode::new("div")
            .attr("id", self.id)
            .children(self.children.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hcms_core::route::Page;

    #[test]
    fn test_html_escapes_text_and_attributes() {
        let node = ViewNode::new("p")
            .class("note")
            .attr("title", "a \"quoted\" <value>")
            .text("Tom & Jerry <script>");
        assert_eq!(
            node.to_html(),
            "<p class=\"note\" title=\"a &quot;quoted&quot; &lt;value&gt;\">Tom &amp; Jerry &lt;script&gt;</p>"
        );
    }

    #[test]
    fn test_void_elements_are_not_closed() {
        let node = ViewNode::new("input").attr("name", "date");
        assert_eq!(node.to_html(), "<input name=\"date\">");
    }

    #[test]
    fn test_actions_are_numbered_in_text_output() {
        let node = ViewNode::new("div")
            .child(ViewNode::text_node("h3", "Dr. Grey"))
            .child(ViewNode::text_node("button", "Delete").action(Action::DeleteDoctor {
                id: "d1".into(),
                name: "Dr. Grey".into(),
            }))
            .child(
                ViewNode::text_node("button", "Home")
                    .action(Action::Navigate(Location::new(Page::DoctorDashboard))),
            );

        assert_eq!(node.to_text(), "Dr. Grey\n[1] Delete\n[2] Home\n");
        let actions = node.collect_actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].0, "Delete");
    }

    #[test]
    fn test_slot_replace_is_idempotent() {
        let mut slot = ContentSlot::new("content");
        let items = vec![ViewNode::text_node("p", "a"), ViewNode::text_node("p", "b")];
        slot.replace(items.clone());
        let first = slot.clone();
        slot.replace(items);
        assert_eq!(slot, first);
        assert_eq!(slot.item_count(), 2);
    }

    #[test]
    fn test_empty_collection_renders_single_placeholder() {
        let mut slot = ContentSlot::new("content");
        slot.replace(vec![ViewNode::text_node("p", "stale")]);
        slot.show_items(Vec::new(), "Nothing here.");

        assert_eq!(slot.children().len(), 1);
        assert_eq!(slot.item_count(), 0);
        assert_eq!(slot.placeholder().unwrap().all_text(), "Nothing here.");
    }

    #[test]
    fn test_navigate_descriptor_carries_href() {
        let action = Action::Navigate(
            Location::new(Page::PatientRecord)
                .with("patientId", "3")
                .with("doctorId", "9"),
        );
        assert_eq!(
            action.descriptor(),
            "navigate:/patientRecord.html?patientId=3&doctorId=9"
        );
    }
}
