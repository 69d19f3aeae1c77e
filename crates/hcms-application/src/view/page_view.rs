//! The composed view of one page.

use super::node::ViewNode;

/// Everything a page shows at one moment.
///
/// `content` holds the page's replaceable region; `modal` is the open
/// dialog, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: String,
    pub header: ViewNode,
    pub toolbar: Option<ViewNode>,
    pub content: ViewNode,
    pub modal: Option<ViewNode>,
}

impl PageView {
    pub fn new(title: impl Into<String>, header: ViewNode, content: ViewNode) -> Self {
        Self {
            title: title.into(),
            header,
            toolbar: None,
            content,
            modal: None,
        }
    }

    pub fn with_toolbar(mut self, toolbar: ViewNode) -> Self {
        self.toolbar = Some(toolbar);
        self
    }

    pub fn with_modal(mut self, modal: Option<ViewNode>) -> Self {
        self.modal = modal;
        self
    }

    /// The page as a single tree: header, toolbar, content, then the modal.
    pub fn root(&self) -> ViewNode {
        let main = ViewNode::new("main")
            .class("main-content")
            .maybe_child(self.toolbar.clone())
            .child(self.content.clone());
        ViewNode::new("div")
            .class("wrapper")
            .child(self.header.clone())
            .child(main)
            .maybe_child(self.modal.clone())
    }
}
