//! Full HTML document around a rendered page.

use minijinja::{Environment, Value, context};

use hcms_core::error::{HcmsError, Result};

use super::node::ViewNode;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<link rel="stylesheet" href="/assets/css/style.css">
</head>
<body>
{{ body }}
</body>
</html>
"#;

/// Wraps `body` in the portal's HTML shell.
///
/// The body is already escaped by [`ViewNode::to_html`]; the title is
/// escaped by the template.
pub fn render_document(title: &str, body: &ViewNode) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("document.html", DOCUMENT_TEMPLATE)
        .map_err(|e| HcmsError::internal(format!("Invalid document template: {}", e)))?;
    let template = env
        .get_template("document.html")
        .map_err(|e| HcmsError::internal(e.to_string()))?;
    template
        .render(context! {
            title => title,
            body => Value::from_safe_string(body.to_html()),
        })
        .map_err(|e| HcmsError::internal(format!("Failed to render document: {}", e)))
}
