//! Declarative element locators
//!
//! A [`Locator`] describes a target UI element by accessible role + name, by
//! visible text, or by attribute substring, without assuming any automation
//! library's API shape. Locators are resolved against the live DOM at the
//! moment of use and never cached across steps, since the DOM is mutable
//! between steps.

use std::fmt;

/// The query strategy of a locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorKind {
    /// Element with a given accessible role and accessible name
    Role {
        /// ARIA role ("tab", "button", "grid", "img", ...)
        role: String,
        /// Accessible name (aria-label, alt, or text content)
        name: String,
    },
    /// Element containing the given visible text
    Text {
        /// The text to look for
        text: String,
    },
    /// Element matched by a base selector plus an attribute substring
    AttrContains {
        /// Base CSS selector ("button", "div", ...)
        selector: String,
        /// Attribute to inspect ("aria-label", ...)
        attr: String,
        /// Substring the attribute value must contain
        value: String,
    },
}

/// A declarative query identifying a UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    kind: LocatorKind,
    exact: bool,
}

impl Locator {
    /// Locate an element by accessible role and name
    pub fn role<R: Into<String>, N: Into<String>>(role: R, name: N) -> Self {
        Self {
            kind: LocatorKind::Role {
                role: role.into(),
                name: name.into(),
            },
            exact: false,
        }
    }

    /// Locate an element by visible text content
    pub fn text<T: Into<String>>(text: T) -> Self {
        Self {
            kind: LocatorKind::Text { text: text.into() },
            exact: false,
        }
    }

    /// Locate an element by a base selector and attribute substring,
    /// e.g. `button[aria-label*="Row 5, Column 5"]`
    pub fn attr_contains<S, A, V>(selector: S, attr: A, value: V) -> Self
    where
        S: Into<String>,
        A: Into<String>,
        V: Into<String>,
    {
        Self {
            kind: LocatorKind::AttrContains {
                selector: selector.into(),
                attr: attr.into(),
                value: value.into(),
            },
            exact: false,
        }
    }

    /// Require exact name/text matching instead of substring matching
    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Whether this locator matches exactly
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    /// The query strategy
    pub fn kind(&self) -> &LocatorKind {
        &self.kind
    }

    /// Compile the locator to a JavaScript expression that evaluates to the
    /// first matching element, or `null`.
    ///
    /// Matching notes: role queries accept both an explicit `role` attribute
    /// and a handful of implicit roles; accessible names are read from
    /// `aria-label`, `alt`, then trimmed text content; text queries resolve
    /// to the deepest matching element so a match on `<body>` never shadows
    /// the actual widget.
    pub fn find_expr(&self) -> String {
        match &self.kind {
            LocatorKind::Role { role, name } => format!(
                r#"(() => {{
                    const role = {role};
                    const name = {name};
                    const exact = {exact};
                    const implicit = {{
                        button: 'button',
                        img: 'img',
                        link: 'a[href]',
                        heading: 'h1,h2,h3,h4,h5,h6'
                    }};
                    let sel = '[role="' + role + '"]';
                    if (implicit[role]) sel += ',' + implicit[role];
                    const accName = (el) =>
                        (el.getAttribute('aria-label') || el.getAttribute('alt') || el.textContent || '').trim();
                    const hit = (el) => exact ? accName(el) === name : accName(el).includes(name);
                    return Array.from(document.querySelectorAll(sel)).find(hit) || null;
                }})()"#,
                role = js_string(role),
                name = js_string(name),
                exact = self.exact,
            ),
            LocatorKind::Text { text } => format!(
                r#"(() => {{
                    const text = {text};
                    const exact = {exact};
                    const hit = (el) => {{
                        const t = (el.textContent || '').trim();
                        return exact ? t === text : t.includes(text);
                    }};
                    const hits = Array.from(document.querySelectorAll('body *')).filter(hit);
                    return hits.find(el => !hits.some(o => o !== el && el.contains(o))) || null;
                }})()"#,
                text = js_string(text),
                exact = self.exact,
            ),
            LocatorKind::AttrContains {
                selector,
                attr,
                value,
            } => format!(
                r#"(() => {{
                    const sel = {selector} + '[' + {attr} + '*=' + JSON.stringify({value}) + ']';
                    return document.querySelector(sel) || null;
                }})()"#,
                selector = js_string(selector),
                attr = js_string(attr),
                value = js_string(value),
            ),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = if self.exact { "=" } else { "~" };
        match &self.kind {
            LocatorKind::Role { role, name } => {
                write!(f, "role={} name{}{:?}", role, op, name)
            }
            LocatorKind::Text { text } => write!(f, "text{}{:?}", op, text),
            LocatorKind::AttrContains {
                selector,
                attr,
                value,
            } => write!(f, "{}[{}*={:?}]", selector, attr, value),
        }
    }
}

/// Quote a Rust string as a JavaScript double-quoted string literal.
pub(crate) fn js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
