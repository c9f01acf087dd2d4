//! Framework Catalog
//!
//! CSS/JS frameworks a preview can pull from a CDN. The table is static and
//! read-only; "None" stands for no framework at all.

use serde::Serialize;

/// A framework and the assets a preview injects for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Framework {
    pub name: &'static str,
    pub css: Option<&'static str>,
    pub js: Option<&'static str>,
}

const FRAMEWORKS: &[Framework] = &[
    Framework {
        name: "Bootstrap",
        css: Some("https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/css/bootstrap.min.css"),
        js: Some("https://cdn.jsdelivr.net/npm/bootstrap@5.3.2/dist/js/bootstrap.bundle.min.js"),
    },
    Framework {
        name: "Tailwind CSS",
        css: Some("https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css"),
        js: None,
    },
    Framework {
        name: "Bulma",
        css: Some("https://cdn.jsdelivr.net/npm/bulma@0.9.4/css/bulma.min.css"),
        js: None,
    },
    Framework {
        name: "Foundation",
        css: Some("https://cdn.jsdelivr.net/npm/foundation-sites@6.8.1/dist/css/foundation.min.css"),
        js: Some("https://cdn.jsdelivr.net/npm/foundation-sites@6.8.1/dist/js/foundation.min.js"),
    },
    Framework {
        name: "Material Design Lite",
        css: Some("https://code.getmdl.io/1.3.0/material.indigo-pink.min.css"),
        js: Some("https://code.getmdl.io/1.3.0/material.min.js"),
    },
    Framework {
        name: "Semantic UI",
        css: Some("https://cdn.jsdelivr.net/npm/semantic-ui@2.5.0/dist/semantic.min.css"),
        js: Some("https://cdn.jsdelivr.net/npm/semantic-ui@2.5.0/dist/semantic.min.js"),
    },
    Framework {
        name: "Pure CSS",
        css: Some("https://cdn.jsdelivr.net/npm/purecss@3.0.0/build/pure-min.css"),
        js: None,
    },
    Framework {
        name: "None",
        css: None,
        js: None,
    },
];

/// All frameworks in display order
pub fn catalog() -> &'static [Framework] {
    FRAMEWORKS
}

/// Look up a framework by display name, ignoring case
pub fn find(name: &str) -> Option<&'static Framework> {
    FRAMEWORKS.iter().find(|f| f.name.eq_ignore_ascii_case(name))
}

impl Framework {
    /// True for the entry that stands for "no framework"
    pub fn is_none(&self) -> bool {
        self.css.is_none() && self.js.is_none()
    }

    /// Tags a preview document puts in its `<head>` to load this framework
    pub fn preview_tags(&self) -> Vec<String> {
        let mut tags = Vec::new();
        if let Some(css) = self.css {
            tags.push(format!("<link rel=\"stylesheet\" href=\"{}\">", css));
        }
        if let Some(js) = self.js {
            tags.push(format!("<script src=\"{}\"></script>", js));
        }
        tags
    }
}
