//! Ordered rewrite steps for a single document.
//!
//! The steps run in a fixed order and every step tolerates zero matches:
//!
//! 1. Remove the legacy standing-orders notice block.
//! 2. Replace the legacy absolute docs path with the plugin root.
//! 3. Expand standing-orders references to the project/plugin form.
//! 4. Replace the project-specific technical documentation pointer with a
//!    generic one.
//! 5. Insert the canonical Documentation Lookup section after the intro,
//!    unless the document already carries it.
//!
//! Steps 1-4 are idempotent replacements; step 5 is guarded by a presence
//! check, so the pipeline as a whole is idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::section::{DOC_LOOKUP_HEADING, render_doc_lookup_section};

/// Legacy absolute path prefix replaced by the plugin root.
const LEGACY_DOCS_PREFIX: &str = "/Users/ed/Code/brag-ai/.claude/docs";

/// Inline-code reference to the standing-orders document.
const STANDING_ORDERS_REF: &str = "`.claude/docs/standing-orders.md`";

/// Qualifier that follows a reference which is already expanded.
const PROJECT_QUALIFIER: &str = " (project)";

/// Generic replacement for the project-specific technical docs pointer.
const TECH_DOCS_POINTER: &str =
    "- **Technical Documentation**: Reference your project's technical documentation\n";

/// Closing frontmatter delimiter followed by the blank line that starts the intro.
const FRONTMATTER_CLOSE: &str = "---\n\n";

/// Heading marker that ends the intro.
const HEADING_MARKER: &str = "##";

/// Regex matching the legacy standing-orders notice: the heading, a bold
/// imperative sentence (which may wrap across lines), anything else on the
/// closing line, and the trailing blank line.
static STANDING_ORDERS_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)## Standing Orders\s+\*\*ALWAYS check.*?before beginning work\.\*\*[^\n]*\n\n")
        .unwrap()
});

/// Regex matching the list item pointing at the project-specific technical
/// documentation tree.
static TECH_DOCS_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)- \*\*Technical Documentation\*\*: Reference.*?`\.claude/docs/tech/`[^\n]*\n")
        .unwrap()
});

/// Result of rewriting one document.
#[derive(Debug)]
pub struct Rewritten {
    /// Transformed document text.
    pub text: String,
    /// Advisory notes about steps that were skipped because the document
    /// structure did not support them. Never fatal.
    pub warnings: Vec<String>,
}

/// Applies the ordered rewrite steps to one document.
///
/// The plugin root path is an explicit input so the same pipeline is
/// deterministic for any path value; it is substituted into the rewritten
/// path references and into the inserted canonical section.
pub struct Rewriter {
    plugin_path: String,
}

impl Rewriter {
    /// Create a rewriter for the given plugin root path.
    #[must_use]
    pub fn new(plugin_path: impl Into<String>) -> Self {
        Self {
            plugin_path: plugin_path.into(),
        }
    }

    /// Rewrite a document, returning the new text and any advisory warnings.
    ///
    /// Absent patterns are no-ops; the only condition worth surfacing is a
    /// document whose frontmatter/intro boundary cannot be located, which
    /// skips the canonical section insertion for that document.
    #[must_use]
    pub fn rewrite(&self, input: &str) -> Rewritten {
        let mut warnings = Vec::new();

        let text = remove_standing_orders_block(input);
        let text = self.genericize_legacy_paths(&text);
        let text = self.expand_standing_orders_refs(&text);
        let text = simplify_tech_docs_pointer(&text);
        let text = self.insert_doc_lookup_section(text, &mut warnings);

        Rewritten { text, warnings }
    }

    /// Step 2: replace every literal occurrence of the legacy absolute docs
    /// path with the plugin root. Unrelated paths are left untouched.
    fn genericize_legacy_paths(&self, text: &str) -> String {
        text.replace(LEGACY_DOCS_PREFIX, &format!("{}/docs", self.plugin_path))
    }

    /// Step 3: expand each standing-orders inline reference to name both the
    /// project-local and plugin-local candidates.
    ///
    /// A reference already followed by ` (project)` was produced by an
    /// earlier run (or by the inserted canonical section) and is skipped.
    fn expand_standing_orders_refs(&self, text: &str) -> String {
        let expansion = format!(
            "{STANDING_ORDERS_REF} (project) OR `{}/docs/standing-orders.md` (plugin)",
            self.plugin_path
        );

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find(STANDING_ORDERS_REF) {
            let after = &rest[pos + STANDING_ORDERS_REF.len()..];
            out.push_str(&rest[..pos]);
            if after.starts_with(PROJECT_QUALIFIER) {
                out.push_str(STANDING_ORDERS_REF);
            } else {
                out.push_str(&expansion);
            }
            rest = after;
        }
        out.push_str(rest);
        out
    }

    /// Step 5: insert the canonical section after the intro paragraph.
    ///
    /// The intro is the span between the closing frontmatter delimiter and
    /// the first `##` heading marker. When the document already contains the
    /// canonical heading, or the boundary cannot be located, the text is
    /// returned unchanged (the latter with a warning).
    fn insert_doc_lookup_section(&self, text: String, warnings: &mut Vec<String>) -> String {
        if text.contains(DOC_LOOKUP_HEADING) {
            return text;
        }

        let Some(insert_at) = intro_end(&text) else {
            warnings.push(
                "no frontmatter/intro boundary found, Documentation Lookup section not inserted"
                    .to_owned(),
            );
            return text;
        };

        let section = render_doc_lookup_section(&self.plugin_path);
        let mut out = String::with_capacity(text.len() + section.len() + 2);
        out.push_str(&text[..insert_at]);
        out.push('\n');
        out.push_str(&section);
        out.push('\n');
        out.push_str(&text[insert_at..]);
        out
    }
}

/// Step 1: delete the legacy standing-orders notice block, including its
/// trailing blank line.
fn remove_standing_orders_block(text: &str) -> String {
    STANDING_ORDERS_BLOCK_RE.replace_all(text, "").into_owned()
}

/// Step 4: replace the project-specific technical documentation pointer with
/// a generic one-line pointer.
fn simplify_tech_docs_pointer(text: &str) -> String {
    TECH_DOCS_ITEM_RE
        .replace_all(text, TECH_DOCS_POINTER)
        .into_owned()
}

/// Find the insertion point for the canonical section: the end of the intro
/// span between the closing frontmatter delimiter and the first `##` marker.
///
/// Returns `None` when the delimiter or the heading is missing, or when the
/// intro span is empty. Documents with multiple delimiter pairs use the
/// first `---` line followed by a blank line.
fn intro_end(text: &str) -> Option<usize> {
    let close = text.find(FRONTMATTER_CLOSE)?;
    let intro_start = close + FRONTMATTER_CLOSE.len();
    let heading = text[intro_start..].find(HEADING_MARKER)?;
    if heading == 0 {
        return None;
    }
    Some(intro_start + heading)
}
