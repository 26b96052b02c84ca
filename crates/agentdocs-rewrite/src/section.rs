//! Canonical Documentation Lookup section template.

/// Heading that marks a document as already carrying the layered lookup
/// instructions. Insertion is skipped when this heading is present.
pub const DOC_LOOKUP_HEADING: &str = "## Documentation Lookup";

/// Substitution token for the plugin root path.
const PLUGIN_PATH_TOKEN: &str = "{plugin_path}";

/// Section template inserted after the intro paragraph.
///
/// The leading and trailing newlines are part of the template; insertion
/// frames the block with one extra blank line on each side.
const DOC_LOOKUP_TEMPLATE: &str = "
## Documentation Lookup

**IMPORTANT: This plugin uses layered documentation.**

Before beginning work, check these documents in order:
1. **Standing Orders**: Check `.claude/docs/standing-orders.md` (project) OR `{plugin_path}/docs/standing-orders.md` (plugin)
2. **Process Rules**: Check `.claude/docs/processes/[relevant-process].md` (project) OR `{plugin_path}/docs/processes/[relevant-process].md` (plugin)

If both project and plugin versions exist, use the project version as it contains project-specific extensions or overrides.
";

/// Render the canonical section with the plugin root path substituted into
/// both path placeholders.
#[must_use]
pub fn render_doc_lookup_section(plugin_path: &str) -> String {
    DOC_LOOKUP_TEMPLATE.replace(PLUGIN_PATH_TOKEN, plugin_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_placeholders() {
        let section = render_doc_lookup_section("/opt/plugin");
        assert_eq!(section.matches("/opt/plugin/docs/").count(), 2);
        assert!(!section.contains(PLUGIN_PATH_TOKEN));
    }

    #[test]
    fn test_render_contains_heading() {
        let section = render_doc_lookup_section("~/.claude/plugins/repos/software-dev-workflow");
        assert!(section.starts_with(&format!("\n{DOC_LOOKUP_HEADING}\n")));
        assert!(section.ends_with("extensions or overrides.\n"));
    }
}
