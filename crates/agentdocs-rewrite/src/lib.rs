//! Rewrite pipeline for agent definition files.
//!
//! Agent definition files are markdown documents with a `---`-delimited
//! frontmatter block, an intro paragraph, and `##`-delimited sections.
//! This crate normalizes the documentation-lookup instructions embedded in
//! those files: single-layer, project-specific references are migrated to
//! the layered project-override / plugin-default scheme.
//!
//! The pipeline is pure text-to-text. It performs no I/O; callers read the
//! document, pass its text through [`Rewriter::rewrite`], and write the
//! result back. Applying the pipeline twice yields the same output as
//! applying it once.
//!
//! # Example
//!
//! ```
//! use agentdocs_rewrite::Rewriter;
//!
//! let rewriter = Rewriter::new("/opt/plugin");
//! let doc = "---\nname: sample\n---\n\nAn intro.\n\n## Body\n";
//! let rewritten = rewriter.rewrite(doc);
//!
//! assert!(rewritten.text.contains("## Documentation Lookup"));
//! assert!(rewritten.warnings.is_empty());
//! ```

mod rewriter;
mod section;

pub use rewriter::{Rewriter, Rewritten};
pub use section::{DOC_LOOKUP_HEADING, render_doc_lookup_section};
