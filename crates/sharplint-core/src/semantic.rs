//! Host-provided symbol queries
//!
//! Rules that need to see past a single syntax tree (subtype existence,
//! virtual-ness of an invoked method, attributes on a referenced type) go
//! through the [`SymbolIndex`] capability trait. The CLI supplies a
//! [`FileSymbolIndex`] built in one pass over the parsed files; an embedding
//! host with a richer compilation model can supply its own implementation.
//!
//! Queries are synchronous and infallible: an index that cannot answer
//! returns the conservative result (no subtypes, not virtual, no attribute)
//! so rules err toward silence rather than false positives.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::cst::ast::{AstNode, Root};
use crate::cst::{CsSyntaxKind, CsSyntaxNode, LineIndex, ParseError, parse_cs};
use crate::diagnostics::Location;
use crate::error::SharplintError;
use crate::result::Result;

/// Symbol queries a rule may ask of its host
pub trait SymbolIndex {
    /// Names of types that list `type_name` among their bases
    fn subtypes_of(&self, type_name: &str) -> Vec<String>;

    /// Whether `method` is declared (or inherited as) virtual on `type_name`
    fn is_virtual(&self, type_name: &str, method: &str) -> bool;

    /// Whether `type_name` carries `attribute` (with or without the
    /// conventional `Attribute` suffix)
    fn has_attribute(&self, type_name: &str, attribute: &str) -> bool;

    /// Parameter count of a fixture member on `type_name`, if it exists
    fn fixture_arity(&self, type_name: &str, member: &str) -> Option<usize>;
}

#[derive(Debug, Default, Clone)]
struct TypeEntry {
    base_types: Vec<String>,
    attributes: Vec<String>,
    virtual_methods: HashSet<String>,
    member_arity: HashMap<String, usize>,
}

/// Single-pass index over parsed files
#[derive(Debug, Default)]
pub struct FileSymbolIndex {
    types: HashMap<String, TypeEntry>,
}

impl FileSymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index every type declaration reachable from `root`
    pub fn add_file(&mut self, root: &Root) {
        for class in root.classes() {
            let Some(name) = class.name() else { continue };
            let entry = self.types.entry(name).or_default();
            entry.base_types.extend(class.base_types());
            entry
                .attributes
                .extend(class.attributes().filter_map(|a| a.name()));
            for method in class.methods() {
                let Some(method_name) = method.name() else { continue };
                let arity = method.param_count();
                if method.is_virtual() {
                    entry.virtual_methods.insert(method_name.clone());
                }
                entry.member_arity.insert(method_name, arity);
            }
        }
        for strukt in root.structs() {
            let Some(name) = strukt.name() else { continue };
            let entry = self.types.entry(name).or_default();
            entry
                .attributes
                .extend(strukt.attributes().filter_map(|a| a.name()));
        }
    }

    /// Fold another index into this one. Red trees are not `Send`, so
    /// parallel callers build per-file indexes and merge the plain data.
    pub fn merge(&mut self, other: FileSymbolIndex) {
        for (name, incoming) in other.types {
            let entry = self.types.entry(name).or_default();
            entry.base_types.extend(incoming.base_types);
            entry.attributes.extend(incoming.attributes);
            entry.virtual_methods.extend(incoming.virtual_methods);
            entry.member_arity.extend(incoming.member_arity);
        }
    }

    pub fn from_roots<'a>(roots: impl IntoIterator<Item = &'a Root>) -> Self {
        let mut index = Self::new();
        for root in roots {
            index.add_file(root);
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn attribute_matches(declared: &str, wanted: &str) -> bool {
    declared == wanted
        || declared.strip_suffix("Attribute") == Some(wanted)
        || wanted.strip_suffix("Attribute") == Some(declared)
}

impl SymbolIndex for FileSymbolIndex {
    fn subtypes_of(&self, type_name: &str) -> Vec<String> {
        let mut subtypes: Vec<String> = self
            .types
            .iter()
            .filter(|(_, entry)| entry.base_types.iter().any(|b| b == type_name))
            .map(|(name, _)| name.clone())
            .collect();
        subtypes.sort();
        subtypes
    }

    fn is_virtual(&self, type_name: &str, method: &str) -> bool {
        // Walk the base chain within the index; cycles are user error but
        // must not hang us.
        let mut seen = HashSet::new();
        let mut current = Some(type_name.to_string());
        while let Some(name) = current {
            if !seen.insert(name.clone()) {
                return false;
            }
            let Some(entry) = self.types.get(&name) else {
                return false;
            };
            if entry.virtual_methods.contains(method) {
                return true;
            }
            current = entry.base_types.first().cloned();
        }
        false
    }

    fn has_attribute(&self, type_name: &str, attribute: &str) -> bool {
        self.types.get(type_name).is_some_and(|entry| {
            entry
                .attributes
                .iter()
                .any(|declared| attribute_matches(declared, attribute))
        })
    }

    fn fixture_arity(&self, type_name: &str, member: &str) -> Option<usize> {
        self.types
            .get(type_name)?
            .member_arity
            .get(member)
            .copied()
    }
}

/// A parsed file plus the bookkeeping rules need to report on it
#[derive(Debug)]
pub struct FileModel {
    pub root: Root,
    pub source: String,
    pub file: PathBuf,
    lines: LineIndex,
}

impl FileModel {
    /// Parse `source` into a model; parse errors are returned alongside so
    /// rules can still run on a tolerant tree
    pub fn parse(
        file: impl Into<PathBuf>,
        source: impl Into<String>,
    ) -> Result<(Self, Vec<ParseError>)> {
        let source = source.into();
        let (cst, errors) = parse_cs(&source);
        let root = Root::cast(cst).ok_or_else(|| SharplintError::InternalError {
            message: "parser produced a non-root node".to_string(),
        })?;
        let lines = LineIndex::new(&source);
        Ok((
            Self {
                root,
                source,
                file: file.into(),
                lines,
            },
            errors,
        ))
    }

    /// Diagnostic location covering `node`, 1-based line/column
    pub fn node_location(&self, node: &CsSyntaxNode) -> Location {
        let range = node.text_range();
        let mut location = Location::new(
            self.file.clone(),
            self.lines.line_of(range.start()) as usize + 1,
            self.lines.col_of(range.start()) as usize + 1,
            range.start().into(),
            range.len().into(),
        );
        location.end_line = Some(self.lines.line_of(range.end()) as usize + 1);
        location.end_column = Some(self.lines.col_of(range.end()) as usize + 1);
        location
    }

    /// Zero-length location for a pure insertion at `offset`
    pub fn insertion_at(&self, offset: usize) -> Location {
        let offset_size = rowan::TextSize::from(offset as u32);
        Location::new(
            self.file.clone(),
            self.lines.line_of(offset_size) as usize + 1,
            self.lines.col_of(offset_size) as usize + 1,
            offset,
            0,
        )
    }

    /// Location replacing the byte range `start..end`
    pub fn replacement_of(&self, start: usize, end: usize) -> Location {
        let mut location = self.insertion_at(start);
        location.length = end - start;
        location
    }
}

/// Modifier kinds that exclude a class from subtype analysis
pub fn is_extensible_class_modifier(kind: CsSyntaxKind) -> bool {
    matches!(
        kind,
        CsSyntaxKind::AbstractKw | CsSyntaxKind::StaticKw | CsSyntaxKind::SealedKw
    )
}
