//! Canonicalization and framing interfaces, plus the statement alignment
//! that tags each canonical line Revealed or Hidden for derivation.
//!
//! Production deployments plug an RDF normalization stack (URDNA2015-class)
//! through [`Canonicalizer`]/[`Framer`]. The built-in [`JsonStatements`] and
//! [`ShapeFramer`] provide the same contract — deterministic ordered
//! statement lines, template-based sub-document selection — over plain JSON
//! and back the test suite and demos.

use serde_json::Value;

use veil_core::ProofMessage;

use crate::error::ProofError;

/// Turns a document into its ordered, deterministic statement lines.
///
/// Contract: same input always yields the same output, and the lines of a
/// framed sub-document appear in the full document's lines as an ordered
/// (possibly gappy) subsequence.
pub trait Canonicalizer: Send + Sync {
    fn canonicalize(&self, document: &Value) -> Result<Vec<String>, ProofError>;
}

/// Selects the sub-document matching a shape template.
pub trait Framer: Send + Sync {
    fn frame(&self, document: &Value, template: &Value) -> Result<Value, ProofError>;
}

/// Deterministic JSON statement canonicalizer.
///
/// Emits one `<path> value` line per scalar leaf, object keys visited in
/// sorted order, array elements by index. Key insertion order of the input
/// never affects the output.
pub struct JsonStatements;

impl JsonStatements {
    fn flatten(path: &str, value: &Value, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                for key in keys {
                    Self::flatten(&format!("{}/{}", path, key), &map[key.as_str()], out);
                }
            }
            Value::Array(items) => {
                for (index, item) in items.iter().enumerate() {
                    Self::flatten(&format!("{}/{}", path, index), item, out);
                }
            }
            scalar => out.push(format!("<{}> {}", path, scalar)),
        }
    }
}

impl Canonicalizer for JsonStatements {
    fn canonicalize(&self, document: &Value) -> Result<Vec<String>, ProofError> {
        let mut out = Vec::new();
        Self::flatten("", document, &mut out);
        Ok(out)
    }
}

/// Template-intersection framer.
///
/// Keeps the document keys named by the template, recursing into nested
/// objects; an empty template object selects the whole subtree.
pub struct ShapeFramer;

impl ShapeFramer {
    fn project(document: &Value, template: &Value) -> Value {
        match (document, template) {
            (Value::Object(doc), Value::Object(tpl)) => {
                if tpl.is_empty() {
                    return document.clone();
                }
                let mut out = serde_json::Map::new();
                for (key, sub) in tpl {
                    if let Some(value) = doc.get(key) {
                        out.insert(key.clone(), Self::project(value, sub));
                    }
                }
                Value::Object(out)
            }
            _ => document.clone(),
        }
    }
}

impl Framer for ShapeFramer {
    fn frame(&self, document: &Value, template: &Value) -> Result<Value, ProofError> {
        Ok(Self::project(document, template))
    }
}

/// Tag the full document's canonical lines against the framed lines.
///
/// Greedy cursor walk: while `full[i] == framed[j]`, the line is Revealed
/// and the cursor advances; otherwise it is Hidden. Exact because both line
/// lists come from the same deterministic canonicalization. If the framed
/// lines are not exhausted at the end, the frame produced statements the
/// document does not contain in order — a canonicalizer contract violation
/// surfaced as [`ProofError::FramingMismatch`] rather than a silent mis-tag.
pub fn align_statements(
    full: &[String],
    framed: &[String],
) -> Result<Vec<ProofMessage>, ProofError> {
    let mut cursor = 0usize;
    let mut tagged = Vec::with_capacity(full.len());
    for line in full {
        if cursor < framed.len() && *line == framed[cursor] {
            tagged.push(ProofMessage::revealed(line.as_bytes().to_vec()));
            cursor += 1;
        } else {
            tagged.push(ProofMessage::hidden(line.as_bytes().to_vec()));
        }
    }
    if cursor != framed.len() {
        return Err(ProofError::FramingMismatch {
            matched: cursor,
            framed: framed.len(),
        });
    }
    Ok(tagged)
}
