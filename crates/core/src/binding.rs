//! Variable data: replacing element payloads by logical name.
//!
//! Names are unique per label by convention, not by construction. A single
//! lookup is a linear scan in element order and the first match wins; labels
//! hold well under a hundred elements. [`apply_bindings`] builds a name index
//! once for many names.

use std::collections::HashMap;

use serde::Serialize;
use zmlabel_diagnostics::{Diagnostic, codes};

use crate::codec;
use crate::model::{ElementKind, LabelElement};

/// Outcome of one [`update_element_data`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindReport {
    /// Logical name that was looked up.
    pub name: String,
    /// `true` when a payload was replaced.
    pub updated: bool,
    /// Index of the element that was targeted (first match).
    pub index: Option<usize>,
    /// Indices of later elements sharing the name, left untouched.
    pub duplicates: Vec<usize>,
    /// Warnings about duplicates or payload-less targets.
    pub diagnostics: Vec<Diagnostic>,
}

/// First element named `name`.
pub fn find_element<'a>(elements: &'a [LabelElement], name: &str) -> Option<&'a LabelElement> {
    elements.iter().find(|e| e.name() == name)
}

/// Replace the payload of the element named `name` with `value`.
///
/// No match leaves `updated == false` and is not an error. Only the payload
/// changes; every other field of the element keeps its value.
pub fn update_element_data(elements: &mut [LabelElement], name: &str, value: &str) -> BindReport {
    let mut matches = elements
        .iter()
        .enumerate()
        .filter(|(_, e)| e.name() == name)
        .map(|(i, _)| i);
    let index = matches.next();
    let duplicates: Vec<usize> = matches.collect();
    bind_at(elements, name, value, index, duplicates)
}

/// Bind every `(name, value)` pair, building the name index once.
///
/// Reports come back in the order the pairs were given.
pub fn apply_bindings<'v, I>(elements: &mut [LabelElement], bindings: I) -> Vec<BindReport>
where
    I: IntoIterator<Item = (&'v str, &'v str)>,
{
    let mut index: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, e) in elements.iter().enumerate() {
        index.entry(e.name().to_string()).or_default().push(i);
    }
    bindings
        .into_iter()
        .map(|(name, value)| {
            let (first, rest) = match index.get(name).map(Vec::as_slice) {
                Some([first, rest @ ..]) => (Some(*first), rest.to_vec()),
                _ => (None, Vec::new()),
            };
            bind_at(elements, name, value, first, rest)
        })
        .collect()
}

fn bind_at(
    elements: &mut [LabelElement],
    name: &str,
    value: &str,
    index: Option<usize>,
    duplicates: Vec<usize>,
) -> BindReport {
    let mut report = BindReport {
        name: name.to_string(),
        updated: false,
        index,
        duplicates,
        diagnostics: Vec::new(),
    };
    let Some(target) = index.and_then(|i| elements.get_mut(i)) else {
        tracing::debug!(element = name, "no element to bind");
        return report;
    };

    if !report.duplicates.is_empty() {
        let others = report
            .duplicates
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        codec::push(
            &mut report.diagnostics,
            Diagnostic::warn(
                codes::BIND_DUPLICATE_NAME,
                format!(
                    "{} elements are named '{name}'; only the first was bound",
                    report.duplicates.len() + 1
                ),
                None,
            )
            .with_context(ctx!("name" => name, "duplicates" => others)),
        );
    }

    match target.set_payload(value) {
        Ok(()) => {
            tracing::debug!(element = name, kind = %target.kind(), "payload bound");
            report.updated = true;
        }
        Err(err) => {
            let kind = target.kind();
            let code = if kind == ElementKind::Shape {
                codes::BIND_NO_PAYLOAD
            } else {
                codes::BIND_INVALID_VALUE
            };
            codec::push(
                &mut report.diagnostics,
                Diagnostic::warn(code, format!("cannot bind '{name}': {err}"), None)
                    .with_context(ctx!("name" => name, "kind" => kind.as_str())),
            );
        }
    }
    report
}
