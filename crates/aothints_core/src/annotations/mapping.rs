//! Meta-annotation mappings for a single root annotation.
//!
//! Starting from an annotation found on an element, the annotations declared on its annotation type are mapped
//! breadth-first. Each mapping remembers how far it is from the root and which mapping it was reached from, which
//! is all attribute-alias resolution needs.

use std::collections::{HashSet, VecDeque};

use crate::annotations::{Annotation, AttributeValue};
use crate::errors::AnnotationDefect;
use crate::model::{Element, TypeDecl, TypeId, TypeKind, TypeModel};

/// One annotation reachable from a root annotation.
#[derive(Debug, Clone)]
pub(crate) struct AnnotationTypeMapping {
    pub(crate) annotation_type: TypeId,
    /// Index of the mapping that declared this one; `None` for the root.
    pub(crate) source: Option<usize>,
    pub(crate) distance: usize,
    pub(crate) declared: Annotation,
}

/// All mappings reachable from one root annotation; index 0 is the root.
#[derive(Debug, Clone)]
pub(crate) struct AnnotationTypeMappings {
    mappings: Vec<AnnotationTypeMapping>,
}

impl AnnotationTypeMappings {
    /// Map `root` and everything meta-present on it.
    ///
    /// ## Returns
    /// - `None` if `root` itself is malformed; malformed meta-annotations are skipped individually.
    pub(crate) fn for_root(model: &TypeModel, root: &Annotation) -> Option<Self> {
        if let Err(defect) = validate(model, root) {
            tracing::debug!(%defect, "ignoring malformed annotation");
            return None;
        }

        let mut mappings = vec![AnnotationTypeMapping {
            annotation_type: root.annotation_type(),
            source: None,
            distance: 0,
            declared: root.clone(),
        }];
        let mut mapped = HashSet::from([root.annotation_type()]);
        let mut queue = VecDeque::from([0usize]);

        while let Some(index) = queue.pop_front() {
            let owner = mappings[index].annotation_type;
            let distance = mappings[index].distance + 1;
            for meta in &model.type_decl(owner).annotations {
                // Each annotation type is mapped once per root: nearest wins and cycles end here.
                if mapped.contains(&meta.annotation_type()) {
                    continue;
                }
                if let Err(defect) = validate(model, meta) {
                    tracing::debug!(
                        %defect,
                        on = model.type_name(owner),
                        "ignoring malformed meta-annotation"
                    );
                    continue;
                }
                mapped.insert(meta.annotation_type());
                queue.push_back(mappings.len());
                mappings.push(AnnotationTypeMapping {
                    annotation_type: meta.annotation_type(),
                    source: Some(index),
                    distance,
                    declared: meta.clone(),
                });
            }
        }

        Some(Self { mappings })
    }

    pub(crate) fn len(&self) -> usize {
        self.mappings.len()
    }

    pub(crate) fn get(&self, index: usize) -> &AnnotationTypeMapping {
        &self.mappings[index]
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &AnnotationTypeMapping)> {
        self.mappings.iter().enumerate()
    }

    /// Mapping indices from the root down to `index`, inclusive.
    pub(crate) fn path(&self, index: usize) -> Vec<usize> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(source) = self.mappings[current].source {
            path.push(source);
            current = source;
        }
        path.reverse();
        path
    }

    /// Effective value of `attribute` on the mapping at `index`.
    ///
    /// ## Notes
    /// - An alias declared closer to the root wins, root-most first, and brings its own default along.
    /// - Otherwise the explicit value, then an explicit value of a mirrored attribute, then the declared default.
    pub(crate) fn resolve_value(&self, model: &TypeModel, index: usize, attribute: &str) -> Option<AttributeValue> {
        let mapping = &self.mappings[index];
        let decl = model.type_decl(mapping.annotation_type);
        let mirrors = mirror_set(decl, mapping.annotation_type, attribute);

        if let Some((ancestor, alias)) = self.root_most_alias(model, index, &mirrors) {
            return self.resolve_value(model, ancestor, &alias);
        }

        mirrors
            .iter()
            .find_map(|name| mapping.declared.value(name))
            .or_else(|| {
                mirrors
                    .iter()
                    .find_map(|name| decl.attribute(name).and_then(|a| a.default.as_ref()))
            })
            .cloned()
    }

    /// First attribute on the path from the root that aliases one of `targets` on the mapping at `index`.
    fn root_most_alias(&self, model: &TypeModel, index: usize, targets: &[&str]) -> Option<(usize, String)> {
        let target_type = self.mappings[index].annotation_type;
        let path = self.path(index);
        let ancestors = &path[..path.len() - 1];
        ancestors.iter().find_map(|&ancestor| {
            let owner = self.mappings[ancestor].annotation_type;
            model
                .type_decl(owner)
                .attributes
                .iter()
                .find(|attr| {
                    attr.alias_for.as_ref().is_some_and(|alias| {
                        !alias.is_mirror(owner)
                            && alias.target(owner) == target_type
                            && targets.contains(&alias.attribute.as_str())
                    })
                })
                .map(|attr| (ancestor, attr.name.clone()))
        })
    }

    /// Whether the annotation at `index` would need a synthesized view to expose its effective values.
    pub(crate) fn is_synthesizable(&self, model: &TypeModel, index: usize) -> bool {
        let target_type = self.mappings[index].annotation_type;
        let has_mirrors = model
            .type_decl(target_type)
            .attributes
            .iter()
            .any(|attr| attr.alias_for.as_ref().is_some_and(|alias| alias.is_mirror(target_type)));
        if has_mirrors {
            return true;
        }

        let path = self.path(index);
        path[..path.len() - 1].iter().any(|&ancestor| {
            let owner = self.mappings[ancestor].annotation_type;
            model.type_decl(owner).attributes.iter().any(|attr| {
                attr.alias_for
                    .as_ref()
                    .is_some_and(|alias| !alias.is_mirror(owner) && alias.target(owner) == target_type)
            })
        })
    }
}

/// `attribute` followed by every attribute linked to it through same-type aliases.
fn mirror_set<'a>(decl: &'a TypeDecl, owner: TypeId, attribute: &'a str) -> Vec<&'a str> {
    let mut set = vec![attribute];
    let mut next = 0;
    while next < set.len() {
        let current = set[next];
        for attr in &decl.attributes {
            let Some(alias) = attr.alias_for.as_ref().filter(|alias| alias.is_mirror(owner)) else {
                continue;
            };
            let linked = if attr.name == current {
                alias.attribute.as_str()
            } else if alias.attribute == current {
                attr.name.as_str()
            } else {
                continue;
            };
            if !set.contains(&linked) {
                set.push(linked);
            }
        }
        next += 1;
    }
    set
}

/// Check that `annotation` is well-formed against its annotation type.
pub(crate) fn validate(model: &TypeModel, annotation: &Annotation) -> Result<(), AnnotationDefect> {
    let ty = annotation.annotation_type();
    if !model.contains(Element::Type(ty)) {
        return Err(AnnotationDefect::ForeignType(ty));
    }
    let decl = model.type_decl(ty);
    if decl.kind != TypeKind::Annotation {
        return Err(AnnotationDefect::NotAnAnnotationType {
            name: decl.name.clone(),
            kind: decl.kind,
        });
    }

    for (name, value) in annotation.values() {
        let Some(attr) = decl.attribute(name) else {
            return Err(AnnotationDefect::UnknownAttribute {
                annotation: decl.name.clone(),
                attribute: name.to_string(),
            });
        };
        if !value.conforms_to(attr.kind) {
            return Err(AnnotationDefect::ValueKindMismatch {
                annotation: decl.name.clone(),
                attribute: name.to_string(),
                expected: attr.kind,
                found: value.kind(),
            });
        }
        let referenced = value.as_types().unwrap_or_default();
        if let Some(&foreign) = referenced.iter().find(|&&t| !model.contains(Element::Type(t))) {
            return Err(AnnotationDefect::ForeignType(foreign));
        }
    }

    for attr in &decl.attributes {
        let Some(alias) = &attr.alias_for else {
            continue;
        };
        let target = alias.target(ty);
        let target_attr = model
            .contains(Element::Type(target))
            .then(|| model.type_decl(target))
            .filter(|target_decl| target_decl.kind == TypeKind::Annotation)
            .and_then(|target_decl| target_decl.attribute(&alias.attribute));
        // The target must exist, agree on kind, and not be the attribute itself.
        let valid = target_attr
            .is_some_and(|target_attr| target_attr.kind == attr.kind && !(target == ty && target_attr.name == attr.name));
        if !valid {
            let target_name = if model.contains(Element::Type(target)) {
                model.type_name(target).to_string()
            } else {
                format!("{target:?}")
            };
            return Err(AnnotationDefect::BrokenAlias {
                annotation: decl.name.clone(),
                attribute: attr.name.clone(),
                target: target_name,
                target_attribute: alias.attribute.clone(),
            });
        }
    }

    Ok(())
}
