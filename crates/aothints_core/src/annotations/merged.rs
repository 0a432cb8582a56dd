//! Merged view over the annotations of an element.
//!
//! See [`MergedAnnotations`].

use std::iter;

use crate::annotations::mapping::AnnotationTypeMappings;
use crate::annotations::{Annotation, AttributeKind, AttributeValue};
use crate::errors::AttributeError;
use crate::model::{Element, TypeId, TypeModel};

/// Where to look for annotations besides the element itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Only annotations declared on the element (and their meta-annotations).
    #[default]
    Direct,
    /// Also the superclasses and interfaces of a type, or the methods a method overrides.
    ///
    /// Constructors and fields are never inherited, so they are searched as with [`SearchStrategy::Direct`].
    TypeHierarchy,
}

#[derive(Debug, Clone)]
struct RootAnnotation {
    source: Element,
    aggregate_index: usize,
    mappings: AnnotationTypeMappings,
}

/// Every annotation present on an element, directly or as a meta-annotation, with aliases applied.
///
/// ## Examples
///
/// ```rust
/// use aothints_core::lang::well_known::WellKnownId;
/// use aothints_core::{Annotation, MergedAnnotations, SearchStrategy, TypeModel};
///
/// let mut model = TypeModel::new();
/// let reflective = model.well_known(WellKnownId::Reflective);
/// let invoker = model.declare_annotation("demo.Invoker").unwrap();
/// model.annotate(invoker, Annotation::new(reflective)).unwrap();
/// let bean = model.declare_class("demo.Bean").unwrap();
/// model.annotate(bean, Annotation::new(invoker)).unwrap();
///
/// let merged = MergedAnnotations::from(&model, bean.into(), SearchStrategy::Direct);
/// let marker = merged.get(reflective).unwrap();
/// assert_eq!(marker.distance(), 1);
/// assert_eq!(marker.meta_source().unwrap().annotation_type(), invoker);
/// ```
#[derive(Debug, Clone)]
pub struct MergedAnnotations<'m> {
    model: &'m TypeModel,
    roots: Vec<RootAnnotation>,
}

impl<'m> MergedAnnotations<'m> {
    /// Collect the annotations visible on `element` under `strategy`.
    ///
    /// Malformed annotations are left out (see the crate docs on discovery totality).
    pub fn from(model: &'m TypeModel, element: Element, strategy: SearchStrategy) -> Self {
        let sources: Vec<Element> = match (strategy, element) {
            (SearchStrategy::TypeHierarchy, Element::Type(ty)) => {
                model.type_hierarchy(ty).into_iter().map(Element::Type).collect()
            }
            (SearchStrategy::TypeHierarchy, Element::Method(method)) => iter::once(element)
                .chain(model.overridden_methods(method).into_iter().map(Element::Method))
                .collect(),
            _ => vec![element],
        };

        let mut roots = Vec::new();
        for (aggregate_index, source) in sources.into_iter().enumerate() {
            for annotation in model.annotations_of(source) {
                if let Some(mappings) = AnnotationTypeMappings::for_root(model, annotation) {
                    roots.push(RootAnnotation {
                        source,
                        aggregate_index,
                        mappings,
                    });
                }
            }
        }
        Self { model, roots }
    }

    /// The nearest annotation of `annotation_type`.
    ///
    /// ## Notes
    /// - Nearest means: found on the element before its hierarchy, then fewer meta-annotation hops, then earlier
    ///   declaration.
    pub fn get(&self, annotation_type: TypeId) -> Option<MergedAnnotation<'_>> {
        let mut best: Option<MergedAnnotation<'_>> = None;
        for candidate in self.iter().filter(|a| a.annotation_type() == annotation_type) {
            let closer = best.is_none_or(|current| {
                (candidate.aggregate_index(), candidate.distance()) < (current.aggregate_index(), current.distance())
            });
            if closer {
                best = Some(candidate);
            }
        }
        best
    }

    pub fn is_present(&self, annotation_type: TypeId) -> bool {
        self.iter().any(|a| a.annotation_type() == annotation_type)
    }

    /// All annotations, root by root, each root followed by its meta-annotations breadth-first.
    pub fn iter(&self) -> impl Iterator<Item = MergedAnnotation<'_>> + '_ {
        self.roots.iter().flat_map(move |root| {
            (0..root.mappings.len()).map(move |index| MergedAnnotation {
                model: self.model,
                root,
                index,
            })
        })
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// One annotation from a [`MergedAnnotations`] view.
#[derive(Debug, Clone, Copy)]
pub struct MergedAnnotation<'a> {
    model: &'a TypeModel,
    root: &'a RootAnnotation,
    index: usize,
}

impl<'a> MergedAnnotation<'a> {
    pub fn annotation_type(&self) -> TypeId {
        self.root.mappings.get(self.index).annotation_type
    }

    /// Meta-annotation hops from the root; 0 when directly present.
    pub fn distance(&self) -> usize {
        self.root.mappings.get(self.index).distance
    }

    pub fn is_direct(&self) -> bool {
        self.distance() == 0
    }

    /// Element that declares the root annotation.
    pub fn source(&self) -> Element {
        self.root.source
    }

    /// Position of [`MergedAnnotation::source`] in the search order (0 for the element itself).
    pub fn aggregate_index(&self) -> usize {
        self.root.aggregate_index
    }

    /// The annotation this one is meta-present on, one hop closer to the root.
    ///
    /// `None` for a directly present annotation.
    pub fn meta_source(&self) -> Option<MergedAnnotation<'a>> {
        self.root
            .mappings
            .get(self.index)
            .source
            .map(|index| MergedAnnotation { index, ..*self })
    }

    /// The directly present annotation this one was reached from (itself when direct).
    pub fn root(&self) -> MergedAnnotation<'a> {
        MergedAnnotation { index: 0, ..*self }
    }

    /// The annotation as declared, before aliases are applied.
    pub fn declared(&self) -> &'a Annotation {
        &self.root.mappings.get(self.index).declared
    }

    /// Effective value of `name`, aliases and defaults applied.
    pub fn attribute(&self, name: &str) -> Option<AttributeValue> {
        self.root.mappings.resolve_value(self.model, self.index, name)
    }

    /// Effective value of a type-array attribute. A single type is widened to a one-element array.
    pub fn type_array(&self, name: &str) -> Result<Vec<TypeId>, AttributeError> {
        let annotation = || self.model.type_name(self.annotation_type()).to_string();
        let value = self.attribute(name).ok_or_else(|| AttributeError::Missing {
            annotation: annotation(),
            attribute: name.to_string(),
        })?;
        value.as_types().ok_or_else(|| AttributeError::KindMismatch {
            annotation: annotation(),
            attribute: name.to_string(),
            expected: AttributeKind::Types,
            found: value.kind(),
        })
    }

    /// Whether accessing this annotation at runtime needs a synthesized proxy.
    pub fn is_synthesizable(&self) -> bool {
        self.root.mappings.is_synthesizable(self.model, self.index)
    }
}
