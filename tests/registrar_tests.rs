//! End-to-end tests for reflective hint registration.

use std::cell::Cell;
use std::rc::Rc;

use aothints::processor::{ModelReflectionHints, ProcessorCatalog, ProcessorError, ReflectiveProcessor};
use aothints::registrar::{ReflectiveRuntimeHintsRegistrar, RegistrarError};
use aothints_core::lang::well_known::{VALUE_ATTRIBUTE, WellKnownId};
use aothints_core::{
    AliasFor, Annotation, AttributeDecl, AttributeKind, AttributeValue, Element, MethodSpec, TypeId, TypeModel,
};
use aothints_hints::{
    HintRegistry, MemberCategory, ProxyHints, ReflectionHints, RuntimeHints, RuntimeHintsPredicates, TypeReference,
};

// ============================================================================
// Fixtures
// ============================================================================

fn reflective(model: &TypeModel) -> Annotation {
    Annotation::new(model.well_known(WellKnownId::Reflective))
}

fn reflective_with(model: &TypeModel, processors: &[TypeId]) -> Annotation {
    reflective(model).with_value(VALUE_ATTRIBUTE, AttributeValue::Types(processors.to_vec()))
}

fn process(model: &TypeModel, ty: TypeId) -> RuntimeHints {
    let mut hints = RuntimeHints::new();
    ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, model, &[ty])
        .unwrap();
    hints
}

/// `demo.SampleInvoker` (meta-annotated `@Reflective`, `retries: int = 0`) and `demo.RetryInvoker`
/// (meta-annotated `@SampleInvoker`, `value: int = 1` aliasing `SampleInvoker.retries`).
fn invoker_annotations(model: &mut TypeModel) -> (TypeId, TypeId) {
    let sample_invoker = model.declare_annotation("demo.SampleInvoker").unwrap();
    let marker = reflective(model);
    model.annotate(sample_invoker, marker).unwrap();
    model
        .add_attribute(
            sample_invoker,
            AttributeDecl::new("retries", AttributeKind::Int).with_default(AttributeValue::Int(0)),
        )
        .unwrap();

    let retry_invoker = model.declare_annotation("demo.RetryInvoker").unwrap();
    model.annotate(retry_invoker, Annotation::new(sample_invoker)).unwrap();
    model
        .add_attribute(
            retry_invoker,
            AttributeDecl::new("value", AttributeKind::Int)
                .with_default(AttributeValue::Int(1))
                .with_alias(AliasFor::meta(sample_invoker, "retries")),
        )
        .unwrap();
    (sample_invoker, retry_invoker)
}

/// Records every access to the hint registry.
#[derive(Debug, Default)]
struct CountingHints {
    inner: RuntimeHints,
    interactions: usize,
}

impl HintRegistry for CountingHints {
    fn reflection_mut(&mut self) -> &mut ReflectionHints {
        self.interactions += 1;
        self.inner.reflection_mut()
    }

    fn proxies_mut(&mut self) -> &mut ProxyHints {
        self.interactions += 1;
        self.inner.proxies_mut()
    }
}

/// Registers every declared field of an element's declaring type.
#[derive(Debug)]
struct DeclaredFieldsProcessor;

impl ReflectiveProcessor for DeclaredFieldsProcessor {
    fn register_reflection_hints(
        &self,
        hints: &mut ReflectionHints,
        model: &TypeModel,
        element: Element,
    ) -> Result<(), ProcessorError> {
        hints.register_model_type(model, model.declaring_type(element), [MemberCategory::DeclaredFields]);
        Ok(())
    }
}

#[derive(Debug)]
struct RejectingProcessor;

impl ReflectiveProcessor for RejectingProcessor {
    fn register_reflection_hints(
        &self,
        _hints: &mut ReflectionHints,
        model: &TypeModel,
        element: Element,
    ) -> Result<(), ProcessorError> {
        Err(ProcessorError::Unsupported {
            processor: "demo.Rejecting".to_string(),
            element: model.describe(element),
        })
    }
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn non_annotated_type_is_never_touched() {
    let model = TypeModel::new();
    let string = model.lookup("String").unwrap();

    let mut hints = CountingHints::default();
    ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, &model, &[string])
        .unwrap();

    assert_eq!(hints.interactions, 0);
    assert!(hints.inner.is_empty());
}

#[test]
fn annotation_on_type() {
    let mut model = TypeModel::new();
    let string = model.lookup("String").unwrap();
    let bean = model.declare_class("demo.SampleTypeAnnotatedBean").unwrap();
    model.annotate(bean, reflective(&model)).unwrap();
    model.add_field(bean, "notManaged", string).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();

    let hints = process(&model, bean);
    let hint = hints.reflection().get_type_hint("demo.SampleTypeAnnotatedBean").unwrap();
    assert!(hint.has_member_category(MemberCategory::InvokeDeclaredConstructors));
    assert_eq!(hint.fields().count(), 0);
    assert_eq!(hint.methods().count(), 0);
}

#[test]
fn annotation_on_constructor() {
    let mut model = TypeModel::new();
    let string = model.lookup("String").unwrap();
    let integer = model.lookup("Integer").unwrap();
    let bean = model.declare_class("demo.SampleConstructorAnnotatedBean").unwrap();
    let managed = model.add_constructor(bean, vec![string]).unwrap();
    model.add_constructor(bean, vec![integer]).unwrap();
    model.annotate(managed, reflective(&model)).unwrap();

    let hints = process(&model, bean);
    let hint = hints
        .reflection()
        .get_type_hint("demo.SampleConstructorAnnotatedBean")
        .unwrap();
    let constructors: Vec<_> = hint.constructors().collect();
    assert_eq!(constructors.len(), 1);
    assert_eq!(constructors[0].parameter_types(), &[TypeReference::of("String")]);
}

#[test]
fn annotation_on_field() {
    let mut model = TypeModel::new();
    let string = model.lookup("String").unwrap();
    let bean = model.declare_class("demo.SampleFieldAnnotatedBean").unwrap();
    let managed = model.add_field(bean, "managed", string).unwrap();
    model.add_field(bean, "notManaged", string).unwrap();
    model.annotate(managed, reflective(&model)).unwrap();

    let hints = process(&model, bean);
    let hint = hints.reflection().get_type_hint("demo.SampleFieldAnnotatedBean").unwrap();
    let names: Vec<_> = hint.fields().map(|f| f.name()).collect();
    assert_eq!(names, vec!["managed"]);
}

#[test]
fn annotation_on_method() {
    let mut model = TypeModel::new();
    let bean = model.declare_class("demo.SampleMethodAnnotatedBean").unwrap();
    let managed = model.add_method(bean, MethodSpec::new("managed")).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();
    model.annotate(managed, reflective(&model)).unwrap();

    let hints = process(&model, bean);
    let hint = hints.reflection().get_type_hint("demo.SampleMethodAnnotatedBean").unwrap();
    let names: Vec<_> = hint.methods().map(|m| m.name()).collect();
    assert_eq!(names, vec!["managed"]);
    assert!(
        RuntimeHintsPredicates::reflection()
            .on_method("demo.SampleMethodAnnotatedBean", "managed")
            .invoke()
            .test(&hints)
    );
}

#[test]
fn meta_annotation_without_alias_needs_no_proxy() {
    let mut model = TypeModel::new();
    let (sample_invoker, _) = invoker_annotations(&mut model);
    let bean = model.declare_class("demo.SampleMethodMetaAnnotatedBean").unwrap();
    let invoke = model.add_method(bean, MethodSpec::new("invoke")).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();
    model.annotate(invoke, Annotation::new(sample_invoker)).unwrap();

    let hints = process(&model, bean);
    assert!(hints.proxies().is_empty());
    assert!(
        RuntimeHintsPredicates::reflection()
            .on_method("demo.SampleMethodMetaAnnotatedBean", "invoke")
            .invoke()
            .test(&hints)
    );
    assert!(hints.reflection().get_type_hint("demo.SampleInvoker").is_none());
}

#[test]
fn meta_annotation_with_alias_registers_proxy() {
    let mut model = TypeModel::new();
    let (_, retry_invoker) = invoker_annotations(&mut model);
    let bean = model.declare_class("demo.SampleMethodMetaAnnotatedBeanWithAlias").unwrap();
    let invoke = model.add_method(bean, MethodSpec::new("invoke")).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();
    model.annotate(invoke, Annotation::new(retry_invoker)).unwrap();

    let hints = process(&model, bean);
    assert!(
        RuntimeHintsPredicates::proxies()
            .for_interfaces(["demo.SampleInvoker", "aot.SynthesizedAnnotation"])
            .test(&hints)
    );
    assert_eq!(hints.proxies().interface_proxies().count(), 1);
    assert!(
        RuntimeHintsPredicates::reflection()
            .on_type("demo.SampleInvoker")
            .with_member_category(MemberCategory::InvokeDeclaredMethods)
            .test(&hints)
    );
}

#[test]
fn annotation_on_interface() {
    let mut model = TypeModel::new();
    let interface = model.declare_interface("demo.SampleInterface").unwrap();
    let abstract_managed = model
        .add_method(interface, MethodSpec::new("managed").abstract_method())
        .unwrap();
    model.annotate(abstract_managed, reflective(&model)).unwrap();

    let bean = model.declare_class("demo.SampleMethodAnnotatedBeanWithInterface").unwrap();
    model.add_interface(bean, interface).unwrap();
    model.add_method(bean, MethodSpec::new("managed")).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();

    let hints = process(&model, bean);
    for ty in ["demo.SampleInterface", "demo.SampleMethodAnnotatedBeanWithInterface"] {
        let hint = hints.reflection().get_type_hint(ty).unwrap();
        let names: Vec<_> = hint.methods().map(|m| m.name()).collect();
        assert_eq!(names, vec!["managed"], "{ty}");
    }
}

#[test]
fn annotation_on_inherited_class() {
    let mut model = TypeModel::new();
    let parent = model.declare_class("demo.SampleInheritedClass").unwrap();
    let parent_managed = model.add_method(parent, MethodSpec::new("managed")).unwrap();
    model.annotate(parent_managed, reflective(&model)).unwrap();

    let bean = model.declare_class("demo.SampleMethodAnnotatedBeanWithInheritance").unwrap();
    model.set_superclass(bean, parent).unwrap();
    model.add_method(bean, MethodSpec::new("managed")).unwrap();
    model.add_method(bean, MethodSpec::new("notManaged")).unwrap();

    let hints = process(&model, bean);
    for ty in ["demo.SampleInheritedClass", "demo.SampleMethodAnnotatedBeanWithInheritance"] {
        let hint = hints.reflection().get_type_hint(ty).unwrap();
        let names: Vec<_> = hint.methods().map(|m| m.name()).collect();
        assert_eq!(names, vec!["managed"], "{ty}");
    }
    assert!(hints.proxies().is_empty());
}

#[test]
fn marker_inherited_from_superclass_type_annotation() {
    let mut model = TypeModel::new();
    let parent = model.declare_class("demo.Parent").unwrap();
    model.annotate(parent, reflective(&model)).unwrap();
    let child = model.declare_class("demo.Child").unwrap();
    model.set_superclass(child, parent).unwrap();

    let hints = process(&model, child);
    assert!(hints.reflection().get_type_hint("demo.Child").is_some());
    // Only the root is inspected as a type; superclasses contribute members, not themselves.
    assert!(hints.reflection().get_type_hint("demo.Parent").is_none());
}

// ============================================================================
// Entries and processors
// ============================================================================

#[test]
fn element_reached_twice_is_processed_once() {
    let mut model = TypeModel::new();
    let api = model.declare_interface("demo.Api").unwrap();
    let run = model.add_method(api, MethodSpec::new("run").abstract_method()).unwrap();
    model.annotate(run, reflective(&model)).unwrap();
    let base = model.declare_interface("demo.Base").unwrap();
    model.add_interface(base, api).unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    model.add_interface(bean, api).unwrap();
    model.add_interface(bean, base).unwrap();

    let entries = ReflectiveRuntimeHintsRegistrar::default()
        .collect_entries(&model, &[bean, api, base])
        .unwrap();
    let elements: Vec<Element> = entries.iter().map(|e| e.element()).collect();
    assert_eq!(elements, vec![Element::Method(run)]);
}

#[test]
fn repeated_processor_collapses_to_single() {
    let mut model = TypeModel::new();
    let simple = model.well_known(WellKnownId::SimpleReflectiveProcessor);
    let bean = model.declare_class("demo.Bean").unwrap();
    model.annotate(bean, reflective_with(&model, &[simple, simple])).unwrap();

    let entries = ReflectiveRuntimeHintsRegistrar::default()
        .collect_entries(&model, &[bean])
        .unwrap();
    let entry = entries.iter().next().unwrap();
    assert_eq!(entry.processor().handles().len(), 1);
    assert_eq!(entry.processor().display_key(), "aot.SimpleReflectiveProcessor");
}

#[test]
fn repeated_processor_through_alias_collapses_to_single() {
    let mut model = TypeModel::new();
    let simple = model.well_known(WellKnownId::SimpleReflectiveProcessor);
    let reflective_type = model.well_known(WellKnownId::Reflective);
    let processed = model.declare_annotation("demo.Processed").unwrap();
    let marker = reflective(&model);
    model.annotate(processed, marker).unwrap();
    model
        .add_attribute(
            processed,
            AttributeDecl::new("processors", AttributeKind::Types)
                .with_default(AttributeValue::Types(Vec::new()))
                .with_alias(AliasFor::meta(reflective_type, VALUE_ATTRIBUTE)),
        )
        .unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    model
        .annotate(
            bean,
            Annotation::new(processed).with_value("processors", AttributeValue::Types(vec![simple, simple])),
        )
        .unwrap();

    let mut registrar = ReflectiveRuntimeHintsRegistrar::default();
    let entries = registrar.collect_entries(&model, &[bean]).unwrap();
    assert_eq!(entries.len(), 1);
    let entry = entries.iter().next().unwrap();
    assert_eq!(entry.processor().handles().len(), 1);
    assert_eq!(entry.processor().display_key(), "aot.SimpleReflectiveProcessor");
    let key = entry.key();
    assert_eq!(key.processors().collect::<Vec<_>>(), vec!["aot.SimpleReflectiveProcessor"]);

    let mut hints = RuntimeHints::new();
    registrar.register_runtime_hints(&mut hints, &model, &[bean]).unwrap();
    assert!(
        RuntimeHintsPredicates::reflection()
            .on_type("demo.Bean")
            .with_member_category(MemberCategory::InvokeDeclaredConstructors)
            .test(&hints)
    );
}

#[test]
fn several_processors_run_in_declared_order() {
    let mut model = TypeModel::new();
    let simple = model.well_known(WellKnownId::SimpleReflectiveProcessor);
    let fields = model.declare_class("demo.DeclaredFieldsProcessor").unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    model.annotate(bean, reflective_with(&model, &[fields, simple])).unwrap();

    let catalog = ProcessorCatalog::with_defaults().with("demo.DeclaredFieldsProcessor", || {
        Ok(Box::new(DeclaredFieldsProcessor))
    });
    let mut registrar = ReflectiveRuntimeHintsRegistrar::new(catalog);
    let entries = registrar.collect_entries(&model, &[bean]).unwrap();
    assert_eq!(
        entries.iter().next().unwrap().processor().display_key(),
        "delegating[demo.DeclaredFieldsProcessor, aot.SimpleReflectiveProcessor]"
    );

    let mut hints = RuntimeHints::new();
    registrar.register_runtime_hints(&mut hints, &model, &[bean]).unwrap();
    let hint = hints.reflection().get_type_hint("demo.Bean").unwrap();
    assert!(hint.has_member_category(MemberCategory::DeclaredFields));
    assert!(hint.has_member_category(MemberCategory::InvokeDeclaredConstructors));
}

#[test]
fn processor_order_distinguishes_entries() {
    let mut model = TypeModel::new();
    let simple = model.well_known(WellKnownId::SimpleReflectiveProcessor);
    let fields = model.declare_class("demo.DeclaredFieldsProcessor").unwrap();
    let a = model.declare_class("demo.A").unwrap();
    let b = model.declare_class("demo.B").unwrap();
    model.annotate(a, reflective_with(&model, &[fields, simple])).unwrap();
    model.annotate(b, reflective_with(&model, &[simple, fields])).unwrap();

    let catalog = ProcessorCatalog::with_defaults().with("demo.DeclaredFieldsProcessor", || {
        Ok(Box::new(DeclaredFieldsProcessor))
    });
    let entries = ReflectiveRuntimeHintsRegistrar::new(catalog)
        .collect_entries(&model, &[a, b])
        .unwrap();
    let keys: Vec<_> = entries.iter().map(|e| e.key()).collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].element(), Element::Type(a));
    assert_ne!(
        keys[0].processors().collect::<Vec<_>>(),
        keys[1].processors().collect::<Vec<_>>()
    );
}

#[test]
fn processor_instances_are_cached_across_runs() {
    let created = Rc::new(Cell::new(0));
    let counter = Rc::clone(&created);
    let catalog = ProcessorCatalog::new().with("demo.DeclaredFieldsProcessor", move || {
        counter.set(counter.get() + 1);
        Ok(Box::new(DeclaredFieldsProcessor))
    });

    let mut model = TypeModel::new();
    let processor = model.declare_class("demo.DeclaredFieldsProcessor").unwrap();
    let a = model.declare_class("demo.A").unwrap();
    let b = model.declare_class("demo.B").unwrap();
    model.annotate(a, reflective_with(&model, &[processor])).unwrap();
    model.annotate(b, reflective_with(&model, &[processor])).unwrap();

    let mut registrar = ReflectiveRuntimeHintsRegistrar::new(catalog);
    let mut hints = RuntimeHints::new();
    registrar.register_runtime_hints(&mut hints, &model, &[a, b]).unwrap();
    registrar.register_runtime_hints(&mut hints, &model, &[a]).unwrap();

    assert_eq!(created.get(), 1);
    assert_eq!(registrar.processors().instance_count(), 1);
}

#[test]
fn unknown_processor_is_a_configuration_error() {
    let mut model = TypeModel::new();
    let missing = model.declare_class("demo.MissingProcessor").unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    model.annotate(bean, reflective_with(&model, &[missing])).unwrap();

    let mut hints = RuntimeHints::new();
    let err = ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, &model, &[bean])
        .unwrap_err();
    assert!(err.is_configuration_error());
    assert!(matches!(err, RegistrarError::UnknownProcessor { ref processor } if processor == "demo.MissingProcessor"));
    assert!(hints.is_empty());
}

#[test]
fn failing_factory_is_a_configuration_error() {
    let mut model = TypeModel::new();
    let broken = model.declare_class("demo.BrokenProcessor").unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    model.annotate(bean, reflective_with(&model, &[broken])).unwrap();

    let catalog = ProcessorCatalog::new().with("demo.BrokenProcessor", || {
        Err(ProcessorError::Instantiation("no default constructor".to_string()))
    });
    let err = ReflectiveRuntimeHintsRegistrar::new(catalog)
        .collect_entries(&model, &[bean])
        .unwrap_err();
    assert!(matches!(err, RegistrarError::ProcessorInstantiation { .. }));
    assert!(err.is_configuration_error());
}

#[test]
fn processor_failure_names_the_element() {
    let mut model = TypeModel::new();
    let rejecting = model.declare_class("demo.Rejecting").unwrap();
    let bean = model.declare_class("demo.Bean").unwrap();
    let run = model.add_method(bean, MethodSpec::new("run")).unwrap();
    model.annotate(run, reflective_with(&model, &[rejecting])).unwrap();

    let catalog = ProcessorCatalog::new().with("demo.Rejecting", || Ok(Box::new(RejectingProcessor)));
    let mut hints = RuntimeHints::new();
    let err = ReflectiveRuntimeHintsRegistrar::new(catalog)
        .register_runtime_hints(&mut hints, &model, &[bean])
        .unwrap_err();
    assert!(!err.is_configuration_error());
    let RegistrarError::Processor { element, .. } = &err else {
        panic!("expected a processor failure, got {err:?}");
    };
    assert_eq!(element, "demo.Bean.run()");
}

#[test]
fn empty_processor_list_is_not_marked() {
    let mut model = TypeModel::new();
    let bean = model.declare_class("demo.Bean").unwrap();
    model.annotate(bean, reflective_with(&model, &[])).unwrap();

    let mut hints = CountingHints::default();
    ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, &model, &[bean])
        .unwrap();
    assert_eq!(hints.interactions, 0);
}

#[test]
fn malformed_marker_usage_is_ignored() {
    let mut model = TypeModel::new();
    let bean = model.declare_class("demo.Bean").unwrap();
    model
        .annotate(bean, reflective(&model).with_value("processors", AttributeValue::Bool(true)))
        .unwrap();

    let hints = process(&model, bean);
    assert!(hints.is_empty());
}

#[test]
fn root_from_another_model_is_rejected() {
    let mut other = TypeModel::new();
    let mut last = None;
    for i in 0..50 {
        last = Some(other.declare_class(format!("demo.Other{i}")).unwrap());
    }
    let foreign = last.unwrap();

    let model = TypeModel::new();
    let mut hints = CountingHints::default();
    let err = ReflectiveRuntimeHintsRegistrar::default()
        .register_runtime_hints(&mut hints, &model, &[foreign])
        .unwrap_err();

    assert_eq!(err, RegistrarError::ForeignType { index: foreign.index() });
    assert!(err.is_configuration_error());
    assert_eq!(hints.interactions, 0);
}
