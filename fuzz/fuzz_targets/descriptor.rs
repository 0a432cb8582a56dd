#![no_main]

use aothints::descriptor::load_model;
use aothints::registrar::ReflectiveRuntimeHintsRegistrar;
use aothints_hints::RuntimeHints;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // If the descriptor loads, scan from every declared type
        if let Ok(model) = load_model("fuzz.json", s) {
            let roots: Vec<_> = model.declared_types().map(|(id, _)| id).collect();
            let mut hints = RuntimeHints::new();
            let _ = ReflectiveRuntimeHintsRegistrar::default().register_runtime_hints(&mut hints, &model, &roots);
        }
    }
});
