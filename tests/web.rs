//! Engine surface driven through real JS values; run with `wasm-pack test --node`
#![cfg(target_arch = "wasm32")]

use js_sys::Function;
use vine_growth::VineEngine;
use wasm_bindgen_test::*;

const CONFIG: &str = "growth: { steps: 4 }\npaths: { count: 2 }\n";

#[wasm_bindgen_test]
fn regenerate_with_ground_callback() {
    let mut engine = VineEngine::new(CONFIG).unwrap();
    // Ground plane at y = 0 for downward rays only
    let cast = Function::new_with_args(
        "o, d, max",
        "if (d[1] >= -0.5) return null;
         const t = o[1] / -d[1];
         return t <= max ? [o[0] + d[0] * t, 0, o[2] + d[2] * t, 0, 1, 0] : null;",
    );

    let count = engine.regenerate(&cast).unwrap();
    assert!(count > 0);
    assert_eq!(engine.path_count(), 2);
    assert_eq!(engine.vertex_data().len(), count * 8);
}

#[wasm_bindgen_test]
fn throwing_callback_keeps_previous_mesh() {
    let mut engine = VineEngine::new(CONFIG).unwrap();
    let before = engine.regenerate_unobstructed().unwrap();

    let cast = Function::new_with_args("o, d, max", "throw new Error('no physics');");
    let err = engine.regenerate(&cast).unwrap_err();
    assert!(err.as_string().unwrap().contains("no physics"));
    assert_eq!(engine.vertex_count(), before);
}

#[wasm_bindgen_test]
fn malformed_hit_is_rejected() {
    let mut engine = VineEngine::new(CONFIG).unwrap();
    let cast = Function::new_with_args("o, d, max", "return [1, 2];");
    assert!(engine.regenerate(&cast).is_err());
    assert_eq!(engine.vertex_count(), 0);
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let mut engine = VineEngine::new(CONFIG).unwrap();
    let before = engine.regenerate_unobstructed().unwrap();
    assert!(engine.load_config("growth: { min_angle: 60, max_angle: 10 }").is_err());
    assert_eq!(engine.vertex_count(), before);
    assert!(VineEngine::set_log_level("loud").is_err());
    assert!(VineEngine::set_log_level("debug").is_ok());
}
