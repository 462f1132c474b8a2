use quickdom::QuickJsEngine;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

#[test]
fn eval_with_deserializes_results() {
    init_tracing();
    let engine = QuickJsEngine::new().expect("create engine");
    let sum: i32 = engine.eval_with("1 + 2", "sum.js").expect("evaluate");
    assert_eq!(sum, 3);

    let greeting: String = engine
        .eval_with("'hello ' + 'world'", "greeting.js")
        .expect("evaluate");
    assert_eq!(greeting, "hello world");
}

#[test]
fn exceptions_surface_the_thrown_message() {
    init_tracing();
    let engine = QuickJsEngine::new().expect("create engine");
    let err = engine
        .eval("throw new Error('boom')", "thrower.js")
        .expect_err("script throws");
    assert!(err.to_string().contains("boom"), "unexpected error: {err}");
}

#[test]
fn console_logging_does_not_fail_scripts() {
    init_tracing();
    let engine = QuickJsEngine::new().expect("create engine");
    engine
        .eval(
            "console.log('plain', { nested: 1 }); console.warn('careful'); console.error('bad');",
            "console.js",
        )
        .expect("console output");
}

#[test]
fn event_classes_form_the_expected_hierarchy() {
    init_tracing();
    let engine = QuickJsEngine::new().expect("create engine");
    let checks: bool = engine
        .eval_with(
            r#"
            new PointerEvent('pointerdown') instanceof MouseEvent
                && new MouseEvent('click') instanceof UIEvent
                && new UIEvent('scroll') instanceof Event
                && !(new CustomEvent('ping') instanceof MouseEvent)
            "#,
            "hierarchy.js",
        )
        .expect("evaluate hierarchy checks");
    assert!(checks);
}

#[test]
fn prevent_default_requires_cancelable() {
    init_tracing();
    let engine = QuickJsEngine::new().expect("create engine");
    let prevented: bool = engine
        .eval_with(
            "const e = new Event('click'); e.preventDefault(); e.defaultPrevented",
            "prevent.js",
        )
        .expect("evaluate");
    assert!(!prevented, "non-cancelable events must ignore preventDefault");
}
