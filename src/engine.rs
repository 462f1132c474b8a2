use anyhow::{Context as AnyhowContext, Result};
use rquickjs::{Context, Ctx, Error as JsError, Function, Runtime, Value};

/// JavaScript runtime backed by QuickJS.
///
/// The engine owns the QuickJS runtime and context and provides helpers for
/// evaluating scripts. On startup it wires `console` to Rust tracing and
/// installs browser-style event constructor classes (`Event`, `MouseEvent`,
/// ...) into the global scope when the host has not provided its own, so that
/// event categories can be resolved by name against the global scope.
pub struct QuickJsEngine {
    runtime: Runtime,
    context: Context,
}

impl QuickJsEngine {
    /// Create a new QuickJS engine with the console and event-class bootstrap
    /// installed.
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new().context("failed to create QuickJS runtime")?;
        let context = Context::full(&runtime).context("failed to create QuickJS context")?;
        let engine = Self { runtime, context };
        engine.install_bootstrap()?;
        Ok(engine)
    }

    /// Evaluate a script and discard the result.
    pub fn eval(&self, source: &str, filename: &str) -> Result<()> {
        self.eval_with::<()>(source, filename)
    }

    /// Evaluate a script and deserialize the result into `V`.
    pub fn eval_with<V>(&self, source: &str, filename: &str) -> Result<V>
    where
        V: for<'js> rquickjs::FromJs<'js>,
    {
        let script = Self::with_source_url(source, filename);
        let eval_result = self.context.with(|ctx| ctx.eval::<V, _>(script));

        let value = match eval_result {
            Ok(value) => Ok(value),
            Err(JsError::Exception) => {
                let message = self.context.with(|ctx| describe_exception(&ctx));
                Err(anyhow::anyhow!(message))
            }
            Err(err) => Err(anyhow::Error::from(err)),
        }?;

        // Promise continuations queued by the script still need to run.
        self.drain_pending_jobs();

        Ok(value)
    }

    /// Provide access to the underlying QuickJS context for integrations that
    /// work with raw values, such as the event registry.
    pub fn with_context<T, F>(&self, f: F) -> Result<T>
    where
        F: for<'js> FnOnce(Ctx<'js>) -> rquickjs::Result<T>,
    {
        self.context.with(f).map_err(anyhow::Error::from)
    }

    fn drain_pending_jobs(&self) {
        const MAX_JOBS: usize = 1024;

        let mut executed = 0;
        while self.runtime.is_job_pending() {
            match self.runtime.execute_pending_job() {
                Ok(true) => {
                    executed += 1;
                    if executed >= MAX_JOBS {
                        tracing::warn!(
                            target: "quickdom",
                            "stopped draining the job queue after {} jobs",
                            MAX_JOBS
                        );
                        break;
                    }
                }
                Ok(false) => break,
                Err(job_error) => {
                    tracing::error!(target: "quickdom", "pending job failed: {:?}", job_error);
                    break;
                }
            }
        }

        if executed > 0 {
            tracing::debug!(target: "quickdom", executed, "drained pending jobs");
        }
    }

    fn install_bootstrap(&self) -> Result<()> {
        self.context
            .with(|ctx| {
                let global = ctx.globals();
                let log_fn =
                    Function::new(ctx.clone(), log_from_js)?.with_name("__quickdom_log")?;
                global.set("__quickdom_log", log_fn)?;

                ctx.eval::<(), _>(CONSOLE_BOOTSTRAP.as_bytes())?;
                ctx.eval::<(), _>(EVENT_CLASS_BOOTSTRAP.as_bytes())
            })
            .map_err(anyhow::Error::from)
    }

    fn with_source_url(source: &str, filename: &str) -> Vec<u8> {
        let newline = if source.ends_with('\n') { "" } else { "\n" };
        format!("{source}{newline}//# sourceURL={filename}\n").into_bytes()
    }
}

fn log_from_js(level: String, message: String) -> rquickjs::Result<()> {
    match level.as_str() {
        "error" => tracing::error!(target: "quickdom", message = %message),
        "warn" => tracing::warn!(target: "quickdom", message = %message),
        "debug" => tracing::debug!(target: "quickdom", message = %message),
        _ => tracing::info!(target: "quickdom", message = %message),
    }
    Ok(())
}

fn describe_exception(ctx: &Ctx<'_>) -> String {
    let exception: Value = ctx.catch();

    if let Some(obj) = exception.as_object() {
        if let Ok(message) = obj.get::<_, String>("message") {
            if let Ok(stack) = obj.get::<_, String>("stack") {
                return format!("{message}\n{stack}");
            }
            return message;
        }
    }

    format!("{exception:?}")
}

const CONSOLE_BOOTSTRAP: &str = r#"
(() => {
    const forward = (level) => (...args) => {
        try {
            const text = args.map((arg) => {
                if (typeof arg === 'string') {
                    return arg;
                }
                try {
                    return JSON.stringify(arg);
                } catch (_) {
                    return String(arg);
                }
            }).join(' ');
            globalThis.__quickdom_log(level, text);
        } catch (_) {
            // Logging must never throw into user scripts.
        }
    };

    globalThis.console = {
        log: forward('log'),
        info: forward('info'),
        warn: forward('warn'),
        error: forward('error'),
        debug: forward('debug'),
    };
})();
"#;

// Minimal constructor classes for the event categories this crate wraps.
// Hosts that embed a fuller DOM keep their own classes; the typeof guards
// make this bootstrap a no-op there.
const EVENT_CLASS_BOOTSTRAP: &str = r#"
(() => {
    const global = globalThis;

    if (typeof global.Event === 'undefined') {
        global.Event = class Event {
            constructor(type, init = {}) {
                this.type = String(type);
                this.bubbles = !!init.bubbles;
                this.cancelable = !!init.cancelable;
                this.composed = !!init.composed;
                this.defaultPrevented = false;
                this.isTrusted = false;
                this.target = init.target !== undefined ? init.target : null;
                this.currentTarget = init.currentTarget !== undefined ? init.currentTarget : null;
                this.path = init.path !== undefined ? init.path : [];
            }
            preventDefault() {
                if (this.cancelable) {
                    this.defaultPrevented = true;
                }
            }
        };
    }

    if (typeof global.UIEvent === 'undefined') {
        global.UIEvent = class UIEvent extends global.Event {
            constructor(type, init = {}) {
                super(type, init);
                this.detail = init.detail | 0;
            }
        };
    }

    if (typeof global.MouseEvent === 'undefined') {
        global.MouseEvent = class MouseEvent extends global.UIEvent {
            constructor(type, init = {}) {
                super(type, init);
                this.button = init.button | 0;
                this.buttons = init.buttons | 0;
                this.clientX = +init.clientX || 0;
                this.clientY = +init.clientY || 0;
                this.offsetX = +init.offsetX || 0;
                this.offsetY = +init.offsetY || 0;
                this.pageX = +init.pageX || 0;
                this.pageY = +init.pageY || 0;
                this.screenX = +init.screenX || 0;
                this.screenY = +init.screenY || 0;
                this.altKey = !!init.altKey;
                this.ctrlKey = !!init.ctrlKey;
                this.shiftKey = !!init.shiftKey;
                this.metaKey = !!init.metaKey;
            }
        };
    }

    if (typeof global.PointerEvent === 'undefined') {
        global.PointerEvent = class PointerEvent extends global.MouseEvent {
            constructor(type, init = {}) {
                super(type, init);
                this.pointerId = init.pointerId | 0;
                this.pointerType = init.pointerType !== undefined ? String(init.pointerType) : '';
            }
        };
    }

    if (typeof global.CustomEvent === 'undefined') {
        global.CustomEvent = class CustomEvent extends global.Event {
            constructor(type, init = {}) {
                super(type, init);
                this.detail = init.detail !== undefined ? init.detail : null;
            }
        };
    }
})();
"#;
