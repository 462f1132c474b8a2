//! Event-type resolution and wrapping.
//!
//! Incoming events arrive from the runtime as opaque dynamic values. The
//! [`EventRegistry`] holds an ordered list of (class, constructor) pairs and
//! classifies each value with an `instanceof` scan: the first registered
//! class the value is an instance of decides which typed wrapper is built.
//! Values matching no registered class still come back as a [`BaseEvent`],
//! which satisfies the full [`DomEvent`] contract, so resolution never fails.

pub mod mouse;

use rquickjs::{Ctx, Function, Persistent, Value};
use tracing::warn;

use crate::node::{Element, NodeList};

pub use mouse::MouseEvent;

/// The uniform contract every event wrapper satisfies, regardless of how
/// specific its category is.
///
/// All accessors are non-owning reads of the live underlying value: nothing
/// is cached, and absent or undefined fields read as zero values (false,
/// empty string, absent element, empty list) rather than erroring.
pub trait DomEvent<'js> {
    fn bubbles(&self) -> bool;
    fn cancelable(&self) -> bool;
    fn composed(&self) -> bool;
    fn default_prevented(&self) -> bool;
    fn is_trusted(&self) -> bool;
    /// The event's type name, e.g. `"click"`.
    fn event_type(&self) -> String;
    fn target(&self) -> Option<Element<'js>>;
    fn current_target(&self) -> Option<Element<'js>>;
    /// The propagation path at the time of observation. Empty when the
    /// runtime does not populate it.
    fn path(&self) -> NodeList<'js>;
    /// The wrapped dynamic value.
    fn raw(&self) -> &Value<'js>;

    /// Narrow this event to the mouse capability set.
    ///
    /// Returns `None` unless the wrapper was built by the mouse category's
    /// constructor.
    fn as_mouse_event(&self) -> Option<&MouseEvent<'js>> {
        None
    }
}

/// Builds a typed event from the base wrapper once a category has matched.
pub type EventConstructor = for<'js> fn(BaseEvent<'js>) -> Box<dyn DomEvent<'js> + 'js>;

struct RegisteredClass {
    name: String,
    class: Persistent<Value<'static>>,
    construct: EventConstructor,
}

/// Ordered registry of event categories.
///
/// Populate it fully during initialization, then hand it to the code that
/// receives raw event values. Registration order is significant: resolution
/// is first-match-wins, not most-specific-match, so more specific categories
/// must be registered before more general ones.
pub struct EventRegistry {
    probe: Persistent<Function<'static>>,
    entries: Vec<RegisteredClass>,
}

const INSTANCEOF_PROBE: &str = "(value, ctor) => value instanceof ctor";

impl EventRegistry {
    /// Create an empty registry.
    pub fn new(ctx: &Ctx<'_>) -> rquickjs::Result<Self> {
        let probe: Function = ctx.eval(INSTANCEOF_PROBE.as_bytes())?;
        Ok(Self {
            probe: Persistent::save(ctx, probe),
            entries: Vec::new(),
        })
    }

    /// Create a registry with the built-in categories registered. Currently
    /// that is the `"MouseEvent"` category.
    pub fn with_builtins(ctx: &Ctx<'_>) -> rquickjs::Result<Self> {
        let mut registry = Self::new(ctx)?;
        registry.register(ctx, "MouseEvent", mouse::wrap_mouse_event);
        Ok(registry)
    }

    /// Register an event category.
    ///
    /// `name` is resolved against the global scope now, not at resolution
    /// time, and the resolved class handle is what incoming values are tested
    /// against. Categories accumulate for the lifetime of the registry; there
    /// is no de-registration.
    ///
    /// # Panics
    ///
    /// Panics when `name` does not resolve to a class in the global scope. A
    /// category that can never match means the binding targets an
    /// incompatible runtime, which is a configuration error rather than a
    /// recoverable condition.
    pub fn register(&mut self, ctx: &Ctx<'_>, name: &str, construct: EventConstructor) {
        let class: Value = ctx
            .globals()
            .get(name)
            .unwrap_or_else(|err| panic!("event class {name:?} lookup failed: {err}"));
        if class.is_null() || class.is_undefined() {
            panic!("event class {name:?} is not defined in the runtime global scope");
        }
        self.entries.push(RegisteredClass {
            name: name.to_string(),
            class: Persistent::save(ctx, class),
            construct,
        });
    }

    /// Classify an incoming value and wrap it in the most specific typed
    /// wrapper available.
    ///
    /// The registered classes are scanned in registration order and the first
    /// match wins. A value matching no class is wrapped as a [`BaseEvent`];
    /// unrecognized categories lose specialization but are never an error.
    pub fn resolve<'js>(&self, ctx: &Ctx<'js>, value: Value<'js>) -> Box<dyn DomEvent<'js> + 'js> {
        let probe = match self.probe.clone().restore(ctx) {
            Ok(probe) => probe,
            Err(err) => {
                warn!(
                    target: "quickdom",
                    error = %err,
                    "instanceof probe belongs to another runtime; returning base wrapper"
                );
                return Box::new(BaseEvent::new(value));
            }
        };

        for entry in &self.entries {
            let class = match entry.class.clone().restore(ctx) {
                Ok(class) => class,
                Err(err) => {
                    warn!(
                        target: "quickdom",
                        event_class = %entry.name,
                        error = %err,
                        "registered class belongs to another runtime; skipping"
                    );
                    continue;
                }
            };
            match probe.call::<_, bool>((value.clone(), class)) {
                Ok(true) => return (entry.construct)(BaseEvent::new(value)),
                Ok(false) => {}
                Err(err) => {
                    warn!(
                        target: "quickdom",
                        event_class = %entry.name,
                        error = %err,
                        "instanceof probe failed; skipping"
                    );
                }
            }
        }

        Box::new(BaseEvent::new(value))
    }
}

/// The generic event wrapper. Wraps exactly one dynamic value and implements
/// the full [`DomEvent`] contract with lenient field reads.
#[derive(Clone)]
pub struct BaseEvent<'js> {
    value: Value<'js>,
}

impl<'js> BaseEvent<'js> {
    pub fn new(value: Value<'js>) -> Self {
        Self { value }
    }

    fn field(&self, name: &str) -> Option<Value<'js>> {
        let object = self.value.as_object()?;
        object
            .get::<_, Value>(name)
            .ok()
            .filter(|value| !value.is_null() && !value.is_undefined())
    }

    pub(crate) fn bool_field(&self, name: &str) -> bool {
        self.field(name)
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    pub(crate) fn int_field(&self, name: &str) -> i32 {
        self.field(name)
            .and_then(|value| {
                value
                    .as_int()
                    .or_else(|| value.as_float().map(|f| f as i32))
            })
            .unwrap_or(0)
    }

    pub(crate) fn float_field(&self, name: &str) -> f64 {
        self.field(name)
            .and_then(|value| value.as_float().or_else(|| value.as_int().map(f64::from)))
            .unwrap_or(0.0)
    }

    fn string_field(&self, name: &str) -> String {
        self.field(name)
            .and_then(|value| value.as_string().and_then(|s| s.to_string().ok()))
            .unwrap_or_default()
    }
}

impl<'js> DomEvent<'js> for BaseEvent<'js> {
    fn bubbles(&self) -> bool {
        self.bool_field("bubbles")
    }

    fn cancelable(&self) -> bool {
        self.bool_field("cancelable")
    }

    fn composed(&self) -> bool {
        self.bool_field("composed")
    }

    fn default_prevented(&self) -> bool {
        self.bool_field("defaultPrevented")
    }

    fn is_trusted(&self) -> bool {
        self.bool_field("isTrusted")
    }

    fn event_type(&self) -> String {
        self.string_field("type")
    }

    fn target(&self) -> Option<Element<'js>> {
        self.field("target").and_then(Element::from_value)
    }

    fn current_target(&self) -> Option<Element<'js>> {
        self.field("currentTarget").and_then(Element::from_value)
    }

    fn path(&self) -> NodeList<'js> {
        self.field("path")
            .map(NodeList::from_value)
            .unwrap_or_default()
    }

    fn raw(&self) -> &Value<'js> {
        &self.value
    }
}
