//! Non-owning element and node-list views.
//!
//! These are thin conversions over live JS objects: every accessor re-reads
//! the underlying object, so repeated calls observe whatever the runtime has
//! mutated in between. Nothing here caches or clones runtime state.

use rquickjs::{Object, Value};

/// A typed view over a JS element object.
#[derive(Clone)]
pub struct Element<'js> {
    object: Object<'js>,
}

impl<'js> Element<'js> {
    /// Convert a dynamic value into an element view.
    ///
    /// Returns `None` when the value is null, undefined, or not an object.
    pub fn from_value(value: Value<'js>) -> Option<Self> {
        value.into_object().map(|object| Self { object })
    }

    /// The underlying JS object.
    pub fn as_object(&self) -> &Object<'js> {
        &self.object
    }

    pub fn tag_name(&self) -> String {
        self.string_field("tagName")
    }

    pub fn id(&self) -> String {
        self.string_field("id")
    }

    pub fn text_content(&self) -> String {
        self.string_field("textContent")
    }

    fn string_field(&self, name: &str) -> String {
        self.object
            .get::<_, Value>(name)
            .ok()
            .and_then(|value| value.as_string().and_then(|s| s.to_string().ok()))
            .unwrap_or_default()
    }
}

/// A typed view over a JS array-like of nodes, such as an event propagation
/// path. An absent underlying value reads as an empty list.
#[derive(Clone, Default)]
pub struct NodeList<'js> {
    object: Option<Object<'js>>,
}

impl<'js> NodeList<'js> {
    pub fn from_value(value: Value<'js>) -> Self {
        Self {
            object: value.into_object(),
        }
    }

    /// Number of entries, read from the live `length` property.
    pub fn len(&self) -> usize {
        let Some(object) = &self.object else {
            return 0;
        };
        object
            .get::<_, Value>("length")
            .ok()
            .and_then(|value| {
                value
                    .as_int()
                    .or_else(|| value.as_float().map(|f| f as i32))
            })
            .map(|length| length.max(0) as usize)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Element<'js>> {
        let object = self.object.as_ref()?;
        // Array-likes expose their elements under string-keyed integer
        // indices, so a plain property read covers arrays and NodeLists.
        let value: Value = object.get(index.to_string().as_str()).ok()?;
        Element::from_value(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = Element<'js>> + '_ {
        (0..self.len()).filter_map(move |index| self.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::QuickJsEngine;

    #[test]
    fn absent_values_convert_to_absent_views() {
        let engine = QuickJsEngine::new().expect("create engine");
        engine
            .with_context(|ctx| {
                let null: Value = ctx.eval("null".as_bytes())?;
                assert!(Element::from_value(null).is_none());

                let undefined: Value = ctx.eval("undefined".as_bytes())?;
                let list = NodeList::from_value(undefined);
                assert_eq!(list.len(), 0);
                assert!(list.is_empty());
                assert!(list.get(0).is_none());
                Ok(())
            })
            .expect("context");
    }

    #[test]
    fn node_list_reads_live_array_state() {
        let engine = QuickJsEngine::new().expect("create engine");
        engine
            .with_context(|ctx| {
                let value: Value = ctx.eval(
                    "globalThis.__nodes = [{ tagName: 'A' }, { tagName: 'B' }]; __nodes"
                        .as_bytes(),
                )?;
                let list = NodeList::from_value(value);
                assert_eq!(list.len(), 2);
                assert_eq!(list.get(1).expect("second node").tag_name(), "B");

                ctx.eval::<(), _>("__nodes.push({ tagName: 'C' })".as_bytes())?;
                assert_eq!(list.len(), 3);

                let tags: Vec<String> = list.iter().map(|el| el.tag_name()).collect();
                assert_eq!(tags, ["A", "B", "C"]);
                Ok(())
            })
            .expect("context");
    }
}
