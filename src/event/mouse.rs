//! The positional/pointer event category.

use rquickjs::Value;

use super::{BaseEvent, DomEvent};
use crate::node::{Element, NodeList};

/// Mouse button identifier, as reported by the runtime's `button` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButton(pub i32);

impl MouseButton {
    pub const MAIN: MouseButton = MouseButton(0);
    pub const AUXILIARY: MouseButton = MouseButton(1);
    pub const SECONDARY: MouseButton = MouseButton(2);
    pub const BACK: MouseButton = MouseButton(3);
    pub const FORWARD: MouseButton = MouseButton(4);
}

/// Reference frame for a mouse event's coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSpace {
    Client,
    Offset,
    Page,
    Screen,
}

impl CoordinateSpace {
    fn prefix(self) -> &'static str {
        match self {
            CoordinateSpace::Client => "client",
            CoordinateSpace::Offset => "offset",
            CoordinateSpace::Page => "page",
            CoordinateSpace::Screen => "screen",
        }
    }
}

/// Event wrapper for the mouse category.
///
/// Composes a [`BaseEvent`] and forwards the whole base contract to it, then
/// adds button, coordinate, and modifier-key accessors. Like the base
/// accessors, the added ones are pure reads of the live value: a field the
/// runtime does not populate reads as zero rather than erroring.
#[derive(Clone)]
pub struct MouseEvent<'js> {
    base: BaseEvent<'js>,
}

/// Constructor for the mouse category, in the shape the registry expects.
pub fn wrap_mouse_event<'js>(base: BaseEvent<'js>) -> Box<dyn DomEvent<'js> + 'js> {
    Box::new(MouseEvent::new(base))
}

impl<'js> MouseEvent<'js> {
    pub fn new(base: BaseEvent<'js>) -> Self {
        Self { base }
    }

    pub fn button(&self) -> MouseButton {
        MouseButton(self.base.int_field("button"))
    }

    /// The event's (x, y) position in the given reference frame.
    pub fn position(&self, space: CoordinateSpace) -> (f64, f64) {
        let prefix = space.prefix();
        (
            self.base.float_field(&format!("{prefix}X")),
            self.base.float_field(&format!("{prefix}Y")),
        )
    }

    pub fn client_pos(&self) -> (f64, f64) {
        self.position(CoordinateSpace::Client)
    }

    pub fn offset_pos(&self) -> (f64, f64) {
        self.position(CoordinateSpace::Offset)
    }

    pub fn page_pos(&self) -> (f64, f64) {
        self.position(CoordinateSpace::Page)
    }

    pub fn screen_pos(&self) -> (f64, f64) {
        self.position(CoordinateSpace::Screen)
    }

    pub fn alt_key(&self) -> bool {
        self.base.bool_field("altKey")
    }

    pub fn ctrl_key(&self) -> bool {
        self.base.bool_field("ctrlKey")
    }

    pub fn shift_key(&self) -> bool {
        self.base.bool_field("shiftKey")
    }

    pub fn meta_key(&self) -> bool {
        self.base.bool_field("metaKey")
    }
}

impl<'js> DomEvent<'js> for MouseEvent<'js> {
    fn bubbles(&self) -> bool {
        self.base.bubbles()
    }

    fn cancelable(&self) -> bool {
        self.base.cancelable()
    }

    fn composed(&self) -> bool {
        self.base.composed()
    }

    fn default_prevented(&self) -> bool {
        self.base.default_prevented()
    }

    fn is_trusted(&self) -> bool {
        self.base.is_trusted()
    }

    fn event_type(&self) -> String {
        self.base.event_type()
    }

    fn target(&self) -> Option<Element<'js>> {
        self.base.target()
    }

    fn current_target(&self) -> Option<Element<'js>> {
        self.base.current_target()
    }

    fn path(&self) -> NodeList<'js> {
        self.base.path()
    }

    fn raw(&self) -> &Value<'js> {
        self.base.raw()
    }

    fn as_mouse_event(&self) -> Option<&MouseEvent<'js>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_spaces_map_to_field_prefixes() {
        assert_eq!(CoordinateSpace::Client.prefix(), "client");
        assert_eq!(CoordinateSpace::Offset.prefix(), "offset");
        assert_eq!(CoordinateSpace::Page.prefix(), "page");
        assert_eq!(CoordinateSpace::Screen.prefix(), "screen");
    }

    #[test]
    fn button_constants_follow_the_dom_numbering() {
        assert_eq!(MouseButton::MAIN, MouseButton(0));
        assert_eq!(MouseButton::SECONDARY, MouseButton(2));
        assert_ne!(MouseButton::BACK, MouseButton::FORWARD);
    }
}
