use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

/// The presentational state an effect is allowed to touch: inline styles,
/// text content, classes and attributes.
pub trait Surface {
    fn set_style(&self, property: &str, value: &str);
    fn set_text(&self, text: &str);
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    fn has_class(&self, class: &str) -> bool;
    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);
    fn remove_attr(&self, name: &str);

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }
}

impl Surface for Element {
    fn set_style(&self, property: &str, value: &str) {
        // SVG and other non-HTML elements have no inline style object here
        if let Some(el) = self.dyn_ref::<HtmlElement>() {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        let _ = self.set_attribute(name, value);
    }

    fn remove_attr(&self, name: &str) {
        let _ = self.remove_attribute(name);
    }
}

impl<T: Surface + ?Sized> Surface for Rc<T> {
    fn set_style(&self, property: &str, value: &str) {
        (**self).set_style(property, value)
    }

    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }

    fn add_class(&self, class: &str) {
        (**self).add_class(class)
    }

    fn remove_class(&self, class: &str) {
        (**self).remove_class(class)
    }

    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }

    fn attr(&self, name: &str) -> Option<String> {
        (**self).attr(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        (**self).set_attr(name, value)
    }

    fn remove_attr(&self, name: &str) {
        (**self).remove_attr(name)
    }
}
