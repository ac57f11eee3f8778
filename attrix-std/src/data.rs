//! Data attribute extraction.

use attrix_core::{Data, Page, Selector};

/// Read the simple data attributes of an element.
///
/// Strings, numbers and booleans are kept; structured values are dropped
/// without any attempt at serialization. A name starting with `prefix` has
/// the prefix removed, other names are kept as they are, so `xmethod` and
/// `method` both end up under `method` and the later attribute wins. A
/// name equal to the prefix is kept whole.
pub fn element_data(page: &dyn Page, selector: &Selector, prefix: &str) -> Data {
    page.data(selector)
        .into_iter()
        .filter(|(_, value)| value.is_simple())
        .map(|(name, value)| {
            let name = match name.strip_prefix(prefix) {
                Some(stripped) if !stripped.is_empty() => stripped.to_owned(),
                _ => name,
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryPage, Node};
    use attrix_core::DataValue;

    #[test]
    fn strips_prefix_and_drops_structured_values() {
        let page = MemoryPage::new().with_element(
            "box",
            Node::new("div")
                .data("xmethod", "POST")
                .data("page", 2i64)
                .data("xflag", true)
                .data("xobj", DataValue::Structured("{\"a\":1}".into())),
        );

        let data = element_data(&page, &Selector::id("box"), "x");

        assert_eq!(data.get("method"), Some(&DataValue::from("POST")));
        assert_eq!(data.get("page"), Some(&DataValue::Number(2.0)));
        assert_eq!(data.get("flag"), Some(&DataValue::Bool(true)));
        assert!(!data.contains_key("obj"));
        assert!(!data.contains_key("xobj"));
    }

    #[test]
    fn name_equal_to_prefix_is_kept() {
        let page = MemoryPage::new().with_element("box", Node::new("div").data("x", "1"));

        let data = element_data(&page, &Selector::id("box"), "x");

        assert_eq!(data.get("x"), Some(&DataValue::from("1")));
        assert!(!data.contains_key(""));
    }

    #[test]
    fn missing_element_has_no_data() {
        let page = MemoryPage::new();
        assert!(element_data(&page, &Selector::id("nope"), "x").is_empty());
    }
}
