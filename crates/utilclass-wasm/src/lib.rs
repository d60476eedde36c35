//! WASM bindings for the utility-class parser.
//!
//! Exposes `parse()`, `flatten()` and `query()` to JavaScript via
//! wasm-bindgen. Options are passed as an optional plain object with the
//! camelCase field names of `ParseOptions`; results come back as plain
//! objects. Invalid options throw.

use serde::Serialize;
use utilclass_parser::ParseOptions;
use wasm_bindgen::prelude::*;

fn options_from_js(options: JsValue) -> Result<ParseOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(ParseOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    // Plain objects instead of `Map`s so callers can use dot access.
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Parse class text.
///
/// Returns `{ tree, classList, empty, selection }`.
#[wasm_bindgen]
pub fn parse(text: &str, options: JsValue) -> Result<JsValue, JsError> {
    let options = options_from_js(options)?;
    let result =
        utilclass_parser::parse(text, &options).map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&result)
}

/// Flatten class text to fully qualified class names.
///
/// Returns an array of strings.
#[wasm_bindgen]
pub fn flatten(text: &str, options: JsValue) -> Result<js_sys::Array, JsError> {
    let options = options_from_js(options)?;
    let classes =
        utilclass_parser::flatten(text, &options).map_err(|e| JsError::new(&e.to_string()))?;
    Ok(classes.into_iter().map(JsValue::from).collect())
}

/// Resolve what sits at `cursor`.
///
/// Returns `{ selected, variants, important, insideGroup }`.
#[wasm_bindgen]
pub fn query(text: &str, cursor: usize, hover: bool, options: JsValue) -> Result<JsValue, JsError> {
    let options = options_from_js(options)?;
    let selection = utilclass_parser::query(text, cursor, hover, &options)
        .map_err(|e| JsError::new(&e.to_string()))?;
    to_js(&selection)
}

/// Get the parser version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // =========================================================================
    // Native tests (non-WASM) — verify the pipeline the bindings wrap
    // =========================================================================

    fn native_flatten(text: &str) -> Vec<String> {
        utilclass_parser::flatten(text, &ParseOptions::default()).unwrap()
    }

    #[test]
    fn test_empty_text() {
        assert!(native_flatten("").is_empty());
    }

    #[test]
    fn test_grouped_classes() {
        assert_eq!(
            native_flatten("md:(p-2 hover:m-1)!"),
            vec!["md:p-2!", "md:hover:m-1!"]
        );
    }

    #[test]
    fn test_options_shape_matches_js_names() {
        let json = r#"{"separator":"__","handleBrackets":false,"cursor":3}"#;
        let options: ParseOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.separator, "__");
        assert!(!options.handle_brackets);
        assert_eq!(options.cursor, Some(3));
    }

    #[test]
    fn test_query_pipeline() {
        let selection =
            utilclass_parser::query("md:p-2", 4, true, &ParseOptions::default()).unwrap();
        assert_eq!(selection.selected.map(|t| t.text), Some("p-2"));
    }

    #[test]
    fn test_version() {
        let v = version();
        assert!(!v.is_empty());
        assert!(v.contains('.'));
    }

    #[test]
    fn test_multiple_parses() {
        // No state carried between calls
        let first = native_flatten("a:x");
        let second = native_flatten("b:y");
        assert_eq!(first, vec!["a:x"]);
        assert_eq!(second, vec!["b:y"]);
    }
}
