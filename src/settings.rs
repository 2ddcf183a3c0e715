//! Component options
//!
//! Each mounted element carries its options as a camelCase JSON object in a
//! data attribute. Missing fields take the defaults below; a malformed
//! attribute falls back to defaults entirely.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_THROW_FACTOR;
use crate::typewriter::CursorBlink;

/// Options for the picture ball canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BallSettings {
    /// Selector for the element whose box bounds the ball
    pub container_selector: String,
    pub z_index: i32,
    /// Drag speed multiplier applied when the ball is thrown
    pub throw_factor: f64,
    pub image_src: String,
    /// Extra classes for the canvas
    pub class_name: Option<String>,
    /// Extra inline style, appended after the positioning style
    pub style: Option<String>,
}

impl Default for BallSettings {
    fn default() -> Self {
        Self {
            container_selector: "[data-physics-container]".to_string(),
            z_index: 50,
            throw_factor: DEFAULT_THROW_FACTOR,
            image_src: "/Picture2.jpg".to_string(),
            class_name: None,
            style: None,
        }
    }
}

impl BallSettings {
    /// Data attribute read from the canvas
    pub const ATTRIBUTE: &'static str = "data-picture-ball";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    /// Inline style for the canvas element
    pub fn canvas_style(&self) -> String {
        let mut style = format!(
            "position:absolute;inset:0;width:100%;height:100%;display:block;\
             z-index:{};pointer-events:auto;",
            self.z_index
        );
        if let Some(extra) = &self.style {
            style.push_str(extra);
        }
        style
    }
}

/// `text` may be a single string or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextSource {
    One(String),
    Many(Vec<String>),
}

impl Default for TextSource {
    fn default() -> Self {
        TextSource::Many(Vec::new())
    }
}

impl TextSource {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TextSource::One(s) => vec![s.clone()],
            TextSource::Many(v) => v.clone(),
        }
    }
}

/// Per-character typing delay drawn uniformly from `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f64,
    pub max: f64,
}

/// Options for the typewriter text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypewriterSettings {
    pub text: TextSource,
    /// Milliseconds per typed character
    pub typing_speed: f64,
    /// Extra wait before the first character of each sentence
    pub initial_delay: f64,
    /// Wait between finishing a sentence and deleting or advancing
    pub pause_duration: f64,
    /// Milliseconds per deleted character
    pub deleting_speed: f64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub variable_speed: Option<SpeedRange>,
    pub reverse_mode: bool,

    // === Cursor ===
    pub show_cursor: bool,
    pub hide_cursor_while_typing: bool,
    pub cursor_character: String,
    pub cursor_class_name: String,
    /// Seconds per half blink
    pub cursor_blink_duration: f64,
    pub cursor_blink_mode: CursorBlink,

    // === Visibility ===
    pub start_on_visible: bool,
    pub pause_on_hidden: bool,
    pub start_once: bool,

    // === Style ===
    pub class_name: String,
    /// Cycled per sentence
    pub text_colors: Vec<String>,
}

impl Default for TypewriterSettings {
    fn default() -> Self {
        Self {
            text: TextSource::default(),
            typing_speed: 50.0,
            initial_delay: 0.0,
            pause_duration: 2000.0,
            deleting_speed: 30.0,
            looping: true,
            variable_speed: None,
            reverse_mode: false,

            show_cursor: true,
            hide_cursor_while_typing: false,
            cursor_character: "|".to_string(),
            cursor_class_name: String::new(),
            cursor_blink_duration: 0.5,
            cursor_blink_mode: CursorBlink::Css,

            start_on_visible: false,
            pause_on_hidden: false,
            start_once: true,

            class_name: String::new(),
            text_colors: Vec::new(),
        }
    }
}

impl TypewriterSettings {
    /// Data attribute read from the text host element
    pub const ATTRIBUTE: &'static str = "data-type-text";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(json)
    }

    /// Settings with just the given sentences
    pub fn with_text<S: Into<String>>(sentences: impl IntoIterator<Item = S>) -> Self {
        Self {
            text: TextSource::Many(sentences.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }
}

/// Read and parse an element's options attribute, falling back to defaults
#[cfg(target_arch = "wasm32")]
pub fn load_from<T>(element: &web_sys::Element, attribute: &str, parse: fn(&str) -> Result<T, serde_json::Error>) -> T
where
    T: Default,
{
    let Some(raw) = element.get_attribute(attribute) else {
        return T::default();
    };
    match parse(&raw) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Invalid {} ({}), using defaults", attribute, e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_defaults_from_empty_attribute() {
        let settings = BallSettings::from_json("  ").unwrap();
        assert_eq!(settings, BallSettings::default());
        assert_eq!(settings.container_selector, "[data-physics-container]");
        assert_eq!(settings.throw_factor, 0.8);
        assert_eq!(settings.z_index, 50);
    }

    #[test]
    fn test_ball_partial_json_keeps_other_defaults() {
        let settings = BallSettings::from_json(r#"{"throwFactor": 1.5, "zIndex": 3}"#).unwrap();
        assert_eq!(settings.throw_factor, 1.5);
        assert_eq!(settings.z_index, 3);
        assert_eq!(settings.image_src, "/Picture2.jpg");
    }

    #[test]
    fn test_canvas_style_appends_pass_through() {
        let settings = BallSettings {
            style: Some("opacity:0.5;".to_string()),
            ..Default::default()
        };
        let style = settings.canvas_style();
        assert!(style.contains("z-index:50;"));
        assert!(style.ends_with("opacity:0.5;"));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(BallSettings::from_json("{nope").is_err());
        assert!(TypewriterSettings::from_json(r#"{"typingSpeed": "fast"}"#).is_err());
    }

    #[test]
    fn test_text_accepts_string_or_list() {
        let one = TypewriterSettings::from_json(r#"{"text": "Hello"}"#).unwrap();
        assert_eq!(one.text.to_vec(), vec!["Hello".to_string()]);

        let many = TypewriterSettings::from_json(r#"{"text": ["a", "b"]}"#).unwrap();
        assert_eq!(many.text.to_vec(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_typewriter_camel_case_fields() {
        let json = r#"{
            "text": "x",
            "loop": false,
            "reverseMode": true,
            "variableSpeed": {"min": 10, "max": 40},
            "cursorBlinkMode": "gsap",
            "startOnVisible": true
        }"#;
        let settings = TypewriterSettings::from_json(json).unwrap();
        assert!(!settings.looping);
        assert!(settings.reverse_mode);
        assert_eq!(settings.variable_speed, Some(SpeedRange { min: 10.0, max: 40.0 }));
        assert_eq!(settings.cursor_blink_mode, CursorBlink::Gsap);
        assert!(settings.start_on_visible);
        assert_eq!(settings.pause_duration, 2000.0);
    }
}
