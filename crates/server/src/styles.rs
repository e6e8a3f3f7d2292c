//! Style catalog.
//!
//! Fixed table of the five visual styles an icon set can be rendered in.
//! The prompt modifier texts are load-bearing: the color substitutions in
//! [`crate::prompts`] match literal phrases inside them.

use serde::Serialize;

/// One of the five fixed visual styles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePreset {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub prompt_modifier: &'static str,
}

/// All available style presets, ids 1..=5 with no gaps.
pub static STYLE_PRESETS: [StylePreset; 5] = [
    StylePreset {
        id: 1,
        name: "Gradient Line Art",
        description: "Clean line art with pink-purple-yellow gradient fill",
        prompt_modifier: "clean flat vector icon, soft pastel gradient fill from lavender purple to soft pink to cream yellow, thin dark gray outline stroke, simple flat 2D illustration, smooth soft color transitions, solid light gray rounded rectangle background, centered single object, cute minimal vector illustration style, no shadows, no 3D effects, muted pastel colors, simple shapes",
    },
    StylePreset {
        id: 2,
        name: "Playful Bubble",
        description: "Colorful doodle style with circular bubble background and stars",
        prompt_modifier: "cute colorful doodle icon, soft purple-blue circular bubble background, small yellow stars and dots decorations around, playful cartoon style, vibrant colors, hand-drawn feel, whimsical illustration, centered composition, cheerful and fun aesthetic",
    },
    StylePreset {
        id: 3,
        name: "Whimsical Clouds",
        description: "Cute illustrated style with clouds and pastel colors",
        prompt_modifier: "cute whimsical icon with small white clouds, soft pastel mint and pink colors, small stars scattered around, dreamy illustration style, gentle colors, kawaii aesthetic, light airy feel, adorable cartoon style, white background with decorative elements",
    },
    StylePreset {
        id: 4,
        name: "Glossy 3D",
        description: "Shiny blue plastic 3D look with reflections",
        prompt_modifier: "glossy 3D rendered icon, shiny blue plastic material, cyan and blue gradient, strong specular highlights, reflective surface, modern 3D style, clean white background, professional app icon look, smooth rounded form, single object",
    },
    StylePreset {
        id: 5,
        name: "Circle Badge",
        description: "White silhouette icon inside dark teal circular badge",
        prompt_modifier: "flat minimal icon, white silhouette on dark teal green circular background, badge style, simple flat design, no gradients on icon, solid circle background, minimal details, clean vector style, logo icon aesthetic, centered white shape on colored circle",
    },
];

/// Look up a style preset by id. The table is small enough that a linear
/// scan beats any index structure.
pub fn style_by_id(id: u32) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|style| style.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_matching_preset_for_all_ids() {
        for id in 1..=5 {
            let preset = style_by_id(id).expect("preset should exist");
            assert_eq!(preset.id, id);
        }
    }

    #[test]
    fn lookup_returns_none_outside_catalog() {
        assert!(style_by_id(0).is_none());
        assert!(style_by_id(6).is_none());
        assert!(style_by_id(99).is_none());
    }

    #[test]
    fn catalog_has_unique_ids_and_names() {
        for (i, a) in STYLE_PRESETS.iter().enumerate() {
            for b in STYLE_PRESETS.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn serializes_with_camel_case_modifier() {
        let json = serde_json::to_value(&STYLE_PRESETS[0]).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Gradient Line Art");
        assert!(json["promptModifier"]
            .as_str()
            .expect("promptModifier is a string")
            .contains("clean flat vector icon"));
    }
}
