//! Prompt composition for icon generation.
//!
//! Turns a theme, a style preset, and optional brand colors into the four
//! prompts sent to the image model. The four prompts differ only in their
//! variation phrase; everything else is identical so the set stays
//! stylistically consistent.

use crate::styles::StylePreset;

/// Fixed rendering directives appended to every prompt.
const QUALITY_SUFFIX: &str = "single icon, 512x512, high quality, isolated on background";

/// Build the four variation phrases for a theme. These exist purely to bias
/// the model toward four distinct compositions instead of near-duplicates.
fn icon_variations(theme: &str) -> [String; 4] {
    [
        format!("{theme} icon design, first variation, unique representation"),
        format!("{theme} icon design, second variation, different perspective"),
        format!("{theme} icon design, third variation, alternative concept"),
        format!("{theme} icon design, fourth variation, creative interpretation"),
    ]
}

/// Rewrite the hard-coded color phrases inside a style modifier with the
/// user's colors.
///
/// The substitutions are keyed by literal substrings of the preset texts in
/// [`crate::styles`]. A modifier containing none of them passes through
/// unchanged; the brittleness is intentional and the preset texts depend on
/// it, so do not replace this with a semantic rewrite.
fn substitute_colors(modifier: &str, color_phrase: &str, first_color: &str) -> String {
    modifier
        .replace(
            "lavender purple to soft pink to cream yellow",
            color_phrase,
        )
        .replace("pink to purple to yellow", color_phrase)
        .replace("purple-blue", first_color)
        .replace("pastel mint and pink", color_phrase)
        .replace(
            "blue plastic material, cyan and blue gradient",
            &format!("plastic material in {color_phrase}"),
        )
        .replace("cyan and blue gradient", color_phrase)
        .replace("dark teal green", first_color)
}

/// Compose exactly four prompts for one generation request.
///
/// `colors` is trusted to already be trimmed and free of blank entries; the
/// request boundary owns that filtering.
pub fn build_icon_prompts(theme: &str, style: &StylePreset, colors: &[String]) -> Vec<String> {
    icon_variations(theme)
        .into_iter()
        .map(|variation| {
            if colors.is_empty() {
                return format!("{variation}, {}, {QUALITY_SUFFIX}", style.prompt_modifier);
            }

            let color_phrase = colors.join(" and ");
            let first_color = colors[0].as_str();
            let modifier = substitute_colors(style.prompt_modifier, &color_phrase, first_color);

            format!(
                "IMPORTANT: Use only these brand colors: {color_phrase}. \
                 {variation}, {modifier}, {QUALITY_SUFFIX}, \
                 strictly use colors: {color_phrase}"
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::style_by_id;

    fn colors(values: &[&str]) -> Vec<String> {
        values.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn produces_four_distinct_prompts_containing_theme_and_modifier() {
        let style = style_by_id(1).expect("style 1");
        let prompts = build_icon_prompts("Rocket", style, &[]);

        assert_eq!(prompts.len(), 4);
        for prompt in &prompts {
            assert!(prompt.to_lowercase().contains("rocket"));
            assert!(prompt.contains(style.prompt_modifier));
        }
        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn without_colors_no_color_instruction_appears() {
        let style = style_by_id(2).expect("style 2");
        let prompts = build_icon_prompts("Coffee", style, &[]);

        for prompt in &prompts {
            assert!(!prompt.contains("IMPORTANT: Use only these brand colors"));
            assert!(!prompt.contains("strictly use colors"));
            assert!(prompt.ends_with(QUALITY_SUFFIX));
        }
    }

    #[test]
    fn with_colors_every_prompt_carries_every_color() {
        let style = style_by_id(1).expect("style 1");
        let palette = colors(&["#ff0000", "#00ff00"]);
        let prompts = build_icon_prompts("Toys", style, &palette);

        assert_eq!(prompts.len(), 4);
        for prompt in &prompts {
            assert!(prompt.contains("#ff0000"));
            assert!(prompt.contains("#00ff00"));
            assert!(prompt.starts_with("IMPORTANT: Use only these brand colors: #ff0000 and #00ff00."));
            assert!(prompt.contains("strictly use colors: #ff0000 and #00ff00"));
        }
    }

    #[test]
    fn gradient_line_art_phrase_is_rewritten() {
        let style = style_by_id(1).expect("style 1");
        let prompts = build_icon_prompts("Toys", style, &colors(&["#123456"]));

        for prompt in &prompts {
            assert!(!prompt.contains("lavender purple to soft pink to cream yellow"));
            assert!(prompt.contains("gradient fill from #123456"));
        }
    }

    #[test]
    fn first_color_substitutions_use_only_the_first_color() {
        let playful = style_by_id(2).expect("style 2");
        let badge = style_by_id(5).expect("style 5");
        let palette = colors(&["#111111", "#222222"]);

        for prompt in build_icon_prompts("Pets", playful, &palette) {
            assert!(!prompt.contains("purple-blue"));
            assert!(prompt.contains("soft #111111 circular bubble background"));
        }
        for prompt in build_icon_prompts("Pets", badge, &palette) {
            assert!(!prompt.contains("dark teal green"));
            assert!(prompt.contains("on #111111 circular background"));
        }
    }

    #[test]
    fn glossy_3d_material_phrase_is_rewritten_as_a_unit() {
        let style = style_by_id(4).expect("style 4");
        let prompts = build_icon_prompts("Music", style, &colors(&["#abcdef"]));

        for prompt in &prompts {
            assert!(!prompt.contains("blue plastic material, cyan and blue gradient"));
            assert!(prompt.contains("plastic material in #abcdef"));
        }
    }

    #[test]
    fn style_without_matched_phrases_still_gets_color_instructions() {
        // Whimsical Clouds only matches "pastel mint and pink"; a synthetic
        // preset with no matching phrase exercises the no-op fallback.
        let style = StylePreset {
            id: 99,
            name: "Synthetic",
            description: "no color phrases",
            prompt_modifier: "plain geometric icon, no named colors anywhere",
        };
        let prompts = build_icon_prompts("Maps", &style, &colors(&["#fedcba"]));

        for prompt in &prompts {
            assert!(prompt.contains("plain geometric icon, no named colors anywhere"));
            assert!(prompt.starts_with("IMPORTANT: Use only these brand colors: #fedcba."));
            assert!(prompt.contains("strictly use colors: #fedcba"));
        }
    }

    #[test]
    fn color_substitution_is_identical_across_all_four_prompts() {
        let style = style_by_id(3).expect("style 3");
        let prompts = build_icon_prompts("Books", style, &colors(&["#333333"]));

        let markers = [
            "unique representation",
            "different perspective",
            "alternative concept",
            "creative interpretation",
        ];
        // Everything after the variation phrase is identical across the set.
        let tails: Vec<&str> = prompts
            .iter()
            .zip(markers)
            .map(|(prompt, marker)| {
                prompt
                    .split_once(marker)
                    .map(|(_, tail)| tail)
                    .expect("variation marker present")
            })
            .collect();
        for tail in &tails {
            assert_eq!(*tail, tails[0]);
        }
    }
}
