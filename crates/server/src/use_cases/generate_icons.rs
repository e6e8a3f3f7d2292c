//! Multi-image generation orchestration.
//!
//! Fans out one generation call per prompt against the image port and joins
//! them. The result is all-or-nothing: the first failing call fails the whole
//! set and no partial image list is ever returned.

use futures_util::future::try_join_all;
use std::sync::Arc;

use crate::infrastructure::ports::{IconRender, ImageGenError, ImageGenPort};

/// Seed spacing between sibling prompts of one request. Keeps otherwise
/// near-identical prompts from collapsing into near-identical images.
const SEED_STRIDE: i64 = 1000;

/// Generate one image per prompt, concurrently, preserving prompt order.
///
/// Seeds are pairwise distinct within a request: `base_seed + index * 1000`
/// when a base seed is supplied, otherwise derived from the current
/// timestamp the same way.
pub async fn generate_icon_set(
    image_gen: &Arc<dyn ImageGenPort>,
    prompts: &[String],
    base_seed: Option<i64>,
) -> Result<Vec<String>, ImageGenError> {
    if prompts.is_empty() {
        return Ok(Vec::new());
    }

    let base = base_seed.unwrap_or_else(|| chrono::Utc::now().timestamp_millis());

    let renders = prompts.iter().enumerate().map(|(index, prompt)| {
        let render = IconRender::new(prompt.clone()).with_seed(base + index as i64 * SEED_STRIDE);
        image_gen.generate(render)
    });

    // try_join_all preserves input order and resolves as soon as any branch
    // fails, discarding the siblings' results.
    try_join_all(renders).await
}
