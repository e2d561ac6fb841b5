use crate::config::FadeConfig;

/// Alpha at normalized life `t`: a linear rise from `start_alpha` to
/// `peak_alpha` until `peak_until_ratio`, then a linear fall to zero at `t = 1`.
#[inline]
pub fn peak_fade(t: f32, fade: &FadeConfig) -> f32 {
    let peak = fade.peak_alpha;
    if t < fade.peak_until_ratio {
        fade.start_alpha + (peak - fade.start_alpha) * t / fade.peak_until_ratio
    } else {
        peak * (1.0 - (t - fade.peak_until_ratio) / (1.0 - fade.peak_until_ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn rises_then_falls() {
        let fade = FadeConfig::default();
        assert!(close(peak_fade(0.0, &fade), 0.1));
        assert!(close(peak_fade(0.125, &fade), 0.5));
        assert!(close(peak_fade(0.25, &fade), 0.9));
        assert!(close(peak_fade(0.625, &fade), 0.45));
        assert!(close(peak_fade(1.0, &fade), 0.0));
    }

    #[test]
    fn peak_is_the_maximum() {
        let fade = FadeConfig::default();
        let max = (0..=100)
            .map(|i| peak_fade(i as f32 / 100.0, &fade))
            .fold(0.0_f32, f32::max);
        assert!(close(max, fade.peak_alpha));
    }
}
