use client_core::ScoreColor;
use eframe::egui::Color32;

pub const SUCCESS: Color32 = Color32::from_rgb(35, 165, 90);
pub const WARNING: Color32 = Color32::from_rgb(232, 168, 56);
pub const DANGER: Color32 = Color32::from_rgb(240, 71, 71);
pub const CARD_FILL: Color32 = Color32::from_rgb(36, 36, 40);
pub const CARD_STROKE: Color32 = Color32::from_rgb(58, 60, 70);
pub const BANNER_FILL: Color32 = Color32::from_rgb(63, 39, 43);

pub fn score_fill(color: ScoreColor) -> Color32 {
    match color {
        ScoreColor::Success => SUCCESS,
        ScoreColor::Warning => WARNING,
        ScoreColor::Danger => DANGER,
    }
}

#[cfg(test)]
mod tests {
    use client_core::score_color;

    use super::*;

    #[test]
    fn score_bands_map_to_palette() {
        assert_eq!(score_fill(score_color(9)), SUCCESS);
        assert_eq!(score_fill(score_color(6)), WARNING);
        assert_eq!(score_fill(score_color(2)), DANGER);
    }
}
