use crate::entity::{Rect, Score, Token};

/// Collect every uncollected token whose box overlaps `player_bounds`, adding
/// `value` per token. Returns how many were collected by this call.
pub fn collect_tokens(
    player_bounds: &Rect,
    tokens: &mut [Token],
    score: &mut Score,
    value: u32,
) -> usize {
    let mut collected = 0;
    for token in tokens.iter_mut().filter(|t| !t.is_collected()) {
        if player_bounds.intersects(&token.bounds()) && token.collect() {
            score.add(value);
            collected += 1;
        }
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelFile;
    use glam::Vec2;

    fn player_box(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 30.0, 30.0)
    }

    #[test]
    fn overlapping_token_scores_once() {
        let mut tokens = vec![Token::new(Vec2::new(500.0, 510.0), 10.0)];
        let mut score = Score::default();

        let player = player_box(495.0, 520.0);
        assert_eq!(collect_tokens(&player, &mut tokens, &mut score, 10), 1);
        assert!(tokens[0].is_collected());
        assert_eq!(score.value(), 10);

        assert_eq!(collect_tokens(&player, &mut tokens, &mut score, 10), 0);
        assert_eq!(score.value(), 10);
    }

    #[test]
    fn distant_token_is_left_alone() {
        let mut tokens = vec![Token::new(Vec2::new(700.0, 510.0), 10.0)];
        let mut score = Score::default();
        assert_eq!(
            collect_tokens(&player_box(50.0, 520.0), &mut tokens, &mut score, 10),
            0
        );
        assert!(!tokens[0].is_collected());
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn edge_contact_does_not_collect() {
        let mut tokens = vec![Token::new(Vec2::new(530.0, 520.0), 10.0)];
        let mut score = Score::default();
        // Player's right edge sits exactly on the token's left edge.
        collect_tokens(&player_box(500.0, 520.0), &mut tokens, &mut score, 10);
        assert!(!tokens[0].is_collected());
    }

    #[test]
    fn one_sweep_can_collect_several_tokens() {
        let mut tokens = vec![
            Token::new(Vec2::new(100.0, 100.0), 5.0),
            Token::new(Vec2::new(115.0, 115.0), 5.0),
            Token::new(Vec2::new(300.0, 300.0), 5.0),
        ];
        let mut score = Score::default();
        let collected = collect_tokens(&player_box(100.0, 100.0), &mut tokens, &mut score, 10);
        assert_eq!(collected, 2);
        assert_eq!(score.value(), 20);
    }

    #[test]
    fn visiting_every_default_token_scores_sixty() {
        let level = LevelFile::builtin();
        let mut tokens: Vec<Token> = level.tokens.iter().map(|t| t.to_token()).collect();
        assert_eq!(tokens.len(), 6);
        let mut score = Score::default();

        for i in 0..tokens.len() {
            let target = tokens[i].position;
            collect_tokens(&player_box(target.x, target.y), &mut tokens, &mut score, 10);
        }

        assert!(tokens.iter().all(Token::is_collected));
        assert_eq!(score.value(), 60);
    }
}
