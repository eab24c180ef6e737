use crate::extraction::{PageWords, WordToken};

/// Fraction of a token's own height used as the vertical grouping band.
/// Derived from local height rather than a fixed value so that grouping
/// survives font-size variation and sub-pixel column offsets.
const LINE_TOLERANCE_FACTOR: f32 = 0.5;

/// Floor for tokens with zero or negative box height.
const MIN_LINE_TOLERANCE: f32 = 2.0;

/// A horizontally ordered group of word tokens inferred to share a text
/// baseline. Not mutated after assembly.
#[derive(Debug, Clone)]
pub struct Line {
    pub page_number: usize,
    /// Global index in the page-concatenated line sequence.
    pub index: usize,
    pub tokens: Vec<WordToken>,
}

impl Line {
    /// Line text with tokens joined by single spaces, left to right.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

struct LineBucket {
    center_sum: f32,
    tokens: Vec<WordToken>,
}

impl LineBucket {
    fn mean_center(&self) -> f32 {
        self.center_sum / self.tokens.len() as f32
    }
}

/// Group per-page word tokens into baseline lines, concatenating pages in
/// page order and assigning global line indices.
///
/// Tokens are taken in vertical-center order; each token joins the bucket
/// whose running mean center lies within the token's height-derived
/// tolerance, otherwise it opens a new bucket. Within a line, tokens are
/// ordered left to right. Empty pages contribute no lines.
pub fn assemble_lines(pages: &[PageWords]) -> Vec<Line> {
    let mut lines = Vec::new();

    for page in pages {
        let mut ordered: Vec<&WordToken> = page.words.iter().collect();
        ordered.sort_by(|a, b| {
            a.v_center()
                .partial_cmp(&b.v_center())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut buckets: Vec<LineBucket> = Vec::new();
        for token in ordered {
            let tolerance = (token.height() * LINE_TOLERANCE_FACTOR).max(MIN_LINE_TOLERANCE);
            let center = token.v_center();

            match buckets
                .iter()
                .position(|b| (b.mean_center() - center).abs() < tolerance)
            {
                Some(i) => {
                    buckets[i].center_sum += center;
                    buckets[i].tokens.push(token.clone());
                }
                None => buckets.push(LineBucket {
                    center_sum: center,
                    tokens: vec![token.clone()],
                }),
            }
        }

        buckets.sort_by(|a, b| {
            a.mean_center()
                .partial_cmp(&b.mean_center())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for mut bucket in buckets {
            bucket.tokens.sort_by(|a, b| {
                a.bbox
                    .x_min
                    .partial_cmp(&b.bbox.x_min)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            lines.push(Line {
                page_number: page.page_number,
                index: lines.len(),
                tokens: bucket.tokens,
            });
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::BBox;

    fn token(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> WordToken {
        WordToken {
            text: text.into(),
            bbox: BBox {
                x_min: x0,
                y_min: y0,
                x_max: x1,
                y_max: y1,
            },
        }
    }

    fn page(number: usize, words: Vec<WordToken>) -> PageWords {
        PageWords {
            page_number: number,
            words,
        }
    }

    #[test]
    fn test_tokens_within_tolerance_share_line() {
        // Height 10 -> tolerance 5; offset 0.8 keeps the tokens together.
        let pages = vec![page(
            1,
            vec![
                token("Hemoglobina", 10.0, 100.0, 80.0, 110.0),
                token("14,5", 200.0, 100.8, 220.0, 110.8),
            ],
        )];
        let lines = assemble_lines(&pages);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Hemoglobina 14,5");
    }

    #[test]
    fn test_tokens_beyond_tolerance_split() {
        // Height 10 -> tolerance 5; offset 12 forces separate lines.
        let pages = vec![page(
            1,
            vec![
                token("Hemoglobina", 10.0, 100.0, 80.0, 110.0),
                token("14,5", 200.0, 112.0, 220.0, 122.0),
            ],
        )];
        let lines = assemble_lines(&pages);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_line_ordered_left_to_right() {
        let pages = vec![page(
            1,
            vec![
                token("g/dL", 300.0, 100.0, 330.0, 110.0),
                token("14,5", 200.0, 100.3, 220.0, 110.3),
                token("Hemoglobina", 10.0, 100.1, 80.0, 110.1),
            ],
        )];
        let lines = assemble_lines(&pages);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Hemoglobina 14,5 g/dL");
    }

    #[test]
    fn test_zero_height_token_uses_floor() {
        let pages = vec![page(
            1,
            vec![
                token("Glicose", 10.0, 100.0, 60.0, 100.0),
                token("95", 200.0, 101.0, 215.0, 101.0),
            ],
        )];
        // Both degenerate boxes; centers 1.0 apart, inside the 2.0 floor.
        let lines = assemble_lines(&pages);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_pages_concatenated_with_global_indices() {
        let pages = vec![
            page(1, vec![token("Glicose", 10.0, 100.0, 60.0, 110.0)]),
            page(2, vec![token("Ureia", 10.0, 100.0, 50.0, 110.0)]),
        ];
        let lines = assemble_lines(&pages);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].page_number, 1);
        assert_eq!(lines[0].index, 0);
        assert_eq!(lines[1].page_number, 2);
        assert_eq!(lines[1].index, 1);
    }

    #[test]
    fn test_empty_page_yields_no_lines() {
        let pages = vec![page(1, vec![])];
        assert!(assemble_lines(&pages).is_empty());
    }
}
