use margin_segmenter::{segment, SegmentKind, Segmenter, SegmenterConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn ids(content: &str) -> Vec<String> {
    segment(content)
        .into_iter()
        .map(|s| s.paragraph_id)
        .collect()
}

#[test]
fn scenario_title_and_two_paragraphs() {
    let texts: Vec<String> = segment("# Title\n\nPara A\n\nPara B")
        .into_iter()
        .map(|s| s.raw_text)
        .collect();
    assert_eq!(texts, vec!["# Title", "Para A", "Para B"]);
}

#[test]
fn scenario_fence_with_interior_blank_line() {
    let segments = segment("```\nline1\n\nline2\n```");
    assert_eq!(segments.len(), 1);
    for line in ["```", "line1", "line2"] {
        assert!(segments[0].raw_text.contains(line), "missing {line:?}");
    }
}

#[test]
fn real_post_is_stable_across_runs() {
    let post = "# Shipping a blog\n\nI rewrote the engine.\nIt took a weekend.\n\n## Why\n\nBecause the old one leaked timers.\n\n```\nlet x = 1;\n\nlet y = 2;\n```\n\nThe end.";
    let first = ids(post);
    let second = ids(post);
    assert_eq!(first, second);
    assert_eq!(first, vec!["p-0", "p-1", "p-2", "p-3", "p-4", "p-5"]);

    let segments = segment(post);
    assert_eq!(segments[4].kind, SegmentKind::Code);
    assert_eq!(segments[4].raw_text, "```\nlet x = 1;\n\nlet y = 2;\n```");
}

proptest! {
    #[test]
    fn proptest_segmentation_is_deterministic(content in "[a-z#` \n]{0,200}") {
        prop_assert_eq!(ids(&content), ids(&content));
    }

    #[test]
    fn proptest_ids_follow_ordinals(content in "[a-z# \n]{0,200}") {
        for (idx, seg) in segment(&content).iter().enumerate() {
            prop_assert_eq!(seg.ordinal_index, idx);
            prop_assert_eq!(&seg.paragraph_id, &format!("p-{idx}"));
        }
    }

    #[test]
    fn proptest_fenced_block_lands_in_one_segment(
        before in "[a-z]{1,12}",
        code_a in "[a-z]{1,12}",
        code_b in "[a-z]{1,12}",
        blanks in 1usize..4,
        after in "[a-z]{1,12}",
    ) {
        let gap = "\n".repeat(blanks + 1);
        let block = format!("```\n{code_a}{gap}{code_b}\n```");
        let content = format!("{before}\n\n{block}\n\n{after}");

        let segmenter = Segmenter::new(SegmenterConfig::fine_grained()).unwrap();
        let segments = segmenter.segment(&content);

        let holders: Vec<_> = segments
            .iter()
            .filter(|s| s.raw_text.contains(&code_a) || s.raw_text.contains(&code_b))
            .filter(|s| s.kind == SegmentKind::Code)
            .collect();
        prop_assert_eq!(holders.len(), 1);
        prop_assert_eq!(&holders[0].raw_text, &block);
    }
}
