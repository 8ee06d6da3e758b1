use crate::config::EngineConfig;
use anyhow::{bail, Context, Result};
use margin_feedback::{
    ArticleAggregate, ArticleSession, EmptyFeedbackSource, FeedbackEvent, FeedbackSource,
    Heatmap, HeatmapProjector, JsonFileStore,
};
use margin_segmenter::{ParagraphSegment, Segmenter};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutput {
    pub article_id: String,
    pub segments: usize,
    pub applied: usize,
    pub aggregate: ArticleAggregate,
    pub heatmap: Heatmap,
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} {}", path.display()))
}

fn projector(config: &EngineConfig, top: Option<usize>) -> Result<HeatmapProjector> {
    let mut heatmap = config.heatmap;
    if let Some(top_n) = top {
        heatmap.top_n = top_n;
    }
    Ok(HeatmapProjector::new(heatmap)?)
}

pub fn segment(config: &EngineConfig, content_path: &Path) -> Result<Vec<ParagraphSegment>> {
    let segmenter = Segmenter::new(config.segmenter.clone())?;
    let content = read_text(content_path, "content")?;
    let segments = segmenter.segment(&content);
    log::info!(
        "Segmented {} into {} paragraphs",
        content_path.display(),
        segments.len()
    );
    Ok(segments)
}

/// Parse one feedback event per line; blank lines are skipped
pub fn parse_events(raw: &str) -> Result<Vec<FeedbackEvent>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<FeedbackEvent>(line)
                .with_context(|| format!("Invalid event on line {}", idx + 1))
        })
        .collect()
}

pub struct ReplayArgs<'a> {
    pub content: &'a Path,
    pub events: &'a Path,
    pub article_id: Option<&'a str>,
    pub store: Option<&'a Path>,
    pub top: Option<usize>,
}

pub fn replay(config: &EngineConfig, args: ReplayArgs<'_>) -> Result<ReplayOutput> {
    let article_id = match args.article_id {
        Some(id) => id.to_string(),
        None => args
            .content
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(str::to_string)
            .with_context(|| {
                format!(
                    "Cannot derive an article id from {}; pass --article-id",
                    args.content.display()
                )
            })?,
    };

    let segmenter = Segmenter::new(config.segmenter.clone())?;
    let projector = projector(config, args.top)?;
    let content = read_text(args.content, "content")?;
    let events = parse_events(&read_text(args.events, "events")?)?;

    let store = args.store.map(JsonFileStore::new);
    let source: &dyn FeedbackSource = match &store {
        Some(store) => store,
        None => &EmptyFeedbackSource,
    };

    let mut session = ArticleSession::open(&article_id, &content, &segmenter, source)
        .with_context(|| format!("Failed to load feedback for {article_id}"))?;
    let applied = events.len();
    for event in events {
        session.submit_event(event);
    }

    if let Err(err) = session.aggregate().verify() {
        bail!("Aggregate invariant broken after replay: {err}");
    }

    if let Some(store) = &store {
        let path = store.save(session.aggregate())?;
        log::info!("Saved {} to {}", article_id, path.display());
    }

    log::info!("Applied {applied} events to {article_id}");
    Ok(ReplayOutput {
        article_id,
        segments: session.segments().len(),
        applied,
        heatmap: session.heatmap(&projector),
        aggregate: session.into_aggregate(),
    })
}

pub fn heatmap(config: &EngineConfig, snapshot_path: &Path, top: Option<usize>) -> Result<Heatmap> {
    let projector = projector(config, top)?;
    let raw = read_text(snapshot_path, "snapshot")?;
    let snapshot: ArticleAggregate = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid snapshot {}", snapshot_path.display()))?;
    snapshot
        .verify()
        .with_context(|| format!("Inconsistent snapshot {}", snapshot_path.display()))?;
    Ok(projector.project(&snapshot))
}
